// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use clap::{ArgAction, Parser, Subcommand};
use config::{ConfigError, Map, Source, Value, ValueKind};
use getset::Getters;

use crate::config::PathDefaults;

#[derive(Clone, Debug, Getters, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Set logging verbosity.  More v's, more verbose.
    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Turn up logging verbosity (multiple will turn it up more)",
        conflicts_with = "quiet",
    )]
    verbose: u8,
    /// Set logging quietness.  More q's, more quiet.
    #[clap(
        short,
        long,
        action = ArgAction::Count,
        help = "Turn down logging verbosity (multiple will turn it down more)",
        conflicts_with = "verbose",
    )]
    quiet: u8,
    /// Enable logging to stderr in addition to the tracing output file
    #[clap(short, long, help = "Enable logging to stderr")]
    enable_std_output: bool,
    /// The absolute path to a non-standard config file
    #[clap(short, long, help = "Specify the absolute path to the config file")]
    config_absolute_path: Option<String>,
    /// The absolute path to a tracing output file
    #[clap(
        short,
        long,
        help = "Specify the absolute path to the tracing output file"
    )]
    tracing_absolute_path: Option<String>,
    #[command(subcommand)]
    #[getset(get = "pub(crate)")]
    command: Commands,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub(crate) enum Commands {
    /// Split a secret into sealed shares
    Split {
        /// The secret, as a non-negative decimal integer
        #[clap(short, long)]
        secret: String,
        /// The number of shares required to recover the secret
        #[clap(short = 'k', long)]
        threshold: usize,
        /// The number of shares to produce
        #[clap(short = 'n', long)]
        shares: usize,
        /// The cipher used to seal each share
        #[clap(short, long, default_value = "aes-256-cbc")]
        algorithm: String,
    },
    /// Recover a secret from sealed shares
    Combine {
        /// The number of shares required to recover the secret
        #[clap(short = 'k', long)]
        threshold: usize,
        /// The cipher the shares were sealed with
        #[clap(short, long, default_value = "aes-256-cbc")]
        algorithm: String,
        /// Sealed shares, in `identifier:share` hex form
        #[clap(required = true)]
        shares: Vec<String>,
    },
    /// Issue a sealed replacement share for a new or lost identifier
    Recover {
        /// The number of shares required to recover the secret
        #[clap(short = 'k', long)]
        threshold: usize,
        /// The cipher the shares were sealed with
        #[clap(short, long, default_value = "aes-256-cbc")]
        algorithm: String,
        /// The identifier of the share to issue
        #[clap(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        identifier: u64,
        /// Sealed shares, in `identifier:share` hex form
        #[clap(required = true)]
        shares: Vec<String>,
    },
    /// List the supported ciphers and whether key material is configured
    Algorithms,
}

impl Source for Cli {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut map = Map::new();
        let origin = String::from("command line");
        // Only flags that were given, so unset flags leave the file and environment alone
        if self.verbose > 0 {
            let _old = map.insert(
                "verbose".to_string(),
                Value::new(Some(&origin), ValueKind::U64(u8::into(self.verbose))),
            );
        }
        if self.quiet > 0 {
            let _old = map.insert(
                "quiet".to_string(),
                Value::new(Some(&origin), ValueKind::U64(u8::into(self.quiet))),
            );
        }
        if self.enable_std_output {
            let _old = map.insert(
                "enable_std_output".to_string(),
                Value::new(Some(&origin), ValueKind::Boolean(self.enable_std_output)),
            );
        }
        Ok(map)
    }
}

impl PathDefaults for Cli {
    fn env_prefix(&self) -> String {
        env!("CARGO_PKG_NAME").to_ascii_uppercase()
    }

    fn config_absolute_path(&self) -> Option<String> {
        self.config_absolute_path.clone()
    }

    fn default_file_path(&self) -> String {
        env!("CARGO_PKG_NAME").to_string()
    }

    fn default_file_name(&self) -> String {
        env!("CARGO_PKG_NAME").to_string()
    }

    fn tracing_absolute_path(&self) -> Option<String> {
        self.tracing_absolute_path.clone()
    }
}
