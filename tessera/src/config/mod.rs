// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::{collections::BTreeMap, fmt, path::PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat, Source};
use getset::{CopyGetters, Getters};
use libtessera::{Algorithm, CipherProfile, Keyring};
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber_init::TracingConfig;
use zeroize::Zeroizing;

use crate::error::Error;

/// Trait to allow default paths to be supplied to [`load`]
pub(crate) trait PathDefaults {
    /// Environment variable prefix
    fn env_prefix(&self) -> String;
    /// The absolute path to use for the config file
    fn config_absolute_path(&self) -> Option<String>;
    /// The default file path to use, relative to the platform config directory
    fn default_file_path(&self) -> String;
    /// The default file name to use
    fn default_file_name(&self) -> String;
    /// The absolute path to use for tracing output, if any
    fn tracing_absolute_path(&self) -> Option<String>;
}

#[derive(Clone, CopyGetters, Debug, Default, Deserialize, Eq, Getters, PartialEq, Serialize)]
pub(crate) struct ConfigTessera {
    #[serde(default)]
    verbose: u8,
    #[serde(default)]
    quiet: u8,
    #[getset(get_copy = "pub(crate)")]
    #[serde(default)]
    enable_std_output: bool,
    #[getset(get = "pub(crate)")]
    #[serde(default)]
    tracing: Tracing,
    /// Key material, keyed by algorithm name
    #[serde(default)]
    keys: BTreeMap<String, KeyEntry>,
}

impl ConfigTessera {
    /// Build the keyring from the configured key material
    pub(crate) fn keyring(&self) -> Result<Keyring> {
        let mut keyring = Keyring::default();
        for (name, entry) in &self.keys {
            let algorithm = name.parse::<Algorithm>()?;
            let key = Zeroizing::new(
                hex::decode(entry.key.trim()).with_context(|| Error::KeyMaterial(name.clone()))?,
            );
            let iv = Zeroizing::new(
                hex::decode(entry.iv.trim()).with_context(|| Error::KeyMaterial(name.clone()))?,
            );
            let _old = keyring.insert(CipherProfile::new(algorithm, &key, &iv)?);
        }
        debug!("keyring holds {} profiles", self.keys.len());
        Ok(keyring)
    }
}

impl TracingConfig for ConfigTessera {
    fn quiet(&self) -> u8 {
        self.quiet
    }

    fn verbose(&self) -> u8 {
        self.verbose
    }

    fn with_target(&self) -> bool {
        self.tracing.with_target
    }

    fn with_thread_ids(&self) -> bool {
        self.tracing.with_thread_ids
    }

    fn with_thread_names(&self) -> bool {
        self.tracing.with_thread_names
    }

    fn with_line_number(&self) -> bool {
        self.tracing.with_line_number
    }

    fn with_level(&self) -> bool {
        self.tracing.with_level
    }
}

/// Tracing configuration
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, Deserialize, Eq, Getters, PartialEq, Serialize)]
#[serde(default)]
pub(crate) struct Tracing {
    /// Should we trace the event target
    with_target: bool,
    /// Should we trace the thread id
    with_thread_ids: bool,
    /// Should we trace the thread names
    with_thread_names: bool,
    /// Should we trace the line numbers
    with_line_number: bool,
    /// Should we trace the level
    with_level: bool,
    /// Additional tracing directives
    #[getset(get = "pub(crate)")]
    directives: Option<String>,
}

/// Hex encoded key material for one algorithm
#[derive(Clone, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct KeyEntry {
    key: String,
    iv: String,
}

impl fmt::Debug for KeyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEntry")
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .finish()
    }
}

/// Load the configuration
///
/// Later sources win: the TOML file, then the environment, then the command line.
/// A missing config file is not an error.
pub(crate) fn load<'a, S, T, D>(cli: &S, defaults: &D) -> Result<T>
where
    T: Deserialize<'a>,
    S: Source + Clone + Send + Sync + 'static,
    D: PathDefaults,
{
    let config_file_path = config_file_path(defaults)?;
    let config = Config::builder()
        .add_source(
            File::from(config_file_path)
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(
            Environment::with_prefix(&defaults.env_prefix())
                .separator("_")
                .try_parsing(true),
        )
        .add_source(cli.clone())
        .build()
        .with_context(|| Error::ConfigBuild)?;
    config
        .try_deserialize::<T>()
        .with_context(|| Error::ConfigDeserialize)
}

fn config_file_path<D>(defaults: &D) -> Result<PathBuf>
where
    D: PathDefaults,
{
    let default_fn = || -> Result<PathBuf> { default_config_file_path(defaults) };
    defaults
        .config_absolute_path()
        .as_ref()
        .map_or_else(default_fn, to_path_buf)
}

fn default_config_file_path<D>(defaults: &D) -> Result<PathBuf>
where
    D: PathDefaults,
{
    let mut config_file_path = dirs2::config_dir().ok_or(Error::ConfigDir)?;
    config_file_path.push(defaults.default_file_path());
    config_file_path.push(defaults.default_file_name());
    let _ = config_file_path.set_extension("toml");
    Ok(config_file_path)
}

#[allow(clippy::unnecessary_wraps)]
pub(crate) fn to_path_buf(path: &String) -> Result<PathBuf> {
    Ok(PathBuf::from(path))
}
