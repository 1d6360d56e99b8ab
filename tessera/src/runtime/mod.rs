// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::{
    ffi::OsString,
    io::{IsTerminal, Write, stdout},
};

use anyhow::{Context, Result};
use clap::Parser;
use libtessera::{
    Keyring, SealedShare, Threshold, split_and_seal, unseal_and_reconstruct, unseal_and_recover,
};
use num_bigint::BigUint;
use tracing::{info, trace};

use crate::{
    config::{ConfigTessera, load},
    error::Error,
    logging::initialize,
    report,
    runtime::cli::{Cli, Commands},
};

mod cli;

pub(crate) fn run<I, T>(args: Option<I>) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    // Parse the command line
    let cli = if let Some(args) = args {
        Cli::try_parse_from(args)?
    } else {
        Cli::try_parse()?
    };

    // Load the configuration
    let config = load::<Cli, ConfigTessera, Cli>(&cli, &cli).with_context(|| Error::ConfigLoad)?;

    // Initialize tracing
    initialize(&config, &config, &cli, None).with_context(|| Error::TracingInit)?;

    trace!("configuration loaded");
    trace!("tracing initialized");

    let keyring = config.keyring().with_context(|| Error::Keyring)?;
    trace!("keyring built");

    let styled = stdout().is_terminal();
    execute(cli.command(), &keyring, styled, &mut stdout())
}

fn execute<W: Write>(
    command: &Commands,
    keyring: &Keyring,
    styled: bool,
    writer: &mut W,
) -> Result<()> {
    match command {
        Commands::Split {
            secret,
            threshold,
            shares,
            algorithm,
        } => {
            let secret = secret
                .trim()
                .parse::<BigUint>()
                .with_context(|| Error::SecretParse)?;
            let threshold = Threshold::new(*threshold, *shares)?;
            let profile = keyring.profile(algorithm)?;
            let sealed = split_and_seal(&secret, &threshold, profile)?;
            info!(
                "split secret into {} shares, {} required",
                threshold.shares(),
                threshold.threshold()
            );
            report::shares(writer, styled, profile.algorithm(), &sealed)
        }
        Commands::Combine {
            threshold,
            algorithm,
            shares,
        } => {
            let profile = keyring.profile(algorithm)?;
            let sealed = parse_shares(shares)?;
            let secret = unseal_and_reconstruct(&sealed, *threshold, profile)?;
            info!("recovered secret from {} shares", sealed.len());
            report::secret(writer, &secret)
        }
        Commands::Recover {
            threshold,
            algorithm,
            identifier,
            shares,
        } => {
            let profile = keyring.profile(algorithm)?;
            let sealed = parse_shares(shares)?;
            let recovered = unseal_and_recover(&sealed, *threshold, *identifier, profile)?;
            info!("issued share {identifier} from {} shares", sealed.len());
            report::shares(writer, styled, profile.algorithm(), &[recovered])
        }
        Commands::Algorithms => report::algorithms(writer, styled, keyring),
    }
}

fn parse_shares(shares: &[String]) -> Result<Vec<SealedShare>> {
    shares
        .iter()
        .map(|share| share.parse::<SealedShare>())
        .collect()
}
