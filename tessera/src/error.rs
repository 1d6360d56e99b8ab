// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use clap::error::ErrorKind;

/// Exit code for failures raised by the sharing engine itself
pub(crate) const SHARING_FAILURE: i32 = 2;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("There is no valid config directory")]
    ConfigDir,
    #[error("Unable to build a valid configuration")]
    ConfigBuild,
    #[error("Unable to deserialize config")]
    ConfigDeserialize,
    #[error("Unable to load a valid configuration")]
    ConfigLoad,
    #[error("Unable to initialize tracing")]
    TracingInit,
    #[error("Unable to build the keyring from the configured key material")]
    Keyring,
    #[error("Key material for '{0}' is not valid hex")]
    KeyMaterial(String),
    #[error("The secret must be a non-negative decimal integer")]
    SecretParse,
}

#[allow(clippy::needless_pass_by_value)]
pub(crate) fn clap_or_error(err: anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<clap::Error>() {
        return match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                eprintln!("{e}");
                0
            }
            ErrorKind::DisplayVersion => 0,
            _ => {
                eprintln!("{e}");
                1
            }
        };
    }

    eprintln!("{err:?}");
    // Bad key material in the config is a config failure, whatever the cause
    let config_failure = matches!(
        err.downcast_ref::<Error>(),
        Some(Error::ConfigLoad | Error::Keyring)
    );
    if !config_failure && err.downcast_ref::<libtessera::Error>().is_some() {
        SHARING_FAILURE
    } else {
        1
    }
}

pub(crate) fn success((): ()) -> i32 {
    0
}
