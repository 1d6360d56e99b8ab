// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! `tessera` splits a secret into sealed threshold shares and recovers it again.
//!
//! Key material is read from `tessera.toml` in the platform config directory,
//! or from the file given with `--config-absolute-path`.

#![cfg_attr(nightly, allow(single_use_lifetimes))]
#![deny(unsafe_code, unused_must_use)]
#![deny(clippy::all, clippy::pedantic)]

mod config;
mod error;
mod logging;
mod report;
mod runtime;

use std::{ffi::OsString, process};

fn main() {
    process::exit(
        runtime::run::<Vec<OsString>, OsString>(None)
            .map_or_else(error::clap_or_error, error::success),
    )
}
