// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::collections::BTreeMap;

use anyhow::Result;
use tracing::debug;

use crate::{
    cipher::{Algorithm, CipherProfile},
    error::Error,
};

/// The process-wide binding of algorithm to key material.
///
/// A keyring is built once from configuration and then consulted by name.
#[derive(Clone, Debug, Default)]
pub struct Keyring {
    profiles: BTreeMap<Algorithm, CipherProfile>,
}

impl Keyring {
    /// Add a profile, replacing any existing profile for the same algorithm
    pub fn insert(&mut self, profile: CipherProfile) -> Option<CipherProfile> {
        debug!("Adding key material for {}", profile.algorithm());
        self.profiles.insert(profile.algorithm(), profile)
    }

    /// The profile configured for an algorithm, if any
    #[must_use]
    pub fn get(&self, algorithm: Algorithm) -> Option<&CipherProfile> {
        self.profiles.get(&algorithm)
    }

    /// Resolve an algorithm name to its configured profile.
    ///
    /// # Errors
    ///
    /// * [`Error::UnsupportedAlgorithm`] if the name is not a supported algorithm.
    /// * [`Error::MissingKeyMaterial`] if no key material is configured for it.
    ///
    pub fn profile(&self, name: &str) -> Result<&CipherProfile> {
        let algorithm = name.parse::<Algorithm>()?;
        self.get(algorithm)
            .ok_or_else(|| Error::MissingKeyMaterial(algorithm).into())
    }

    /// The algorithms with key material configured
    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.profiles.keys().copied()
    }

    /// Is the keyring empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
