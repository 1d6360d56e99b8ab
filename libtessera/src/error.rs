// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use num_bigint::BigUint;

use crate::cipher::Algorithm;

/// Errors raised by the `libtessera` operations.
///
/// Every public function returns an [`anyhow::Result`]; these variants can be
/// recovered from the returned error with `downcast_ref::<Error>()`.
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The threshold parameters do not satisfy `1 <= k <= n`
    #[error("Invalid threshold parameters: k = {threshold}, n = {shares} (require 1 <= k <= n)")]
    InvalidParameters {
        /// The requested reconstruction threshold (`k`)
        threshold: usize,
        /// The requested number of shares (`n`)
        shares: usize,
    },
    /// Two points handed to the reconstructor share an identifier
    #[error("Duplicate share identifier {0}")]
    DuplicateIdentifier(BigUint),
    /// Too few points were supplied
    #[error("Insufficient points: {needed} required, {got} supplied")]
    InsufficientPoints {
        /// The number of points required
        needed: usize,
        /// The number of points supplied
        got: usize,
    },
    /// The cipher name does not match a supported algorithm
    #[error("Unsupported cipher algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    /// Decryption produced malformed padding or the ciphertext is truncated
    #[error("Malformed padding or ciphertext length")]
    Padding,
    /// A value does not fit in the prime field
    #[error("Value is not less than the field modulus")]
    OutOfRange,
    /// A share identifier of zero was supplied
    #[error("Share identifiers must be non-zero")]
    ZeroIdentifier,
    /// Zero has no multiplicative inverse
    #[error("Zero has no multiplicative inverse")]
    ZeroInverse,
    /// An empty byte sequence cannot be decoded into an integer
    #[error("Cannot decode an empty byte sequence")]
    EmptyEncoding,
    /// The key material has the wrong length for the algorithm
    #[error("Invalid key length for {algorithm}: expected {expected} bytes, got {actual}")]
    KeyLength {
        /// The algorithm the key was supplied for
        algorithm: Algorithm,
        /// The required key length
        expected: usize,
        /// The supplied key length
        actual: usize,
    },
    /// The initialization vector has the wrong length for the algorithm
    #[error("Invalid iv length for {algorithm}: expected {expected} bytes, got {actual}")]
    IvLength {
        /// The algorithm the iv was supplied for
        algorithm: Algorithm,
        /// The required iv length
        expected: usize,
        /// The supplied iv length
        actual: usize,
    },
    /// The algorithm is supported but no key material was configured for it
    #[error("No key material configured for {0}")]
    MissingKeyMaterial(Algorithm),
    /// The text form of a sealed share could not be parsed
    #[error("Malformed sealed share")]
    MalformedSealedShare,
    /// The underlying cipher implementation rejected the operation
    #[error("Cipher operation failed")]
    Cipher,
}
