// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! `libtessera` splits a secret into `n` shares such that any `k` of them
//! reconstruct it, and seals each share under a symmetric cipher before it is
//! handed out.
//!
//! All share arithmetic happens in the prime field `GF(2^521 - 1)`, so secrets
//! must be less than `2^521 - 1`.
//!
//! ```
//! # use anyhow::Result;
//! # use libtessera::{Algorithm, CipherProfile, Threshold, split_and_seal, unseal_and_reconstruct};
//! # use num_bigint::BigUint;
//! # fn main() -> Result<()> {
//! let profile = CipherProfile::new(Algorithm::Aes256Cbc, &[7u8; 32], &[9u8; 16])?;
//! let secret = BigUint::from(1234u32);
//!
//! let sealed = split_and_seal(&secret, &Threshold::new(3, 5)?, &profile)?;
//! assert_eq!(sealed.len(), 5);
//!
//! let recovered = unseal_and_reconstruct(&sealed[1..4], 3, &profile)?;
//! assert_eq!(recovered, secret);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(nightly, allow(single_use_lifetimes))]
#![deny(missing_docs, unsafe_code, unused_must_use)]
#![deny(clippy::all, clippy::pedantic)]

mod cipher;
mod codec;
mod error;
mod field;
mod lagrange;
mod poly;
mod sealed;
mod share;

pub use self::cipher::{Algorithm, CipherProfile, Keyring, seal, unseal};
pub use self::codec::{decode, encode};
pub use self::error::Error;
pub use self::field::{FieldElement, MODULUS_BITS, modulus};
pub use self::lagrange::{interpolate, reconstruct, recover_share};
pub use self::poly::generate;
pub use self::sealed::{
    SealedShare, split_and_seal, unseal_and_reconstruct, unseal_and_recover,
};
pub use self::share::{Share, Threshold};
