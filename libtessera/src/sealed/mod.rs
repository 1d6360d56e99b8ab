// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::{fmt, str::FromStr};

use anyhow::Result;
use bon::Builder;
use getset::Getters;
use num_bigint::BigUint;
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::{
    cipher::{CipherProfile, seal, unseal},
    codec::{decode, encode},
    error::Error,
    field::FieldElement,
    lagrange::{reconstruct, recover_share},
    poly::generate,
    share::{Share, Threshold},
};

/// A share whose identifier and value have each been byte-encoded and sealed.
///
/// The text form is `<hex identifier>:<hex share>`.
#[derive(Builder, Clone, Debug, Eq, Getters, Hash, PartialEq)]
#[getset(get = "pub")]
pub struct SealedShare {
    /// The sealed identifier encoding
    #[builder(into)]
    identifier: Vec<u8>,
    /// The sealed share value encoding
    #[builder(into)]
    share: Vec<u8>,
}

impl fmt::Display for SealedShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            hex::encode(&self.identifier),
            hex::encode(&self.share)
        )
    }
}

impl FromStr for SealedShare {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (identifier, share) = s.trim().split_once(':').ok_or(Error::MalformedSealedShare)?;
        let identifier = hex::decode(identifier).map_err(|_| Error::MalformedSealedShare)?;
        let share = hex::decode(share).map_err(|_| Error::MalformedSealedShare)?;
        if identifier.is_empty() || share.is_empty() {
            return Err(Error::MalformedSealedShare.into());
        }
        Ok(Self::builder().identifier(identifier).share(share).build())
    }
}

/// Split a secret into `n` shares and seal each share under the given profile.
///
/// # Errors
///
/// * [`Error::OutOfRange`] if the secret is not less than the field modulus.
/// * If the random number generation fails, an error is returned.
/// * If the cipher rejects the key material, an error is returned.
///
pub fn split_and_seal(
    secret: &BigUint,
    threshold: &Threshold,
    profile: &CipherProfile,
) -> Result<Vec<SealedShare>> {
    let shares = generate(secret, threshold)?;
    debug!(
        "Sealing {} shares with {}",
        shares.len(),
        profile.algorithm()
    );

    shares
        .into_iter()
        .map(|share| seal_share(share, profile))
        .collect()
}

/// Unseal a set of shares and reconstruct the secret they were split from.
///
/// At least `threshold` shares must be supplied.  Supplying shares from
/// different secrets, or sealed under different key material, produces either
/// an error or a value unrelated to any secret.
///
/// # Errors
///
/// * [`Error::InvalidParameters`] if `threshold` is zero.
/// * [`Error::InsufficientPoints`] if fewer than `threshold` shares are supplied.
/// * [`Error::Padding`] if a share fails to unseal.
/// * [`Error::EmptyEncoding`], [`Error::OutOfRange`] or [`Error::ZeroIdentifier`]
///   if an unsealed share does not decode to a valid point.
/// * [`Error::DuplicateIdentifier`] if two shares carry the same identifier.
///
pub fn unseal_and_reconstruct(
    sealed: &[SealedShare],
    threshold: usize,
    profile: &CipherProfile,
) -> Result<BigUint> {
    let points = unseal_points(sealed, threshold, profile)?;
    let secret = reconstruct(&points)?;
    debug!("Reconstructed secret from {} shares", points.len());
    Ok(secret.into_inner())
}

/// Issue a sealed replacement share for `identifier` from at least `threshold`
/// existing sealed shares, without revealing the secret.
///
/// The new share is sealed under the same profile and combines with the
/// originals like any other share.
///
/// # Errors
///
/// * [`Error::ZeroIdentifier`] if `identifier` is zero.
/// * Every error [`unseal_and_reconstruct`] can return for the supplied shares.
///
pub fn unseal_and_recover(
    sealed: &[SealedShare],
    threshold: usize,
    identifier: u64,
    profile: &CipherProfile,
) -> Result<SealedShare> {
    let points = unseal_points(sealed, threshold, profile)?;
    let share = recover_share(&points, FieldElement::from(identifier))?;
    debug!("Recovered share {identifier} from {} shares", points.len());
    seal_share(share, profile)
}

fn unseal_points(
    sealed: &[SealedShare],
    threshold: usize,
    profile: &CipherProfile,
) -> Result<Vec<Share>> {
    if threshold == 0 {
        return Err(Error::InvalidParameters {
            threshold,
            shares: sealed.len(),
        }
        .into());
    }
    if sealed.len() < threshold {
        return Err(Error::InsufficientPoints {
            needed: threshold,
            got: sealed.len(),
        }
        .into());
    }
    trace!(
        "Unsealing {} shares with {}",
        sealed.len(),
        profile.algorithm()
    );
    sealed
        .iter()
        .map(|sealed_share| unseal_share(sealed_share, profile))
        .collect()
}

fn seal_share(share: Share, profile: &CipherProfile) -> Result<SealedShare> {
    let (identifier, value) = share.into_parts();
    let identifier_bytes = Zeroizing::new(encode(identifier.value()));
    let value_bytes = Zeroizing::new(encode(value.value()));
    Ok(SealedShare::builder()
        .identifier(seal(&identifier_bytes, profile)?)
        .share(seal(&value_bytes, profile)?)
        .build())
}

fn unseal_share(sealed: &SealedShare, profile: &CipherProfile) -> Result<Share> {
    let identifier_bytes = Zeroizing::new(unseal(sealed.identifier(), profile)?);
    let value_bytes = Zeroizing::new(unseal(sealed.share(), profile)?);
    let identifier = FieldElement::new(decode(&identifier_bytes)?)?;
    let value = FieldElement::new(decode(&value_bytes)?)?;
    Share::new(identifier, value)
}
