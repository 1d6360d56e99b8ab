// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use anyhow::Result;
use num_bigint::BigUint;
use tracing::trace;

use crate::{
    field::FieldElement,
    share::{Share, Threshold},
};

/// A polynomial with the secret as its constant term.
///
/// Coefficients are held lowest degree first, `[c_0, c_1, .., c_{k-1}]`.
/// Never leaves this module.
struct Polynomial {
    coefficients: Vec<FieldElement>,
}

impl Polynomial {
    fn random(secret: FieldElement, threshold: usize) -> Result<Self> {
        let mut coefficients = Vec::with_capacity(threshold);
        coefficients.push(secret);
        for _ in 1..threshold {
            coefficients.push(FieldElement::random()?);
        }
        Ok(Self { coefficients })
    }

    fn evaluate(&self, x: &FieldElement) -> FieldElement {
        self.coefficients
            .iter()
            .rev()
            .fold(FieldElement::zero(), |acc, coefficient| &(&acc * x) + coefficient)
    }
}

/// Split a secret into `n` shares using Shamir's Secret Sharing Scheme.
///
/// A random polynomial of degree `k - 1` with the secret as its constant term is
/// evaluated at the identifiers `1..=n`.  Any `k` of the returned shares
/// reconstruct the secret.
///
/// # Errors
///
/// * [`Error::OutOfRange`](crate::Error::OutOfRange) if the secret is not less than the field modulus.
/// * If the random number generation fails, an error is returned.
///
pub fn generate(secret: &BigUint, threshold: &Threshold) -> Result<Vec<Share>> {
    let secret = FieldElement::new(secret.clone())?;
    trace!(
        "Generating {} shares with threshold {}",
        threshold.shares(),
        threshold.threshold()
    );
    let polynomial = Polynomial::random(secret, threshold.threshold())?;

    let mut shares = Vec::with_capacity(threshold.shares());
    for x in 1..=threshold.shares() {
        let identifier = FieldElement::from(x as u64);
        let value = polynomial.evaluate(&identifier);
        shares.push(Share::new(identifier, value)?);
    }
    drop(polynomial);
    Ok(shares)
}
