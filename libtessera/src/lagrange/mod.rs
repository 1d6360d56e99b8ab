// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::collections::BTreeSet;

use anyhow::Result;
use tracing::trace;

use crate::{error::Error, field::FieldElement, share::Share};

/// Evaluate the polynomial determined by `points` at `at` using Lagrange
/// interpolation.
///
/// The result is only meaningful when the points are genuine evaluations of a
/// polynomial whose degree is less than the number of points.
///
/// # Errors
///
/// * [`Error::InsufficientPoints`] if `points` is empty.
/// * [`Error::DuplicateIdentifier`] if two points share an identifier.
///
pub fn interpolate(points: &[Share], at: &FieldElement) -> Result<FieldElement> {
    if points.is_empty() {
        return Err(Error::InsufficientPoints { needed: 1, got: 0 }.into());
    }
    check_distinct(points)?;
    trace!("Interpolating over {} points", points.len());

    let mut result = FieldElement::zero();
    for (i, point_i) in points.iter().enumerate() {
        let x_i = point_i.identifier();
        let mut numerator = FieldElement::one();
        let mut denominator = FieldElement::one();
        for (j, point_j) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let x_j = point_j.identifier();
            numerator = numerator * (at - x_j);
            denominator = denominator * (x_i - x_j);
        }
        let basis = numerator.checked_div(&denominator)?;
        result = result + (point_i.value() * &basis);
    }
    Ok(result)
}

/// Recover the secret, the constant term of the sharing polynomial, from a set
/// of shares.
///
/// # Errors
///
/// * [`Error::InsufficientPoints`] if `points` is empty.
/// * [`Error::DuplicateIdentifier`] if two points share an identifier.
///
pub fn reconstruct(points: &[Share]) -> Result<FieldElement> {
    interpolate(points, &FieldElement::zero())
}

/// Issue the share for a new identifier from an existing set of shares,
/// without exposing the secret to the caller.
///
/// # Errors
///
/// * [`Error::ZeroIdentifier`] if `identifier` is zero.
/// * [`Error::InsufficientPoints`] if `points` is empty.
/// * [`Error::DuplicateIdentifier`] if two points share an identifier.
///
pub fn recover_share(points: &[Share], identifier: FieldElement) -> Result<Share> {
    if identifier.is_zero() {
        return Err(Error::ZeroIdentifier.into());
    }
    let value = interpolate(points, &identifier)?;
    Share::new(identifier, value)
}

fn check_distinct(points: &[Share]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for point in points {
        if !seen.insert(point.identifier()) {
            return Err(Error::DuplicateIdentifier(point.identifier().value().clone()).into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use anyhow::Result;
    use num_bigint::BigUint;

    use super::{interpolate, reconstruct, recover_share};
    use crate::{
        error::Error,
        field::FieldElement,
        poly::generate,
        share::{Share, Threshold},
    };

    fn point(x: u64, y: u64) -> Share {
        Share::new(FieldElement::from(x), FieldElement::from(y)).unwrap()
    }

    #[test]
    fn reconstruct_line() -> Result<()> {
        // y = 2x + 7
        let points = [point(1, 9), point(3, 13)];
        assert_eq!(reconstruct(&points)?, FieldElement::from(7));
        Ok(())
    }

    #[test]
    fn interpolate_at_known_point() -> Result<()> {
        // y = x^2 + 1
        let points = [point(1, 2), point(2, 5), point(3, 10)];
        assert_eq!(interpolate(&points, &FieldElement::from(2))?, FieldElement::from(5));
        assert_eq!(interpolate(&points, &FieldElement::from(5))?, FieldElement::from(26));
        Ok(())
    }

    #[test]
    fn single_point_is_constant() -> Result<()> {
        assert_eq!(reconstruct(&[point(4, 99)])?, FieldElement::from(99));
        Ok(())
    }

    #[test]
    fn empty_points_fail() {
        let err = reconstruct(&[]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InsufficientPoints { needed: 1, got: 0 })
        );
    }

    #[test]
    fn duplicate_identifier_fails() {
        let points = [point(1, 9), point(2, 11), point(1, 9)];
        let err = reconstruct(&points).unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::DuplicateIdentifier(BigUint::from(1u8)))
        );
    }

    #[test]
    fn recover_share_matches_lost_share() -> Result<()> {
        let shares = generate(&BigUint::from(777u32), &Threshold::new(3, 5)?)?;
        let recovered = recover_share(&shares[..3], FieldElement::from(5))?;
        assert_eq!(recovered, shares[4]);

        let mut mixed = vec![shares[0].clone(), shares[2].clone(), recovered];
        mixed.reverse();
        assert_eq!(reconstruct(&mixed)?, FieldElement::from(777));
        Ok(())
    }

    #[test]
    fn recover_share_rejects_zero() -> Result<()> {
        let shares = generate(&BigUint::from(1u8), &Threshold::new(2, 2)?)?;
        let err = recover_share(&shares, FieldElement::zero()).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::ZeroIdentifier));
        Ok(())
    }
}
