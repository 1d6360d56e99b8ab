// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use anyhow::Result;
use getset::{CopyGetters, Getters};

use crate::{error::Error, field::FieldElement};

/// The `k`-of-`n` threshold parameters
#[derive(Clone, Copy, CopyGetters, Debug, Eq, Hash, PartialEq)]
#[getset(get_copy = "pub")]
pub struct Threshold {
    /// The minimum number of shares needed to reconstruct the secret (`k`)
    threshold: usize,
    /// The number of shares to create (`n`)
    shares: usize,
}

impl Threshold {
    /// Create validated threshold parameters.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidParameters`] unless `1 <= threshold <= shares`.
    ///
    pub fn new(threshold: usize, shares: usize) -> Result<Self> {
        if threshold == 0 || threshold > shares {
            Err(Error::InvalidParameters { threshold, shares }.into())
        } else {
            Ok(Self { threshold, shares })
        }
    }
}

/// A single share, the evaluation `(x, P(x))` of the sharing polynomial at a
/// non-zero identifier.
#[derive(Clone, Debug, Eq, Getters, Hash, PartialEq)]
#[getset(get = "pub")]
pub struct Share {
    /// The share identifier (x-coordinate)
    identifier: FieldElement,
    /// The share value (y-coordinate)
    value: FieldElement,
}

impl Share {
    /// Create a share.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroIdentifier`] if `identifier` is zero, as the evaluation
    ///   at zero is the secret itself.
    ///
    pub fn new(identifier: FieldElement, value: FieldElement) -> Result<Self> {
        if identifier.is_zero() {
            Err(Error::ZeroIdentifier.into())
        } else {
            Ok(Self { identifier, value })
        }
    }

    /// Consume the share, returning the identifier and value
    #[must_use]
    pub fn into_parts(self) -> (FieldElement, FieldElement) {
        (self.identifier, self.value)
    }
}

#[cfg(test)]
mod test {
    use super::{Share, Threshold};
    use crate::{error::Error, field::FieldElement};

    #[test]
    fn threshold_accepts_valid() {
        for (k, n) in [(1, 1), (1, 5), (3, 5), (5, 5), (50, 50)] {
            let threshold = Threshold::new(k, n).unwrap();
            assert_eq!(threshold.threshold(), k);
            assert_eq!(threshold.shares(), n);
        }
    }

    #[test]
    fn threshold_rejects_invalid() {
        for (k, n) in [(0, 0), (0, 5), (6, 5), (1, 0)] {
            let err = Threshold::new(k, n).unwrap_err();
            assert_eq!(
                err.downcast_ref::<Error>(),
                Some(&Error::InvalidParameters {
                    threshold: k,
                    shares: n
                })
            );
        }
    }

    #[test]
    fn share_rejects_zero_identifier() {
        let err = Share::new(FieldElement::zero(), FieldElement::from(7)).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::ZeroIdentifier));
    }

    #[test]
    fn share_into_parts() {
        let share = Share::new(FieldElement::from(2), FieldElement::from(7)).unwrap();
        assert_eq!(share.identifier(), &FieldElement::from(2));
        let (x, y) = share.into_parts();
        assert_eq!(x, FieldElement::from(2));
        assert_eq!(y, FieldElement::from(7));
    }
}
