// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Arithmetic in the prime field `GF(2^521 - 1)`.

use std::{
    fmt,
    ops::{Add, Mul, Neg, Sub},
    sync::LazyLock,
};

use anyhow::Result;
use aws_lc_rs::rand;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use zeroize::Zeroizing;

use crate::error::Error;

/// The bit length of the field modulus
pub const MODULUS_BITS: u64 = 521;

// 521 bits fill 65 bytes plus a single bit of the 66th
const RANDOM_BYTES: usize = 66;
const TOP_BYTE_MASK: u8 = 0x01;

static MODULUS: LazyLock<BigUint> =
    LazyLock::new(|| (BigUint::one() << MODULUS_BITS) - BigUint::one());

/// The field modulus, the Mersenne prime `2^521 - 1`
#[must_use]
pub fn modulus() -> &'static BigUint {
    &MODULUS
}

/// An element of the prime field, always held in canonical form `[0, p)`.
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct FieldElement(BigUint);

impl FieldElement {
    /// Create a field element from an integer.
    ///
    /// # Errors
    ///
    /// * [`Error::OutOfRange`] if `value` is not less than the modulus.
    ///
    pub fn new(value: BigUint) -> Result<Self> {
        if &value < modulus() {
            Ok(Self(value))
        } else {
            Err(Error::OutOfRange.into())
        }
    }

    /// The additive identity
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// The multiplicative identity
    #[must_use]
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// Draw an element uniformly at random from the whole field.
    ///
    /// # Errors
    ///
    /// * If the system random number generator fails, an error is returned.
    ///
    pub fn random() -> Result<Self> {
        let mut bytes = Zeroizing::new([0u8; RANDOM_BYTES]);
        loop {
            rand::fill(&mut bytes[..])?;
            bytes[0] &= TOP_BYTE_MASK;
            let candidate = BigUint::from_bytes_be(&bytes[..]);
            if &candidate < modulus() {
                return Ok(Self(candidate));
            }
        }
    }

    /// Is this the additive identity?
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The canonical integer value of this element
    #[must_use]
    pub fn value(&self) -> &BigUint {
        &self.0
    }

    /// Consume the element, returning its integer value
    #[must_use]
    pub fn into_inner(self) -> BigUint {
        self.0
    }

    /// The multiplicative inverse, `a^(p - 2)`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroInverse`] if this element is zero.
    ///
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::ZeroInverse.into());
        }
        let exponent = modulus() - BigUint::from(2u8);
        Ok(Self(self.0.modpow(&exponent, modulus())))
    }

    /// Divide by `rhs`.
    ///
    /// # Errors
    ///
    /// * [`Error::ZeroInverse`] if `rhs` is zero.
    ///
    pub fn checked_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self * &rhs.inverse()?)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        // Every u64 is far below the modulus
        Self(BigUint::from(value))
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// The value may be a share or a secret; keep it out of debug output.
impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldElement(..)")
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 + &rhs.0) % modulus())
    }
}

impl Sub<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &FieldElement) -> FieldElement {
        if self.0 >= rhs.0 {
            FieldElement(&self.0 - &rhs.0)
        } else {
            FieldElement(modulus() - (&rhs.0 - &self.0))
        }
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &FieldElement) -> FieldElement {
        FieldElement((&self.0 * &rhs.0) % modulus())
    }
}

impl Neg for &FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        &FieldElement::zero() - self
    }
}

macro_rules! owned_binop {
    ($tr:ident, $method:ident) => {
        impl $tr<FieldElement> for FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: FieldElement) -> FieldElement {
                (&self).$method(&rhs)
            }
        }

        impl $tr<&FieldElement> for FieldElement {
            type Output = FieldElement;

            fn $method(self, rhs: &FieldElement) -> FieldElement {
                (&self).$method(rhs)
            }
        }
    };
}

owned_binop!(Add, add);
owned_binop!(Sub, sub);
owned_binop!(Mul, mul);

impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        -&self
    }
}

#[cfg(test)]
mod test {
    use anyhow::Result;
    use num_bigint::BigUint;
    use num_traits::One;

    use super::{FieldElement, MODULUS_BITS, modulus};
    use crate::error::Error;

    #[test]
    fn modulus_is_mersenne_521() {
        assert_eq!(modulus().bits(), MODULUS_BITS);
        assert_eq!(modulus() + BigUint::one(), BigUint::one() << 521);
    }

    #[test]
    fn new_rejects_modulus() {
        let err = FieldElement::new(modulus().clone()).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::OutOfRange));
        assert!(FieldElement::new(modulus() - BigUint::one()).is_ok());
    }

    #[test]
    fn subtraction_wraps() {
        let a = FieldElement::from(3);
        let b = FieldElement::from(5);
        let diff = &a - &b;
        assert_eq!(diff.value(), &(modulus() - BigUint::from(2u8)));
        assert_eq!(&diff + &b, a);
    }

    #[test]
    fn addition_wraps() -> Result<()> {
        let max = FieldElement::new(modulus() - BigUint::one())?;
        assert_eq!(&max + &FieldElement::one(), FieldElement::zero());
        assert_eq!(-FieldElement::one(), max);
        Ok(())
    }

    #[test]
    fn inverse_works() -> Result<()> {
        for v in [1u64, 2, 3, 7, 1234, u64::MAX] {
            let a = FieldElement::from(v);
            assert_eq!(&a * &a.inverse()?, FieldElement::one());
        }
        Ok(())
    }

    #[test]
    fn zero_has_no_inverse() {
        let err = FieldElement::zero().inverse().unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::ZeroInverse));
    }

    #[test]
    fn checked_div_works() -> Result<()> {
        let six = FieldElement::from(6);
        let three = FieldElement::from(3);
        assert_eq!(six.checked_div(&three)?, FieldElement::from(2));
        assert!(six.checked_div(&FieldElement::zero()).is_err());
        Ok(())
    }

    #[test]
    fn random_is_in_range() -> Result<()> {
        let a = FieldElement::random()?;
        let b = FieldElement::random()?;
        assert!(a.value() < modulus());
        assert!(b.value() < modulus());
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn debug_is_redacted() {
        assert_eq!(format!("{:?}", FieldElement::from(42)), "FieldElement(..)");
        assert_eq!(FieldElement::from(42).to_string(), "42");
    }
}
