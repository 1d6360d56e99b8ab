// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use anyhow::Result;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::Error;

/// Encode an unsigned integer as minimal-length big-endian bytes.
///
/// Zero encodes as the single byte `0x00`, never as an empty sequence.
#[must_use]
pub fn encode(value: &BigUint) -> Vec<u8> {
    if value.is_zero() {
        vec![0]
    } else {
        value.to_bytes_be()
    }
}

/// Decode big-endian bytes into an unsigned integer.
///
/// # Errors
///
/// * [`Error::EmptyEncoding`] if `bytes` is empty.
///
pub fn decode(bytes: &[u8]) -> Result<BigUint> {
    if bytes.is_empty() {
        Err(Error::EmptyEncoding.into())
    } else {
        Ok(BigUint::from_bytes_be(bytes))
    }
}

#[cfg(test)]
mod test {
    use anyhow::Result;
    use num_bigint::BigUint;
    use num_traits::One;

    use super::{decode, encode};
    use crate::{error::Error, field::modulus};

    #[test]
    fn encode_is_minimal() {
        assert_eq!(encode(&BigUint::from(1u8)), vec![1]);
        assert_eq!(encode(&BigUint::from(255u8)), vec![255]);
        assert_eq!(encode(&BigUint::from(256u16)), vec![1, 0]);
        assert_eq!(encode(&BigUint::from(1234u16)), vec![0x04, 0xd2]);
    }

    #[test]
    fn zero_encodes_to_one_byte() -> Result<()> {
        assert_eq!(encode(&BigUint::ZERO), vec![0]);
        assert_eq!(decode(&encode(&BigUint::ZERO))?, BigUint::ZERO);
        Ok(())
    }

    #[test]
    fn round_trip() -> Result<()> {
        let mut values = vec![
            BigUint::one(),
            BigUint::from(u64::MAX),
            modulus().clone(),
            modulus() - BigUint::one(),
        ];
        values.extend((0..64).map(|shift| BigUint::one() << (shift * 8 + 3)));
        for value in values {
            assert_eq!(decode(&encode(&value))?, value);
        }
        Ok(())
    }

    #[test]
    fn decode_ignores_leading_zeros() -> Result<()> {
        assert_eq!(decode(&[0, 0, 4, 210])?, BigUint::from(1234u16));
        Ok(())
    }

    #[test]
    fn decode_rejects_empty() {
        let err = decode(&[]).unwrap_err();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::EmptyEncoding));
    }
}
