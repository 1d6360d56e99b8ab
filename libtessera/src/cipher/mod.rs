// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Symmetric sealing of share encodings.
//!
//! Each [`CipherProfile`] binds an [`Algorithm`] to caller supplied key
//! material.  Sealing is deterministic: the same payload under the same
//! profile always produces the same ciphertext.

use std::{fmt, str::FromStr};

use anyhow::Result;
use aws_lc_rs::{
    cipher::{
        AES_128, AES_192, AES_256, Algorithm as AesAlgorithm, DecryptingKey, DecryptionContext,
        EncryptingKey, EncryptionContext, PaddedBlockDecryptingKey, PaddedBlockEncryptingKey,
        UnboundCipherKey,
    },
    iv::FixedLength,
};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use des::TdesEde3;
use tracing::trace;
use zeroize::Zeroizing;

use crate::error::Error;

pub use self::keyring::Keyring;

mod keyring;

const AES_BLOCK_LEN: usize = 16;
const TDES_BLOCK_LEN: usize = 8;

type TdesCbcEncryptor = cbc::Encryptor<TdesEde3>;
type TdesCbcDecryptor = cbc::Decryptor<TdesEde3>;

/// The supported cipher algorithms
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Algorithm {
    /// AES with a 128-bit key in CBC mode with PKCS#7 padding
    Aes128Cbc,
    /// AES with a 192-bit key in CBC mode with PKCS#7 padding
    Aes192Cbc,
    /// AES with a 256-bit key in CBC mode with PKCS#7 padding
    Aes256Cbc,
    /// AES with a 256-bit key in CTR mode, a stream cipher with no padding
    Aes256Ctr,
    /// Triple-DES (EDE, three keys) in CBC mode with PKCS#7 padding
    TdesCbc,
}

impl Algorithm {
    /// Every supported algorithm
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Aes128Cbc,
        Algorithm::Aes192Cbc,
        Algorithm::Aes256Cbc,
        Algorithm::Aes256Ctr,
        Algorithm::TdesCbc,
    ];

    /// The canonical name of the algorithm
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Aes128Cbc => "aes-128-cbc",
            Algorithm::Aes192Cbc => "aes-192-cbc",
            Algorithm::Aes256Cbc => "aes-256-cbc",
            Algorithm::Aes256Ctr => "aes-256-ctr",
            Algorithm::TdesCbc => "3des-cbc",
        }
    }

    /// The required key length in bytes
    #[must_use]
    pub fn key_len(self) -> usize {
        match self {
            Algorithm::Aes128Cbc => 16,
            Algorithm::Aes192Cbc | Algorithm::TdesCbc => 24,
            Algorithm::Aes256Cbc | Algorithm::Aes256Ctr => 32,
        }
    }

    /// The required initialization vector length in bytes
    #[must_use]
    pub fn iv_len(self) -> usize {
        match self {
            Algorithm::TdesCbc => TDES_BLOCK_LEN,
            _ => AES_BLOCK_LEN,
        }
    }

    /// The block length for padded block modes, `None` for stream modes
    #[must_use]
    pub fn block_len(self) -> Option<usize> {
        match self {
            Algorithm::Aes128Cbc | Algorithm::Aes192Cbc | Algorithm::Aes256Cbc => {
                Some(AES_BLOCK_LEN)
            }
            Algorithm::TdesCbc => Some(TDES_BLOCK_LEN),
            Algorithm::Aes256Ctr => None,
        }
    }

    fn aes(self) -> Option<&'static AesAlgorithm> {
        match self {
            Algorithm::Aes128Cbc => Some(&AES_128),
            Algorithm::Aes192Cbc => Some(&AES_192),
            Algorithm::Aes256Cbc | Algorithm::Aes256Ctr => Some(&AES_256),
            Algorithm::TdesCbc => None,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == lower)
            .ok_or_else(|| Error::UnsupportedAlgorithm(s.to_string()).into())
    }
}

/// An algorithm bound to its key and initialization vector.
#[derive(Clone)]
pub struct CipherProfile {
    algorithm: Algorithm,
    key: Zeroizing<Vec<u8>>,
    iv: Zeroizing<Vec<u8>>,
}

impl CipherProfile {
    /// Bind key material to an algorithm.
    ///
    /// # Errors
    ///
    /// * [`Error::KeyLength`] if the key is not [`Algorithm::key_len`] bytes.
    /// * [`Error::IvLength`] if the iv is not [`Algorithm::iv_len`] bytes.
    ///
    pub fn new(algorithm: Algorithm, key: &[u8], iv: &[u8]) -> Result<Self> {
        if key.len() != algorithm.key_len() {
            return Err(Error::KeyLength {
                algorithm,
                expected: algorithm.key_len(),
                actual: key.len(),
            }
            .into());
        }
        if iv.len() != algorithm.iv_len() {
            return Err(Error::IvLength {
                algorithm,
                expected: algorithm.iv_len(),
                actual: iv.len(),
            }
            .into());
        }
        Ok(Self {
            algorithm,
            key: Zeroizing::new(key.to_vec()),
            iv: Zeroizing::new(iv.to_vec()),
        })
    }

    /// The algorithm this profile uses
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn aes_iv(&self) -> Result<FixedLength<AES_BLOCK_LEN>> {
        let iv: [u8; AES_BLOCK_LEN] = self.iv.as_slice().try_into().map_err(|_| Error::IvLength {
            algorithm: self.algorithm,
            expected: AES_BLOCK_LEN,
            actual: self.iv.len(),
        })?;
        Ok(FixedLength::from(iv))
    }

    fn aes_key(&self, algorithm: &'static AesAlgorithm) -> Result<UnboundCipherKey> {
        UnboundCipherKey::new(algorithm, &self.key).map_err(|_| Error::Cipher.into())
    }
}

impl fmt::Debug for CipherProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherProfile")
            .field("algorithm", &self.algorithm)
            .field("key", &"<redacted>")
            .field("iv", &"<redacted>")
            .finish()
    }
}

/// Encrypt a payload under the given profile, padding it first for block modes.
///
/// # Errors
///
/// * If the underlying cipher rejects the key material, an error is returned.
///
pub fn seal(payload: &[u8], profile: &CipherProfile) -> Result<Vec<u8>> {
    trace!("Sealing {} bytes with {}", payload.len(), profile.algorithm());
    match (profile.algorithm(), profile.algorithm().aes()) {
        (Algorithm::TdesCbc, _) => {
            let encryptor = TdesCbcEncryptor::new_from_slices(&profile.key, &profile.iv)
                .map_err(|_| Error::Cipher)?;
            Ok(encryptor.encrypt_padded_vec_mut::<Pkcs7>(payload))
        }
        (Algorithm::Aes256Ctr, Some(aes)) => {
            let key = EncryptingKey::ctr(profile.aes_key(aes)?)?;
            let mut in_out = payload.to_vec();
            let _context =
                key.less_safe_encrypt(&mut in_out, EncryptionContext::Iv128(profile.aes_iv()?))?;
            Ok(in_out)
        }
        (_, Some(aes)) => {
            let key = PaddedBlockEncryptingKey::cbc_pkcs7(profile.aes_key(aes)?)?;
            let mut in_out = payload.to_vec();
            let _context =
                key.less_safe_encrypt(&mut in_out, EncryptionContext::Iv128(profile.aes_iv()?))?;
            Ok(in_out)
        }
        (_, None) => Err(Error::Cipher.into()),
    }
}

/// Decrypt a payload sealed under the given profile, removing any padding.
///
/// # Errors
///
/// * [`Error::Padding`] if the padding is malformed or the ciphertext is not a
///   positive multiple of the block length.  This usually means the wrong key
///   material was used or the ciphertext was corrupted.
///
pub fn unseal(ciphertext: &[u8], profile: &CipherProfile) -> Result<Vec<u8>> {
    trace!("Unsealing {} bytes with {}", ciphertext.len(), profile.algorithm());
    if let Some(block_len) = profile.algorithm().block_len()
        && (ciphertext.is_empty() || ciphertext.len() % block_len != 0)
    {
        return Err(Error::Padding.into());
    }

    match (profile.algorithm(), profile.algorithm().aes()) {
        (Algorithm::TdesCbc, _) => {
            let decryptor = TdesCbcDecryptor::new_from_slices(&profile.key, &profile.iv)
                .map_err(|_| Error::Cipher)?;
            decryptor
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
                .map_err(|_| Error::Padding.into())
        }
        (Algorithm::Aes256Ctr, Some(aes)) => {
            let key = DecryptingKey::ctr(profile.aes_key(aes)?)?;
            let mut in_out = ciphertext.to_vec();
            let plaintext_len = key
                .decrypt(&mut in_out, DecryptionContext::Iv128(profile.aes_iv()?))?
                .len();
            in_out.truncate(plaintext_len);
            Ok(in_out)
        }
        (_, Some(aes)) => {
            let key = PaddedBlockDecryptingKey::cbc_pkcs7(profile.aes_key(aes)?)?;
            let mut in_out = ciphertext.to_vec();
            let plaintext_len = key
                .decrypt(&mut in_out, DecryptionContext::Iv128(profile.aes_iv()?))
                .map_err(|_| Error::Padding)?
                .len();
            in_out.truncate(plaintext_len);
            Ok(in_out)
        }
        (_, None) => Err(Error::Cipher.into()),
    }
}
