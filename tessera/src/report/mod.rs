// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::io::Write;

use anyhow::Result;
use crossterm::style::Stylize;
use libtessera::{Algorithm, Keyring, SealedShare};
use num_bigint::BigUint;

/// Write sealed shares one per line.
///
/// With `styled` set a colored banner precedes them; otherwise only the share
/// lines are written so the output can be piped.
pub(crate) fn shares<W: Write>(
    writer: &mut W,
    styled: bool,
    algorithm: Algorithm,
    sealed: &[SealedShare],
) -> Result<()> {
    if styled {
        let header = format!(
            "These are your {} shares, sealed with {algorithm}.  Record them somewhere safe!",
            sealed.len()
        );
        writeln!(writer, "{}", header.green().bold())?;
        writeln!(writer)?;
    }
    for share in sealed {
        writeln!(writer, "{share}")?;
    }
    Ok(())
}

pub(crate) fn secret<W: Write>(writer: &mut W, secret: &BigUint) -> Result<()> {
    writeln!(writer, "{secret}")?;
    Ok(())
}

/// One line per supported algorithm, flagging those with configured key material
pub(crate) fn algorithms<W: Write>(writer: &mut W, styled: bool, keyring: &Keyring) -> Result<()> {
    for algorithm in Algorithm::ALL {
        let configured = keyring.get(algorithm).is_some();
        let status = match (configured, styled) {
            (true, true) => "configured".green().to_string(),
            (false, true) => "no key material".red().to_string(),
            (true, false) => "configured".to_string(),
            (false, false) => "no key material".to_string(),
        };
        writeln!(
            writer,
            "{:<12} key {:>2} bytes, iv {:>2} bytes  {status}",
            algorithm.name(),
            algorithm.key_len(),
            algorithm.iv_len(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use anyhow::Result;
    use libtessera::{Algorithm, CipherProfile, Keyring, SealedShare};
    use num_bigint::BigUint;

    use super::{algorithms, secret, shares};

    fn sealed() -> [SealedShare; 2] {
        [
            SealedShare::builder().identifier(vec![1]).share(vec![0xab]).build(),
            SealedShare::builder().identifier(vec![2]).share(vec![0xcd]).build(),
        ]
    }

    #[test]
    fn plain_shares_are_one_per_line() -> Result<()> {
        let mut buf = Vec::new();
        shares(&mut buf, false, Algorithm::Aes128Cbc, &sealed())?;
        assert_eq!(String::from_utf8(buf)?, "01:ab\n02:cd\n");
        Ok(())
    }

    #[test]
    fn styled_shares_have_a_banner() -> Result<()> {
        let mut buf = Vec::new();
        shares(&mut buf, true, Algorithm::Aes128Cbc, &sealed())?;
        let out = String::from_utf8(buf)?;
        assert!(out.contains("aes-128-cbc"));
        assert!(out.lines().any(|line| line == "01:ab"));
        assert!(out.lines().any(|line| line == "02:cd"));
        Ok(())
    }

    #[test]
    fn secret_is_plain_decimal() -> Result<()> {
        let mut buf = Vec::new();
        secret(&mut buf, &BigUint::from(1234u32))?;
        assert_eq!(String::from_utf8(buf)?, "1234\n");
        Ok(())
    }

    #[test]
    fn lists_every_algorithm() -> Result<()> {
        let mut keyring = Keyring::default();
        let _old = keyring.insert(CipherProfile::new(
            Algorithm::Aes128Cbc,
            &[0u8; 16],
            &[0u8; 16],
        )?);
        let mut buf = Vec::new();
        algorithms(&mut buf, false, &keyring)?;
        let out = String::from_utf8(buf)?;
        assert!(!out.contains('\u{1b}'));
        assert_eq!(out.lines().count(), Algorithm::ALL.len());
        let aes128 = out
            .lines()
            .find(|line| line.starts_with("aes-128-cbc"))
            .unwrap_or_default();
        assert!(aes128.ends_with("configured"));
        let tdes = out
            .lines()
            .find(|line| line.starts_with("3des-cbc"))
            .unwrap_or_default();
        assert!(tdes.ends_with("no key material"));
        Ok(())
    }
}
