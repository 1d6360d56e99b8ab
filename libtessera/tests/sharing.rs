// Copyright (c) 2025 tessera developers
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use anyhow::Result;
use libtessera::{
    Algorithm, CipherProfile, Error, FieldElement, SealedShare, Share, Threshold, generate,
    modulus, reconstruct, recover_share, split_and_seal, unseal_and_reconstruct,
    unseal_and_recover,
};
use num_bigint::BigUint;
use num_traits::One;
use rand::{
    rng,
    seq::{SliceRandom, index::sample},
};

fn subset(shares: &[Share], mask: u32) -> Vec<Share> {
    shares
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, share)| share.clone())
        .collect()
}

#[test]
fn split_1234_five_of_ten() -> Result<()> {
    let secret = BigUint::from(1234u32);
    let shares = generate(&secret, &Threshold::new(5, 10)?)?;

    let identifiers: Vec<FieldElement> = shares.iter().map(|s| s.identifier().clone()).collect();
    let expected: Vec<FieldElement> = (1..=10u64).map(FieldElement::from).collect();
    assert_eq!(identifiers, expected);

    assert_eq!(reconstruct(&shares[..5])?.into_inner(), secret);
    assert_eq!(reconstruct(&shares[5..])?.into_inner(), secret);
    Ok(())
}

#[test]
fn split_zero_two_of_three() -> Result<()> {
    let secret = BigUint::ZERO;
    let shares = generate(&secret, &Threshold::new(2, 3)?)?;
    for pair in [[0, 1], [0, 2], [1, 2]] {
        let points = [shares[pair[0]].clone(), shares[pair[1]].clone()];
        assert_eq!(reconstruct(&points)?.into_inner(), secret);
    }
    Ok(())
}

#[test]
fn every_subset_reconstructs() -> Result<()> {
    let secret = BigUint::parse_bytes(b"deadbeefcafebabe0123456789", 16).unwrap();
    for n in 1..=8usize {
        for k in 1..=n {
            let shares = generate(&secret, &Threshold::new(k, n)?)?;
            for mask in 0u32..(1 << n) {
                if mask.count_ones() as usize != k {
                    continue;
                }
                let points = subset(&shares, mask);
                assert_eq!(
                    reconstruct(&points)?.into_inner(),
                    secret,
                    "k = {k}, n = {n}, mask = {mask:b}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn random_subsets_up_to_fifty() -> Result<()> {
    let mut rng = rng();
    let secret = modulus() - BigUint::one();
    for (k, n) in [(1, 50), (2, 50), (17, 33), (25, 50), (49, 50), (50, 50)] {
        let shares = generate(&secret, &Threshold::new(k, n)?)?;
        for _ in 0..3 {
            let mut points: Vec<Share> = sample(&mut rng, n, k)
                .iter()
                .map(|i| shares[i].clone())
                .collect();
            points.shuffle(&mut rng);
            assert_eq!(reconstruct(&points)?.into_inner(), secret, "k = {k}, n = {n}");
        }
    }
    Ok(())
}

#[test]
fn order_does_not_matter() -> Result<()> {
    let mut rng = rng();
    let shares = generate(&BigUint::from(987_654_321u64), &Threshold::new(4, 7)?)?;
    let expected = reconstruct(&shares[..4])?;
    for _ in 0..10 {
        let mut points = shares.clone();
        points.shuffle(&mut rng);
        points.truncate(4);
        assert_eq!(reconstruct(&points)?, expected);
    }
    Ok(())
}

#[test]
fn fewer_than_threshold_does_not_reveal() -> Result<()> {
    let secret = BigUint::from(31_337u32);
    let shares = generate(&secret, &Threshold::new(3, 5)?)?;
    assert_ne!(reconstruct(&shares[..2])?.into_inner(), secret);
    Ok(())
}

#[test]
fn duplicate_identifier_is_rejected() -> Result<()> {
    let shares = generate(&BigUint::from(5u8), &Threshold::new(2, 4)?)?;
    let points = [shares[1].clone(), shares[3].clone(), shares[1].clone()];
    let err = reconstruct(&points).unwrap_err();
    assert_eq!(
        err.downcast_ref::<Error>(),
        Some(&Error::DuplicateIdentifier(BigUint::from(2u8)))
    );
    Ok(())
}

#[test]
fn sealed_round_trip_every_algorithm() -> Result<()> {
    let secret = BigUint::from(1234u32);
    for algorithm in Algorithm::ALL {
        let key: Vec<u8> = (0..algorithm.key_len()).map(|i| i as u8).collect();
        let iv: Vec<u8> = (0..algorithm.iv_len()).map(|i| 0xf0 ^ i as u8).collect();
        let profile = CipherProfile::new(algorithm, &key, &iv)?;

        let sealed = split_and_seal(&secret, &Threshold::new(5, 10)?, &profile)?;
        assert_eq!(unseal_and_reconstruct(&sealed[..5], 5, &profile)?, secret);
        assert_eq!(unseal_and_reconstruct(&sealed[5..], 5, &profile)?, secret);

        let text: Vec<String> = sealed.iter().map(ToString::to_string).collect();
        let parsed = text
            .iter()
            .map(|s| s.parse::<SealedShare>())
            .collect::<Result<Vec<_>>>()?;
        assert_eq!(unseal_and_reconstruct(&parsed[3..8], 5, &profile)?, secret);
    }
    Ok(())
}

#[test]
fn lost_share_is_reissued() -> Result<()> {
    let secret = BigUint::from(8_675_309u32);
    let shares = generate(&secret, &Threshold::new(3, 6)?)?;
    let reissued = recover_share(&shares[2..5], FieldElement::from(1))?;
    assert_eq!(reissued, shares[0]);

    let profile = CipherProfile::new(Algorithm::Aes128Cbc, &[3u8; 16], &[5u8; 16])?;
    let sealed = split_and_seal(&secret, &Threshold::new(3, 6)?, &profile)?;
    let extra = unseal_and_recover(&sealed[..3], 3, 7, &profile)?;
    let points = [extra, sealed[4].clone(), sealed[5].clone()];
    assert_eq!(unseal_and_reconstruct(&points, 3, &profile)?, secret);
    Ok(())
}
