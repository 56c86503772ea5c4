//! Salted, iterated SHA-256 password hashes, stored as
//! `sha256$<rounds>$<salt>$<digest>`.
//!
//! This is a stand-in for a memory-hard KDF such as Argon2: SHA-256 is fast,
//! so the round count only slows brute force down linearly. Swap the scheme
//! tag when a real KDF replaces it; hashes carry their own round count, so
//! raising `DEFAULT_ROUNDS` keeps existing hashes verifiable.

use rand::RngCore;
use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";

pub const DEFAULT_ROUNDS: u32 = 10_000;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn digest(rounds: u32, salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    let mut out = hasher.finalize();

    for _ in 1..rounds {
        let mut hasher = Sha256::new();
        hasher.update(out);
        hasher.update(password.as_bytes());
        out = hasher.finalize();
    }
    to_hex(&out)
}

pub fn hash_password(password: &str) -> String {
    hash_password_rounds(password, DEFAULT_ROUNDS)
}

pub fn hash_password_rounds(password: &str, rounds: u32) -> String {
    let rounds = rounds.max(1);
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = to_hex(&salt);
    format!("{}${}${}${}", SCHEME, rounds, salt, digest(rounds, &salt, password))
}

pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(4, '$');
    let (Some(SCHEME), Some(rounds), Some(salt), Some(expected)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let Ok(rounds) = rounds.parse::<u32>() else {
        return false;
    };
    if rounds == 0 {
        return false;
    }

    let actual = digest(rounds, salt, password);
    // compare without an early exit on the first mismatch
    actual.len() == expected.len()
        && actual
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
