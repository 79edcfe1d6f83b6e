//! Benchmark utilities.

#![warn(missing_docs)]

use rand::distributions::Alphanumeric;
use rand::Rng;

/// Generate a random alphanumeric payload of the specified size.
pub fn random_payload(size: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(size)
        .map(char::from)
        .collect()
}

/// Generate random bytes of the specified size.
pub fn random_data(size: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    (0..size).map(|_| rng.gen()).collect()
}
