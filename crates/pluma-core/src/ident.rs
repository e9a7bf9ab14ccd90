//! Identifier generation
//!
//! Every entity carries an opaque string id prefixed with its kind
//! ("story", "page", "folder", "img"), so the kind is recoverable from
//! the id alone. Ids are time-ordered by construction: the prefix is
//! followed by the wall-clock millisecond timestamp and a random base-36
//! suffix.

use chrono::Utc;
use rand::Rng;

/// Alphabet for the random suffix (base 36)
const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Length of the random suffix
const SUFFIX_LEN: usize = 9;

/// Generate a unique, time-ordered id with the given kind prefix
///
/// Uniqueness is probabilistic, not cryptographic: 36^9 suffixes per
/// millisecond is far more than interactive use can collide on.
pub fn generate_id(prefix: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{}-{}{}", prefix, millis, suffix)
}
