//! Content hashing (xxh3) for parse-cache keys.

use xxhash_rust::xxh3::xxh3_64;

/// Hash file content. Same content always produces the same key.
pub fn hash_content(content: &[u8]) -> u64 {
    xxh3_64(content)
}
