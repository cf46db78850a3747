use blake3::Hasher;

/// Truncates a BLAKE3 digest to its first 8 bytes (little-endian).
///
/// Collisions are tolerable here: two colliding unresolved matches only share one curation
/// entry. Use the full digest if uniqueness ever matters.
#[inline]
fn truncate(hash: &blake3::Hash) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Dedupe key for an unresolved match: normalized alias plus its context window.
#[inline]
pub fn hash_curation_key(alias: &str, window: &str) -> u64 {
    let mut hasher = Hasher::new();
    hasher.update(alias.as_bytes());
    hasher.update(b"|");
    hasher.update(window.as_bytes());
    truncate(&hasher.finalize())
}
