//! Content fingerprints.

/// 64-bit fingerprint of `bytes` (leading bytes of a blake3 digest).
pub fn compute(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_stable() {
        assert_eq!(compute(b"[base]\ntitle = \"a\""), compute(b"[base]\ntitle = \"a\""));
    }

    #[test]
    fn test_compute_differs_on_change() {
        assert_ne!(compute(b"port = 5277"), compute(b"port = 5278"));
    }
}
