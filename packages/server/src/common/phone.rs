use sha2::{Digest, Sha256};

/// Digest a phone number with SHA-256.
///
/// Raw phone numbers never reach the database or the operation log; the
/// digest is the lookup key for bindings and code rows. The public surface
/// digests exactly once, everything below it takes the digest.
pub fn phone_digest(phone: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(phone.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Mask a phone number for audit records, keeping only the last four digits.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(phone_digest("+11234567890"), phone_digest("+11234567890"));
    }

    #[test]
    fn digest_differs_per_phone() {
        assert_ne!(phone_digest("+11234567890"), phone_digest("+19876543210"));
    }

    #[test]
    fn digest_is_hex_sha256() {
        let digest = phone_digest("+11234567890");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_phone("+11234567890"), "********7890");
    }

    #[test]
    fn mask_handles_short_values() {
        assert_eq!(mask_phone("123"), "***");
        assert_eq!(mask_phone(""), "");
    }
}
