//! Utilities shared across the provisioning crates.

pub mod consts;
pub mod date_time;
pub mod errors;
pub mod pii;
pub mod types;

/// Generate a nanoid with the given prefix and length
#[inline]
pub fn generate_id(length: usize, prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid::nanoid!(length, &consts::ALPHABETS))
}

/// Generate a nanoid with the given prefix and a default length
#[inline]
pub fn generate_id_with_default_len(prefix: &str) -> String {
    generate_id(consts::ID_LENGTH, prefix)
}

/// Generate a fresh idempotency key for one logical create call.
///
/// Keys are never reused across retries of different logical operations; a
/// repeated request carrying the same key is safe to resend.
#[inline]
pub fn generate_idempotency_key() -> String {
    uuid::Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_carry_prefix_and_length() {
        let id = generate_id(consts::ID_LENGTH, "cus");
        let (prefix, rest) = id.split_once('_').expect("prefix separator");
        assert_eq!(prefix, "cus");
        assert_eq!(rest.len(), consts::ID_LENGTH);
    }

    #[test]
    fn idempotency_keys_are_unique_per_call() {
        let keys: HashSet<String> = (0..100).map(|_| generate_idempotency_key()).collect();
        assert_eq!(keys.len(), 100);
    }
}
