//! Session token helpers.
//!
//! Tokens are opaque 32-char lowercase hex strings. They carry no user or
//! time information; grouping lives entirely in the visits table.

use uuid::Uuid;

pub const TOKEN_LEN: usize = 32;

/// Mints a fresh session token.
pub fn mint() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Checks the 32-hex shape without touching the database.
/// Anything else a caller presents is treated as no token at all.
pub fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minted_tokens_are_well_formed_and_distinct() {
        let a = mint();
        let b = mint();
        assert!(is_well_formed(&a));
        assert!(is_well_formed(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_foreign_shapes() {
        assert!(is_well_formed("deadbeefdeadbeefdeadbeefdeadbeef"));
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("deadbeef"));
        assert!(!is_well_formed("DEADBEEFDEADBEEFDEADBEEFDEADBEEF"));
        assert!(!is_well_formed("zzzzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"));
        assert!(!is_well_formed("deadbeefdeadbeefdeadbeefdeadbee"));
    }
}
