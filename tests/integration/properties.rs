//! Property-based tests for the patch engine and the token codec

use proptest::prelude::*;

use typetape::tape::{apply_patch, compute_patch};
use typetape::token::{self, TokenError, ID_LEN, TOKEN_LEN};

proptest! {
    /// applying the patch from `a` to `b` onto `a` always reproduces `b`.
    #[test]
    fn patch_roundtrip(a in ".*", b in ".*") {
        let patch = compute_patch(&a, &b);
        let applied = apply_patch(&patch, &a).expect("patch applies to its own base");
        prop_assert_eq!(applied, b);
    }

    /// Identical inputs always yield the identical patch string.
    #[test]
    fn patch_is_deterministic(a in ".*", b in ".*") {
        prop_assert_eq!(compute_patch(&a, &b), compute_patch(&a, &b));
    }

    /// Every valid identifier survives the encode/decode round-trip.
    #[test]
    fn token_roundtrip(id in proptest::array::uniform12(any::<u8>())) {
        let encoded = token::encode(&id).expect("12-byte ids encode");
        prop_assert_eq!(encoded.len(), TOKEN_LEN);
        let decoded = token::decode(&encoded).expect("own tokens decode");
        prop_assert_eq!(decoded.as_bytes(), &id);
    }

    /// Any identifier that is not exactly the store's width is rejected.
    #[test]
    fn wrong_width_identifiers_are_rejected(len in 0usize..64) {
        prop_assume!(len != ID_LEN);
        let id = vec![0u8; len];
        prop_assert!(matches!(
            token::encode(&id),
            Err(TokenError::InvalidIdentifierLength(_))
        ));
    }

    /// Any token that is not exactly the token width is rejected.
    #[test]
    fn wrong_width_tokens_are_rejected(len in 0usize..64) {
        prop_assume!(len != TOKEN_LEN);
        let candidate = "A".repeat(len);
        prop_assert!(matches!(
            token::decode(&candidate),
            Err(TokenError::InvalidTokenLength(_))
        ));
    }
}
