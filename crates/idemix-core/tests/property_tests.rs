//! Issuance properties over arbitrary OU labels and role flags
//!
//! A generated signer config carries the requested OU and role and its
//! credential verifies under the issuer key. Issuer public keys re-encode
//! byte for byte, and arbitrary bytes never decode into a key that passes
//! `check`.

use proptest::prelude::*;
use idemix_core::{
    verify_credential, IdemixCa, IssuerKeyGenerator, IssuerPublicKey, SignerConfig,
    SignerConfigGenerator,
};

// ============================================
// Arbitrary Implementations
// ============================================

fn arb_org_unit() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-zA-Z0-9._-]{1,32}",
        any::<String>(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_signer_config_binds_inputs(org_unit in arb_org_unit(), is_admin in any::<bool>()) {
        let ca = IdemixCa::new();
        let key = ca.generate_issuer_key().unwrap();

        let bytes = ca.generate_signer_config(is_admin, &org_unit, &key).unwrap();
        let config = SignerConfig::from_bytes(&bytes).unwrap();

        prop_assert_eq!(&config.organizational_unit_identifier, &org_unit);
        prop_assert_eq!(config.is_admin, is_admin);

        let credential = config.credential().unwrap();
        prop_assert!(verify_credential(&credential, key.public(), Some(config.sk.as_slice())).is_ok());
    }

    #[test]
    fn prop_public_key_decodes_to_same_record(_seed in any::<u8>()) {
        let key = IdemixCa::new().generate_issuer_key().unwrap();
        let bytes = key.public().to_bytes();

        let decoded = IssuerPublicKey::from_bytes(&bytes).unwrap();
        prop_assert_eq!(decoded.to_bytes(), bytes);
        prop_assert!(decoded.check().is_ok());
    }

    #[test]
    fn prop_garbage_never_validates(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
        // Either the protobuf decode fails or the decoded record is rejected
        if let Ok(ipk) = IssuerPublicKey::from_bytes(&bytes) {
            prop_assert!(ipk.check().is_err());
        }
    }
}
