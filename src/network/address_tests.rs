//! Tests for hardware address normalization.

use std::collections::HashSet;

use super::*;

mod construction {
    use super::*;

    #[test]
    fn colon_separated_uppercase() {
        let mac = NetworkAddress::new("AA:BB:CC:DD:EE:FF").unwrap();

        assert_eq!(mac.string(), "AABBCCDDEEFF");
        assert_eq!(mac.integer(), 187_723_572_702_975);
        assert_eq!(mac.integer(), u64::from_str_radix("AABBCCDDEEFF", 16).unwrap());
    }

    #[test]
    fn dash_separated_lowercase() {
        let mac = NetworkAddress::new("00-11-22-33-44-55").unwrap();

        assert_eq!(mac.string(), "001122334455");
        assert_eq!(mac.integer(), 0x0011_2233_4455);
    }

    #[test]
    fn mixed_separators_and_case() {
        let mac = NetworkAddress::new("aA:bB-cc:Dd-eE:ff").unwrap();
        assert_eq!(mac.string(), "AABBCCDDEEFF");
    }

    #[test]
    fn bare_hex_is_accepted() {
        let mac = NetworkAddress::new("deadbeef0001").unwrap();
        assert_eq!(mac.string(), "DEADBEEF0001");
    }

    #[test]
    fn broadcast_is_max_value() {
        let mac = NetworkAddress::new("ff:ff:ff:ff:ff:ff").unwrap();
        assert_eq!(mac.integer(), 0xFFFF_FFFF_FFFF);
    }

    #[test]
    fn construction_is_idempotent_on_canonical_output() {
        for input in [
            "AA:BB:CC:DD:EE:FF",
            "aa-bb-cc-dd-ee-ff",
            "0a:1B-2c:3D-4e:5F",
            "000000000000",
        ] {
            let first = NetworkAddress::new(input).unwrap();
            let second = NetworkAddress::new(first.string()).unwrap();

            assert_eq!(first, second, "input {input}");
            assert_eq!(first.string(), second.string());
        }
    }
}

mod format_errors {
    use super::*;

    #[test]
    fn too_short_fails() {
        let result = NetworkAddress::new("AA:BB:CC");

        assert_eq!(
            result.unwrap_err(),
            AddressError::Format {
                input: "AA:BB:CC".to_string()
            }
        );
    }

    #[test]
    fn too_long_is_not_truncated() {
        assert!(NetworkAddress::new("AA:BB:CC:DD:EE:FF:00").is_err());
    }

    #[test]
    fn non_hex_digits_fail() {
        assert!(NetworkAddress::new("GG:BB:CC:DD:EE:FF").is_err());
    }

    #[test]
    fn other_separators_are_not_stripped() {
        assert!(NetworkAddress::new("AA.BB.CC.DD.EE.FF").is_err());
    }

    #[test]
    fn empty_input_fails() {
        assert!(NetworkAddress::new("").is_err());
    }

    #[test]
    fn error_names_the_input() {
        let error = NetworkAddress::new("nope").unwrap_err();
        assert!(error.to_string().contains("'nope'"));
    }
}

mod accessors {
    use super::*;

    #[test]
    fn hex_matches_string() {
        for input in ["AA:BB:CC:DD:EE:FF", "01-23-45-67-89-ab", "c0ffee000000"] {
            let mac = NetworkAddress::new(input).unwrap();
            assert_eq!(mac.hex(), mac.string());
        }
    }

    #[test]
    fn display_is_canonical() {
        let mac = NetworkAddress::new("aa:bb:cc:dd:ee:ff").unwrap();
        assert_eq!(mac.to_string(), "AABBCCDDEEFF");
    }

    #[test]
    fn debug_shows_both_forms() {
        let mac = NetworkAddress::new("00:00:00:00:00:0a").unwrap();
        assert_eq!(
            format!("{mac:?}"),
            "NetworkAddress(string=00000000000A, integer=10)"
        );
    }

    #[test]
    fn octets_are_in_order() {
        let mac = NetworkAddress::new("01:02:03:04:05:06").unwrap();
        assert_eq!(mac.octets(), [1, 2, 3, 4, 5, 6]);
    }
}

mod comparison {
    use super::*;

    #[test]
    fn equal_across_notations() {
        let a = NetworkAddress::new("aa:bb:cc:dd:ee:ff").unwrap();
        let b = NetworkAddress::new("AA-BB-CC-DD-EE-FF").unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn ordering_follows_integer_value() {
        let low = NetworkAddress::new("00:00:00:00:00:01").unwrap();
        let high = NetworkAddress::new("01:00:00:00:00:00").unwrap();

        assert!(low < high);
    }

    #[test]
    fn hash_collapses_notations() {
        let set: HashSet<NetworkAddress> = ["aa:bb:cc:dd:ee:ff", "AABBCCDDEEFF", "aa-bb-cc-dd-ee-ff"]
            .into_iter()
            .map(|s| s.parse().unwrap())
            .collect();

        assert_eq!(set.len(), 1);
    }
}

mod serde_support {
    use super::*;

    #[test]
    fn serializes_as_canonical_string() {
        let mac = NetworkAddress::new("aa:bb:cc:dd:ee:ff").unwrap();
        assert_eq!(serde_json::to_string(&mac).unwrap(), "\"AABBCCDDEEFF\"");
    }

    #[test]
    fn deserialization_validates() {
        let mac: NetworkAddress = serde_json::from_str("\"aa-bb-cc-dd-ee-ff\"").unwrap();
        assert_eq!(mac.string(), "AABBCCDDEEFF");

        let bad: Result<NetworkAddress, _> = serde_json::from_str("\"aa:bb\"");
        assert!(bad.is_err());
    }
}
