//! Property tests for the validation rules and duration parsing.

use std::time::Duration;

use gamefeedback::config::parse_duration;
use gamefeedback::validation::{password_strength, username_format, PASSWORD_SYMBOLS};
use proptest::prelude::*;

proptest! {
    #[test]
    fn passwords_without_a_symbol_never_pass(password in "[A-Za-z0-9]{8,64}") {
        prop_assert!(password_strength(&password).is_err());
    }

    #[test]
    fn passwords_with_all_four_classes_always_pass(
        lower in "[a-z]{1,20}",
        upper in "[A-Z]{1,10}",
        digits in "[0-9]{1,10}",
        symbol_index in 0usize..7,
    ) {
        let symbol = PASSWORD_SYMBOLS.chars().nth(symbol_index).unwrap();
        let password = format!("{lower}{upper}{digits}{symbol}");
        prop_assert!(password_strength(&password).is_ok());
    }

    #[test]
    fn word_character_usernames_always_pass(username in "[A-Za-z0-9_]{1,30}") {
        prop_assert!(username_format(&username).is_ok());
    }

    #[test]
    fn usernames_with_any_other_character_fail(
        prefix in "[A-Za-z0-9_]{0,10}",
        bad in "[^A-Za-z0-9_]",
        suffix in "[A-Za-z0-9_]{0,10}",
    ) {
        let username = format!("{prefix}{bad}{suffix}");
        prop_assert!(username_format(&username).is_err());
    }

    #[test]
    fn durations_round_trip_in_every_unit(value in 0u64..1_000_000) {
        prop_assert_eq!(
            parse_duration(&format!("{value}")),
            Some(Duration::from_secs(value))
        );
        prop_assert_eq!(
            parse_duration(&format!("{value}s")),
            Some(Duration::from_secs(value))
        );
        prop_assert_eq!(
            parse_duration(&format!("{value}m")),
            Some(Duration::from_secs(value * 60))
        );
        prop_assert_eq!(
            parse_duration(&format!("{value}h")),
            Some(Duration::from_secs(value * 3600))
        );
        prop_assert_eq!(
            parse_duration(&format!("{value}d")),
            Some(Duration::from_secs(value * 86_400))
        );
    }
}
