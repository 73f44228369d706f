//! Property-based tests for exact, case-sensitive marker matching.

use proptest::prelude::*;
use webshell::services::deep_link::DeepLinkInterceptor;

proptest! {
    #[test]
    fn marker_anywhere_matches(
        marker in "[_a-zA-Z0-9]{1,12}",
        prefix in "[a-z:/.?=&]{0,30}",
        suffix in "[a-z:/.?=&]{0,30}",
    ) {
        let interceptor = DeepLinkInterceptor::new(&marker, "_chan");
        let url = format!("{}{}{}", prefix, marker, suffix);
        prop_assert!(interceptor.matches(&url));
        prop_assert_eq!(interceptor.intercept(&url), Some("_chan"));
    }

    #[test]
    fn one_character_difference_does_not_match(
        marker in "[a-zA-Z]{2,12}",
        index in any::<prop::sample::Index>(),
        prefix in "[0-9:/.]{0,20}",
    ) {
        let pos = index.index(marker.len());
        let mut chars: Vec<char> = marker.chars().collect();
        let c = chars[pos];
        chars[pos] = if c.is_ascii_lowercase() {
            c.to_ascii_uppercase()
        } else {
            c.to_ascii_lowercase()
        };
        let altered: String = chars.into_iter().collect();

        let interceptor = DeepLinkInterceptor::new(&marker, "_chan");
        let url = format!("{}{}", prefix, altered);
        prop_assert!(!interceptor.matches(&url));
        prop_assert_eq!(interceptor.intercept(&url), None);
    }

    #[test]
    fn urls_without_marker_pass_through(url in "[0-9:/.?=&]{0,60}") {
        let interceptor = DeepLinkInterceptor::new("_jiZPj", "_jiZPj");
        prop_assert!(!interceptor.matches(&url));
    }
}
