//! Generative coverage for the properties that matter most under fuzzing:
//! idempotence, monotonic consumption, and port bounds.

use proptest::prelude::*;
use std::io::Cursor;
use urlscan::matchers::MatcherSetBuilder;
use urlscan::{find_urls, parse_url, MatcherSet};

fn matchers() -> MatcherSet {
    let mut builder = MatcherSetBuilder::new();
    builder.add_suffix_rules(Cursor::new("com\nnet\norg\n")).unwrap();
    builder.build()
}

fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,8}"
}

fn tld() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("com"), Just("net"), Just("org")]
}

proptest! {
    #[test]
    fn idempotence_reparsing_raw_is_stable(host_label in label(), suffix in tld(), path in "[a-z0-9/]{0,12}") {
        let text = format!("http://{host_label}.{suffix}/{path}");
        let urls = find_urls(&matchers(), text.as_bytes(), false);
        prop_assume!(!urls.is_empty());
        let original = &urls[0];
        let reparsed = parse_url(original.raw.as_bytes(), true).unwrap();
        prop_assert_eq!(&original.raw, &reparsed.raw);
        prop_assert_eq!(original.host_str(), reparsed.host_str());
    }

    #[test]
    fn monotonic_consumption_across_interspersed_hosts(
        a in label(), a_tld in tld(),
        b in label(), b_tld in tld(),
        filler in "[ ]{1,5}[a-zA-Z]{0,10}[ ]{1,5}",
    ) {
        let matchers = matchers();
        let text = format!("{a}.{a_tld}{filler}{b}.{b_tld}");
        let urls = find_urls(&matchers, text.as_bytes(), false);
        // Every emitted host text must occur at a strictly increasing byte
        // offset within `text` as we scan left to right.
        let mut cursor = 0usize;
        for u in &urls {
            let host = u.host_str();
            let pos = text[cursor..].find(host);
            prop_assume!(pos.is_some());
            let abs = cursor + pos.unwrap();
            prop_assert!(abs + host.len() <= text.len());
            cursor = abs + host.len();
        }
    }

    #[test]
    fn port_bounds_hold_for_any_accepted_port(port in 1u32..=65535) {
        let text = format!("http://example.com:{port}/");
        let url = parse_url(text.as_bytes(), true).unwrap();
        prop_assert!(url.port == 0 || (1..=65535).contains(&url.port));
        prop_assert_eq!(url.port as u32, port);
    }

    #[test]
    fn port_out_of_range_is_rejected(port in 65536u32..=999999) {
        let text = format!("http://example.com:{port}/");
        let result = parse_url(text.as_bytes(), true);
        prop_assert!(result.is_err());
    }
}
