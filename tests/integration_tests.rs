//! End-to-end extraction scenarios, run against a suffix list
//! containing `com`, `co.uk`, and `*.ck`.

use std::io::Cursor;
use urlscan::matchers::MatcherSetBuilder;
use urlscan::{find_urls, parse_url, Scheme, UrlFlags};

fn matchers() -> urlscan::MatcherSet {
    let mut builder = MatcherSetBuilder::new();
    builder
        .add_suffix_rules(Cursor::new("com\nco.uk\n*.ck\n"))
        .unwrap();
    builder.build()
}

#[test]
fn scenario_1_plain_http_with_path_and_query() {
    let matchers = matchers();
    let urls = find_urls(&matchers, b"visit http://example.com/path?x=1 today", false);
    assert_eq!(urls.len(), 1);
    let u = &urls[0];
    assert_eq!(u.scheme, Scheme::Http);
    assert_eq!(u.host_str(), "example.com");
    assert_eq!(u.tld_str(), "example.com");
    assert_eq!(u.slice(u.path), "/path");
    assert_eq!(u.slice(u.query), "x=1");
}

#[test]
fn scenario_2_mailto_with_cctld() {
    let matchers = matchers();
    let urls = find_urls(&matchers, b"mail me at alice@example.co.uk please", false);
    assert_eq!(urls.len(), 1);
    let u = &urls[0];
    assert_eq!(u.scheme, Scheme::Mailto);
    assert_eq!(u.slice(u.userinfo), "alice");
    assert_eq!(u.host_str(), "example.co.uk");
    assert_eq!(u.tld_str(), "example.co.uk");
}

#[test]
fn scenario_3_star_match_pulls_two_extra_labels() {
    // A `*.ck` rule needs two `.` separators to its left before it stops
    // pulling labels. Walking back from the ".ck" match over "bar.ck" finds
    // one dot at the "foo"/"bar" boundary, then a second at the "www"/"foo"
    // boundary, so the eTLD is "foo.bar.ck"; "www." is excluded as a higher
    // host label.
    let matchers = matchers();
    let urls = find_urls(&matchers, b"click www.foo.bar.ck!", false);
    assert_eq!(urls.len(), 1);
    let u = &urls[0];
    assert_eq!(u.scheme, Scheme::Http);
    assert_eq!(u.host_str(), "www.foo.bar.ck");
    assert_eq!(u.tld_str(), "foo.bar.ck");
}

#[test]
fn scenario_4_obscured_numeric_host() {
    let matchers = matchers();
    let urls = find_urls(&matchers, b"http://0x7f.1/", false);
    assert_eq!(urls.len(), 1);
    let u = &urls[0];
    assert_eq!(u.host_str(), "127.0.0.1");
    assert!(u.flags.contains(UrlFlags::NUMERIC_HOST));
    assert!(u.flags.contains(UrlFlags::OBSCURED_HOST));
}

#[test]
fn scenario_5_angle_bracketed_url_excludes_brackets_and_trailing_dot() {
    let matchers = matchers();
    let urls = find_urls(&matchers, b"see <http://example.com>.", false);
    assert_eq!(urls.len(), 1);
    assert_eq!(urls[0].raw, "http://example.com");
}

#[test]
fn scenario_6_nested_url_recovered_from_percent_encoded_query() {
    let matchers = matchers();
    let text = b"http://r.example.com/?u=http%3A%2F%2Fbad.example.net%2F";
    let urls = find_urls(&matchers, text, false);
    assert!(urls.iter().any(|u| u.host_str() == "r.example.com"));
    assert!(urls.iter().any(|u| u.host_str() == "bad.example.net"));
}

#[test]
fn property_idempotence_reparsing_raw_yields_equal_record() {
    let urls = find_urls(&matchers(), b"visit http://example.com/path?x=1 today", false);
    let original = &urls[0];
    let reparsed = parse_url(original.raw.as_bytes(), true).unwrap();
    assert_eq!(original.raw, reparsed.raw);
    assert_eq!(original.host_str(), reparsed.host_str());
}

#[test]
fn property_monotonic_consumption_across_multiple_urls() {
    let matchers = matchers();
    let text = b"see example.com and then example.co.uk afterward";
    let urls = find_urls(&matchers, text, false);
    assert_eq!(urls.len(), 2);
    // Both candidates came from disjoint, forward-progressing spans; the
    // second host text appears strictly after the first in the source.
    let first_pos = text.windows(11).position(|w| w == b"example.com").unwrap();
    let second_pos = text.windows(14).position(|w| w == b"example.co.uk").unwrap();
    assert!(second_pos > first_pos);
}

#[test]
fn property_host_lowercasing() {
    let urls = find_urls(&matchers(), b"visit HTTP://EXAMPLE.COM/PATH today", false);
    assert_eq!(urls[0].host_str(), "example.com");
}

#[test]
fn property_tld_suffix_of_host() {
    let matchers = matchers();
    let urls = find_urls(&matchers, b"visit http://deep.example.co.uk/ today", false);
    let u = &urls[0];
    assert!(u.host_str().ends_with(u.tld_str()));
    let split = u.host_str().len() - u.tld_str().len();
    assert_eq!(u.host_str().as_bytes()[split - 1], b'.');
}

#[test]
fn property_numeric_canonicalization_is_stable_on_reparse() {
    let matchers = matchers();
    let urls = find_urls(&matchers, b"http://0x7f.1/", false);
    let canonical_host = urls[0].host_str().to_string();
    assert!(urls[0].flags.contains(UrlFlags::NUMERIC_HOST));

    let reparsed = parse_url(format!("http://{canonical_host}/").as_bytes(), true).unwrap();
    assert_eq!(reparsed.host_str(), canonical_host);
}

#[test]
fn property_port_bounds() {
    let u = parse_url(b"http://example.com:8080/", true).unwrap();
    assert!(u.port == 0 || (1..=65535).contains(&u.port));
    assert_eq!(u.port, 8080);

    let err = parse_url(b"http://example.com:99999/", true).unwrap_err();
    assert_eq!(err, urlscan::UrlError::InvalidPort);
}
