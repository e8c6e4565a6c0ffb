//! Extraction driver (C5).
//!
//! Grounded in rspamd's `rspamd_url_text_extract`/`rspamd_url_find`: a
//! single automaton pass over the text, with each hit gated by its
//! matcher's start/end probes before being handed to C3, then C4 to
//! classify the host.

use crate::automaton::ScanControl;
use crate::matchers::{MatcherFamily, MatcherFlags, MatcherSet};
use crate::probes;
use crate::tld::numeric_host_decode;
use crate::uri::{parse_mailto, parse_web};
use crate::url::{Span, Url, UrlFlags};

const MAX_RECURSION_DEPTH: u32 = 1;

fn is_tld_terminator(text: &[u8], end_offset: usize) -> bool {
    match text.get(end_offset) {
        None => true,
        Some(b',') | Some(b'/') | Some(b'?') | Some(b':') => true,
        Some(&b) if crate::charclass::is_lwsp_byte(b) => true,
        Some(b'.') => text
            .get(end_offset + 1)
            .map(|&next| crate::charclass::is_lwsp_byte(next) || matches!(next, b'/' | b'?' | b':'))
            .unwrap_or(true),
        _ => false,
    }
}

fn build_candidate(text: &[u8], m_begin: usize, m_len: usize, synth_prefix: Option<&'static str>) -> Vec<u8> {
    match synth_prefix {
        Some(prefix) => {
            let mut v = Vec::with_capacity(prefix.len() + m_len);
            v.extend_from_slice(prefix.as_bytes());
            v.extend_from_slice(&text[m_begin..m_begin + m_len]);
            v
        }
        None => text[m_begin..m_begin + m_len].to_vec(),
    }
}

/// Shift every span in `url` that starts at or after `host.1` left by
/// `delta` bytes and grow/shrink `host` to `new_host_len`, after `raw` has
/// already been rewritten with the canonical host text spliced in.
fn splice_host(url: &mut Url, canonical: &str) {
    let (host_begin, host_end) = url.host;
    let old_len = host_end - host_begin;
    let new_len = canonical.len();

    let mut raw = std::mem::take(&mut url.raw).into_bytes();
    raw.splice(host_begin..host_end, canonical.bytes());
    url.raw = String::from_utf8(raw).expect("canonical host text is ASCII");

    let delta = new_len as i64 - old_len as i64;
    let shift = |span: &mut Span| {
        if let Some((b, e)) = span {
            if *b >= host_end {
                *b = (*b as i64 + delta) as usize;
            }
            if *e >= host_end {
                *e = (*e as i64 + delta) as usize;
            }
        }
    };
    shift(&mut url.path);
    shift(&mut url.query);
    shift(&mut url.fragment);

    url.host = (host_begin, host_begin + new_len);
}

/// Run C4 against `url`'s host: find its TLD among the suffix-list
/// matchers, or fall back to the numeric-host decoder. Returns `false`
/// (the URL should be rejected with `TLD_MISSING`) if neither succeeds.
fn classify_host(matchers: &MatcherSet, url: &mut Url) -> bool {
    let host_bytes = url.host_str().as_bytes().to_vec();
    if let Some((b, e)) = matchers.find_tld(&host_bytes) {
        url.tld = Some((url.host.0 + b, url.host.0 + e));
        return true;
    }
    if let Some((canonical, flags)) = numeric_host_decode(url.host_str()) {
        splice_host(url, &canonical);
        url.tld = Some(url.host);
        url.flags |= flags;
        return true;
    }
    false
}

fn extract_into(
    matchers: &MatcherSet,
    text: &[u8],
    is_html: bool,
    depth: u32,
    max_depth: u32,
    out: &mut Vec<(usize, usize, Url)>,
) {
    let automaton = matchers.automaton();
    let mut last_at: Option<usize> = None;
    // Different matcher families routinely hit the same stretch of text
    // (e.g. `www.` and a `.com` suffix entry both claim "www.example.com").
    // Once a candidate is emitted, any later candidate starting before its
    // end is a re-discovery of the same URL and is dropped.
    let mut claimed_until = 0usize;

    automaton.scan(text, automaton.start_state(), |pattern_idx, end_offset| {
        let matcher = matchers.matcher(pattern_idx);
        if matcher.flags.contains(MatcherFlags::NOHTML) && is_html {
            return ScanControl::Continue;
        }

        let pattern_len = automaton.pattern_len(pattern_idx);
        let candidate_start = end_offset - pattern_len;

        if matcher.flags.contains(MatcherFlags::TLD_MATCH) && !is_tld_terminator(text, end_offset) {
            return ScanControl::Continue;
        }

        let bounds = match matcher.family {
            MatcherFamily::Web => probes::web_start(text, candidate_start)
                .then_some(candidate_start)
                .and_then(|begin| probes::web_end(text, begin).map(|len| (begin, len))),
            MatcherFamily::File => probes::file_start(text, candidate_start)
                .then_some(candidate_start)
                .map(|begin| (begin, probes::file_end(text, begin) - begin)),
            MatcherFamily::Tld => probes::tld_start(text, end_offset)
                .and_then(|begin| probes::tld_end(text, begin, end_offset).map(|len| (begin, len))),
            MatcherFamily::Email if matcher.pattern.as_slice() == b"mailto:" => probes::mailto_start(text, candidate_start)
                .then_some(candidate_start)
                .and_then(|begin| {
                    probes::mailto_end(text, begin).map(|(len, at)| {
                        last_at = Some(at);
                        (begin, len)
                    })
                }),
            MatcherFamily::Email => {
                // Bare `@` sentinel. Suppress the duplicate emission this
                // same `@` already produced as part of a `mailto:` match.
                if last_at == Some(candidate_start) {
                    None
                } else {
                    probes::bare_at_start(text, candidate_start)
                        .and_then(|begin| probes::bare_at_end(text, candidate_start).map(|end| (begin, end - begin)))
                }
            }
        };

        let Some((m_begin, m_len)) = bounds else {
            return ScanControl::Continue;
        };
        if m_len == 0 || m_begin < claimed_until {
            return ScanControl::Continue;
        }

        let candidate = build_candidate(text, m_begin, m_len, matcher.synth_prefix);

        let parsed = match matcher.family {
            MatcherFamily::Email => parse_mailto(&candidate),
            _ => parse_web(&candidate, true),
        };

        if let Ok(mut url) = parsed {
            if classify_host(matchers, &mut url) {
                claimed_until = m_begin + m_len;
                if depth < max_depth {
                    if let Some((qb, qe)) = url.query {
                        let query_bytes = url.raw[qb..qe].as_bytes().to_vec();
                        extract_into(matchers, &query_bytes, false, depth + 1, max_depth, out);
                    }
                }
                out.push((m_begin, claimed_until, url));
            }
        }

        ScanControl::Continue
    });
}

/// Find every URL in `text`. `is_html` suppresses matchers
/// flagged `NOHTML` (bare `@` and `ftp.`), which only make sense as
/// plain-text heuristics.
pub fn find_urls(matchers: &MatcherSet, text: &[u8], is_html: bool) -> Vec<Url> {
    let mut out = Vec::new();
    extract_into(matchers, text, is_html, 0, MAX_RECURSION_DEPTH, &mut out);
    out.into_iter().map(|(_, _, url)| url).collect()
}

/// Resumable variant of [`find_urls`]: find the next URL at or after
/// `*cursor`, advance `*cursor` past it, and return it. Returns `None` once
/// no further URL is found. Unlike `find_urls`, does not recurse into query
/// strings: the cursor tracks one flat pass over `text`, and a nested match
/// would report an offset relative to a copied query buffer, not `text`.
pub fn next_url(matchers: &MatcherSet, text: &[u8], cursor: &mut usize, is_html: bool) -> Option<Url> {
    if *cursor >= text.len() {
        return None;
    }
    let mut spans = Vec::new();
    extract_into(matchers, &text[*cursor..], is_html, 0, 0, &mut spans);
    let (_, end, url) = spans.into_iter().next()?;
    *cursor += end;
    Some(url)
}

/// An iterator over the URLs in a text block, driven by [`next_url`].
pub struct UrlIter<'a> {
    matchers: &'a MatcherSet,
    text: &'a [u8],
    cursor: usize,
    is_html: bool,
}

impl<'a> UrlIter<'a> {
    /// Create an iterator over `text`'s URLs.
    pub fn new(matchers: &'a MatcherSet, text: &'a [u8], is_html: bool) -> UrlIter<'a> {
        UrlIter {
            matchers,
            text,
            cursor: 0,
            is_html,
        }
    }
}

impl<'a> Iterator for UrlIter<'a> {
    type Item = Url;

    fn next(&mut self) -> Option<Url> {
        next_url(self.matchers, self.text, &mut self.cursor, self.is_html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::MatcherSetBuilder;
    use std::io::Cursor;

    fn test_matchers() -> MatcherSet {
        let mut builder = MatcherSetBuilder::new();
        builder
            .add_suffix_rules(Cursor::new("com\nnet\norg\nco.uk\n*.ck\n"))
            .unwrap();
        builder.build()
    }

    #[test]
    fn finds_plain_http_url() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"visit http://example.com/path for info", false);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].host_str(), "example.com");
        assert_eq!(urls[0].tld_str(), "example.com");
    }

    #[test]
    fn finds_bare_domain_via_tld_matcher() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"see example.com today", false);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].host_str(), "example.com");
    }

    #[test]
    fn finds_www_prefixed_domain_and_synthesizes_scheme() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"go to www.example.com now", false);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].scheme_str(), "http");
        assert_eq!(urls[0].host_str(), "www.example.com");
    }

    #[test]
    fn finds_mailto_and_suppresses_duplicate_bare_at() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"contact mailto:alice@example.com please", false);
        let emails: Vec<_> = urls.iter().filter(|u| u.scheme == crate::url::Scheme::Mailto).collect();
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].host_str(), "example.com");
    }

    #[test]
    fn finds_bare_at_email_without_scheme() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"write to bob@example.net soon", false);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].scheme, crate::url::Scheme::Mailto);
        assert_eq!(urls[0].host_str(), "example.net");
    }

    #[test]
    fn rejects_host_with_unknown_tld() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"see example.nonexistenttld here", false);
        assert!(urls.is_empty());
    }

    #[test]
    fn decodes_numeric_host() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"go to http://127.0.0.1/ now", false);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].host_str(), "127.0.0.1");
        assert!(urls[0].flags.contains(UrlFlags::NUMERIC_HOST));
    }

    #[test]
    fn nohtml_matcher_suppressed_in_html_mode() {
        let matchers = test_matchers();
        let urls = find_urls(&matchers, b"bob@example.com", true);
        assert!(urls.is_empty());
    }

    #[test]
    fn recursive_query_extraction_recovers_nested_url() {
        let matchers = test_matchers();
        let urls = find_urls(
            &matchers,
            b"http://redirect.example.com/go?u=http://evil.example.net/x",
            false,
        );
        assert!(urls.iter().any(|u| u.host_str() == "redirect.example.com"));
        assert!(urls.iter().any(|u| u.host_str() == "evil.example.net"));
    }

    #[test]
    fn next_url_iterates_in_order() {
        let matchers = test_matchers();
        let text = b"see example.com and example.net both";
        let iter = UrlIter::new(&matchers, text, false);
        let hosts: Vec<String> = iter.map(|u| u.host_str().to_string()).collect();
        assert_eq!(hosts, vec!["example.com", "example.net"]);
    }
}
