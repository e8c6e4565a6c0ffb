//! Matcher start/end probes.
//!
//! Four matcher families, each with a start probe (does the automaton hit
//! sit at a plausible URL boundary?) and an end probe (where does the
//! candidate stop?). Grounded in rspamd's family of `url_*_start`/`url_*_end`
//! functions (`url.c`): `url_web_start`/`url_web_end`,
//! `url_file_start`/`url_file_end`, `url_tld_start`/`url_tld_end`,
//! `url_email_start`/`url_email_end`.

use crate::charclass::{is_domain_byte, is_lwsp_byte, is_mailsafe_byte, is_url_starter, BRACKET_PAIRS};
use crate::tld::accept_match;
use crate::uri::web_parsed_end;

/// Web family start probe: the byte immediately before the match must be a
/// URL-starter or whitespace, or the match must sit at the buffer start.
pub fn web_start(text: &[u8], candidate_start: usize) -> bool {
    match candidate_start.checked_sub(1) {
        None => true,
        Some(i) => is_url_starter(text[i]) || is_lwsp_byte(text[i]),
    }
}

/// Web family end probe: run the web grammar in lenient mode from
/// `match_begin`. Returns `m_len`.
pub fn web_end(text: &[u8], match_begin: usize) -> Option<usize> {
    web_parsed_end(&text[match_begin..], false).ok()
}

/// File family start probe: a `file://` match is always a plausible
/// boundary at the match position.
pub fn file_start(_text: &[u8], _candidate_start: usize) -> bool {
    true
}

/// File family end probe: walk forward while URLSAFE, stopping at the
/// closing punctuation matching whatever bracket (if any) opens immediately
/// before `match_begin`.
pub fn file_end(text: &[u8], match_begin: usize) -> usize {
    let stop = match_begin
        .checked_sub(1)
        .and_then(|i| text.get(i))
        .and_then(|&opener| BRACKET_PAIRS.iter().find(|&&(open, _)| open == opener))
        .map(|&(_, close)| close);

    let mut i = match_begin;
    while i < text.len() {
        let b = text[i];
        if Some(b) == stop || is_lwsp_byte(b) || !crate::charclass::is_urlsafe_byte(b) {
            break;
        }
        i += 1;
    }
    i
}

/// TLD family start probe: walk backward over DOMAIN/`.` bytes, stopping at
/// whitespace or a URL-starter. Rejects the candidate if a `/` is crossed
/// (a TLD lives only in a host, never a path) or if the byte after the stop
/// is not ASCII alphanumeric. Returns the host's start offset.
pub fn tld_start(text: &[u8], candidate_start: usize) -> Option<usize> {
    let mut i = candidate_start;
    while i > 0 {
        let b = text[i - 1];
        if b == b'/' {
            return None;
        }
        if !(is_domain_byte(b) || b == b'.') {
            break;
        }
        i -= 1;
    }
    if i > 0 {
        let before = text[i - 1];
        if !(is_lwsp_byte(before) || is_url_starter(before)) {
            return None;
        }
    }
    if i >= text.len() || !text[i].is_ascii_alphanumeric() {
        return None;
    }
    Some(i)
}

/// TLD family end probe, plus the `/`/`:` handoff to [`web_end`].
/// `host_start` is the value returned by [`tld_start`];
/// `match_end` is the automaton hit's end offset in `text`. Returns `m_len`.
pub fn tld_end(text: &[u8], host_start: usize, match_end: usize) -> Option<usize> {
    let mut host_end = match_end;
    while host_end < text.len() && is_domain_byte(text[host_end]) {
        host_end += 1;
    }
    let host_len = host_end - host_start;
    let match_end_rel = match_end - host_start;
    let effective_len = accept_match(host_len, match_end_rel)?;

    let terminator = text.get(host_start + effective_len).copied();
    if matches!(terminator, Some(b'/') | Some(b':')) {
        return web_end(text, host_start);
    }
    Some(effective_len)
}

/// `mailto:` start probe: always a plausible boundary at the match
/// position (the scheme prefix itself anchors it).
pub fn mailto_start(_text: &[u8], _candidate_start: usize) -> bool {
    true
}

/// `mailto:` end probe: run the mailto grammar, returning `(m_len,
/// last_at)` where `last_at` is the userinfo's end offset.
pub fn mailto_end(text: &[u8], match_begin: usize) -> Option<(usize, usize)> {
    crate::uri::mailto_parsed_end(&text[match_begin..])
        .ok()
        .map(|(end, userinfo_end)| (end, match_begin + userinfo_end))
}

/// Bare-`@` start probe: require an alphanumeric immediately to the left of
/// `@`, then walk left collecting MAILSAFE bytes, trimming any leading
/// non-alphanumeric. Returns the local-part's start offset.
pub fn bare_at_start(text: &[u8], at_pos: usize) -> Option<usize> {
    if at_pos == 0 || !text[at_pos - 1].is_ascii_alphanumeric() {
        return None;
    }
    let mut i = at_pos;
    while i > 0 && is_mailsafe_byte(text[i - 1]) {
        i -= 1;
    }
    while i < at_pos && !text[i].is_ascii_alphanumeric() {
        i += 1;
    }
    Some(i)
}

/// Bare-`@` end probe: require an alphanumeric immediately to the right of
/// `@`, then walk right collecting DOMAIN bytes, trimming any trailing
/// non-alphanumeric. Returns the domain's end offset.
pub fn bare_at_end(text: &[u8], at_pos: usize) -> Option<usize> {
    if at_pos + 1 >= text.len() || !text[at_pos + 1].is_ascii_alphanumeric() {
        return None;
    }
    let mut i = at_pos + 1;
    while i < text.len() && is_domain_byte(text[i]) {
        i += 1;
    }
    while i > at_pos + 1 && !text[i - 1].is_ascii_alphanumeric() {
        i -= 1;
    }
    Some(i)
}
