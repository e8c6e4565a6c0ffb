//! TLD classification and numeric-host decoding (C4).
//!
//! The acceptance and label-walk rules are grounded in rspamd's
//! `rspamd_tld_trie_callback` (`url.c`); the numeric-host decoder mirrors
//! `rspamd_url_is_ip` bit for bit, including its `inet_aton`-style decimal
//! /octal/hex component folding.

use crate::url::UrlFlags;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Decide whether a pattern match ending at `match_end` (exclusive) inside
/// a host of length `host_len` is acceptable: the
/// match must end exactly at the end of the host, or immediately before a
/// single trailing `.` (in which case that dot is excluded from the
/// effective host). Returns the effective host length to use for the
/// label walk, or `None` if the match should be rejected.
pub fn accept_match(host_len: usize, match_end: usize) -> Option<usize> {
    if match_end == host_len {
        Some(host_len)
    } else if match_end + 1 == host_len {
        Some(match_end)
    } else {
        None
    }
}

/// Walk backward from `match_start` (the position of the matched pattern's
/// synthesized leading `.`) counting `.` separators: a plain rule needs one,
/// a `STAR_MATCH` rule needs two. Returns the index of the separator that
/// satisfies the count (the label starts one byte past it). If the host is
/// exhausted before the count is satisfied, the whole remaining host becomes
/// the eTLD (there is no higher label left to exclude).
pub fn find_label_start(host: &[u8], match_start: usize, star_match: bool) -> Option<usize> {
    let mut ndots = if star_match { 2 } else { 1 };
    let mut i = match_start;
    while i > 0 {
        i -= 1;
        if host[i] == b'.' {
            ndots -= 1;
            if ndots == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Resolve a found-and-accepted match into a `(begin, end)` TLD span over
/// `host[..effective_len]`.
pub fn tld_span(host: &[u8], match_start: usize, star_match: bool, effective_len: usize) -> (usize, usize) {
    let begin = match find_label_start(host, match_start, star_match) {
        Some(label_start) => label_start + 1,
        None => 0,
    };
    (begin, effective_len)
}

fn parse_component(s: &str) -> Option<u64> {
    if s.is_empty() {
        return None;
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok();
    }
    if s.len() > 1 && s.starts_with('0') {
        return u64::from_str_radix(&s[1..], 8).ok();
    }
    s.parse::<u64>().ok()
}

/// Fold 1-4 dot-separated integer components (decimal, octal with a
/// leading `0`, or hex with a leading `0x`) into a 32-bit address using
/// standard `inet_aton` semantics: the last component fills the remaining
/// low-order bytes.
fn decode_inet_aton(host: &str) -> Option<u32> {
    let parts: Vec<&str> = host.split('.').collect();
    if parts.is_empty() || parts.len() > 4 {
        return None;
    }
    let vals: Vec<u64> = parts.iter().map(|p| parse_component(p)).collect::<Option<_>>()?;
    let addr = match vals.as_slice() {
        [a] => {
            if *a > 0xFFFF_FFFF {
                return None;
            }
            *a as u32
        }
        [a, b] => {
            if *a > 0xFF || *b > 0x00FF_FFFF {
                return None;
            }
            ((*a as u32) << 24) | (*b as u32)
        }
        [a, b, c] => {
            if *a > 0xFF || *b > 0xFF || *c > 0xFFFF {
                return None;
            }
            ((*a as u32) << 24) | ((*b as u32) << 16) | (*c as u32)
        }
        [a, b, c, d] => {
            if *a > 0xFF || *b > 0xFF || *c > 0xFF || *d > 0xFF {
                return None;
            }
            ((*a as u32) << 24) | ((*b as u32) << 16) | ((*c as u32) << 8) | (*d as u32)
        }
        _ => return None,
    };
    Some(addr)
}

/// Attempt the numeric/obfuscated-IPv4 decode, in order: literal IPv4,
/// literal (optionally bracketed) IPv6, then the
/// `inet_aton`-style fold. Returns the canonical host string and the flags
/// to set, or `None` if nothing matched.
pub fn numeric_host_decode(host: &str) -> Option<(String, UrlFlags)> {
    if let Ok(ip) = host.parse::<Ipv4Addr>() {
        return Some((ip.to_string(), UrlFlags::NUMERIC_HOST));
    }

    let unbracketed = host
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(host);
    if let Ok(ip) = unbracketed.parse::<Ipv6Addr>() {
        return Some((ip.to_string(), UrlFlags::NUMERIC_HOST));
    }

    decode_inet_aton(host).map(|addr| {
        (
            Ipv4Addr::from(addr).to_string(),
            UrlFlags::NUMERIC_HOST | UrlFlags::OBSCURED_HOST,
        )
    })
}
