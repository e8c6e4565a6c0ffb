//! URI state-machine parser (C3).
//!
//! Two explicit state machines, one per grammar, grounded in
//! rspamd's `rspamd_mailto_parse` and `rspamd_web_parse`: flat procedural
//! scans over an index cursor rather than a table-driven automaton, because
//! the two grammars diverge enough that folding them into
//! one shared machine would be less maintainable than two small ones.

use crate::charclass::{is_domain_byte, is_lwsp_byte, is_mailsafe_byte, is_url_terminator};
use crate::error::UrlError;
use crate::percent::decode_and_shift;
use crate::url::{Scheme, Url, UrlFlags};

type Span = (usize, usize);

struct WebFields {
    scheme: Option<Span>,
    userinfo: Option<Span>,
    host: Span,
    port: u16,
    path: Option<Span>,
    query: Option<Span>,
    fragment: Option<Span>,
    end: usize,
}

fn parse_port(text: &[u8], start: usize, end: usize) -> Result<u16, UrlError> {
    let value: u32 = std::str::from_utf8(&text[start..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    if value == 0 || value > 65535 {
        return Err(UrlError::InvalidPort);
    }
    Ok(value as u16)
}

/// Run the web grammar state machine over `text` starting at index 0.
/// `strict` controls whether an unreachable terminal state fails the parse
/// (`strict = true`) or accepts whatever prefix was usefully extracted
/// (`strict = false`, used for speculative end-of-URL probing).
fn scan_web(text: &[u8], strict: bool) -> Result<WebFields, UrlError> {
    let len = text.len();
    if len == 0 {
        return Err(UrlError::Empty);
    }
    let mut i = 0usize;

    // --- protocol ---
    let proto_start = i;
    while i < len && (text[i].is_ascii_alphanumeric() || text[i] == b'+' || text[i] == b'-') {
        i += 1;
    }
    let scheme = if i > proto_start && i < len && text[i] == b':' {
        let span = (proto_start, i);
        i += 1;
        Some(span)
    } else {
        // Lenient rewind: no colon found, but bytes were consumed. Re-enter
        // directly as a bare domain (covers `www.`/`ftp.`-led candidates
        // and TLD-probe candidates with no scheme at all).
        i = proto_start;
        None
    };

    // --- slash-slash ---
    while i < len && text[i] == b'/' {
        i += 1;
    }

    // --- host (+ optional userinfo), with port/password disambiguation ---
    let mut userinfo: Option<Span> = None;
    let mut host: Span;
    let mut port: u16 = 0;

    if i < len && text[i] == b'[' {
        let host_start = i;
        i += 1;
        while i < len && (text[i].is_ascii_hexdigit() || text[i] == b':' || text[i] == b'.') {
            i += 1;
        }
        if i >= len || text[i] != b']' {
            return Err(UrlError::BadFormat);
        }
        i += 1;
        host = (host_start, i);
    } else {
        let seg_start = i;
        while i < len && text[i] != b'@' && text[i] != b':' && is_domain_byte(text[i]) {
            i += 1;
        }
        if i < len && text[i] == b'@' {
            userinfo = Some((seg_start, i));
            i += 1;
            let host_start = i;
            while i < len && is_domain_byte(text[i]) {
                i += 1;
            }
            host = (host_start, i);
        } else if i < len && text[i] == b':' {
            let after_colon = i + 1;
            if after_colon < len && text[after_colon].is_ascii_digit() {
                // host:port
                host = (seg_start, i);
                i += 1;
                let port_start = i;
                while i < len && text[i].is_ascii_digit() {
                    i += 1;
                }
                port = parse_port(text, port_start, i)?;
            } else {
                // user:password@host
                let colon_pos = i;
                i += 1;
                while i < len && text[i] != b'@' && !is_lwsp_byte(text[i]) {
                    i += 1;
                }
                if i < len && text[i] == b'@' {
                    // Password text is scanned to find the host boundary
                    // but not stored; only the user component is kept.
                    userinfo = Some((seg_start, colon_pos));
                    i += 1;
                    let host_start = i;
                    while i < len && is_domain_byte(text[i]) {
                        i += 1;
                    }
                    host = (host_start, i);
                } else if !strict {
                    // Lenient: abandon the password guess, treat the first
                    // segment as the whole host.
                    host = (seg_start, colon_pos);
                    i = colon_pos;
                } else {
                    return Err(UrlError::BadFormat);
                }
            }
        } else {
            host = (seg_start, i);
        }
    }

    if host.1 <= host.0 {
        return Err(UrlError::HostMissing);
    }

    // A bracketed IPv6 host may still be followed by a port.
    if port == 0 && i < len && text[i] == b':' {
        let after_colon = i + 1;
        if after_colon < len && text[after_colon].is_ascii_digit() {
            i += 1;
            let port_start = i;
            while i < len && text[i].is_ascii_digit() {
                i += 1;
            }
            port = parse_port(text, port_start, i)?;
        }
    }

    // --- path / query / fragment ---
    let mut path = None;
    if i < len && text[i] == b'/' {
        let start = i;
        while i < len && !is_lwsp_byte(text[i]) && !is_url_terminator(text[i]) && text[i] != b'?' && text[i] != b'#'
        {
            i += 1;
        }
        path = Some((start, i));
    }

    let mut query = None;
    if i < len && text[i] == b'?' {
        i += 1;
        let start = i;
        while i < len && !is_lwsp_byte(text[i]) && !is_url_terminator(text[i]) && text[i] != b'#' {
            i += 1;
        }
        query = Some((start, i));
    }

    let mut fragment = None;
    if i < len && text[i] == b'#' {
        i += 1;
        let start = i;
        while i < len && !is_lwsp_byte(text[i]) && !is_url_terminator(text[i]) {
            i += 1;
        }
        fragment = Some((start, i));
    }

    Ok(WebFields {
        scheme,
        userinfo,
        host,
        port,
        path,
        query,
        fragment,
        end: i,
    })
}

/// Parse a web-scheme candidate into a [`Url`]. The
/// candidate's scheme prefix, if any, must already be present in `text`
/// (synthesized prefixes like `www.` -> `http://` are prepended by the
/// caller before this runs).
pub fn parse_web(text: &[u8], strict: bool) -> Result<Url, UrlError> {
    let fields = scan_web(text, strict)?;
    let mut raw: Vec<u8> = text[..fields.end].to_vec();

    let mut userinfo = fields.userinfo;
    let mut host = Some(fields.host);
    let mut path = fields.path;
    let mut query = fields.query;
    let mut fragment = fields.fragment;

    decode_and_shift(
        &mut raw,
        &mut [&mut userinfo, &mut host, &mut path, &mut query, &mut fragment],
    );

    let host_span = host.ok_or(UrlError::HostMissing)?;
    if host_span.1 <= host_span.0 {
        return Err(UrlError::HostMissing);
    }

    if let Some((b, e)) = fields.scheme {
        raw[b..e].make_ascii_lowercase();
    }
    raw[host_span.0..host_span.1].make_ascii_lowercase();
    std::str::from_utf8(&raw[host_span.0..host_span.1]).map_err(|_| UrlError::BadEncoding)?;

    let raw_string = String::from_utf8(raw).map_err(|_| UrlError::BadEncoding)?;

    let scheme_span = fields.scheme.unwrap_or((0, 0));
    let scheme = match fields.scheme {
        Some((b, e)) => Scheme::from_name(&raw_string[b..e]),
        None => Scheme::Unknown,
    };

    Ok(Url {
        raw: raw_string,
        scheme_span,
        scheme,
        userinfo,
        host: host_span,
        port: fields.port,
        path,
        query,
        fragment,
        tld: None,
        flags: UrlFlags::empty(),
        phished_url: None,
    })
}

/// Just enough of the web grammar to learn where a URL ends, without
/// building a [`Url`]. Used by the matcher end probes which
/// only need `parsed_end` to compute `m_len`.
pub fn web_parsed_end(text: &[u8], strict: bool) -> Result<usize, UrlError> {
    scan_web(text, strict).map(|f| f.end)
}

struct MailtoFields {
    userinfo: Span,
    host: Span,
    query: Option<Span>,
    end: usize,
}

const MAILTO_PREFIX_LEN: usize = 7; // "mailto:"

fn scan_mailto(text: &[u8]) -> Result<MailtoFields, UrlError> {
    let len = text.len();
    if len == 0 {
        return Err(UrlError::Empty);
    }
    if len < MAILTO_PREFIX_LEN || !text[..MAILTO_PREFIX_LEN].eq_ignore_ascii_case(b"mailto:") {
        return Err(UrlError::InvalidProtocol);
    }
    let mut i = MAILTO_PREFIX_LEN;

    // Collapse any number of leading slashes.
    while i < len && text[i] == b'/' {
        i += 1;
    }

    // Optional "?to=" destination prefix.
    if text[i..].len() >= 4 && text[i..i + 4].eq_ignore_ascii_case(b"?to=") {
        i += 4;
    }

    let user_start = i;
    while i < len && text[i] != b'@' && is_mailsafe_byte(text[i]) {
        i += 1;
    }
    if i == user_start {
        return Err(UrlError::BadFormat);
    }
    let userinfo = (user_start, i);

    if i >= len || text[i] != b'@' {
        return Err(UrlError::BadFormat);
    }
    i += 1;

    let domain_start = i;
    while i < len && (is_domain_byte(text[i]) || text[i] == b'_') {
        i += 1;
    }
    if i == domain_start {
        return Err(UrlError::HostMissing);
    }
    let host = (domain_start, i);

    let mut query = None;
    if i < len && text[i] == b'?' {
        i += 1;
        let q_start = i;
        while i < len && is_mailsafe_byte(text[i]) {
            i += 1;
        }
        query = Some((q_start, i)); // an empty query after `?` is accepted
    }

    Ok(MailtoFields {
        userinfo,
        host,
        query,
        end: i,
    })
}

/// Parse a `mailto:` candidate into a [`Url`].
pub fn parse_mailto(text: &[u8]) -> Result<Url, UrlError> {
    let fields = scan_mailto(text)?;
    let mut raw: Vec<u8> = text[..fields.end].to_vec();

    let mut userinfo = Some(fields.userinfo);
    let mut host = Some(fields.host);
    let mut query = fields.query;

    decode_and_shift(&mut raw, &mut [&mut userinfo, &mut host, &mut query]);

    let userinfo_span = userinfo.filter(|&(b, e)| e > b).ok_or(UrlError::BadFormat)?;
    let host_span = host.ok_or(UrlError::HostMissing)?;
    if host_span.1 <= host_span.0 {
        return Err(UrlError::HostMissing);
    }

    raw[..MAILTO_PREFIX_LEN].make_ascii_lowercase();
    raw[host_span.0..host_span.1].make_ascii_lowercase();
    std::str::from_utf8(&raw[host_span.0..host_span.1]).map_err(|_| UrlError::BadEncoding)?;

    let raw_string = String::from_utf8(raw).map_err(|_| UrlError::BadEncoding)?;

    Ok(Url {
        raw: raw_string,
        scheme_span: (0, MAILTO_PREFIX_LEN),
        scheme: Scheme::Mailto,
        userinfo: Some(userinfo_span),
        host: host_span,
        port: 0,
        path: None,
        query,
        fragment: None,
        tld: None,
        flags: UrlFlags::empty(),
        phished_url: None,
    })
}

/// Just enough of the mailto grammar to learn where it ends, capturing
/// userinfo end for the `last_at` suppression cursor.
pub fn mailto_parsed_end(text: &[u8]) -> Result<(usize, usize), UrlError> {
    let fields = scan_mailto(text)?;
    Ok((fields.end, fields.userinfo.1))
}

/// Dispatch to the mailto or web grammar based on a case-insensitive
/// `mailto:` prefix sniff. Used by the public single-string `parse_url`
/// entry point, which (unlike `find_urls`) has no matcher family to tell it
/// which grammar applies.
pub fn parse(text: &[u8], strict: bool) -> Result<Url, UrlError> {
    if text.len() >= MAILTO_PREFIX_LEN && text[..MAILTO_PREFIX_LEN].eq_ignore_ascii_case(b"mailto:") {
        parse_mailto(text)
    } else {
        parse_web(text, strict)
    }
}
