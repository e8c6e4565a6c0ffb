//! Percent-decoding and component shifting.
//!
//! Grounded in rspamd's `rspamd_url_shift`: components are contiguous
//! sub-ranges of one buffer, so shortening one by decoding `%HH` escapes
//! must shift every later component left by the freed byte count. The
//! original does this via a `switch` that falls through
//! `UF_SCHEMA -> UF_HOST -> UF_PATH -> UF_QUERY -> UF_FRAGMENT`; here the
//! same cascade is driven by an explicit ordered slice of span references
//! so it works for both the web and mailto field layouts.

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode `%HH` escapes in `input`. An invalid escape (`%` not followed by
/// two hex digits) is left literal's lenient rule.
pub fn percent_decode(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        if input[i] == b'%' {
            if let (Some(&h1), Some(&h2)) = (input.get(i + 1), input.get(i + 2)) {
                if let (Some(hi), Some(lo)) = (hex_val(h1), hex_val(h2)) {
                    out.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
            }
        }
        out.push(input[i]);
        i += 1;
    }
    out
}

/// Decode every span in `spans` (given in left-to-right order of their
/// position in `raw`) and shift subsequent bytes and spans left by the
/// number of bytes each decode freed. `raw.len()` shrinks in step.
///
/// `spans` elements are `&mut Option<(begin, end)>`; entries that are
/// `None` are skipped without disturbing the cascade.
pub fn decode_and_shift(raw: &mut Vec<u8>, spans: &mut [&mut Option<(usize, usize)>]) {
    for i in 0..spans.len() {
        let (begin, end) = match *spans[i] {
            Some(span) => span,
            None => continue,
        };
        let decoded = percent_decode(&raw[begin..end]);
        let new_len = decoded.len();
        let delta = (end - begin) - new_len;

        raw.splice(begin..end, decoded);
        *spans[i] = Some((begin, begin + new_len));

        if delta > 0 {
            for later in spans.iter_mut().skip(i + 1) {
                if let Some((b, e)) = later.as_mut() {
                    if *b >= end {
                        *b -= delta;
                    }
                    if *e >= end {
                        *e -= delta;
                    }
                }
            }
        }
    }
}
