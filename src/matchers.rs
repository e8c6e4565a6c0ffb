//! The matcher set and suffix-list loading, grounded in rspamd's
//! `static_matchers[]` table and `rspamd_url_parse_tld_file` (`url.c`).

use crate::automaton::{Automaton, MatchMode};
use crate::error::SuffixListError;
use std::io::BufRead;
use std::path::Path;

bitflags::bitflags! {
    /// Per-matcher flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MatcherFlags: u8 {
        /// Suppressed when scanning text known to have come from HTML.
        const NOHTML = 0b001;
        /// A suffix-list entry; its end probe runs the TLD acceptance rule.
        const TLD_MATCH = 0b010;
        /// A `*.`-prefixed suffix-list entry: requires two `.` separators
        /// to the left of the match instead of one, pulling an extra label
        /// into the effective TLD.
        const STAR_MATCH = 0b100;
    }
}

/// Which family of start/end probes a matcher belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatcherFamily {
    /// `http://`, `https://`, `www.`, etc.
    Web,
    /// `file://`.
    File,
    /// A suffix-list entry.
    Tld,
    /// `mailto:` or the bare `@` sentinel.
    Email,
}

/// One registered matcher: a literal pattern, an optional prefix to
/// synthesize when emitting the URL text, a flag set, and which probe
/// family governs it.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// The literal pattern bytes registered in the automaton.
    pub pattern: Vec<u8>,
    /// Text to prepend to the matched span when building the candidate's
    /// raw text (e.g. `www.` synthesizes `http://`).
    pub synth_prefix: Option<&'static str>,
    /// Flag bits.
    pub flags: MatcherFlags,
    /// Probe family.
    pub family: MatcherFamily,
}

impl Matcher {
    fn new(pattern: &str, synth_prefix: Option<&'static str>, flags: MatcherFlags, family: MatcherFamily) -> Matcher {
        Matcher {
            pattern: pattern.as_bytes().to_vec(),
            synth_prefix,
            flags,
            family,
        }
    }
}

/// The statically registered scheme-prefix and sentinel matchers,
/// independent of any suffix list.
pub fn static_matchers() -> Vec<Matcher> {
    use MatcherFamily::*;
    let none = MatcherFlags::empty();
    vec![
        Matcher::new("file://", None, none, File),
        Matcher::new("ftp://", None, none, Web),
        Matcher::new("sftp://", None, none, Web),
        Matcher::new("http://", None, none, Web),
        Matcher::new("https://", None, none, Web),
        Matcher::new("mailto:", None, none, Email),
        Matcher::new("news://", None, none, Web),
        Matcher::new("nntp://", None, none, Web),
        Matcher::new("telnet://", None, none, Web),
        Matcher::new("webcal://", None, none, Web),
        Matcher::new("callto://", None, none, Web),
        Matcher::new("h323:", None, none, Web),
        Matcher::new("sip:", None, none, Web),
        Matcher::new("www.", Some("http://"), none, Web),
        Matcher::new("ftp.", Some("ftp://"), MatcherFlags::NOHTML, Web),
        Matcher::new("@", Some("mailto:"), MatcherFlags::NOHTML, Email),
    ]
}

/// Parse one suffix-list line into a matcher
/// `Ok(None)` for a blank line, a `//` comment, or a (logged, skipped)
/// `!`-exception rule.
fn parse_suffix_line(line: &str) -> Option<Matcher> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() || line.starts_with("//") {
        return None;
    }
    if let Some(rule) = line.strip_prefix('!') {
        tracing::warn!(rule, "skipping unsupported exception rule in suffix list");
        return None;
    }

    let (suffix, star) = match line.strip_prefix("*.") {
        Some(rest) => (rest, true),
        None => (line, false),
    };
    if suffix.is_empty() {
        tracing::warn!(line, "skipping malformed suffix-list line");
        return None;
    }

    let pattern = format!(".{suffix}");
    let mut flags = MatcherFlags::NOHTML | MatcherFlags::TLD_MATCH;
    if star {
        flags |= MatcherFlags::STAR_MATCH;
    }
    Some(Matcher::new(&pattern, None, flags, MatcherFamily::Tld))
}

/// Load suffix-list rules from `reader`. Returns the accepted
/// matchers; blank lines, comments and exception rules are silently
/// skipped (exception rules are additionally logged at `warn`).
pub fn load_suffix_rules<R: BufRead>(reader: R) -> Result<Vec<Matcher>, SuffixListError> {
    let mut matchers = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if let Some(matcher) = parse_suffix_line(&line) {
            matchers.push(matcher);
        }
    }
    Ok(matchers)
}

/// An immutable, process-shareable set of matchers and their automaton
///. Construct via [`MatcherSetBuilder`].
pub struct MatcherSet {
    matchers: Vec<Matcher>,
    automaton: Automaton,
}

impl MatcherSet {
    /// The matcher registered at `idx` (the automaton's pattern index).
    pub fn matcher(&self, idx: u32) -> &Matcher {
        &self.matchers[idx as usize]
    }

    /// The number of registered matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// True if no matchers are registered (never the case after
    /// [`MatcherSetBuilder::build`], which always seeds the static set).
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// The underlying automaton, shared by full-text scanning ([C5]) and
    /// TLD classification ([C4]).
    ///
    /// [C5]: crate::extract
    /// [C4]: crate::tld
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Classify `host` against the suffix-list matchers. Returns the
    /// accepted `(begin, end)` TLD span, if any.
    pub fn find_tld(&self, host: &[u8]) -> Option<(usize, usize)> {
        let mut found = None;
        self.automaton.scan(host, self.automaton.start_state(), |pattern_idx, match_end| {
            let matcher = self.matcher(pattern_idx);
            if !matcher.flags.contains(MatcherFlags::TLD_MATCH) {
                return crate::automaton::ScanControl::Continue;
            }
            let pattern_len = self.automaton.pattern_len(pattern_idx);
            let match_start = match_end - pattern_len;
            let effective_len = match crate::tld::accept_match(host.len(), match_end) {
                Some(l) => l,
                None => return crate::automaton::ScanControl::Continue,
            };
            let star = matcher.flags.contains(MatcherFlags::STAR_MATCH);
            found = Some(crate::tld::tld_span(host, match_start, star, effective_len));
            crate::automaton::ScanControl::Stop
        });
        found
    }
}

/// Builds an immutable [`MatcherSet`] from the static matchers plus any
/// number of suffix-list sources.
pub struct MatcherSetBuilder {
    matchers: Vec<Matcher>,
}

impl Default for MatcherSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MatcherSetBuilder {
    /// Start a builder already seeded with the static matchers.
    pub fn new() -> MatcherSetBuilder {
        MatcherSetBuilder {
            matchers: static_matchers(),
        }
    }

    /// Add every rule parsed from `reader`. Returns the number accepted.
    pub fn add_suffix_rules<R: BufRead>(&mut self, reader: R) -> Result<usize, SuffixListError> {
        let added = load_suffix_rules(reader)?;
        let n = added.len();
        self.matchers.extend(added);
        Ok(n)
    }

    /// Add every rule from a suffix-list file, transparently decompressing
    /// `.gz` files.
    pub fn add_suffix_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, SuffixListError> {
        let reader = crate::file_reader::open(path)?;
        self.add_suffix_rules(reader)
    }

    /// Compile the accumulated matchers into an immutable [`MatcherSet`].
    pub fn build(self) -> MatcherSet {
        let patterns: Vec<&[u8]> = self.matchers.iter().map(|m| m.pattern.as_slice()).collect();
        let automaton = Automaton::build(&patterns, MatchMode::CaseInsensitive);
        MatcherSet {
            matchers: self.matchers,
            automaton,
        }
    }
}
