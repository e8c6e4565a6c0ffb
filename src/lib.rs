//! urlscan - URL extraction and normalization for anti-spam scanning
//!
//! urlscan finds URLs and email addresses embedded in arbitrary text
//! (plain-text or HTML bodies), normalizes them into a single owned
//! record per match, and classifies each host against a public-suffix
//! list, decoding obfuscated numeric hosts (octal/hex/packed IPv4) along
//! the way. It is built for the same job rspamd's URL finder does inside
//! an email content scanner: recover every URL a message actually
//! resolves to, not just the ones that look like URLs at a glance.
//!
//! # Quick Start
//!
//! ```rust
//! use urlscan::{MatcherSetBuilder, find_urls};
//! use std::io::Cursor;
//!
//! // Seed a matcher set with a small suffix list (normally loaded from a
//! // public-suffix-list file via `add_suffix_file`).
//! let mut builder = MatcherSetBuilder::new();
//! builder.add_suffix_rules(Cursor::new("com\nnet\norg\n")).unwrap();
//! let matchers = builder.build();
//!
//! let urls = find_urls(&matchers, b"visit http://example.com/path or write bob@example.net", false);
//! assert_eq!(urls.len(), 2);
//! assert_eq!(urls[0].host_str(), "example.com");
//! assert_eq!(urls[1].host_str(), "example.net");
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  MatcherSet (scheme prefixes + suffix list)   │
//! │  built once, shared across every scan         │
//! └──────────────────────────────────────────────┘
//!                  ↓ Aho-Corasick scan (single pass)
//! ┌──────────────────────────────────────────────┐
//! │  start/end probes per matcher family          │
//! │  (web, file, suffix-list, mailto/bare @)      │
//! └──────────────────────────────────────────────┘
//!                  ↓ URI state machine
//! ┌──────────────────────────────────────────────┐
//! │  Url: scheme, userinfo, host, port, path,     │
//! │  query, fragment — spans into one raw buffer  │
//! └──────────────────────────────────────────────┘
//!                  ↓ TLD classification
//! ┌──────────────────────────────────────────────┐
//! │  accepted (named TLD, or decoded numeric      │
//! │  host) or discarded (TLD_MISSING)             │
//! └──────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::sync::OnceLock;

/// Byte classification tables (C1).
pub mod charclass;
/// Multi-pattern Aho-Corasick automaton (C2).
pub mod automaton;
/// Error types.
pub mod error;
/// Extraction driver (C5).
pub mod extract;
/// Streaming, gzip-transparent file reader.
pub mod file_reader;
/// Tracing subscriber setup for the CLI.
pub mod logging;
/// The matcher set and suffix-list loading.
pub mod matchers;
/// Percent-decoding.
pub mod percent;
/// Matcher start/end probes (C4.6).
pub mod probes;
/// TLD classification and numeric-host decoding (C4).
pub mod tld;
/// URI state-machine parsers for the web and mailto grammars (C3).
pub mod uri;
/// The parsed-URL data model.
pub mod url;

// Re-exports for Rust consumers

pub use crate::automaton::{Automaton, MatchMode, ScanControl};
pub use crate::error::{Result, SuffixListError, UrlError};
pub use crate::extract::{find_urls, next_url, UrlIter};
pub use crate::matchers::{Matcher, MatcherFamily, MatcherFlags, MatcherSet, MatcherSetBuilder};
pub use crate::tld::numeric_host_decode;
pub use crate::uri::parse as parse_url;
pub use crate::url::{Scheme, Span, Url, UrlFlags};

static GLOBAL_MATCHERS: OnceLock<MatcherSet> = OnceLock::new();

/// Build and install the process-wide default [`MatcherSet`] used by
/// [`global`]. `suffix_file`, if given, is loaded with
/// [`MatcherSetBuilder::add_suffix_file`]; otherwise the global set carries
/// only the static scheme/sentinel matchers and no suffix-list entries will
/// ever classify. Idempotent: only the first call wins, later calls silently
/// reuse it. Most applications instead build their own `MatcherSet` and
/// thread it explicitly — this exists for the common case where one
/// process-wide instance is enough.
pub fn init(suffix_file: Option<&std::path::Path>) -> std::result::Result<(), SuffixListError> {
    if GLOBAL_MATCHERS.get().is_some() {
        return Ok(());
    }
    let mut builder = MatcherSetBuilder::new();
    if let Some(path) = suffix_file {
        builder.add_suffix_file(path)?;
    }
    let _ = GLOBAL_MATCHERS.get_or_init(|| builder.build());
    Ok(())
}

/// The process-wide default [`MatcherSet`], initializing it with no suffix
/// rules if [`init`] has not already been called.
pub fn global() -> &'static MatcherSet {
    GLOBAL_MATCHERS.get_or_init(|| MatcherSetBuilder::new().build())
}

// Version information
/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library major version.
pub const VERSION_MAJOR: u32 = 0;

/// Library minor version.
pub const VERSION_MINOR: u32 = 1;

/// Library patch version.
pub const VERSION_PATCH: u32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(VERSION_MAJOR, 0);
        assert_eq!(VERSION_MINOR, 1);
        assert_eq!(VERSION_PATCH, 0);
    }

    #[test]
    fn global_matcher_set_is_usable() {
        init(None).unwrap();
        let urls = find_urls(global(), b"visit http://example.com/", false);
        // "com" is not registered without a suffix list, so this is
        // expected to reject the candidate (TLD_MISSING) rather than panic.
        assert!(urls.is_empty());
    }
}
