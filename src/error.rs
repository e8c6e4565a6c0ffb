//! Error types for the urlscan library.
use std::fmt;

/// Result type alias for urlscan operations.
pub type Result<T> = std::result::Result<T, UrlError>;

/// Errors returned by [`crate::parse_url`].
///
/// A single malformed candidate never propagates past [`crate::find_urls`] —
/// only a direct, single-string [`crate::parse_url`] call surfaces one of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// The input string was zero bytes.
    Empty,
    /// A scheme was present but did not match a known protocol.
    InvalidProtocol,
    /// The state machine did not reach an accepting state.
    BadFormat,
    /// Percent-decoding encountered invalid UTF-8 where it was required.
    BadEncoding,
    /// The port was not in `1..=65535`.
    InvalidPort,
    /// The host did not match any suffix rule and did not parse as numeric.
    TldMissing,
    /// Parsing succeeded but produced a zero-length, non-mailto host.
    HostMissing,
}

impl fmt::Display for UrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            UrlError::Empty => "the URI string was empty",
            UrlError::InvalidProtocol => "no protocol was found",
            UrlError::BadFormat => "bad URL format",
            UrlError::BadEncoding => "invalid symbols encoded",
            UrlError::InvalidPort => "port number is bad",
            UrlError::TldMissing => "TLD part is not detected",
            UrlError::HostMissing => "host part is missing",
        };
        write!(f, "{msg}")
    }
}

impl std::error::Error for UrlError {}

/// Errors raised while loading or compiling a suffix-list file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuffixListError {
    /// I/O error reading the suffix-list file.
    Io(String),
    /// The matcher set could not be built from the accumulated patterns.
    Build(String),
}

impl fmt::Display for SuffixListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuffixListError::Io(msg) => write!(f, "I/O error: {msg}"),
            SuffixListError::Build(msg) => write!(f, "matcher build error: {msg}"),
        }
    }
}

impl std::error::Error for SuffixListError {}

impl From<std::io::Error> for SuffixListError {
    fn from(err: std::io::Error) -> Self {
        SuffixListError::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_original_strings() {
        assert_eq!(UrlError::TldMissing.to_string(), "TLD part is not detected");
        assert_eq!(UrlError::Empty.to_string(), "the URI string was empty");
    }
}
