//! URL data model.
//!
//! A parsed URL is a set of offset+length views into a single owned byte
//! buffer (`raw`), never independent pointers — grounded in rspamd's
//! `rspamd_url` struct (`url.h`), which stores every component as a
//! `(start, len)` pair into the same string rather than separate
//! allocations.

bitflags::bitflags! {
    /// Flags carried by a parsed URL.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UrlFlags: u8 {
        /// The visible anchor text differed from the href target. Never set
        /// by this crate; reserved for an upstream HTML walker to populate.
        const PHISHED = 0b001;
        /// The host is a numeric (IPv4/IPv6) address rather than a name.
        const NUMERIC_HOST = 0b010;
        /// The numeric host was reconstructed from a non-dotted-quad
        /// encoding (octal, hex, or packed integer components).
        const OBSCURED_HOST = 0b100;
    }
}

/// The recognized URL schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// `file://`
    File,
    /// `ftp://`
    Ftp,
    /// `http://`
    Http,
    /// `https://`
    Https,
    /// `mailto:`
    Mailto,
    /// Any other recognized scheme prefix (`sftp://`, `news://`, `nntp://`,
    /// `telnet://`, `webcal://`, `callto://`, `h323:`, `sip:`), or none.
    Unknown,
}

impl Scheme {
    /// Parse a lowercased scheme name into its enum value.
    pub fn from_name(name: &str) -> Scheme {
        match name {
            "file" => Scheme::File,
            "ftp" => Scheme::Ftp,
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "mailto" => Scheme::Mailto,
            _ => Scheme::Unknown,
        }
    }
}

/// A half-open byte range `[begin, end)` relative to a [`Url`]'s `raw`
/// buffer. `None` denotes an absent, optional component.
pub type Span = Option<(usize, usize)>;

/// A fully parsed and normalized URL record.
#[derive(Debug, Clone)]
pub struct Url {
    /// The complete normalized URL text. Owns the storage every other
    /// field's span indexes into.
    pub raw: String,
    /// Span of `raw` covering the scheme, lowercased in place.
    pub scheme_span: (usize, usize),
    /// Parsed scheme.
    pub scheme: Scheme,
    /// Span of `raw` covering the userinfo (`user[:password]`), if present.
    pub userinfo: Span,
    /// Span of `raw` covering the host, lowercased (UTF-8 aware).
    pub host: (usize, usize),
    /// Port number; 0 if absent, otherwise in `1..=65535`.
    pub port: u16,
    /// Span of `raw` covering the path, if present.
    pub path: Span,
    /// Span of `raw` covering the query, if present (no leading `?`).
    pub query: Span,
    /// Span of `raw` covering the fragment, if present (no leading `#`).
    pub fragment: Span,
    /// Span of `raw` covering the effective TLD, carved out of `host`.
    pub tld: Span,
    /// Flags bitset.
    pub flags: UrlFlags,
    /// Reference to a second, visible-text `Url` record. Populated only by
    /// an upstream HTML walker outside this crate's scope; always `None`
    /// here.
    pub phished_url: Option<Box<Url>>,
}

impl Url {
    /// Slice `raw` at `span`, or `""` if the span is absent.
    pub fn slice(&self, span: Span) -> &str {
        match span {
            Some((b, e)) => &self.raw[b..e],
            None => "",
        }
    }

    /// The scheme text.
    pub fn scheme_str(&self) -> &str {
        let (b, e) = self.scheme_span;
        &self.raw[b..e]
    }

    /// The host text.
    pub fn host_str(&self) -> &str {
        let (b, e) = self.host;
        &self.raw[b..e]
    }

    /// The TLD text, or `""` if no TLD was identified.
    pub fn tld_str(&self) -> &str {
        self.slice(self.tld)
    }

    /// Byte-exact equality of `raw`, suitable for hash-set deduplication
    /// keying.
    pub fn dedup_key(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Url {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Url {}

impl std::hash::Hash for Url {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}
