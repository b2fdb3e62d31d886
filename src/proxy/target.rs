//! Proxy target decoding and validation.

use percent_encoding::percent_decode_str;
use std::fmt;

use crate::proxy::error::ProxyError;

/// A decoded upstream URL that passed the `http` prefix check.
///
/// The check is deliberately loose: anything starting with `http` passes,
/// including `httpfoo`. Scheme and host problems surface later as transport
/// failures from the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Percent-decode a raw `/proxy/` segment and validate it.
    ///
    /// Only `%XX` escapes are decoded; `+` stays a plus sign. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn decode(raw: &str) -> Result<Self, ProxyError> {
        let decoded = percent_decode_str(raw).decode_utf8_lossy();
        Self::from_decoded(decoded.into_owned())
    }

    /// Validate an already decoded target.
    pub fn from_decoded(decoded: String) -> Result<Self, ProxyError> {
        if decoded.starts_with("http") {
            Ok(Self(decoded))
        } else {
            Err(ProxyError::InvalidTarget)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
