//! Transport failure categories shared by the scraper's retry and recovery
//! policies and by configuration parsing.

use std::fmt;
use std::str::FromStr;

/// Coarse category of a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The request (connect or read) exceeded its deadline.
    Timeout,
    /// The connection could not be established.
    Connect,
    /// The server answered with a non-2xx status.
    Status,
    /// The body could not be decoded into the expected shape.
    Decode,
    /// Anything else: TLS, redirect loops, invalid URLs.
    Other,
}

impl FailureKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Status => "status",
            Self::Decode => "decode",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FailureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timeout" => Ok(Self::Timeout),
            "connect" => Ok(Self::Connect),
            "status" => Ok(Self::Status),
            "decode" => Ok(Self::Decode),
            "other" => Ok(Self::Other),
            other => Err(format!(
                "unknown failure kind \"{other}\" (expected timeout, connect, status, decode, other)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively_with_whitespace() {
        assert_eq!(" Timeout ".parse::<FailureKind>(), Ok(FailureKind::Timeout));
        assert_eq!("CONNECT".parse::<FailureKind>(), Ok(FailureKind::Connect));
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "flaky".parse::<FailureKind>().unwrap_err();
        assert!(err.contains("flaky"), "error should name the input: {err}");
    }
}
