//! Page state definitions for tracking crawl progress
//!
//! A URL moves `Unseen -> Queued -> Fetching -> {Ok, FetchError, ParseError}`.
//! `Fetching` only lasts while a request is in flight; terminal states are sticky.

use std::fmt;

/// How the processing of a dequeued URL concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fetched and parsed; domains and links were harvested
    Ok,

    /// Transport failure, timeout or non-success status
    FetchError { detail: String },

    /// The body could not be turned into a document; nothing was harvested
    ParseError { detail: String },
}

impl Outcome {
    pub fn fetch_error(detail: impl Into<String>) -> Self {
        Self::FetchError {
            detail: detail.into(),
        }
    }

    pub fn parse_error(detail: impl Into<String>) -> Self {
        Self::ParseError {
            detail: detail.into(),
        }
    }

    /// The terminal page state this outcome corresponds to
    pub fn state(&self) -> PageState {
        match self {
            Self::Ok => PageState::Ok,
            Self::FetchError { .. } => PageState::FetchError,
            Self::ParseError { .. } => PageState::ParseError,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Error detail, if this outcome is a failure
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Ok => None,
            Self::FetchError { detail } | Self::ParseError { detail } => Some(detail),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.state(), detail),
            None => write!(f, "{}", self.state()),
        }
    }
}

/// Represents the current state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    // ===== Active States =====
    /// Never discovered, or discovered but rejected by admission
    Unseen,

    /// Waiting in the frontier
    Queued,

    /// Dequeued; a request is in flight
    Fetching,

    // ===== Terminal States =====
    /// Fetched and harvested
    Ok,

    /// Fetch failed
    FetchError,

    /// Fetched but could not be parsed
    ParseError,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ok | Self::FetchError | Self::ParseError)
    }

    /// Returns true if the URL has been claimed by the engine
    ///
    /// A visited URL is never fetched again, even if rediscovered.
    pub fn is_visited(&self) -> bool {
        matches!(self, Self::Fetching) || self.is_terminal()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unseen => "unseen",
            Self::Queued => "queued",
            Self::Fetching => "fetching",
            Self::Ok => "ok",
            Self::FetchError => "fetch_error",
            Self::ParseError => "parse_error",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
