//! Upstream error classification for the chat-completion service.
//!
//! Every failure of the completion call is surfaced as a single upstream
//! error. The classification here does not change how the relay reacts (there
//! is no retry and no fallback); it feeds logs and the `Error::Upstream`
//! payload so operators can tell a revoked key from an exhausted quota.
//!
//! ## Categories
//!
//! | Prefix | Category  | Description                           |
//! |--------|-----------|---------------------------------------|
//! | U1xxx  | client    | The relay sent something unacceptable |
//! | U2xxx  | rate      | Rate limit and quota errors           |
//! | U3xxx  | server    | Provider-side errors                  |
//! | U4xxx  | transport | Network failure or unreadable reply   |
//! | U9xxx  | unknown   | Catch-all / unclassified              |
//!
//! ## Example
//!
//! ```rust
//! use tone_relay::error_code::UpstreamErrorCode;
//!
//! let code = UpstreamErrorCode::from_http_status(401);
//! assert_eq!(code.code(), "U1002");
//! assert_eq!(code.name(), "authentication");
//! assert_eq!(code.category(), "client");
//! ```

use std::fmt;

/// Classified failure of a chat-completion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpstreamErrorCode {
    /// U1001: Provider rejected the request body
    InvalidRequest,
    /// U1002: Invalid, expired, or missing API key
    Authentication,
    /// U1003: Valid credentials but insufficient permissions
    PermissionDenied,
    /// U1004: Model or endpoint does not exist
    NotFound,
    /// U1005: Input exceeds the model context window
    RequestTooLarge,
    /// U2001: Request rate limit exceeded
    RateLimited,
    /// U2002: Account usage quota or billing limit reached
    QuotaExhausted,
    /// U3001: Internal server error on provider side
    ServerError,
    /// U3002: Provider temporarily overloaded
    Overloaded,
    /// U3003: Request timed out before a response arrived
    Timeout,
    /// U4001: Connection could not be established or was dropped
    Network,
    /// U4002: Response arrived but could not be interpreted
    MalformedResponse,
    /// U9999: Error could not be classified
    Unknown,
}

impl UpstreamErrorCode {
    /// Returns the code string (e.g., `"U1002"`).
    #[inline]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "U1001",
            Self::Authentication => "U1002",
            Self::PermissionDenied => "U1003",
            Self::NotFound => "U1004",
            Self::RequestTooLarge => "U1005",
            Self::RateLimited => "U2001",
            Self::QuotaExhausted => "U2002",
            Self::ServerError => "U3001",
            Self::Overloaded => "U3002",
            Self::Timeout => "U3003",
            Self::Network => "U4001",
            Self::MalformedResponse => "U4002",
            Self::Unknown => "U9999",
        }
    }

    /// Returns the snake_case name (e.g., `"quota_exhausted"`).
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Authentication => "authentication",
            Self::PermissionDenied => "permission_denied",
            Self::NotFound => "not_found",
            Self::RequestTooLarge => "request_too_large",
            Self::RateLimited => "rate_limited",
            Self::QuotaExhausted => "quota_exhausted",
            Self::ServerError => "server_error",
            Self::Overloaded => "overloaded",
            Self::Timeout => "timeout",
            Self::Network => "network",
            Self::MalformedResponse => "malformed_response",
            Self::Unknown => "unknown",
        }
    }

    /// Returns the category: `"client"`, `"rate"`, `"server"`, `"transport"`, or `"unknown"`.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidRequest
            | Self::Authentication
            | Self::PermissionDenied
            | Self::NotFound
            | Self::RequestTooLarge => "client",
            Self::RateLimited | Self::QuotaExhausted => "rate",
            Self::ServerError | Self::Overloaded | Self::Timeout => "server",
            Self::Network | Self::MalformedResponse => "transport",
            Self::Unknown => "unknown",
        }
    }

    /// Maps a provider error `type`/`code` string to a classification.
    ///
    /// Groq and OpenAI-compatible providers report e.g. `"invalid_api_key"`,
    /// `"insufficient_quota"`, `"rate_limit_exceeded"`, `"model_not_found"`.
    pub fn from_provider_code(provider_code: &str) -> Option<Self> {
        let code = match provider_code {
            "invalid_request" | "invalid_request_error" => Self::InvalidRequest,
            "authentication" | "invalid_api_key" | "authentication_error" => Self::Authentication,
            "permission_denied" | "permission_error" => Self::PermissionDenied,
            "not_found" | "model_not_found" => Self::NotFound,
            "request_too_large" | "context_length_exceeded" => Self::RequestTooLarge,
            "rate_limited" | "rate_limit_exceeded" | "tokens" | "requests" => Self::RateLimited,
            "quota_exhausted" | "insufficient_quota" => Self::QuotaExhausted,
            "server_error" | "internal_server_error" => Self::ServerError,
            "overloaded" | "service_unavailable" => Self::Overloaded,
            "timeout" => Self::Timeout,
            _ => return None,
        };
        Some(code)
    }

    /// Maps an HTTP status code to the most likely classification.
    ///
    /// 429 defaults to `RateLimited`; a provider code of `insufficient_quota`
    /// refines it to `QuotaExhausted` (see [`Self::classify`]).
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 | 422 => Self::InvalidRequest,
            401 => Self::Authentication,
            403 => Self::PermissionDenied,
            404 => Self::NotFound,
            408 | 504 => Self::Timeout,
            413 => Self::RequestTooLarge,
            429 => Self::RateLimited,
            500 | 502 => Self::ServerError,
            503 => Self::Overloaded,
            _ => Self::Unknown,
        }
    }

    /// Combines the HTTP status with an optional provider code; the provider
    /// code wins when it is recognized.
    pub fn classify(status: u16, provider_code: Option<&str>) -> Self {
        provider_code
            .and_then(Self::from_provider_code)
            .unwrap_or_else(|| Self::from_http_status(status))
    }
}

impl fmt::Display for UpstreamErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
