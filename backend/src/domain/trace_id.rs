//! Correlation identifier carried by every request.
//!
//! The HTTP middleware picks (or accepts) one [`TraceId`] per request and
//! scopes it into Tokio task-local storage. Error payloads and log spans read
//! it from there, so nothing has to thread it through function arguments.
//!
//! Task locals do not follow `tokio::spawn` or `web::block`; wrap such work in
//! [`TraceId::scope`] to keep the identifier visible.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// UUID identifying one request across logs, errors and response headers.
///
/// # Examples
/// ```
/// use analogy_backend::TraceId;
///
/// async fn handler() -> Option<String> {
///     TraceId::current().map(|id| id.to_string())
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Accept a caller-supplied `trace-id` header value.
    ///
    /// Only a hyphenated, non-nil UUID is honoured; the result is normalised
    /// to lowercase so log searches match the echoed header.
    ///
    /// ```
    /// use analogy_backend::TraceId;
    ///
    /// let id = TraceId::from_header(" 6F1D2A4E-8B2C-4F0E-9D3B-1A2B3C4D5E6F ").expect("valid");
    /// assert_eq!(id.to_string(), "6f1d2a4e-8b2c-4f0e-9d3b-1a2b3c4d5e6f");
    /// assert!(TraceId::from_header("00000000-0000-0000-0000-000000000000").is_none());
    /// assert!(TraceId::from_header("req-42").is_none());
    /// ```
    #[must_use]
    pub fn from_header(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() != uuid::fmt::Hyphenated::LENGTH {
            return None;
        }
        Uuid::try_parse(trimmed)
            .ok()
            .filter(|uuid| !uuid.is_nil())
            .map(Self)
    }

    /// Identifier of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// ```
    /// use analogy_backend::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let trace_id: TraceId = "00000000-0000-0000-0000-000000000000".parse().expect("uuid");
    /// let seen = TraceId::scope(trace_id, async { TraceId::current() }).await;
    /// assert_eq!(seen, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
