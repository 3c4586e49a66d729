//! User Agent
//!
//! Boundary to the external user agent (browser or embedded web view)
//! that presents the authorization step and reports candidate
//! navigations back to the flow.

use async_trait::async_trait;
use std::sync::{Mutex, Weak};
use url::Url;

use crate::core::HttpRequest;
use crate::error::GrantError;

/// Liveness anchor for one authentication attempt.
///
/// The attempt holds the owning `Arc`; recognizers hold a `Weak`. When the
/// attempt is discarded mid-flight, a user agent still running (e.g. a
/// recognizer moved into a spawned listener task) observes `FlowDiscarded`
/// instead of silently completing against a dead flow.
#[derive(Debug, Default)]
pub struct AttemptGuard;

/// Decides, per candidate navigation, whether the redirect has arrived.
///
/// The user agent calls [`recognize`](Self::recognize) on every navigation
/// event. `Ok(false)` leaves the user agent running (the user may still be
/// on a login form); `Ok(true)` terminates the user-agent phase with that
/// candidate; `Err` terminates it with the error.
#[derive(Clone, Debug)]
pub struct RedirectRecognizer {
    expected: Option<Url>,
    attempt: Weak<AttemptGuard>,
}

impl RedirectRecognizer {
    /// Create a recognizer for one attempt.
    pub fn new(expected: Option<Url>, attempt: Weak<AttemptGuard>) -> Self {
        Self { expected, attempt }
    }

    /// Check one candidate navigation.
    ///
    /// When a redirect URI is configured, the candidate's scheme, host,
    /// and path must equal it exactly; query parameters are ignored for
    /// the comparison. In all cases the candidate's query must carry a
    /// `code` or `error` key.
    pub fn recognize(&self, candidate: &Url) -> Result<bool, GrantError> {
        if self.attempt.upgrade().is_none() {
            return Err(GrantError::FlowDiscarded);
        }

        if let Some(expected) = &self.expected {
            if candidate.scheme() != expected.scheme()
                || candidate.host_str() != expected.host_str()
                || candidate.path() != expected.path()
            {
                return Ok(false);
            }
        }

        Ok(candidate
            .query_pairs()
            .any(|(key, _)| key == "code" || key == "error"))
    }
}

/// User agent interface (for dependency injection).
///
/// Presents the authorization request and offers each navigation to the
/// recognizer until it accepts a candidate or fails. The flow imposes no
/// timeout on this phase; the user agent owns one if it wants one. One
/// attempt at a time per user-agent surface.
#[async_trait]
pub trait UserAgent: Send + Sync {
    /// Present the authorization request; resolve with the matched
    /// redirect.
    async fn present(
        &self,
        request: HttpRequest,
        recognizer: RedirectRecognizer,
    ) -> Result<Url, GrantError>;
}

/// Scripted user agent for testing.
///
/// Plays back a fixed sequence of navigations against the recognizer.
#[derive(Default)]
pub struct ScriptedUserAgent {
    navigations: Mutex<Vec<Url>>,
    presented: Mutex<Vec<HttpRequest>>,
}

impl ScriptedUserAgent {
    /// Create new scripted user agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a navigation to the script.
    pub fn navigate_to(&self, url: Url) -> &Self {
        self.navigations.lock().unwrap().push(url);
        self
    }

    /// Get presented request history.
    pub fn get_presented(&self) -> Vec<HttpRequest> {
        self.presented.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserAgent for ScriptedUserAgent {
    async fn present(
        &self,
        request: HttpRequest,
        recognizer: RedirectRecognizer,
    ) -> Result<Url, GrantError> {
        self.presented.lock().unwrap().push(request);

        let navigations: Vec<Url> = self.navigations.lock().unwrap().drain(..).collect();
        for candidate in navigations {
            if recognizer.recognize(&candidate)? {
                return Ok(candidate);
            }
        }

        Err(GrantError::InvalidAuthorizationResponse {
            message: "user agent ended without a matching redirect".to_string(),
        })
    }
}
