//! Provider-facing request representation and the adapter that builds it.

use std::collections::HashMap;

use http::Method;
use http::request::Parts;

/// An inbound request reshaped for the identity-provider client.
///
/// Carries exactly what credential validation needs: the method, the target
/// URL, and the header map. Construction is a pure transformation with no
/// I/O; [`AuthRequest::from_parts`] adapts a framework request in place.
///
/// Header names are stored lowercased, matching the `http` crate's
/// normalization.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    /// HTTP method of the inbound request.
    pub method: Method,
    /// Full target URL as received by the framework.
    pub url: String,
    headers: HashMap<String, String>,
}

impl AuthRequest {
    /// Creates a new request with no headers.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// Adapts framework request parts into the provider shape.
    ///
    /// Header values that are not valid UTF-8 are skipped; Clerk session
    /// credentials are always ASCII.
    pub fn from_parts(parts: &Parts) -> Self {
        let headers = parts
            .headers
            .iter()
            .filter_map(|(name, value)| {
                let value = value.to_str().ok()?;
                Some((name.as_str().to_owned(), value.to_owned()))
            })
            .collect();

        Self {
            method: parts.method.clone(),
            url: parts.uri.to_string(),
            headers,
        }
    }

    /// Adds a header to the request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Returns a header value by (case-insensitive) name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns the token from an `Authorization: Bearer` header, if present.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        let value = self.header("authorization")?;
        let token = value.strip_prefix("Bearer ").or_else(|| value.strip_prefix("bearer "))?;
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    }

    /// Returns the Clerk `__session` cookie value, if present.
    #[must_use]
    pub fn session_cookie(&self) -> Option<&str> {
        let cookies = self.header("cookie")?;
        cookies.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == "__session" && !value.is_empty()).then_some(value)
        })
    }

    /// Returns the session token, preferring the `Authorization` header over
    /// the `__session` cookie.
    #[must_use]
    pub fn session_token(&self) -> Option<&str> {
        self.bearer_token().or_else(|| self.session_cookie())
    }
}
