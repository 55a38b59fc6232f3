use std::fmt;

use actix_web::HttpRequest;
use zeroize::Zeroizing;

/// A server-held shared secret compared against presented bearer tokens.
///
/// An unset (or blank) secret never matches, so endpoints guarded by it
/// reject every request.
#[derive(Clone)]
pub struct SharedSecret(Option<Zeroizing<String>>);

impl SharedSecret {
    pub fn new(secret: Option<&str>) -> Self {
        let secret = secret
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| Zeroizing::new(s.to_string()));
        SharedSecret(secret)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    pub fn verify(&self, presented: &str) -> bool {
        match &self.0 {
            Some(secret) => constant_time_eq(secret.as_bytes(), presented.as_bytes()),
            None => false,
        }
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_configured() { "[REDACTED]" } else { "[MISSING]" };
        f.debug_tuple("SharedSecret").field(&state).finish()
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
/// Everything after the scheme is the token, inner spaces included.
pub fn extract_bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.trim().split_once(char::is_whitespace))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
