use axum::http::HeaderMap;
use mnemon_core::MnemonError;

/// Header carrying the shared secret for gated routes.
pub const SECRET_HEADER: &str = "x-mnemon-secret";

/// Single-secret authorization for destructive and backup-triggering
/// operations. Denied when no secret is configured or on any exact
/// mismatch. Plain string comparison by contract; timing resistance is out
/// of scope.
#[derive(Debug, Clone)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    /// An empty configured secret counts as unconfigured.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn authorize(&self, supplied: Option<&str>) -> bool {
        match (&self.secret, supplied) {
            (Some(configured), Some(supplied)) => configured == supplied,
            _ => false,
        }
    }

    pub fn authorize_headers(&self, headers: &HeaderMap) -> bool {
        let supplied = headers.get(SECRET_HEADER).and_then(|v| v.to_str().ok());
        self.authorize(supplied)
    }

    /// Gate check as an error: denial is a [`MnemonError::Forbidden`]. The
    /// message never echoes the configured value.
    pub fn require(&self, headers: &HeaderMap) -> mnemon_core::Result<()> {
        if self.authorize_headers(headers) {
            Ok(())
        } else {
            Err(MnemonError::Forbidden("missing or invalid secret".into()))
        }
    }
}
