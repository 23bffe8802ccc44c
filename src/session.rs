//! Session state: the credential pair obtained at login.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;

/// Header carrying the session token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

/// Header carrying the user id.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The `(userId, authToken)` pair returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// User id, sent as `X-User-Id`.
    pub user_id: String,
    /// Session token, sent as `X-Auth-Token`.
    pub auth_token: String,
}

/// Authentication state for one client.
///
/// The credential pair is stored as a unit: token and user id are both
/// present after a successful login and both absent otherwise. Only
/// `login`/`logout` on the client mutate this.
#[derive(Debug, Default)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    pub(crate) fn new() -> Self {
        Self { credentials: None }
    }

    /// Whether a login has succeeded.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// The stored credential pair, if any.
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub(crate) fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = Some(credentials);
    }

    pub(crate) fn clear(&mut self) {
        self.credentials = None;
    }

    /// Headers for an authenticated call.
    ///
    /// Unauthenticated sessions produce only the content-type header; the
    /// server rejects such calls, not this layer. In practice this state is
    /// unreachable because construction fails fast on a failed login.
    pub fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(credentials) = &self.credentials {
            if let Ok(value) = HeaderValue::from_str(&credentials.auth_token) {
                headers.insert(AUTH_TOKEN_HEADER, value);
            }
            if let Ok(value) = HeaderValue::from_str(&credentials.user_id) {
                headers.insert(USER_ID_HEADER, value);
            }
        }
        headers
    }
}

/// Wire shape of the login response.
#[derive(Debug, Deserialize)]
pub(crate) struct LoginResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<LoginData>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginData {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "authToken")]
    pub auth_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_headers_with_credentials() {
        let mut session = Session::new();
        session.set_credentials(Credentials {
            user_id: "u1".to_string(),
            auth_token: "t1".to_string(),
        });

        let headers = session.auth_headers();
        assert_eq!(headers.get(AUTH_TOKEN_HEADER).unwrap(), "t1");
        assert_eq!(headers.get(USER_ID_HEADER).unwrap(), "u1");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_auth_headers_without_credentials() {
        let session = Session::new();
        let headers = session.auth_headers();
        assert!(headers.get(AUTH_TOKEN_HEADER).is_none());
        assert!(headers.get(USER_ID_HEADER).is_none());
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_clear_drops_both_fields() {
        let mut session = Session::new();
        session.set_credentials(Credentials {
            user_id: "u1".to_string(),
            auth_token: "t1".to_string(),
        });
        session.clear();
        assert!(!session.is_authenticated());
        assert!(session.credentials().is_none());
    }

    #[test]
    fn test_login_response_decodes_success() {
        let response: LoginResponse = serde_json::from_str(
            r#"{"status": "success", "data": {"userId": "u1", "authToken": "t1"}}"#,
        )
        .unwrap();
        assert_eq!(response.status, "success");
        let data = response.data.unwrap();
        assert_eq!(data.user_id, "u1");
        assert_eq!(data.auth_token, "t1");
    }

    #[test]
    fn test_login_response_decodes_error() {
        let response: LoginResponse =
            serde_json::from_str(r#"{"status": "error", "message": "bad credentials"}"#).unwrap();
        assert_eq!(response.status, "error");
        assert!(response.data.is_none());
        assert_eq!(response.message.as_deref(), Some("bad credentials"));
    }
}
