//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::catalogue::CATALOGUE;
use crate::error::{Error, Result};
use crate::registry::{Endpoint, Method, Registry};
use crate::session::{Credentials, LoginResponse, Session};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Rocket.Chat API client.
///
/// Construction logs in eagerly; a client you can hold is a client that has
/// authenticated. Every registered endpoint is reachable through
/// [`call`](RocketChat::call) by its dotted access path.
///
/// # Example
///
/// ```no_run
/// use rocketchat_client::RocketChat;
/// use serde_json::{json, Value};
///
/// # async fn example() -> rocketchat_client::Result<()> {
/// let client = RocketChat::connect("http://localhost:3000", "admin", "secret").await?;
///
/// let channels = client.call("channels.list", &[], Value::Null).await?;
/// println!("{channels}");
///
/// client
///     .call("chat.postMessage", &[], json!({"channel": "#general", "text": "hi"}))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RocketChat {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
#[derive(Debug)]
pub(crate) struct ClientInner {
    /// HTTP client.
    http: reqwest::Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Request timeout.
    timeout: Duration,
    /// Endpoint registry, built once from the catalogue.
    registry: Registry,
    /// Auth state; written by login/logout, read by every authenticated call.
    session: RwLock<Session>,
}

impl RocketChat {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Build a client and log in with the given credentials.
    ///
    /// Fails fast: if the login is rejected, no client is returned.
    pub async fn connect(
        base_url: impl Into<String>,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .credentials(username, password)
            .connect()
            .await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Get the endpoint registry.
    pub fn registry(&self) -> &Registry {
        &self.inner.registry
    }

    /// Whether the session currently holds a credential pair.
    pub fn is_authenticated(&self) -> bool {
        self.inner.session.read().is_authenticated()
    }

    /// The session's credential pair, if any.
    pub fn credentials(&self) -> Option<Credentials> {
        self.inner.session.read().credentials().cloned()
    }

    /// Resolve an access path to a callable handle bound to this client.
    pub fn endpoint<'a>(&'a self, access_path: &'a str) -> Result<BoundEndpoint<'a>> {
        let endpoint = self.inner.registry.resolve(access_path)?;
        Ok(BoundEndpoint {
            client: self,
            access_path,
            endpoint,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Session operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Exchange a username/password pair for a session token.
    ///
    /// Sends a form-encoded POST to `/api/v1/login`. On success the
    /// `(userId, authToken)` pair is stored and attached to every subsequent
    /// authenticated call; on rejection the stored credentials are left
    /// untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = self.inner.base_url.join("api/v1/login")?;
        tracing::debug!(%url, username, "logging in");

        let response = self
            .inner
            .http
            .post(url)
            .form(&[("username", username), ("password", password)])
            .timeout(self.inner.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        let decoded: LoginResponse = serde_json::from_str(&body).map_err(|_| {
            tracing::warn!(status, body = %body, "login response is not valid JSON");
            Error::MalformedResponse {
                status,
                body: body.clone(),
            }
        })?;

        if decoded.status != "success" {
            let message = decoded.message.unwrap_or(decoded.status);
            return Err(Error::Authentication(message));
        }
        let data = decoded
            .data
            .ok_or(Error::MalformedResponse { status, body })?;

        self.inner.session.write().set_credentials(Credentials {
            user_id: data.user_id,
            auth_token: data.auth_token,
        });
        Ok(())
    }

    /// Invalidate the session token and clear the stored credentials.
    pub async fn logout(&self) -> Result<()> {
        self.call("logout", &[], Value::Null).await?;
        self.inner.session.write().clear();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Dispatch
    // ─────────────────────────────────────────────────────────────────────────

    /// Invoke a registered endpoint by dotted access path.
    ///
    /// `args` carries the positional path argument for descriptors that take
    /// one (exactly one element, appended to the URL as `/{arg}`); it must be
    /// empty for every other descriptor. `params` is a JSON object of named
    /// parameters (or `Value::Null` for none): query parameters on GET, the
    /// request body on POST/DELETE.
    ///
    /// Returns the decoded response, unwrapped to the descriptor's result key
    /// when it has one.
    pub async fn call(&self, access_path: &str, args: &[&str], params: Value) -> Result<Value> {
        let endpoint = self.inner.registry.resolve(access_path)?;
        self.dispatch(access_path, endpoint, args, params).await
    }

    async fn dispatch(
        &self,
        access_path: &str,
        endpoint: &Endpoint,
        args: &[&str],
        params: Value,
    ) -> Result<Value> {
        let Some(method) = endpoint.method else {
            return Err(Error::InvalidEndpoint(format!(
                "`{access_path}` is a namespace, not a callable endpoint"
            )));
        };

        if endpoint.arg_endpoint && args.len() != 1 {
            return Err(Error::InvalidEndpoint(format!(
                "`{access_path}` takes exactly one positional argument, got {}",
                args.len()
            )));
        }
        if !endpoint.arg_endpoint && !args.is_empty() {
            return Err(Error::InvalidEndpoint(format!(
                "`{access_path}` takes no positional arguments, got {}",
                args.len()
            )));
        }
        if !matches!(params, Value::Null | Value::Object(_)) {
            return Err(Error::InvalidEndpoint(format!(
                "named parameters for `{access_path}` must be a JSON object"
            )));
        }

        let url = self.endpoint_url(endpoint, args.first().copied())?;
        tracing::debug!(%method, %url, endpoint = access_path, "dispatching request");

        let mut request = self
            .inner
            .http
            .request(method.as_reqwest(), url)
            .timeout(self.inner.timeout);

        // GET sends params as the query string; POST/DELETE as a JSON body.
        match method {
            Method::Get => {
                if let Value::Object(map) = &params {
                    if !map.is_empty() {
                        request = request.query(&query_pairs(map));
                    }
                }
            }
            Method::Post | Method::Delete => {
                let body = match params {
                    Value::Object(map) => Value::Object(map),
                    // Validated above: anything else here is Null.
                    _ => Value::Object(serde_json::Map::new()),
                };
                request = request.json(&body);
            }
        }

        if endpoint.auth {
            request = request.headers(self.inner.session.read().auth_headers());
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        let decoded: Value = serde_json::from_str(&body).map_err(|_| {
            tracing::warn!(status, body = %body, endpoint = access_path, "response body is not valid JSON");
            Error::MalformedResponse {
                status,
                body: body.clone(),
            }
        })?;

        // An error envelope wins over everything else, whatever the HTTP
        // status was.
        if let Some(error) = decoded.get("error") {
            let error = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            let error_type = decoded
                .get("errorType")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string();
            return Err(Error::Api { error_type, error });
        }

        match endpoint.result_key {
            Some(key) => match decoded.get(key) {
                Some(value) => Ok(value.clone()),
                None => Err(Error::MissingResultKey { key }),
            },
            None => Ok(decoded),
        }
    }

    /// Compose `baseURL + apiRoot + path` (+ `/{arg}` for arg endpoints).
    fn endpoint_url(&self, endpoint: &Endpoint, arg: Option<&str>) -> Result<Url> {
        let mut path = format!(
            "{}{}",
            endpoint.api_root.trim_start_matches('/'),
            endpoint.path
        );
        if let Some(arg) = arg {
            path.push('/');
            path.push_str(arg);
        }
        self.inner.base_url.join(&path).map_err(Error::from)
    }
}

/// A callable endpoint bound to its owning client.
///
/// However deep in the tree the descriptor sits, the handle carries the
/// client (and through it the session) needed to invoke it.
pub struct BoundEndpoint<'a> {
    client: &'a RocketChat,
    access_path: &'a str,
    endpoint: &'a Endpoint,
}

impl BoundEndpoint<'_> {
    /// The underlying descriptor.
    pub fn descriptor(&self) -> &Endpoint {
        self.endpoint
    }

    /// Invoke the endpoint. Same contract as [`RocketChat::call`].
    pub async fn call(&self, args: &[&str], params: Value) -> Result<Value> {
        self.client
            .dispatch(self.access_path, self.endpoint, args, params)
            .await
    }
}

/// Flatten a params object into query pairs; non-string scalars use their
/// JSON rendering.
fn query_pairs(map: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    map.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect()
}

/// Builder for creating a RocketChat client.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            username: None,
            password: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL of the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the login credentials.
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client and perform the eager login.
    pub async fn connect(mut self) -> Result<RocketChat> {
        let username = self
            .username
            .take()
            .ok_or_else(|| Error::Config("username is required".to_string()))?;
        let password = self
            .password
            .take()
            .ok_or_else(|| Error::Config("password is required".to_string()))?;

        let client = self.build()?;
        client.login(&username, &password).await?;
        Ok(client)
    }

    /// Assemble the client without logging in. Only `connect` hands clients
    /// out; tests use this directly.
    pub(crate) fn build(self) -> Result<RocketChat> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("rocketchat-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(RocketChat {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                registry: Registry::new(CATALOGUE),
                session: RwLock::new(Session::new()),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RocketChat {
        ClientBuilder::new()
            .base_url("http://localhost:3000")
            .build()
            .unwrap()
    }

    #[test]
    fn test_client_and_errors_are_debuggable() {
        // unwrap_err on Result<RocketChat, _> needs both sides to be Debug.
        let formatted = format!("{:?}", client());
        assert!(formatted.contains("base_url"));

        let err: crate::Result<RocketChat> = Err(Error::Config("missing".to_string()));
        assert!(format!("{:?}", err.unwrap_err()).contains("missing"));
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = client();
        assert_eq!(client.base_url().as_str(), "http://localhost:3000/");

        let with_slash = ClientBuilder::new()
            .base_url("http://localhost:3000/")
            .build()
            .unwrap();
        assert_eq!(with_slash.base_url().as_str(), "http://localhost:3000/");
    }

    #[test]
    fn test_endpoint_url_uses_api_root() {
        let client = client();
        let endpoint = client.registry().resolve("channels.list").unwrap();
        let url = client.endpoint_url(endpoint, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/channels.list");
    }

    #[test]
    fn test_endpoint_url_info_root_override() {
        let client = client();
        let endpoint = client.registry().resolve("info").unwrap();
        let url = client.endpoint_url(endpoint, None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/info");
    }

    #[test]
    fn test_endpoint_url_appends_path_argument() {
        let client = client();
        let endpoint = client.registry().resolve("settings.get").unwrap();
        let url = client.endpoint_url(endpoint, Some("SiteName")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/settings/SiteName");
    }

    #[test]
    fn test_endpoint_handle_resolves_descriptor() {
        let client = client();
        let bound = client.endpoint("chat.postMessage").unwrap();
        assert_eq!(bound.descriptor().path, "chat.postMessage");
        assert!(client.endpoint("chat.noSuchThing").is_err());
    }

    #[test]
    fn test_query_pairs_stringify_scalars() {
        let Value::Object(map) = serde_json::json!({
            "count": 50,
            "query": "general",
            "sort": true,
        }) else {
            unreachable!()
        };
        let mut pairs = query_pairs(&map);
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "50".to_string()),
                ("query".to_string(), "general".to_string()),
                ("sort".to_string(), "true".to_string()),
            ]
        );
    }
}
