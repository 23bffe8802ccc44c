//! HTTP client for the Rocket.Chat REST API.
//!
//! The client mirrors the remote REST surface one-to-one: every remote
//! operation is a row in a static catalogue, addressed by the same dotted
//! name the service documents (`channels.list`, `chat.postMessage`,
//! `settings.get`, ...). There is no per-endpoint code; one generic dispatch
//! path composes the URL, marshals parameters, attaches the session's auth
//! headers, and unwraps the response envelope.
//!
//! # Example
//!
//! ```no_run
//! use rocketchat_client::RocketChat;
//! use serde_json::{json, Value};
//!
//! # async fn example() -> rocketchat_client::Result<()> {
//! // Construction logs in eagerly and fails fast on bad credentials.
//! let client = RocketChat::connect("http://localhost:3000", "admin", "secret").await?;
//!
//! // GET endpoints take named parameters as query parameters.
//! let users = client.call("users.list", &[], json!({"count": 50})).await?;
//! println!("{users}");
//!
//! // POST endpoints send them as a JSON body.
//! client
//!     .call("channels.create", &[], json!({"name": "general"}))
//!     .await?;
//!
//! // Some endpoints take one positional path argument.
//! let site_name = client.call("settings.get", &["Site_Name"], Value::Null).await?;
//! println!("{site_name}");
//! # Ok(())
//! # }
//! ```
//!
//! # Conventions
//!
//! - Access paths match the REST endpoint names. Where the service reuses one
//!   URL with different verbs, the catalogue splits them by name
//!   (`settings.get` / `settings.set`).
//! - Endpoints with a variable URL segment take a single positional argument
//!   that is appended to the path (`settings.get("Site_Name")` targets
//!   `/api/v1/settings/Site_Name`).
//! - Responses wrapped in a payload envelope are unwrapped to it; an `error`
//!   field in any response becomes [`Error::Api`], whatever the HTTP status.
//!
//! The library adds nothing on top of the wire contract: no retries, no
//! caching, no pagination helpers. Transport failures surface as
//! [`Error::Http`].

pub mod catalogue;
pub mod client;
pub mod error;
pub mod registry;
pub mod session;

pub use catalogue::CATALOGUE;
pub use client::{BoundEndpoint, ClientBuilder, RocketChat};
pub use error::{Error, Result};
pub use registry::{Endpoint, Method, Registry};
pub use session::{Credentials, Session, AUTH_TOKEN_HEADER, USER_ID_HEADER};
