//! Endpoint descriptors and the access-path registry.
//!
//! Every remote operation is described by one immutable [`Endpoint`] record.
//! The records live in a static table ([`crate::catalogue::CATALOGUE`]) keyed
//! by dotted access path, and are assembled once, at client construction,
//! into a [`Registry`] tree. Resolution is pure lookup: the same access path
//! yields the same descriptor on every call.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Default API root; everything except the service-info call lives here.
pub const DEFAULT_API_ROOT: &str = "/api/v1/";

/// Root for the unauthenticated service-info call.
pub const INFO_API_ROOT: &str = "/api/";

/// HTTP verbs used by the catalogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// Descriptor for one remote operation.
///
/// `method == None` marks a namespace-only node: it groups children in the
/// registry tree but cannot be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Literal URL path appended to the API root. Independent of the access
    /// path: `settings.get` and `settings.set` both target `settings`.
    pub path: &'static str,
    /// HTTP verb, or `None` for a namespace-only node.
    pub method: Option<Method>,
    /// Whether the call takes exactly one positional argument, appended to
    /// the URL as `/{arg}`.
    pub arg_endpoint: bool,
    /// Key extracted from the decoded response instead of the whole object.
    pub result_key: Option<&'static str>,
    /// Whether the call sends the session's auth headers.
    pub auth: bool,
    /// API root prefix for this endpoint.
    pub api_root: &'static str,
}

impl Endpoint {
    /// GET endpoint under the default root, authenticated.
    pub const fn get(path: &'static str) -> Self {
        Self {
            path,
            method: Some(Method::Get),
            arg_endpoint: false,
            result_key: None,
            auth: true,
            api_root: DEFAULT_API_ROOT,
        }
    }

    /// POST endpoint under the default root, authenticated.
    pub const fn post(path: &'static str) -> Self {
        Self {
            method: Some(Method::Post),
            ..Self::get(path)
        }
    }

    /// DELETE endpoint under the default root, authenticated.
    pub const fn delete(path: &'static str) -> Self {
        Self {
            method: Some(Method::Delete),
            ..Self::get(path)
        }
    }

    /// Namespace-only node (grouping, not callable).
    pub const fn namespace() -> Self {
        Self {
            path: "",
            method: None,
            ..Self::get("")
        }
    }

    /// Extract `key` from the decoded response instead of returning the whole
    /// object.
    pub const fn with_result_key(mut self, key: &'static str) -> Self {
        self.result_key = Some(key);
        self
    }

    /// Accept one positional path argument.
    pub const fn with_arg(mut self) -> Self {
        self.arg_endpoint = true;
        self
    }

    /// Send the request without auth headers.
    pub const fn unauthenticated(mut self) -> Self {
        self.auth = false;
        self
    }

    /// Override the API root prefix.
    pub const fn at_root(mut self, api_root: &'static str) -> Self {
        self.api_root = api_root;
        self
    }

    /// Whether this node can be invoked at all.
    pub fn is_callable(&self) -> bool {
        self.method.is_some()
    }
}

/// A node in the registry tree.
///
/// A node may be callable and still have children: `channels.list` is a GET
/// endpoint and the parent of `channels.list.joined`.
#[derive(Debug)]
struct Node {
    endpoint: Endpoint,
    children: HashMap<&'static str, Node>,
}

impl Node {
    fn namespace() -> Self {
        Self {
            endpoint: Endpoint::namespace(),
            children: HashMap::new(),
        }
    }
}

/// Eagerly-built tree of endpoint descriptors, keyed by dotted access path.
#[derive(Debug)]
pub struct Registry {
    roots: HashMap<&'static str, Node>,
}

impl Registry {
    /// Build the registry from a table of `(access_path, descriptor)` rows.
    ///
    /// Intermediate path segments without an explicit row become implicit
    /// namespace-only nodes; a later row for the same access path overwrites
    /// an earlier one.
    pub fn new(table: &[(&'static str, Endpoint)]) -> Self {
        let mut registry = Self {
            roots: HashMap::new(),
        };
        for (access_path, endpoint) in table {
            registry.insert(access_path, *endpoint);
        }
        registry
    }

    fn insert(&mut self, access_path: &'static str, endpoint: Endpoint) {
        let mut segments = access_path.split('.').peekable();
        let mut children = &mut self.roots;
        while let Some(segment) = segments.next() {
            let node = children.entry(segment).or_insert_with(Node::namespace);
            if segments.peek().is_none() {
                node.endpoint = endpoint;
                return;
            }
            children = &mut node.children;
        }
    }

    /// Look up a descriptor by dotted access path.
    ///
    /// Resolution never constructs anything; the same access path returns a
    /// reference to the same descriptor on every call.
    pub fn resolve(&self, access_path: &str) -> Result<&Endpoint> {
        let miss = || Error::InvalidEndpoint(format!("unknown endpoint `{access_path}`"));

        // split('.') always yields a first segment; an empty or trailing-dot
        // path produces an empty segment, which no table row registers.
        let mut segments = access_path.split('.');
        let mut node = self
            .roots
            .get(segments.next().unwrap_or_default())
            .ok_or_else(miss)?;
        for segment in segments {
            node = node.children.get(segment).ok_or_else(miss)?;
        }
        Ok(&node.endpoint)
    }

    /// Whether an access path names a registered node (callable or not).
    pub fn contains(&self, access_path: &str) -> bool {
        self.resolve(access_path).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &[(&str, Endpoint)] = &[
        ("widgets.list", Endpoint::get("widgets.list").with_result_key("widgets")),
        ("widgets.list.mine", Endpoint::get("widgets.list.mine").with_result_key("widgets")),
        ("widgets.create", Endpoint::post("widgets.create").with_result_key("widget")),
        ("settings.get", Endpoint::get("settings").with_arg()),
        ("settings.set", Endpoint::post("settings").with_arg()),
        ("info", Endpoint::get("info").unauthenticated().at_root(INFO_API_ROOT)),
    ];

    #[test]
    fn test_resolves_leaf_descriptor() {
        let registry = Registry::new(TABLE);
        let endpoint = registry.resolve("widgets.create").unwrap();
        assert_eq!(endpoint.method, Some(Method::Post));
        assert_eq!(endpoint.path, "widgets.create");
        assert_eq!(endpoint.result_key, Some("widget"));
    }

    #[test]
    fn test_intermediate_segments_become_namespaces() {
        let registry = Registry::new(TABLE);
        let endpoint = registry.resolve("widgets").unwrap();
        assert!(!endpoint.is_callable());
    }

    #[test]
    fn test_node_can_be_callable_and_parent() {
        let registry = Registry::new(TABLE);
        let list = registry.resolve("widgets.list").unwrap();
        assert_eq!(list.method, Some(Method::Get));

        let mine = registry.resolve("widgets.list.mine").unwrap();
        assert_eq!(mine.path, "widgets.list.mine");
    }

    #[test]
    fn test_unknown_path_is_invalid_endpoint() {
        let registry = Registry::new(TABLE);
        let err = registry.resolve("widgets.destroy").unwrap_err();
        assert!(err.is_invalid_endpoint(), "got {err:?}");

        let err = registry.resolve("nope").unwrap_err();
        assert!(err.is_invalid_endpoint(), "got {err:?}");
    }

    #[test]
    fn test_empty_and_trailing_dot_paths_are_rejected() {
        let registry = Registry::new(TABLE);
        for path in ["", ".", "widgets.", ".widgets", "widgets..list"] {
            let err = registry.resolve(path).unwrap_err();
            assert!(err.is_invalid_endpoint(), "`{path}` gave {err:?}");
        }
    }

    #[test]
    fn test_resolution_returns_same_descriptor() {
        let registry = Registry::new(TABLE);
        let first = registry.resolve("settings.get").unwrap();
        let second = registry.resolve("settings.get").unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn test_access_path_independent_of_url_path() {
        let registry = Registry::new(TABLE);
        let get = registry.resolve("settings.get").unwrap();
        let set = registry.resolve("settings.set").unwrap();
        assert_eq!(get.path, "settings");
        assert_eq!(set.path, "settings");
        assert_eq!(get.method, Some(Method::Get));
        assert_eq!(set.method, Some(Method::Post));
        assert!(get.arg_endpoint && set.arg_endpoint);
    }

    #[test]
    fn test_root_override() {
        let registry = Registry::new(TABLE);
        let info = registry.resolve("info").unwrap();
        assert_eq!(info.api_root, INFO_API_ROOT);
        assert!(!info.auth);
    }
}
