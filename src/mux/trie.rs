//! Path segment trie
//!
//! Each node owns its literal children by segment text and at most one dynamic child
//! (a `{name}` segment). Matching is greedy: at every depth a literal child wins over
//! the dynamic child, and that choice is never revisited. With routes `/a/x/c` and
//! `/a/{id}/d`, the path `/a/x/d` descends into `x`, finds no `d`, and is not found
//! even though `/a/{id}/d` would have accepted it.
//!
//! The trie has no interior locking. All `insert` calls must happen before the first
//! `lookup`; concurrent `lookup` calls on a finished trie are safe because nothing
//! is mutated.

use std::collections::HashMap;
use std::sync::OnceLock;

use hyper::Method;
use regex::Regex;

use super::error::{ConflictError, NotFoundError};
use super::vars::{RouteVariable, Vars};

/// Matches a `{name}` segment, name made of ASCII letters only
static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"^\{[A-Za-z]+\}$").expect("placeholder pattern is valid")
    })
}

/// Returns true if `segment` is a dynamic `{name}` segment.
pub fn is_placeholder(segment: &str) -> bool {
    placeholder_regex().is_match(segment)
}

/// Name captured by a `{name}` segment, or `None` for a literal segment.
pub fn placeholder_name(segment: &str) -> Option<&str> {
    if is_placeholder(segment) {
        Some(&segment[1..segment.len() - 1])
    } else {
        None
    }
}

/// Strip one leading and one trailing `/` and split on `/`.
///
/// `"/"` becomes a single empty segment, so the root path is stored as a literal
/// child labelled `""`.
fn segments(path: &str) -> std::str::Split<'_, char> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    path.split('/')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Literal,
    Dynamic,
}

#[derive(Debug)]
struct TrieNode<T> {
    /// Segment text, or the variable name for a dynamic node
    label: String,
    kind: NodeKind,
    handlers: HashMap<Method, T>,
    children: HashMap<String, TrieNode<T>>,
    dynamic: Option<Box<TrieNode<T>>>,
}

impl<T> TrieNode<T> {
    fn new(kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            handlers: HashMap::new(),
            children: HashMap::new(),
            dynamic: None,
        }
    }

    /// Variable bound by this node; `None` unless it is a dynamic node.
    fn variable_name(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Dynamic => Some(&self.label),
            NodeKind::Root | NodeKind::Literal => None,
        }
    }
}

/// Routing table keyed by path segments and HTTP method
#[derive(Debug)]
pub struct RoutingTrie<T> {
    root: TrieNode<T>,
    routes: usize,
}

impl<T> Default for RoutingTrie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RoutingTrie<T> {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(NodeKind::Root, ""),
            routes: 0,
        }
    }

    /// Number of registered (path, method) pairs
    pub const fn len(&self) -> usize {
        self.routes
    }

    pub const fn is_empty(&self) -> bool {
        self.routes == 0
    }

    /// Register `value` for `method` on the path template `path`.
    ///
    /// Fails if the pair is already registered, or if a `{name}` segment sits where
    /// a differently named variable was registered before.
    pub fn insert(&mut self, path: &str, method: Method, value: T) -> Result<(), ConflictError> {
        let mut node = &mut self.root;

        for segment in segments(path) {
            // An existing literal child takes the segment even if it reads like `{name}`
            if !node.children.contains_key(segment) {
                if let Some(name) = placeholder_name(segment) {
                    let child = node
                        .dynamic
                        .get_or_insert_with(|| Box::new(TrieNode::new(NodeKind::Dynamic, name)));
                    if child.variable_name() != Some(name) {
                        return Err(ConflictError::VariableConflict {
                            path: path.to_string(),
                            existing: child.label.clone(),
                            requested: name.to_string(),
                        });
                    }
                    node = &mut **child;
                    continue;
                }
            }

            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| TrieNode::new(NodeKind::Literal, segment));
        }

        if node.handlers.contains_key(&method) {
            return Err(ConflictError::DuplicateRoute {
                method,
                path: path.to_string(),
            });
        }

        node.handlers.insert(method, value);
        self.routes += 1;
        Ok(())
    }

    /// Resolve a concrete request path to its value and captured variables.
    ///
    /// One pass, one node per segment, no backtracking.
    pub fn lookup(&self, path: &str, method: &Method) -> Result<(&T, Vars), NotFoundError> {
        let not_found = || NotFoundError {
            method: method.clone(),
            path: path.to_string(),
        };

        let mut vars = Vars::new();
        let mut node = &self.root;

        for segment in segments(path) {
            if let Some(child) = node.children.get(segment) {
                node = child;
            } else if let Some(child) = node.dynamic.as_deref() {
                if let Some(name) = child.variable_name() {
                    vars.push(RouteVariable::new(name, segment));
                }
                node = child;
            } else {
                return Err(not_found());
            }
        }

        node.handlers
            .get(method)
            .map(|value| (value, vars))
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl<T> TrieNode<T> {
        fn child(&self, segment: &str) -> &Self {
            &self.children[segment]
        }

        fn dyn_child(&self) -> &Self {
            self.dynamic.as_deref().unwrap()
        }
    }

    fn vars(pairs: &[(&str, &str)]) -> Vars {
        Vars::from(
            pairs
                .iter()
                .map(|(n, v)| RouteVariable::new(*n, *v))
                .collect::<Vec<_>>(),
        )
    }

    fn assert_route(
        trie: &RoutingTrie<&str>,
        path: &str,
        method: &Method,
        want: &str,
        expected: &Vars,
    ) {
        let (value, got) = trie
            .lookup(path, method)
            .unwrap_or_else(|e| panic!("expected {method} {path} to match: {e}"));
        assert_eq!(*value, want, "{method} {path}");
        assert_eq!(&got, expected, "{method} {path}");
    }

    #[test]
    fn test_placeholder_classification() {
        assert_eq!(placeholder_name("{uid}"), Some("uid"));
        assert_eq!(placeholder_name("{UserId}"), Some("UserId"));
        assert_eq!(placeholder_name("uid"), None);
        assert_eq!(placeholder_name("{}"), None);
        assert_eq!(placeholder_name("{uid"), None);
        assert_eq!(placeholder_name("{user_id}"), None);
        assert_eq!(placeholder_name("{id1}"), None);
        assert_eq!(placeholder_name("{a}b"), None);
        // [ \ ] ^ _ ` sit between 'Z' and 'a' and are not letters
        assert_eq!(placeholder_name("{a^b}"), None);
        assert_eq!(placeholder_name("{_}"), None);
    }

    #[test]
    fn test_insert_simple_routes() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users", Method::POST, "POST /v1/users").unwrap();
        trie.insert("/v1/users", Method::GET, "GET /v1/users").unwrap();
        trie.insert("/v1/users/profiles", Method::GET, "GET /v1/users/profiles").unwrap();
        trie.insert("/v1/users/profiles", Method::PATCH, "PATCH /v1/users/profiles").unwrap();
        trie.insert("/v1/users/profiles/settings", Method::POST, "POST settings").unwrap();
        trie.insert("/v1/users/profiles/settings", Method::GET, "GET settings").unwrap();
        assert_eq!(trie.len(), 6);

        let users = trie.root.child("v1").child("users");
        assert_eq!(users.kind, NodeKind::Literal);
        assert!(users.handlers.contains_key(&Method::POST));
        assert!(users.handlers.contains_key(&Method::GET));

        let profiles = users.child("profiles");
        assert!(profiles.handlers.contains_key(&Method::GET));
        assert!(profiles.handlers.contains_key(&Method::PATCH));

        let settings = profiles.child("settings");
        assert!(settings.handlers.contains_key(&Method::POST));
        assert!(settings.handlers.contains_key(&Method::GET));
    }

    #[test]
    fn test_insert_dynamic_routes() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users/{uid}", Method::GET, "user").unwrap();
        trie.insert("/v1/users/{uid}/profiles", Method::GET, "profiles").unwrap();
        trie.insert("/v1/users/{uid}/profiles/{pid}", Method::GET, "profile").unwrap();
        trie.insert("/v1/users/static/profiles/{pid}", Method::GET, "static").unwrap();

        let users = trie.root.child("v1").child("users");

        let uid = users.dyn_child();
        assert_eq!(uid.kind, NodeKind::Dynamic);
        assert_eq!(uid.label, "uid");
        assert_eq!(uid.variable_name(), Some("uid"));
        assert_eq!(users.variable_name(), None);
        assert_eq!(trie.root.variable_name(), None);
        assert!(uid.handlers.contains_key(&Method::GET));

        let profiles = uid.child("profiles");
        assert_eq!(profiles.label, "profiles");
        assert!(profiles.handlers.contains_key(&Method::GET));
        assert_eq!(profiles.dyn_child().label, "pid");
        assert!(profiles.dyn_child().handlers.contains_key(&Method::GET));

        let static_pid = users.child("static").child("profiles").dyn_child();
        assert_eq!(static_pid.label, "pid");
        assert!(static_pid.handlers.contains_key(&Method::GET));
    }

    #[test]
    fn test_lookup_simple_routes() {
        let mut trie = RoutingTrie::new();
        let routes = [
            ("/v1/users", Method::POST),
            ("/v1/users", Method::GET),
            ("/v1/users/profiles", Method::GET),
            ("/v1/users/profiles", Method::PATCH),
            ("/v1/users/profiles/settings", Method::POST),
            ("/v1/users/profiles/settings", Method::GET),
        ];
        for (path, method) in &routes {
            trie.insert(path, method.clone(), *path).unwrap();
        }

        for (path, method) in &routes {
            assert_route(&trie, path, method, path, &Vars::new());
        }
    }

    #[test]
    fn test_lookup_dynamic_routes() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users/{uid}", Method::GET, "user").unwrap();
        trie.insert("/v1/users/static", Method::GET, "static user").unwrap();
        trie.insert("/v1/users/{uid}/profiles", Method::GET, "profiles").unwrap();
        trie.insert("/v1/users/{uid}/profiles/{pid}", Method::GET, "profile").unwrap();
        trie.insert("/v1/users/static/profiles/{pid}", Method::GET, "static profile").unwrap();

        let get = Method::GET;
        assert_route(&trie, "/v1/users/1", &get, "user", &vars(&[("uid", "1")]));
        assert_route(&trie, "/v1/users/1234", &get, "user", &vars(&[("uid", "1234")]));
        assert_route(&trie, "/v1/users/abc", &get, "user", &vars(&[("uid", "abc")]));
        assert_route(&trie, "/v1/users/static", &get, "static user", &Vars::new());

        assert_route(&trie, "/v1/users/1/profiles", &get, "profiles", &vars(&[("uid", "1")]));
        assert_route(&trie, "/v1/users/abc/profiles", &get, "profiles", &vars(&[("uid", "abc")]));

        assert_route(
            &trie,
            "/v1/users/1234/profiles/2",
            &get,
            "profile",
            &vars(&[("uid", "1234"), ("pid", "2")]),
        );
        assert_route(
            &trie,
            "/v1/users/static/profiles/3",
            &get,
            "static profile",
            &vars(&[("pid", "3")]),
        );
    }

    #[test]
    fn test_variable_capture_order() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users/{uid}/profiles/{pid}", Method::GET, "profile").unwrap();

        let (_, got) = trie.lookup("/v1/users/42/profiles/7", &Method::GET).unwrap();
        let got: Vec<_> = got.iter().map(|v| (v.name.as_str(), v.value.as_str())).collect();
        assert_eq!(got, vec![("uid", "42"), ("pid", "7")]);
    }

    #[test]
    fn test_duplicate_route_conflict() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users", Method::GET, "first").unwrap();

        let err = trie.insert("/v1/users", Method::GET, "second").unwrap_err();
        assert_eq!(
            err,
            ConflictError::DuplicateRoute {
                method: Method::GET,
                path: "/v1/users".to_string(),
            }
        );
        assert_eq!(trie.len(), 1);

        // Trailing slash normalizes to the same node
        assert!(trie.insert("/v1/users/", Method::GET, "third").is_err());

        let (value, _) = trie.lookup("/v1/users", &Method::GET).unwrap();
        assert_eq!(*value, "first");
    }

    #[test]
    fn test_variable_name_conflict() {
        let mut trie = RoutingTrie::new();
        trie.insert("/users/{uid}", Method::GET, "uid").unwrap();

        let err = trie.insert("/users/{id}", Method::POST, "id").unwrap_err();
        assert_eq!(
            err,
            ConflictError::VariableConflict {
                path: "/users/{id}".to_string(),
                existing: "uid".to_string(),
                requested: "id".to_string(),
            }
        );

        // Same name at the same position is fine
        trie.insert("/users/{uid}", Method::POST, "uid post").unwrap();
        trie.insert("/users/{uid}/posts", Method::GET, "posts").unwrap();
    }

    #[test]
    fn test_literal_precedence_without_backtracking() {
        let mut trie = RoutingTrie::new();
        trie.insert("/a/x/c", Method::GET, "literal").unwrap();
        trie.insert("/a/{id}/d", Method::GET, "dynamic").unwrap();

        assert!(trie.lookup("/a/x/d", &Method::GET).is_err());
        assert_route(&trie, "/a/x/c", &Method::GET, "literal", &Vars::new());
        assert_route(&trie, "/a/y/d", &Method::GET, "dynamic", &vars(&[("id", "y")]));
    }

    #[test]
    fn test_method_mismatch() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users", Method::GET, "get").unwrap();

        let err = trie.lookup("/v1/users", &Method::POST).unwrap_err();
        assert_eq!(
            err,
            NotFoundError {
                method: Method::POST,
                path: "/v1/users".to_string(),
            }
        );
    }

    #[test]
    fn test_static_wins_over_dynamic() {
        let mut trie = RoutingTrie::new();
        trie.insert("/users/{uid}", Method::GET, "dynamic").unwrap();
        trie.insert("/users/static", Method::GET, "static").unwrap();

        assert_route(&trie, "/users/static", &Method::GET, "static", &Vars::new());
        assert_route(&trie, "/users/other", &Method::GET, "dynamic", &vars(&[("uid", "other")]));
    }

    #[test]
    fn test_root_path() {
        let mut trie = RoutingTrie::new();
        trie.insert("/", Method::GET, "root").unwrap();

        assert_eq!(trie.root.child("").kind, NodeKind::Literal);
        assert_route(&trie, "/", &Method::GET, "root", &Vars::new());
        assert_route(&trie, "", &Method::GET, "root", &Vars::new());
        assert!(trie.lookup("/other", &Method::GET).is_err());
    }

    #[test]
    fn test_intermediate_node_without_handler() {
        let mut trie = RoutingTrie::new();
        trie.insert("/v1/users/profiles", Method::GET, "profiles").unwrap();

        assert!(trie.lookup("/v1/users", &Method::GET).is_err());
        assert!(trie.lookup("/v1/users/profiles/extra", &Method::GET).is_err());
    }

    #[test]
    fn test_segments_are_case_sensitive() {
        let mut trie = RoutingTrie::new();
        trie.insert("/Users", Method::GET, "upper").unwrap();

        assert!(trie.lookup("/users", &Method::GET).is_err());
        assert_route(&trie, "/Users/", &Method::GET, "upper", &Vars::new());
    }

    #[test]
    fn test_invalid_placeholder_is_literal() {
        let mut trie = RoutingTrie::new();
        trie.insert("/files/{file_id}", Method::GET, "literal").unwrap();

        assert!(trie.root.child("files").dynamic.is_none());
        assert!(trie.lookup("/files/readme", &Method::GET).is_err());
        assert_route(&trie, "/files/{file_id}", &Method::GET, "literal", &Vars::new());
    }
}
