//! Captured path variables
//!
//! A request's variables are an ordered sequence, shallowest segment first. The router
//! stores them in the request's extensions before invoking the handler, so they live
//! exactly as long as that one request.

use hyper::Request;
use serde::Serialize;

static EMPTY: Vars = Vars(Vec::new());

/// One `{name}` segment bound to the concrete text it matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteVariable {
    pub name: String,
    pub value: String,
}

impl RouteVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Variables captured while matching one request path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vars(Vec<RouteVariable>);

impl Vars {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, var: RouteVariable) {
        self.0.push(var);
    }

    /// Value of the first variable called `name`.
    ///
    /// Names repeat only if two depths of one route declare the same name; the
    /// shallower one wins.
    pub fn by_name(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteVariable> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<RouteVariable> {
        self.0
    }
}

impl From<Vec<RouteVariable>> for Vars {
    fn from(vars: Vec<RouteVariable>) -> Self {
        Self(vars)
    }
}

impl<'a> IntoIterator for &'a Vars {
    type Item = &'a RouteVariable;
    type IntoIter = std::slice::Iter<'a, RouteVariable>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Variables the router captured for this request.
///
/// Empty when the request did not go through `Router::serve`.
pub fn vars<B>(req: &Request<B>) -> &Vars {
    req.extensions().get::<Vars>().unwrap_or(&EMPTY)
}

/// Value of a single captured variable for this request
pub fn var<'a, B>(req: &'a Request<B>, name: &str) -> Option<&'a str> {
    vars(req).by_name(name)
}
