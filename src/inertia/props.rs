//! Page props.
//!
//! # Responsibilities
//! - Represent prop values, including deferred computations
//! - Merge request-scoped common props under explicit ones
//! - Project props down to a partial-reload key set
//! - Resolve deferred values into plain JSON
//!
//! # Design Decisions
//! - `Deferred` is `FnOnce`: a computation can run at most once
//! - Projection happens before resolution, so dropped deferred props never run
//! - Insertion order is kept so the encoded page is deterministic

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

type DeferredFn = Box<dyn FnOnce() -> Result<Value, serde_json::Error> + Send>;

/// A single prop value.
pub enum Prop {
    /// Concrete JSON value.
    Value(Value),
    /// Nested mapping that may itself contain deferred values.
    Map(Props),
    /// Nested sequence that may itself contain deferred values.
    List(Vec<Prop>),
    /// Computed on demand, only when the prop is actually sent.
    Deferred(DeferredFn),
}

impl Prop {
    /// Build a prop from any serializable value.
    pub fn serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Prop::Value)
    }

    /// Build a deferred prop. The closure runs only if the prop survives
    /// partial-reload filtering.
    pub fn deferred<F, T>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
        T: Serialize,
    {
        Prop::Deferred(Box::new(move || serde_json::to_value(f())))
    }

    /// Resolve into plain JSON, evaluating deferred values depth-first.
    pub fn resolve(self) -> Result<Value, serde_json::Error> {
        match self {
            Prop::Value(value) => Ok(value),
            Prop::Map(props) => props.resolve().map(Value::Object),
            Prop::List(items) => items
                .into_iter()
                .map(Prop::resolve)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Prop::Deferred(f) => f(),
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Prop::Map(m) => f.debug_tuple("Map").field(m).finish(),
            Prop::List(l) => f.debug_tuple("List").field(l).finish(),
            Prop::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Value(value)
    }
}

impl From<Props> for Prop {
    fn from(props: Props) -> Self {
        Prop::Map(props)
    }
}

impl From<Vec<Prop>> for Prop {
    fn from(items: Vec<Prop>) -> Self {
        Prop::List(items)
    }
}

impl From<&str> for Prop {
    fn from(s: &str) -> Self {
        Prop::Value(Value::String(s.to_string()))
    }
}

impl From<String> for Prop {
    fn from(s: String) -> Self {
        Prop::Value(Value::String(s))
    }
}

impl From<bool> for Prop {
    fn from(b: bool) -> Self {
        Prop::Value(Value::Bool(b))
    }
}

impl From<i64> for Prop {
    fn from(n: i64) -> Self {
        Prop::Value(Value::from(n))
    }
}

impl From<f64> for Prop {
    fn from(n: f64) -> Self {
        Prop::Value(Value::from(n))
    }
}

/// Ordered mapping from prop key to value. Keys are unique.
#[derive(Debug, Default)]
pub struct Props {
    entries: Vec<(String, Prop)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a prop, keeping the key's original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, prop: impl Into<Prop>) {
        let key = key.into();
        let prop = prop.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = prop,
            None => self.entries.push((key, prop)),
        }
    }

    /// Builder-style `insert`.
    pub fn with(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.insert(key, prop);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Union with `common`. Keys already present in `self` win.
    pub fn merge_common(&mut self, common: Props) {
        for (key, prop) in common.entries {
            if !self.contains_key(&key) {
                self.entries.push((key, prop));
            }
        }
    }

    /// Keep only keys in `only`. Unknown keys in `only` are ignored.
    pub fn retain_keys(&mut self, only: &HashSet<String>) {
        self.entries.retain(|(k, _)| only.contains(k));
    }

    /// Resolve every prop into plain JSON.
    pub fn resolve(self) -> Result<Map<String, Value>, serde_json::Error> {
        let mut out = Map::new();
        for (key, prop) in self.entries {
            out.insert(key, prop.resolve()?);
        }
        Ok(out)
    }
}

impl<K: Into<String>, P: Into<Prop>> FromIterator<(K, P)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut props = Props::new();
        for (k, p) in iter {
            props.insert(k, p);
        }
        props
    }
}

/// Props shared by every page rendered for a request.
///
/// Upstream middleware stores this in the request extensions; the renderer
/// merges it under the handler's own props. Deferred values are not `Clone`,
/// so shared props are produced per request by a factory.
#[derive(Clone)]
pub struct CommonProps {
    factory: std::sync::Arc<dyn Fn() -> Props + Send + Sync>,
}

impl CommonProps {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Props + Send + Sync + 'static,
    {
        Self {
            factory: std::sync::Arc::new(factory),
        }
    }

    /// Fresh copy of the shared props.
    pub fn props(&self) -> Props {
        (self.factory)()
    }
}

impl fmt::Debug for CommonProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommonProps").finish_non_exhaustive()
    }
}
