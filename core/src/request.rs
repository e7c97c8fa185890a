//! Request construction for API method calls.
//!
//! # Design
//! A [`Request`] is an immutable descriptor: method name, access token and a
//! parameter map. It knows nothing about HTTP; the transport layer turns it
//! into a URL. Parameters are stringified once, at build time, using the
//! API's scalar conventions (base-10 integers, `"1"`/`"0"` booleans).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Scalar value convertible to the API's query-string form.
///
/// `is_zero` marks the value the "omit when empty" rule drops: `0` for
/// integers, `false` for booleans, `""` for strings.
pub trait ParamValue {
    fn to_param(&self) -> String;
    fn is_zero(&self) -> bool;
}

macro_rules! impl_param_value_int {
    ($($t:ty),*) => {
        $(impl ParamValue for $t {
            fn to_param(&self) -> String {
                self.to_string()
            }
            fn is_zero(&self) -> bool {
                *self == 0
            }
        })*
    };
}

impl_param_value_int!(i32, i64, u32, u64);

impl ParamValue for bool {
    fn to_param(&self) -> String {
        if *self { "1" } else { "0" }.to_string()
    }
    fn is_zero(&self) -> bool {
        !*self
    }
}

impl ParamValue for &str {
    fn to_param(&self) -> String {
        (*self).to_string()
    }
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ParamValue for String {
    fn to_param(&self) -> String {
        self.clone()
    }
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

/// Ordered string→string parameter map with unique keys.
///
/// Keys iterate in sorted order, which keeps every derived artifact (URLs,
/// serialized requests) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter unconditionally. A repeated key overwrites the
    /// previous value; the map never holds duplicates.
    pub fn put<V: ParamValue>(&mut self, key: &str, value: V) {
        self.0.insert(key.to_string(), value.to_param());
    }

    /// Insert a parameter unless it holds its zero value ("omit when empty").
    pub fn put_nonzero<V: ParamValue>(&mut self, key: &str, value: V) {
        if !value.is_zero() {
            self.put(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Key/value pairs in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Typed argument bag for a method call.
///
/// Per-method argument structs implement this instead of going through
/// reflection; an unsupported field type simply has no [`ParamValue`] impl
/// and fails to compile.
pub trait QueryParams {
    fn params(&self) -> Params;
}

impl QueryParams for Params {
    fn params(&self) -> Params {
        self.clone()
    }
}

/// No arguments.
impl QueryParams for () {
    fn params(&self) -> Params {
        Params::new()
    }
}

/// Transport-neutral descriptor of one API call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub token: String,
    #[serde(default)]
    pub params: Params,
}

impl Request {
    /// Render the call in the server-side script form, `API.method({...})`,
    /// for embedding into batch ("execute") code.
    pub fn script(&self) -> String {
        let args =
            serde_json::to_string(&self.params).unwrap_or_else(|_| "{}".to_string());
        format!("API.{}({})", self.method, args)
    }
}

/// Stamps requests with a fixed access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFactory {
    token: String,
}

impl RequestFactory {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    /// Factory producing unauthenticated requests.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Build a request for `method` from a typed argument bag.
    pub fn request<Q: QueryParams>(&self, method: &str, args: &Q) -> Request {
        Request {
            method: method.to_string(),
            token: self.token.clone(),
            params: args.params(),
        }
    }
}
