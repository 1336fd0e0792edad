//! Request descriptions handed from the driver to the connection.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use na_core::error::{NaError, NaResult};

/// Request parameters: query pairs for GET, the JSON body for POST.
pub type Params = serde_json::Map<String, Value>;

/// One API call: method, endpoint path relative to the API root, and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Params,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            params: Params::new(),
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            params: Params::new(),
        }
    }

    /// Add (or replace) a single parameter.
    pub fn param(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    /// Merge a parameter map; later values win.
    pub fn params(mut self, params: Params) -> Self {
        self.params.extend(params);
        self
    }

    /// The path with a guaranteed leading slash.
    pub fn normalized_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }

    /// Whether parameters travel in the query string.
    pub fn uses_query(&self) -> bool {
        self.method == Method::GET
    }
}

/// Serialize a typed parameter struct into a parameter map.
pub fn to_params<T: Serialize>(value: &T) -> NaResult<Params> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(NaError::InvalidRequest(format!(
            "parameters must serialize to an object, got {other}"
        ))),
    }
}

/// Render a parameter value for a query string. Nulls are omitted.
pub(crate) fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(if *b { "1" } else { "0" }.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
