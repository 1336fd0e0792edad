//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde_json::Value;

use na_api::{ApiVersion, NaError, NaResult, NodeDriver, RawResponse, Transport};

/// One request seen by the mock transport.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub method: Method,
    pub url: Url,
    pub body: Option<Value>,
}

impl RecordedCall {
    /// Path of the request URL.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// First decoded query value for `name`.
    pub fn query(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

/// Transport that replays queued responses and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, &body.to_string());
    }

    /// Queue a raw body.
    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(RawResponse::new(status, body));
    }

    /// Queue a successful v2 envelope around `data`.
    pub fn push_success(&self, data: Value) {
        self.push_json(200, serde_json::json!({"result": "success", "data": data}));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> RecordedCall {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, method: Method, url: Url, body: Option<&Value>) -> NaResult<RawResponse> {
        self.calls.lock().unwrap().push(RecordedCall {
            method,
            url,
            body: body.cloned(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| NaError::Http("no mock response queued".into()))
    }
}

/// Driver for `version` over the mock, keyed "test-key".
pub fn driver(version: ApiVersion, mock: &Arc<MockTransport>) -> NodeDriver {
    NodeDriver::with_transport("test-key", version, None, mock.clone())
        .expect("failed to build test driver")
}

pub fn v1_driver(mock: &Arc<MockTransport>) -> NodeDriver {
    driver(ApiVersion::V1, mock)
}

pub fn v2_driver(mock: &Arc<MockTransport>) -> NodeDriver {
    driver(ApiVersion::V2, mock)
}
