//! API dialects.
//!
//! Each API generation differs in host, root path, envelope shape, and the
//! routes of a handful of endpoints. All of that lives behind [`Dialect`],
//! resolved once from [`ApiVersion`] when a connection is built.

use serde_json::Value;

use na_core::config::ApiVersion;
use na_core::constants;
use na_core::error::{NaError, NaResult};

use crate::request::{ApiRequest, Params};
use crate::response;
use crate::transport::RawResponse;

/// Per-generation behaviour of the API.
pub trait Dialect: Send + Sync {
    fn version(&self) -> ApiVersion;

    /// Host used when no override is configured.
    fn default_host(&self) -> &'static str;

    /// Path prefix between the host and every endpoint path.
    fn root(&self) -> &'static str;

    /// Turn a raw response into the call's result or an error.
    fn normalize(&self, response: RawResponse) -> NaResult<Value>;

    /// Reshape the locations payload into a list.
    fn locations(&self, data: Value) -> NaResult<Value>;

    /// Reshape the plans payload.
    fn plans(&self, data: Value) -> NaResult<Value>;

    /// Route for building onto an existing package.
    fn build(&self, mbpkgid: Option<u64>) -> NaResult<ApiRequest>;

    /// Route for buying and building a new server.
    fn buy_build(&self) -> ApiRequest;

    /// Whether buy_build with a package id is a rebuild through `build`.
    fn rebuilds_through_build(&self) -> bool;

    fn cancel(&self, mbpkgid: u64) -> ApiRequest;

    fn buy(&self, plan: &str) -> NaResult<ApiRequest>;

    fn job(&self, mbpkgid: u64, job_id: u64) -> ApiRequest;

    fn jobs(&self, mbpkgid: u64) -> ApiRequest;

    /// Path prefix of the BGP endpoints.
    fn bgp_prefix(&self) -> &'static str;

    fn bgp_sessions(&self, session_id: Option<u64>) -> ApiRequest;

    fn bgp_create_sessions(&self, mbpkgid: u64, params: Params) -> ApiRequest;

    /// Reshape the session-creation result.
    fn created_sessions(&self, data: Value) -> NaResult<Value>;

    fn bgp_buy_prefixes(&self) -> NaResult<ApiRequest>;
}

/// Resolve the dialect for an API version.
pub fn for_version(version: ApiVersion) -> &'static dyn Dialect {
    match version {
        ApiVersion::V1 => &V1,
        ApiVersion::V2 => &V2,
    }
}

/// The first API generation: bare JSON bodies, `/cloud` routes throughout.
#[derive(Debug, Clone, Copy)]
pub struct V1;

/// The current API: enveloped bodies under `/api`, BGP under `/bgp`.
#[derive(Debug, Clone, Copy)]
pub struct V2;

impl Dialect for V1 {
    fn version(&self) -> ApiVersion {
        ApiVersion::V1
    }

    fn default_host(&self) -> &'static str {
        constants::V1_HOST
    }

    fn root(&self) -> &'static str {
        constants::V1_ROOT
    }

    fn normalize(&self, response: RawResponse) -> NaResult<Value> {
        if !response.is_success() {
            return Err(response.into_server_error());
        }
        Ok(response::parse_body(&response.body))
    }

    fn locations(&self, data: Value) -> NaResult<Value> {
        response::locations_with_country(data)
    }

    fn plans(&self, data: Value) -> NaResult<Value> {
        Ok(data)
    }

    fn build(&self, _mbpkgid: Option<u64>) -> NaResult<ApiRequest> {
        // The package id travels in the body only.
        Ok(ApiRequest::post("/cloud/server/build/"))
    }

    fn buy_build(&self) -> ApiRequest {
        ApiRequest::post("/cloud/buy_build/")
    }

    fn rebuilds_through_build(&self) -> bool {
        false
    }

    fn cancel(&self, mbpkgid: u64) -> ApiRequest {
        ApiRequest::post(format!("/cloud/cancel/{mbpkgid}"))
    }

    fn buy(&self, plan: &str) -> NaResult<ApiRequest> {
        Ok(ApiRequest::get(format!("/cloud/buy/{plan}")))
    }

    fn job(&self, mbpkgid: u64, job_id: u64) -> ApiRequest {
        ApiRequest::get("/cloud/serverjob/")
            .param("job_id", job_id)
            .param("mbpkgid", mbpkgid)
    }

    fn jobs(&self, mbpkgid: u64) -> ApiRequest {
        ApiRequest::get("/cloud/serverjobs/").param("mbpkgid", mbpkgid)
    }

    fn bgp_prefix(&self) -> &'static str {
        "/cloud"
    }

    fn bgp_sessions(&self, session_id: Option<u64>) -> ApiRequest {
        match session_id {
            Some(id) => ApiRequest::get(format!("/cloud/bgpsession2/{id}")),
            None => ApiRequest::get("/cloud/bgpsessions2"),
        }
    }

    fn bgp_create_sessions(&self, mbpkgid: u64, params: Params) -> ApiRequest {
        ApiRequest::post(format!("/cloud/bgpcreatesessions/{mbpkgid}")).params(params)
    }

    fn created_sessions(&self, data: Value) -> NaResult<Value> {
        Ok(data)
    }

    fn bgp_buy_prefixes(&self) -> NaResult<ApiRequest> {
        Err(NaError::NotImplemented(
            "bgp_buy_prefixes is not available in api v1".into(),
        ))
    }
}

impl Dialect for V2 {
    fn version(&self) -> ApiVersion {
        ApiVersion::V2
    }

    fn default_host(&self) -> &'static str {
        constants::V2_HOST
    }

    fn root(&self) -> &'static str {
        constants::V2_ROOT
    }

    fn normalize(&self, response: RawResponse) -> NaResult<Value> {
        let body = serde_json::from_str::<Value>(&response.body)
            .ok()
            .filter(response::is_envelope);

        match body {
            // An error envelope explains a failed status better than the bare code.
            Some(body) if response.is_success() || !response::is_success_envelope(&body) => {
                response::unwrap_envelope(body)
            }
            _ if !response.is_success() => Err(response.into_server_error()),
            _ => Err(NaError::Serialization(format!(
                "response is not an api envelope: {}",
                truncate(&response.body, 200)
            ))),
        }
    }

    fn locations(&self, data: Value) -> NaResult<Value> {
        Ok(Value::Array(response::keyed_to_list(data)?))
    }

    fn plans(&self, data: Value) -> NaResult<Value> {
        Ok(Value::Array(response::keyed_to_list(data)?))
    }

    fn build(&self, mbpkgid: Option<u64>) -> NaResult<ApiRequest> {
        let mbpkgid = mbpkgid.ok_or_else(|| {
            NaError::InvalidRequest("build requires an mbpkgid in api v2".into())
        })?;
        Ok(ApiRequest::post(format!("/cloud/server/build/{mbpkgid}")))
    }

    fn buy_build(&self) -> ApiRequest {
        ApiRequest::post("/cloud/server/buy_build")
    }

    fn rebuilds_through_build(&self) -> bool {
        true
    }

    fn cancel(&self, mbpkgid: u64) -> ApiRequest {
        ApiRequest::post("/cloud/package/cancel")
            .param("mbpkgid", mbpkgid)
            .param("cancel_type", "Immediate")
            .param("agree", 1)
    }

    fn buy(&self, _plan: &str) -> NaResult<ApiRequest> {
        Err(NaError::NotImplemented("buy is deprecated in api v2".into()))
    }

    fn job(&self, mbpkgid: u64, job_id: u64) -> ApiRequest {
        ApiRequest::get(format!("/cloud/server/{mbpkgid}/jobs/{job_id}"))
    }

    fn jobs(&self, mbpkgid: u64) -> ApiRequest {
        ApiRequest::get(format!("/cloud/server/{mbpkgid}/jobs"))
    }

    fn bgp_prefix(&self) -> &'static str {
        "/bgp"
    }

    fn bgp_sessions(&self, session_id: Option<u64>) -> ApiRequest {
        match session_id {
            Some(id) => ApiRequest::get(format!("/bgp/bgpsession/{id}")),
            None => ApiRequest::get("/bgp/bgpsessions"),
        }
    }

    fn bgp_create_sessions(&self, mbpkgid: u64, params: Params) -> ApiRequest {
        ApiRequest::post("/bgp/bgpcreatesessions")
            .params(params)
            .param("mbpkgid", mbpkgid)
    }

    fn created_sessions(&self, data: Value) -> NaResult<Value> {
        response::rename_created_sessions(data)
    }

    fn bgp_buy_prefixes(&self) -> NaResult<ApiRequest> {
        Ok(ApiRequest::post("/bgp/bgpbuyprefixes"))
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
