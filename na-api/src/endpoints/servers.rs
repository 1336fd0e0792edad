//! Server lifecycle endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use na_core::error::NaResult;

use crate::driver::NodeDriver;
use crate::request::{self, ApiRequest, Params};

/// Body of a build or buy_build request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqdn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mbpkgid: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// Additional fields sent as-is.
    #[serde(flatten)]
    pub extra: Params,
}

impl BuildParams {
    /// Parameters for building `image` at `location`.
    pub fn new(
        location: impl Into<String>,
        image: impl Into<String>,
        fqdn: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            fqdn: Some(fqdn.into()),
            image: Some(image.into()),
            location: Some(location.into()),
            password: Some(password.into()),
            ..Default::default()
        }
    }

    pub fn with_mbpkgid(mut self, mbpkgid: u64) -> Self {
        self.mbpkgid = Some(mbpkgid);
        self
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = Some(plan.into());
        self
    }

    /// The package to rebuild onto; a zero id counts as none.
    pub fn rebuild_target(&self) -> Option<u64> {
        self.mbpkgid.filter(|id| *id != 0)
    }
}

impl NodeDriver {
    /// Retrieve details for one server, or all servers.
    pub async fn servers(&self, mbpkgid: Option<u64>) -> NaResult<Value> {
        let path = match mbpkgid {
            Some(id) => format!("/cloud/server/{id}"),
            None => "/cloud/servers/".to_string(),
        };
        self.call(ApiRequest::get(path)).await
    }

    /// Retrieve the IPv4 assignment of a server.
    pub async fn ipv4(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::get(format!("/cloud/ipv4/{mbpkgid}"))).await
    }

    /// Retrieve the IPv6 assignment of a server.
    pub async fn ipv6(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::get(format!("/cloud/ipv6/{mbpkgid}"))).await
    }

    /// Retrieve all IP assignments of a server.
    pub async fn networkips(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::get(format!("/cloud/networkips/{mbpkgid}")))
            .await
    }

    /// Retrieve the summary overview of a server.
    pub async fn summary(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::get(format!("/cloud/serversummary/{mbpkgid}")))
            .await
    }

    /// Check the status of a server.
    pub async fn status(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::get(format!("/cloud/status/{mbpkgid}"))).await
    }

    /// Retrieve the monthly bandwidth report of a server.
    pub async fn bandwidth_report(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::get(format!("/cloud/servermonthlybw/{mbpkgid}")))
            .await
    }

    /// Start an offline server.
    pub async fn start(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::post(format!("/cloud/server/start/{mbpkgid}")))
            .await
    }

    /// Shut a server down, or kill it when `force` is set.
    pub async fn shutdown(&self, mbpkgid: u64, force: bool) -> NaResult<Value> {
        let mut req = ApiRequest::post(format!("/cloud/server/shutdown/{mbpkgid}"));
        if force {
            req = req.param("force", 1);
        }
        self.call(req).await
    }

    /// Reboot a server.
    pub async fn reboot(&self, mbpkgid: u64, force: bool) -> NaResult<Value> {
        let mut req = ApiRequest::post(format!("/cloud/server/reboot/{mbpkgid}"));
        if force {
            req = req.param("force", 1);
        }
        self.call(req).await
    }

    /// Boot a server into rescue mode with the given root password.
    pub async fn rescue(&self, mbpkgid: u64, password: &str) -> NaResult<Value> {
        let req = ApiRequest::post(format!("/cloud/server/start_rescue/{mbpkgid}"))
            .param("rescue_pass", password);
        self.call(req).await
    }

    /// Leave rescue mode.
    pub async fn rescue_stop(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::post(format!("/cloud/server/stop_rescue/{mbpkgid}")))
            .await
    }

    /// Build a new VM onto an existing package.
    pub async fn build(&self, params: &BuildParams) -> NaResult<Value> {
        let req = self
            .dialect()
            .build(params.mbpkgid)?
            .params(request::to_params(params)?);
        self.call(req).await
    }

    /// Delete a server. Extra parameters (e.g. `cancel_billing`) are sent
    /// together with the `mbpkgid`.
    pub async fn delete(&self, mbpkgid: u64, extra: Option<Params>) -> NaResult<Value> {
        let mut req = ApiRequest::post(format!("/cloud/server/delete/{mbpkgid}"));
        if let Some(extra) = extra {
            req = req.params(extra).param("mbpkgid", mbpkgid);
        }
        self.call(req).await
    }

    /// Release the location and IP allocation of a server.
    pub async fn unlink(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(ApiRequest::post(format!("/cloud/server/unlink/{mbpkgid}")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_params_serialize_skips_unset() {
        let params = BuildParams::new("3", "ubuntu-22.04", "web1.example.com", "pw")
            .with_mbpkgid(42);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["location"], "3");
        assert_eq!(json["mbpkgid"], 42);
        assert!(json.get("plan").is_none());
    }

    #[test]
    fn test_build_params_extra_flattened() {
        let mut params = BuildParams::default();
        params.extra.insert("ssh_key_id".into(), serde_json::json!(12));
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"ssh_key_id": 12}));
    }

    #[test]
    fn test_rebuild_target_ignores_zero() {
        assert_eq!(BuildParams::default().rebuild_target(), None);
        assert_eq!(BuildParams::default().with_mbpkgid(0).rebuild_target(), None);
        assert_eq!(BuildParams::default().with_mbpkgid(5).rebuild_target(), Some(5));
    }
}
