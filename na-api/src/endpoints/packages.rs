//! Billing package endpoints: package details, purchase, and cancellation.

use serde_json::Value;
use tracing::debug;

use na_core::error::NaResult;

use crate::driver::NodeDriver;
use crate::endpoints::servers::BuildParams;
use crate::request::{self, ApiRequest};

impl NodeDriver {
    /// Retrieve details for one package, or all packages.
    pub async fn packages(&self, mbpkgid: Option<u64>) -> NaResult<Value> {
        let path = match mbpkgid {
            Some(id) => format!("/cloud/package/{id}"),
            None => "/cloud/packages".to_string(),
        };
        self.call(ApiRequest::get(path)).await
    }

    /// Cancel a service immediately.
    pub async fn cancel(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(self.dialect().cancel(mbpkgid)).await
    }

    /// Acquire a new VM package for `plan`.
    ///
    /// Deprecated; only api v1 serves it.
    pub async fn buy(&self, plan: &str) -> NaResult<Value> {
        let req = self.dialect().buy(plan)?;
        self.call(req).await
    }

    /// Acquire and build a new VM.
    ///
    /// On api v2 a non-zero `mbpkgid` means a rebuild, which goes through
    /// [`NodeDriver::build`] instead.
    pub async fn buy_build(&self, params: &BuildParams) -> NaResult<Value> {
        if self.dialect().rebuilds_through_build() {
            if let Some(mbpkgid) = params.rebuild_target() {
                debug!("buy_build for existing package {mbpkgid}, rebuilding");
                return self.build(params).await;
            }
        }

        let req = self.dialect().buy_build().params(request::to_params(params)?);
        self.call(req).await
    }
}
