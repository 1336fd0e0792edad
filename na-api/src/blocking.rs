//! Blocking facade over [`NodeDriver`].
//!
//! Each call drives the async operation to completion on a private
//! current-thread runtime. Do not call these methods from inside an async
//! context; use [`NodeDriver`] there instead.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use na_core::config::{ApiConfig, ApiVersion};
use na_core::error::NaResult;

use crate::driver::NodeDriver;
use crate::endpoints::bgp::PrefixOrder;
use crate::endpoints::catalog::Location;
use crate::endpoints::servers::BuildParams;
use crate::job::{Job, JobStatus};
use crate::request::Params;

/// Synchronous API wrapper with the same operations as [`NodeDriver`].
#[derive(Clone)]
pub struct BlockingNodeDriver {
    inner: NodeDriver,
    runtime: Arc<Runtime>,
}

impl BlockingNodeDriver {
    /// Create a driver for the v2 API on its default host.
    pub fn new(key: impl Into<String>) -> NaResult<Self> {
        Self::from_driver(NodeDriver::new(key)?)
    }

    /// Create a driver for a specific API version and optional host override.
    pub fn with_version(
        key: impl Into<String>,
        version: ApiVersion,
        host: Option<&str>,
    ) -> NaResult<Self> {
        Self::from_driver(NodeDriver::with_version(key, version, host)?)
    }

    /// Create a driver from configuration.
    pub fn from_config(config: &ApiConfig) -> NaResult<Self> {
        Self::from_driver(NodeDriver::from_config(config)?)
    }

    /// Wrap an existing async driver.
    pub fn from_driver(inner: NodeDriver) -> NaResult<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner,
            runtime: Arc::new(runtime),
        })
    }

    /// The wrapped async driver.
    pub fn driver(&self) -> &NodeDriver {
        &self.inner
    }

    pub fn version(&self) -> ApiVersion {
        self.inner.version()
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    // --- Catalog ---

    pub fn locations(&self) -> NaResult<Vec<Location>> {
        self.block_on(self.inner.locations())
    }

    pub fn os_list(&self) -> NaResult<Value> {
        self.block_on(self.inner.os_list())
    }

    pub fn plans(&self, location: Option<&str>) -> NaResult<Value> {
        self.block_on(self.inner.plans(location))
    }

    // --- Servers ---

    pub fn servers(&self, mbpkgid: Option<u64>) -> NaResult<Value> {
        self.block_on(self.inner.servers(mbpkgid))
    }

    pub fn ipv4(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.ipv4(mbpkgid))
    }

    pub fn ipv6(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.ipv6(mbpkgid))
    }

    pub fn networkips(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.networkips(mbpkgid))
    }

    pub fn summary(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.summary(mbpkgid))
    }

    pub fn status(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.status(mbpkgid))
    }

    pub fn bandwidth_report(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.bandwidth_report(mbpkgid))
    }

    pub fn start(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.start(mbpkgid))
    }

    pub fn shutdown(&self, mbpkgid: u64, force: bool) -> NaResult<Value> {
        self.block_on(self.inner.shutdown(mbpkgid, force))
    }

    pub fn reboot(&self, mbpkgid: u64, force: bool) -> NaResult<Value> {
        self.block_on(self.inner.reboot(mbpkgid, force))
    }

    pub fn rescue(&self, mbpkgid: u64, password: &str) -> NaResult<Value> {
        self.block_on(self.inner.rescue(mbpkgid, password))
    }

    pub fn rescue_stop(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.rescue_stop(mbpkgid))
    }

    pub fn build(&self, params: &BuildParams) -> NaResult<Value> {
        self.block_on(self.inner.build(params))
    }

    pub fn delete(&self, mbpkgid: u64, extra: Option<Params>) -> NaResult<Value> {
        self.block_on(self.inner.delete(mbpkgid, extra))
    }

    pub fn unlink(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.unlink(mbpkgid))
    }

    // --- Packages ---

    pub fn packages(&self, mbpkgid: Option<u64>) -> NaResult<Value> {
        self.block_on(self.inner.packages(mbpkgid))
    }

    pub fn cancel(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.cancel(mbpkgid))
    }

    pub fn buy(&self, plan: &str) -> NaResult<Value> {
        self.block_on(self.inner.buy(plan))
    }

    pub fn buy_build(&self, params: &BuildParams) -> NaResult<Value> {
        self.block_on(self.inner.buy_build(params))
    }

    // --- Jobs ---

    pub fn get_job(&self, mbpkgid: u64, job_id: u64) -> NaResult<Value> {
        self.block_on(self.inner.get_job(mbpkgid, job_id))
    }

    pub fn get_jobs(&self, mbpkgid: u64) -> NaResult<Value> {
        self.block_on(self.inner.get_jobs(mbpkgid))
    }

    pub fn job_status(&self, mbpkgid: u64, job_result: &Value) -> BlockingJobStatus {
        BlockingJobStatus {
            inner: self.inner.job_status(mbpkgid, job_result),
            runtime: Arc::clone(&self.runtime),
        }
    }

    // --- BGP ---

    pub fn bgp_sessions(&self, session_id: Option<u64>) -> NaResult<Value> {
        self.block_on(self.inner.bgp_sessions(session_id))
    }

    pub fn bgp_summary(&self) -> NaResult<Value> {
        self.block_on(self.inner.bgp_summary())
    }

    pub fn bgp_groups(&self, group_id: Option<u64>) -> NaResult<Value> {
        self.block_on(self.inner.bgp_groups(group_id))
    }

    pub fn bgp_asns(&self) -> NaResult<Value> {
        self.block_on(self.inner.bgp_asns())
    }

    pub fn bgp_create_sessions(
        &self,
        mbpkgid: u64,
        group_id: u64,
        ipv6: bool,
        redundant: bool,
    ) -> NaResult<Value> {
        self.block_on(
            self.inner
                .bgp_create_sessions(mbpkgid, group_id, ipv6, redundant),
        )
    }

    pub fn bgp_buy_prefixes(&self, order: &PrefixOrder) -> NaResult<Value> {
        self.block_on(self.inner.bgp_buy_prefixes(order))
    }
}

/// Blocking counterpart of [`JobStatus`].
pub struct BlockingJobStatus {
    inner: JobStatus,
    runtime: Arc<Runtime>,
}

impl BlockingJobStatus {
    pub fn node_id(&self) -> u64 {
        self.inner.node_id()
    }

    pub fn is_fetched(&self) -> bool {
        self.inner.is_fetched()
    }

    pub fn refresh(&mut self) -> NaResult<()> {
        self.runtime.block_on(self.inner.refresh())
    }

    pub fn job(&mut self) -> NaResult<Job> {
        let inner = &mut self.inner;
        self.runtime.block_on(async move { inner.job().await.cloned() })
    }

    pub fn status(&mut self) -> NaResult<i64> {
        self.runtime.block_on(self.inner.status())
    }

    pub fn job_id(&mut self) -> NaResult<i64> {
        self.runtime.block_on(self.inner.job_id())
    }

    pub fn command(&mut self) -> NaResult<String> {
        self.runtime.block_on(self.inner.command())
    }

    pub fn inserted(&mut self) -> NaResult<String> {
        self.runtime.block_on(self.inner.inserted())
    }

    pub fn inserted_at(&mut self) -> NaResult<Option<DateTime<Utc>>> {
        self.runtime.block_on(self.inner.inserted_at())
    }

    pub fn is_success(&mut self) -> NaResult<bool> {
        self.runtime.block_on(self.inner.is_success())
    }

    pub fn is_working(&mut self) -> NaResult<bool> {
        self.runtime.block_on(self.inner.is_working())
    }

    pub fn is_failure(&mut self) -> NaResult<bool> {
        self.runtime.block_on(self.inner.is_failure())
    }
}
