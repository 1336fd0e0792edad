//! Server job endpoints.

use serde_json::Value;

use na_core::error::NaResult;

use crate::driver::NodeDriver;
use crate::job::JobStatus;

impl NodeDriver {
    /// Get the server job `job_id` of a package.
    pub async fn get_job(&self, mbpkgid: u64, job_id: u64) -> NaResult<Value> {
        self.call(self.dialect().job(mbpkgid, job_id)).await
    }

    /// Get all server jobs of a package.
    pub async fn get_jobs(&self, mbpkgid: u64) -> NaResult<Value> {
        self.call(self.dialect().jobs(mbpkgid)).await
    }

    /// Track the job described by an action result (its `id` field).
    ///
    /// Nothing is fetched until a status accessor is first used.
    pub fn job_status(&self, mbpkgid: u64, job_result: &Value) -> JobStatus {
        JobStatus::new(self.connection().clone(), mbpkgid, job_result)
    }
}
