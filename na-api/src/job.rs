//! Server job status tracking.
//!
//! Actions such as build or start return a job record. [`JobStatus`] looks
//! the job up on first use and caches it until [`JobStatus::refresh`].
//! The server owns the job's state; this type only observes it.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use na_core::constants::job_status;
use na_core::error::{NaError, NaResult};

use crate::client::Connection;
use crate::request::{ApiRequest, Params};

/// A server job as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, deserialize_with = "lenient_int")]
    pub id: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub status: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub command: String,
    /// Insertion time, epoch seconds or "YYYY-MM-DD HH:MM:SS".
    #[serde(default, deserialize_with = "lenient_string")]
    pub ts_insert: String,
    #[serde(flatten)]
    pub extra: Params,
}

/// Coarse classification of a job status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Working,
    Success,
    Failure,
    /// Reserved codes (4 and anything above 6).
    Other(i64),
}

impl From<i64> for JobState {
    fn from(status: i64) -> Self {
        match status {
            s if s <= job_status::WORKING_MAX => JobState::Working,
            job_status::SUCCESS => JobState::Success,
            job_status::FAILURE => JobState::Failure,
            other => JobState::Other(other),
        }
    }
}

impl Job {
    pub fn state(&self) -> JobState {
        JobState::from(self.status)
    }

    pub fn is_success(&self) -> bool {
        self.status == job_status::SUCCESS
    }

    pub fn is_working(&self) -> bool {
        self.status <= job_status::WORKING_MAX
    }

    pub fn is_failure(&self) -> bool {
        self.status == job_status::FAILURE
    }

    /// Parse `ts_insert`. Empty and zero timestamps yield `None`.
    pub fn inserted_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.ts_insert.trim();
        if let Ok(secs) = raw.parse::<i64>() {
            if secs == 0 {
                return None;
            }
            return DateTime::from_timestamp(secs, 0);
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Read a job from an API payload. A list yields its first entry.
    pub fn from_payload(data: Value) -> NaResult<Self> {
        let data = match data {
            Value::Array(items) => items
                .into_iter()
                .next()
                .ok_or_else(|| NaError::Serialization("job list is empty".into()))?,
            other => other,
        };
        Ok(serde_json::from_value(data)?)
    }
}

enum JobCache {
    Unfetched,
    Fetched(Job),
}

/// Lazily fetched, cached view of one server job.
pub struct JobStatus {
    conn: Connection,
    node_id: u64,
    job_id: i64,
    cache: JobCache,
}

impl JobStatus {
    /// Track the job whose id is the `id` field of `job_result` (0 when absent).
    pub fn new(conn: Connection, node_id: u64, job_result: &Value) -> Self {
        let job_id = job_result.get("id").and_then(int_from_value).unwrap_or(0);
        Self {
            conn,
            node_id,
            job_id,
            cache: JobCache::Unfetched,
        }
    }

    /// The package the job belongs to.
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// The job id taken from the action result.
    pub fn requested_job_id(&self) -> i64 {
        self.job_id
    }

    /// Whether a job record is cached.
    pub fn is_fetched(&self) -> bool {
        matches!(self.cache, JobCache::Fetched(_))
    }

    /// Fetch the job again, replacing the cached record.
    ///
    /// On error the cache is left empty and the next accessor retries.
    pub async fn refresh(&mut self) -> NaResult<()> {
        self.cache = JobCache::Unfetched;
        let req = ApiRequest::get("/cloud/serverjob")
            .param("mbpkgid", self.node_id)
            .param("job_id", self.job_id);
        let data = self.conn.request(&req).await?;
        self.cache = JobCache::Fetched(Job::from_payload(data)?);
        Ok(())
    }

    /// The cached job record, fetching it first if needed.
    pub async fn job(&mut self) -> NaResult<&Job> {
        if !self.is_fetched() {
            self.refresh().await?;
        }
        match &self.cache {
            JobCache::Fetched(job) => Ok(job),
            JobCache::Unfetched => Err(NaError::Serialization(
                "job record unavailable after refresh".into(),
            )),
        }
    }

    pub async fn status(&mut self) -> NaResult<i64> {
        Ok(self.job().await?.status)
    }

    /// The job id reported by the server.
    pub async fn job_id(&mut self) -> NaResult<i64> {
        Ok(self.job().await?.id)
    }

    pub async fn command(&mut self) -> NaResult<String> {
        Ok(self.job().await?.command.clone())
    }

    /// The raw insertion timestamp.
    pub async fn inserted(&mut self) -> NaResult<String> {
        Ok(self.job().await?.ts_insert.clone())
    }

    pub async fn inserted_at(&mut self) -> NaResult<Option<DateTime<Utc>>> {
        Ok(self.job().await?.inserted_at())
    }

    pub async fn is_success(&mut self) -> NaResult<bool> {
        Ok(self.job().await?.is_success())
    }

    pub async fn is_working(&mut self) -> NaResult<bool> {
        Ok(self.job().await?.is_working())
    }

    pub async fn is_failure(&mut self) -> NaResult<bool> {
        Ok(self.job().await?.is_failure())
    }
}

impl std::fmt::Debug for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobStatus")
            .field("node_id", &self.node_id)
            .field("job_id", &self.job_id)
            .field("fetched", &self.is_fetched())
            .finish()
    }
}

fn int_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_float)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// A float that holds an exact `i64` value.
fn whole_float(f: f64) -> Option<i64> {
    // 2^63 is exactly representable; anything at or above it overflows i64.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn lenient_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    int_from_value(&value)
        .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {value}")))
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
