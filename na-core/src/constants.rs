//! Library-wide constants.

/// Application name, used for config and log directories.
pub const APP_NAME: &str = "naapi";

/// Library version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Host serving the v1 API.
pub const V1_HOST: &str = "vapi.netactuate.com";

/// Host serving the v2 API.
pub const V2_HOST: &str = "vapi2.netactuate.com";

/// Root path prefix for the v1 API.
pub const V1_ROOT: &str = "";

/// Root path prefix for the v2 API.
pub const V2_ROOT: &str = "/api";

/// Query parameter carrying the API key on every request.
pub const KEY_PARAM: &str = "key";

/// Environment variable the CLI reads the API key from.
pub const API_KEY_ENV: &str = "NETACTUATE_API_KEY";

/// Server job status codes.
pub mod job_status {
    /// Highest status code that still means the job is in progress.
    pub const WORKING_MAX: i64 = 3;
    pub const SUCCESS: i64 = 5;
    pub const FAILURE: i64 = 6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosts_differ_per_dialect() {
        assert_ne!(V1_HOST, V2_HOST);
        assert!(V1_ROOT.is_empty());
        assert_eq!(V2_ROOT, "/api");
    }

    #[test]
    fn test_job_status_codes_are_disjoint() {
        assert!(job_status::WORKING_MAX < job_status::SUCCESS);
        assert!(job_status::SUCCESS < job_status::FAILURE);
    }
}
