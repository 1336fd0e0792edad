//! Location, image, and plan lookups.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use na_core::error::NaResult;

use crate::driver::NodeDriver;
use crate::request::{ApiRequest, Params};

/// A datacenter location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Lowercase country code of the site.
    #[serde(default)]
    pub flag: Option<String>,
    /// Uppercase country code, derived from `flag` when absent.
    #[serde(default)]
    pub country: Option<String>,
    /// All other fields as returned by the API.
    #[serde(flatten)]
    pub extra: Params,
}

impl Location {
    fn fill_country(&mut self) {
        if self.country.is_none() {
            self.country = self.flag.as_deref().map(str::to_uppercase);
        }
    }
}

impl NodeDriver {
    /// List locations as an ordered list, each with a `country` code.
    pub async fn locations(&self) -> NaResult<Vec<Location>> {
        let data = self.call(ApiRequest::get("/cloud/locations/")).await?;
        let list = self.dialect().locations(data)?;
        let mut locations: Vec<Location> = serde_json::from_value(list)?;
        for location in &mut locations {
            location.fill_country();
        }
        Ok(locations)
    }

    /// Retrieve the list of available VM install images.
    pub async fn os_list(&self) -> NaResult<Value> {
        self.call(ApiRequest::get("/cloud/images/")).await
    }

    /// Retrieve the VM plans, optionally for a single location.
    pub async fn plans(&self, location: Option<&str>) -> NaResult<Value> {
        let path = match location {
            Some(location) => format!("/cloud/sizes/{location}"),
            None => "/cloud/sizes/".to_string(),
        };
        let data = self.call(ApiRequest::get(path)).await?;
        self.dialect().plans(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_keeps_extra_fields() {
        let json = serde_json::json!({"id": 3, "name": "Ashburn", "flag": "us"});
        let mut loc: Location = serde_json::from_value(json).unwrap();
        loc.fill_country();
        assert_eq!(loc.country.as_deref(), Some("US"));
        assert_eq!(loc.extra["name"], "Ashburn");
    }

    #[test]
    fn test_location_keeps_existing_country() {
        let json = serde_json::json!({"flag": "gb", "country": "UK"});
        let mut loc: Location = serde_json::from_value(json).unwrap();
        loc.fill_country();
        assert_eq!(loc.country.as_deref(), Some("UK"));
    }
}
