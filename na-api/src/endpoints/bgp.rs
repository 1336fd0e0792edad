//! BGP session, group, ASN, and prefix endpoints.

use serde_json::Value;

use na_core::error::NaResult;

use crate::driver::NodeDriver;
use crate::request::{ApiRequest, Params};

/// Who a purchased prefix is announced for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixTarget {
    /// An existing BGP group.
    Group(u64),
    /// A customer ASN with an anycast profile.
    Asn { asn_id: u64, anycast_profile: u64 },
}

/// A BGP prefix purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixOrder {
    pub name: String,
    pub agreement_id: u64,
    pub target: PrefixTarget,
}

impl PrefixOrder {
    /// Order a prefix for an existing BGP group.
    pub fn for_group(name: impl Into<String>, agreement_id: u64, group_id: u64) -> Self {
        Self {
            name: name.into(),
            agreement_id,
            target: PrefixTarget::Group(group_id),
        }
    }

    /// Order a prefix for an ASN with the default anycast profile (1).
    pub fn for_asn(name: impl Into<String>, agreement_id: u64, asn_id: u64) -> Self {
        Self {
            name: name.into(),
            agreement_id,
            target: PrefixTarget::Asn {
                asn_id,
                anycast_profile: 1,
            },
        }
    }

    /// Override the anycast profile. No effect on group orders.
    pub fn with_anycast_profile(mut self, profile: u64) -> Self {
        if let PrefixTarget::Asn {
            ref mut anycast_profile,
            ..
        } = self.target
        {
            *anycast_profile = profile;
        }
        self
    }

    fn to_params(&self) -> Params {
        let mut params = Params::new();
        params.insert("name".into(), Value::from(self.name.clone()));
        params.insert("agreement_id".into(), Value::from(self.agreement_id));
        match self.target {
            PrefixTarget::Group(group_id) => {
                params.insert("group_id".into(), Value::from(group_id));
            }
            PrefixTarget::Asn {
                asn_id,
                anycast_profile,
            } => {
                params.insert("asn_id".into(), Value::from(asn_id));
                params.insert("anycast_profile".into(), Value::from(anycast_profile));
            }
        }
        params
    }
}

impl NodeDriver {
    /// Retrieve one BGP session, or all sessions.
    pub async fn bgp_sessions(&self, session_id: Option<u64>) -> NaResult<Value> {
        self.call(self.dialect().bgp_sessions(session_id)).await
    }

    /// Retrieve the BGP session summary.
    pub async fn bgp_summary(&self) -> NaResult<Value> {
        let path = format!("{}/bgpsummary", self.dialect().bgp_prefix());
        self.call(ApiRequest::get(path)).await
    }

    /// Retrieve one BGP group, or all groups.
    pub async fn bgp_groups(&self, group_id: Option<u64>) -> NaResult<Value> {
        let prefix = self.dialect().bgp_prefix();
        let path = match group_id {
            Some(id) => format!("{prefix}/bgpgroup/{id}"),
            None => format!("{prefix}/bgpgroups"),
        };
        self.call(ApiRequest::get(path)).await
    }

    /// Retrieve the ASNs available for BGP.
    pub async fn bgp_asns(&self) -> NaResult<Value> {
        let path = format!("{}/bgpasns", self.dialect().bgp_prefix());
        self.call(ApiRequest::get(path)).await
    }

    /// Create BGP sessions for a server in a BGP group.
    pub async fn bgp_create_sessions(
        &self,
        mbpkgid: u64,
        group_id: u64,
        ipv6: bool,
        redundant: bool,
    ) -> NaResult<Value> {
        let mut params = Params::new();
        params.insert("group_id".into(), Value::from(group_id));
        if ipv6 {
            params.insert("ipv6".into(), Value::from(1));
        }
        if redundant {
            params.insert("redundant".into(), Value::from(1));
        }

        let req = self.dialect().bgp_create_sessions(mbpkgid, params);
        let data = self.call(req).await?;
        self.dialect().created_sessions(data)
    }

    /// Buy a BGP prefix. Only api v2 serves it.
    pub async fn bgp_buy_prefixes(&self, order: &PrefixOrder) -> NaResult<Value> {
        let req = self.dialect().bgp_buy_prefixes()?.params(order.to_params());
        self.call(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_group_order_params() {
        let order = PrefixOrder::for_group("edge", 7, 12);
        assert_eq!(
            Value::Object(order.to_params()),
            json!({"name": "edge", "agreement_id": 7, "group_id": 12})
        );
    }

    #[test]
    fn test_asn_order_params() {
        let order = PrefixOrder::for_asn("anycast", 7, 64512).with_anycast_profile(3);
        let params = Value::Object(order.to_params());
        assert_eq!(
            params,
            json!({"name": "anycast", "agreement_id": 7, "asn_id": 64512, "anycast_profile": 3})
        );
        assert!(params.get("group_id").is_none());
    }

    #[test]
    fn test_anycast_profile_ignored_for_groups() {
        let order = PrefixOrder::for_group("edge", 1, 2).with_anycast_profile(9);
        assert_eq!(order.target, PrefixTarget::Group(2));
    }
}
