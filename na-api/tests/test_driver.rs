//! Integration tests for driver routing across both API dialects.

mod common;

use common::{v1_driver, v2_driver, MockTransport};
use na_api::{BuildParams, NaError, Params, PrefixOrder};
use reqwest::Method;
use serde_json::json;

// ---- Locations and plans ----

#[tokio::test]
async fn v1_locations_become_ordered_list_with_country() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"1": {"flag": "us"}, "2": {"flag": "de"}}));

    let locations = v1_driver(&mock).locations().await.unwrap();
    assert_eq!(locations.len(), 2);
    assert_eq!(locations[0].country.as_deref(), Some("US"));
    assert_eq!(locations[1].country.as_deref(), Some("DE"));
    assert_eq!(locations[0].flag.as_deref(), Some("us"));
    assert_eq!(mock.last_call().path(), "/cloud/locations/");
}

#[tokio::test]
async fn v1_locations_error_body_is_api_error() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"error": 1, "msg": "Invalid API key"}));

    match v1_driver(&mock).locations().await.unwrap_err() {
        NaError::Api { message, .. } => assert_eq!(message, "Invalid API key"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn v2_locations_list_passes_through() {
    let mock = MockTransport::new();
    mock.push_success(json!([{"id": 1, "name": "Ashburn", "flag": "us"}]));

    let locations = v2_driver(&mock).locations().await.unwrap();
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].extra["name"], "Ashburn");
    assert_eq!(locations[0].country.as_deref(), Some("US"));
    assert_eq!(mock.last_call().path(), "/api/cloud/locations/");
}

#[tokio::test]
async fn v2_plans_return_value_list() {
    let mock = MockTransport::new();
    mock.push_success(json!({"VR1x1x25": {"ram": 1024}, "VR2x2x50": {"ram": 2048}}));

    let plans = v2_driver(&mock).plans(Some("SJC")).await.unwrap();
    assert_eq!(plans, json!([{"ram": 1024}, {"ram": 2048}]));
    assert_eq!(mock.last_call().path(), "/api/cloud/sizes/SJC");
}

#[tokio::test]
async fn v1_locations_plain_text_body_is_an_error() {
    let mock = MockTransport::new();
    mock.push_raw(200, "Invalid API key");

    let err = v1_driver(&mock).locations().await.unwrap_err();
    assert!(matches!(err, NaError::Serialization(_)));
}

#[tokio::test]
async fn v2_locations_scalar_payload_is_an_error() {
    let mock = MockTransport::new();
    mock.push_success(json!("maintenance"));

    let err = v2_driver(&mock).locations().await.unwrap_err();
    assert!(matches!(err, NaError::Serialization(_)));
}

#[tokio::test]
async fn v2_plans_scalar_payload_is_an_error() {
    let mock = MockTransport::new();
    mock.push_success(json!("no plans for this location"));

    let err = v2_driver(&mock).plans(Some("3")).await.unwrap_err();
    assert!(matches!(err, NaError::Serialization(_)));
}

#[tokio::test]
async fn v1_plans_keep_mapping() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"VR1x1x25": {"ram": 1024}}));

    let plans = v1_driver(&mock).plans(None).await.unwrap();
    assert_eq!(plans, json!({"VR1x1x25": {"ram": 1024}}));
    assert_eq!(mock.last_call().path(), "/cloud/sizes/");
}

// ---- Server lifecycle ----

#[tokio::test]
async fn read_endpoints_route_by_package() {
    let mock = MockTransport::new();
    for _ in 0..9 {
        mock.push_success(json!({}));
    }

    let driver = v2_driver(&mock);
    driver.servers(Some(4)).await.unwrap();
    driver.packages(Some(4)).await.unwrap();
    driver.packages(None).await.unwrap();
    driver.ipv4(4).await.unwrap();
    driver.ipv6(4).await.unwrap();
    driver.networkips(4).await.unwrap();
    driver.summary(4).await.unwrap();
    driver.status(4).await.unwrap();
    driver.bandwidth_report(4).await.unwrap();

    let paths: Vec<String> = mock.calls().iter().map(|c| c.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/api/cloud/server/4",
            "/api/cloud/package/4",
            "/api/cloud/packages",
            "/api/cloud/ipv4/4",
            "/api/cloud/ipv6/4",
            "/api/cloud/networkips/4",
            "/api/cloud/serversummary/4",
            "/api/cloud/status/4",
            "/api/cloud/servermonthlybw/4",
        ]
    );
    assert!(mock.calls().iter().all(|c| c.method == Method::GET));
}

#[tokio::test]
async fn power_actions_are_posts() {
    let mock = MockTransport::new();
    for _ in 0..5 {
        mock.push_json(200, json!({"id": 1}));
    }

    let driver = v1_driver(&mock);
    driver.start(8).await.unwrap();
    driver.reboot(8, false).await.unwrap();
    driver.rescue(8, "hunter2").await.unwrap();
    driver.rescue_stop(8).await.unwrap();
    driver.unlink(8).await.unwrap();

    let calls = mock.calls();
    assert!(calls.iter().all(|c| c.method == Method::POST));
    assert_eq!(calls[0].path(), "/cloud/server/start/8");
    assert_eq!(calls[1].body, Some(json!({})));
    assert_eq!(calls[2].path(), "/cloud/server/start_rescue/8");
    assert_eq!(calls[2].body, Some(json!({"rescue_pass": "hunter2"})));
    assert_eq!(calls[3].path(), "/cloud/server/stop_rescue/8");
    assert_eq!(calls[4].path(), "/cloud/server/unlink/8");
}

#[tokio::test]
async fn build_routes_differ_by_dialect() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"id": 1}));
    mock.push_success(json!({"id": 2}));

    let params = BuildParams::new("3", "ubuntu", "web.example.com", "pw").with_mbpkgid(77);
    v1_driver(&mock).build(&params).await.unwrap();
    v2_driver(&mock).build(&params).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].path(), "/cloud/server/build/");
    assert_eq!(calls[0].body.as_ref().unwrap()["mbpkgid"], 77);
    assert_eq!(calls[1].path(), "/api/cloud/server/build/77");
    assert_eq!(calls[1].body.as_ref().unwrap()["location"], "3");
}

#[tokio::test]
async fn v2_build_without_package_is_rejected_locally() {
    let mock = MockTransport::new();
    let err = v2_driver(&mock).build(&BuildParams::default()).await.unwrap_err();
    assert!(matches!(err, NaError::InvalidRequest(_)));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn delete_merges_extra_params_with_package() {
    let mock = MockTransport::new();
    mock.push_success(json!({}));
    mock.push_success(json!({}));

    let driver = v2_driver(&mock);
    let mut extra = Params::new();
    extra.insert("cancel_billing".into(), json!(false));
    driver.delete(12, Some(extra)).await.unwrap();
    driver.delete(12, None).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].path(), "/api/cloud/server/delete/12");
    assert_eq!(calls[0].body, Some(json!({"cancel_billing": false, "mbpkgid": 12})));
    assert_eq!(calls[1].body, Some(json!({})));
}

// ---- Packages ----

#[tokio::test]
async fn cancel_routes_differ_by_dialect() {
    let mock = MockTransport::new();
    mock.push_json(200, json!(true));
    mock.push_success(json!({}));

    v1_driver(&mock).cancel(5).await.unwrap();
    v2_driver(&mock).cancel(5).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].path(), "/cloud/cancel/5");
    assert_eq!(calls[1].path(), "/api/cloud/package/cancel");
    assert_eq!(
        calls[1].body,
        Some(json!({"mbpkgid": 5, "cancel_type": "Immediate", "agree": 1}))
    );
}

#[tokio::test]
async fn v2_buy_is_not_implemented_and_sends_nothing() {
    let mock = MockTransport::new();
    let err = v2_driver(&mock).buy("VR1x1x25").await.unwrap_err();
    assert!(err.is_not_implemented());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn v1_buy_is_a_get() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"mbpkgid": 99}));

    let out = v1_driver(&mock).buy("VR1x1x25").await.unwrap();
    assert_eq!(out["mbpkgid"], 99);
    let call = mock.last_call();
    assert_eq!(call.method, Method::GET);
    assert_eq!(call.path(), "/cloud/buy/VR1x1x25");
}

#[tokio::test]
async fn v2_buy_build_with_package_rebuilds() {
    let mock = MockTransport::new();
    mock.push_success(json!({"id": 3}));

    let params = BuildParams::new("3", "debian", "db.example.com", "pw").with_mbpkgid(41);
    v2_driver(&mock).buy_build(&params).await.unwrap();

    assert_eq!(mock.last_call().path(), "/api/cloud/server/build/41");
}

#[tokio::test]
async fn v2_buy_build_without_package_buys() {
    let mock = MockTransport::new();
    mock.push_success(json!({"id": 3}));
    mock.push_success(json!({"id": 4}));

    let driver = v2_driver(&mock);
    let params = BuildParams::new("3", "debian", "db.example.com", "pw").with_plan("VR1x1x25");
    driver.buy_build(&params).await.unwrap();
    driver.buy_build(&params.clone().with_mbpkgid(0)).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].path(), "/api/cloud/server/buy_build");
    assert_eq!(calls[0].body.as_ref().unwrap()["plan"], "VR1x1x25");
    assert_eq!(calls[1].path(), "/api/cloud/server/buy_build");
}

#[tokio::test]
async fn v1_buy_build_never_rebuilds() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"id": 3}));

    let params = BuildParams::default().with_mbpkgid(41);
    v1_driver(&mock).buy_build(&params).await.unwrap();
    assert_eq!(mock.last_call().path(), "/cloud/buy_build/");
}

// ---- Jobs ----

#[tokio::test]
async fn job_routes_differ_by_dialect() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"id": 70}));
    mock.push_json(200, json!([]));
    mock.push_success(json!({"id": 70}));
    mock.push_success(json!([]));

    let v1 = v1_driver(&mock);
    let v2 = v2_driver(&mock);
    v1.get_job(6, 70).await.unwrap();
    v1.get_jobs(6).await.unwrap();
    v2.get_job(6, 70).await.unwrap();
    v2.get_jobs(6).await.unwrap();

    let calls = mock.calls();
    assert_eq!(calls[0].path(), "/cloud/serverjob/");
    assert_eq!(calls[0].query("job_id").as_deref(), Some("70"));
    assert_eq!(calls[0].query("mbpkgid").as_deref(), Some("6"));
    assert_eq!(calls[1].path(), "/cloud/serverjobs/");
    assert_eq!(calls[1].query("mbpkgid").as_deref(), Some("6"));
    assert_eq!(calls[2].path(), "/api/cloud/server/6/jobs/70");
    assert_eq!(calls[3].path(), "/api/cloud/server/6/jobs");
}

// ---- BGP ----

#[tokio::test]
async fn bgp_read_routes_differ_by_dialect() {
    let mock = MockTransport::new();
    for _ in 0..6 {
        mock.push_json(200, json!([]));
    }
    for _ in 0..6 {
        mock.push_success(json!([]));
    }

    for driver in [v1_driver(&mock), v2_driver(&mock)] {
        driver.bgp_sessions(None).await.unwrap();
        driver.bgp_sessions(Some(2)).await.unwrap();
        driver.bgp_summary().await.unwrap();
        driver.bgp_groups(None).await.unwrap();
        driver.bgp_groups(Some(3)).await.unwrap();
        driver.bgp_asns().await.unwrap();
    }

    let paths: Vec<String> = mock.calls().iter().map(|c| c.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/cloud/bgpsessions2",
            "/cloud/bgpsession2/2",
            "/cloud/bgpsummary",
            "/cloud/bgpgroups",
            "/cloud/bgpgroup/3",
            "/cloud/bgpasns",
            "/api/bgp/bgpsessions",
            "/api/bgp/bgpsession/2",
            "/api/bgp/bgpsummary",
            "/api/bgp/bgpgroups",
            "/api/bgp/bgpgroup/3",
            "/api/bgp/bgpasns",
        ]
    );
}

#[tokio::test]
async fn v2_create_sessions_renames_fields() {
    let mock = MockTransport::new();
    mock.push_success(json!({"Sessions": {"a": {"peer": "192.0.2.1"}}, "Modified": true}));

    let out = v2_driver(&mock)
        .bgp_create_sessions(15, 3, true, false)
        .await
        .unwrap();

    assert_eq!(
        out,
        json!({"sessions": [{"peer": "192.0.2.1"}], "modified": true, "success": true})
    );
    let call = mock.last_call();
    assert_eq!(call.path(), "/api/bgp/bgpcreatesessions");
    assert_eq!(call.body, Some(json!({"group_id": 3, "ipv6": 1, "mbpkgid": 15})));
}

#[tokio::test]
async fn v2_create_sessions_rejects_list_payload() {
    let mock = MockTransport::new();
    mock.push_success(json!([{"id": 1}, {"id": 2}]));

    let err = v2_driver(&mock)
        .bgp_create_sessions(7, 12, true, false)
        .await
        .unwrap_err();
    assert!(matches!(err, NaError::Serialization(_)));
}

#[tokio::test]
async fn v1_create_sessions_keeps_response_shape() {
    let mock = MockTransport::new();
    mock.push_json(200, json!({"Sessions": {"a": {}}, "Modified": false}));

    let out = v1_driver(&mock)
        .bgp_create_sessions(15, 3, false, true)
        .await
        .unwrap();

    assert_eq!(out, json!({"Sessions": {"a": {}}, "Modified": false}));
    let call = mock.last_call();
    assert_eq!(call.path(), "/cloud/bgpcreatesessions/15");
    assert_eq!(call.body, Some(json!({"group_id": 3, "redundant": 1})));
}

#[tokio::test]
async fn bgp_buy_prefixes_only_on_v2() {
    let mock = MockTransport::new();
    let order = PrefixOrder::for_asn("anycast", 11, 64512);

    let err = v1_driver(&mock).bgp_buy_prefixes(&order).await.unwrap_err();
    assert!(err.is_not_implemented());
    assert_eq!(mock.call_count(), 0);

    mock.push_success(json!({"prefix": "203.0.113.0/24"}));
    let out = v2_driver(&mock).bgp_buy_prefixes(&order).await.unwrap();
    assert_eq!(out["prefix"], "203.0.113.0/24");

    let call = mock.last_call();
    assert_eq!(call.path(), "/api/bgp/bgpbuyprefixes");
    assert_eq!(
        call.body,
        Some(json!({"name": "anycast", "agreement_id": 11, "asn_id": 64512, "anycast_profile": 1}))
    );
}
