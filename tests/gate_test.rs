//! End-to-end tests of the version gate over HTTP.

use clustergate::client::HttpRestClient;
use clustergate::{GateError, HttpResource, Version, VersionGate};
use httpmock::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn serve<'a>(server: &'a MockServer, body: &str) -> httpmock::Mock<'a> {
    let body = body.to_string();
    server.mock(|when, then| {
        when.method(GET)
            .path("/")
            .query_param("filter_path", "version.number");
        then.status(200)
            .header("content-type", "application/json")
            .body(body.as_str());
    })
}

fn version_body(version: &str) -> String {
    format!(r#"{{"version":{{"number":"{}"}}}}"#, version)
}

fn gate() -> VersionGate {
    VersionGate::new("monitoring", Version::new(6, 3, 0))
}

#[test]
fn newer_cluster_is_supported() {
    let server = MockServer::start();
    let mock = serve(&server, &version_body("7.3.1"));
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(gate().check(&client));
    mock.assert_calls(1);
}

#[test]
fn older_cluster_is_not_supported() {
    let server = MockServer::start();
    serve(&server, &version_body("5.9.9"));
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(!gate().check(&client));
}

#[test]
fn exact_minimum_is_supported() {
    let server = MockServer::start();
    serve(&server, &version_body("6.3.0"));
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(gate().check(&client));
}

#[test]
fn full_root_document_is_accepted() {
    let server = MockServer::start();
    serve(
        &server,
        r#"{
  "name" : "node-1",
  "cluster_name" : "monitoring",
  "version" : {
    "number" : "7.3.1",
    "build_flavor" : "default",
    "lucene_version" : "8.1.0"
  },
  "tagline" : "You Know, for Search"
}"#,
    );
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(gate().check(&client));
}

#[test]
fn missing_version_field_is_not_supported() {
    let server = MockServer::start();
    serve(&server, r#"{"cluster_name":"monitoring"}"#);
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(!gate().check(&client));
}

#[test]
fn unparsable_version_is_not_supported() {
    let server = MockServer::start();
    serve(&server, &version_body("abc"));
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(!gate().check(&client));
}

#[test]
fn error_status_is_not_supported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(503).body(r#"{"error":"cluster_block_exception"}"#);
    });
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    assert!(!gate().check(&client));
}

#[test]
fn connection_refused_is_not_supported() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = HttpRestClient::builder(format!("http://127.0.0.1:{}", port))
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    assert!(!gate().check(&client));
}

#[test]
fn slow_cluster_times_out_as_not_supported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/");
        then.status(200)
            .delay(Duration::from_secs(3))
            .body(version_body("7.3.1"));
    });
    let client = HttpRestClient::builder(server.base_url())
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    assert!(!gate().check(&client));
}

#[test]
fn check_is_not_cached_between_calls() {
    let server = MockServer::start();
    let mock = serve(&server, &version_body("7.3.1"));
    let client = HttpRestClient::new(&server.base_url()).unwrap();
    let gate = gate();

    assert!(gate.check(&client));
    assert!(gate.check(&client));
    mock.assert_calls(2);
}

#[test]
fn base_path_is_prefixed() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/es")
            .query_param("filter_path", "version.number");
        then.status(200).body(version_body("7.3.1"));
    });
    let client = HttpRestClient::builder(server.base_url())
        .base_path("/es")
        .build()
        .unwrap();

    assert!(gate().check(&client));
    mock.assert();
}

#[test]
fn gate_is_shareable_across_threads() {
    let server = MockServer::start();
    let mock = serve(&server, &version_body("7.3.1"));
    let client = Arc::new(HttpRestClient::new(&server.base_url()).unwrap());
    let gate = Arc::new(gate());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = Arc::clone(&client);
            let gate = Arc::clone(&gate);
            std::thread::spawn(move || gate.check(client.as_ref()))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
    mock.assert_calls(4);
}

#[test]
fn independent_gates_check_independent_clusters() {
    let new_cluster = MockServer::start();
    serve(&new_cluster, &version_body("7.3.1"));
    let old_cluster = MockServer::start();
    serve(&old_cluster, &version_body("5.6.0"));

    let new_url = new_cluster.base_url();
    let old_url = old_cluster.base_url();

    let a = std::thread::spawn(move || {
        let client = HttpRestClient::new(&new_url).unwrap();
        VersionGate::new("new", Version::new(6, 3, 0)).check(&client)
    });
    let b = std::thread::spawn(move || {
        let client = HttpRestClient::new(&old_url).unwrap();
        VersionGate::new("old", Version::new(6, 3, 0)).check(&client)
    });

    assert!(a.join().unwrap());
    assert!(!b.join().unwrap());
}

#[test]
fn usable_through_resource_trait() {
    let server = MockServer::start();
    serve(&server, &version_body("7.3.1"));
    let client = HttpRestClient::new(&server.base_url()).unwrap();

    let resources: Vec<Box<dyn HttpResource + Send + Sync>> = vec![Box::new(gate())];
    assert!(clustergate::resource::check_all(&resources, &client));
}

#[test]
fn builder_without_minimum_fails_before_any_request() {
    let server = MockServer::start();
    let mock = serve(&server, &version_body("7.3.1"));

    let result = VersionGate::builder().resource_owner_name("monitoring").build();

    assert!(matches!(result, Err(GateError::InvalidArgument { .. })));
    mock.assert_calls(0);
}

#[test]
fn host_path_is_kept() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/es")
            .query_param("filter_path", "version.number");
        then.status(200).body(version_body("7.3.1"));
    });
    let client = HttpRestClient::new(&server.url("/es/")).unwrap();

    assert!(gate().check(&client));
    mock.assert();
}
