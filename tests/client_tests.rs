//! Integration tests for [`FrameClient`] request dispatch.

mod common;

use std::sync::Arc;

use common::{client_for, customer_json, CUSTOMER_ID};
use frame_api::clients::SDK_VERSION;
use frame_api::{
    ApiBase, ApiKey, FrameClient, FrameConfig, HttpMethod, Params, RequestOptions,
};
use serde_json::json;
use tracing::Level;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(header("Authorization", "Bearer frame_test_key"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header(
            "User-Agent",
            format!("MyApp/1.0 | FrameRust/{SDK_VERSION}").as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FrameClient::builder()
        .api_key(ApiKey::new("frame_test_key").unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .user_agent_prefix("MyApp/1.0")
        .log_level(Level::INFO)
        .build()
        .unwrap();

    client
        .execute(HttpMethod::Get, "/v1/customers", &Params::new(), &RequestOptions::default())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_get_params_become_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("ids[]", "a"))
        .and(query_param("ids[]", "b"))
        .and(query_param("page", "2"))
        .and(query_param("live", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = json!({"ids": ["a", "b"], "page": 2, "live": true, "skipped": null});

    client
        .execute(
            HttpMethod::Get,
            "/v1/customers",
            params.as_object().unwrap(),
            &RequestOptions::default(),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_nested_get_params_use_bracket_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers/search"))
        .and(query_param("filter[status]", "active"))
        .and(query_param("filter[created][gte]", "1700000000"))
        .and(query_param("lines[][sku]", "A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = json!({
        "filter": {"status": "active", "created": {"gte": 1_700_000_000}},
        "lines": [{"sku": "A1"}],
    });

    client
        .execute(
            HttpMethod::Get,
            "/v1/customers/search",
            params.as_object().unwrap(),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default();
    assert!(!query.contains("%7B"), "objects must not be sent as JSON: {query}");
}

#[tokio::test]
async fn test_custom_authorization_header_replaces_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(header("Authorization", "Bearer other_key"))
        .and(header("X-Trace", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::new()
        .with_header("authorization", "Bearer other_key")
        .with_header("x-trace", "t1");

    client
        .execute(HttpMethod::Get, "/v1/customers", &Params::new(), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_api_key_option_replaces_client_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(header("Authorization", "Bearer sk_other_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::new().with_api_key(ApiKey::new("sk_other_account").unwrap());

    client
        .execute(HttpMethod::Get, "/v1/customers", &Params::new(), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_authorization_header_is_sent_without_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(header_exists("Authorization"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "No API key provided"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = FrameClient::builder()
        .api_base(ApiBase::new(server.uri()).unwrap())
        .build()
        .unwrap();

    let error = client
        .execute(HttpMethod::Get, "/v1/customers", &Params::new(), &RequestOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(error, frame_api::FrameError::Authentication(_)));
}

#[tokio::test]
async fn test_post_params_become_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .and(body_json(json!({"name": "John", "metadata": {"tier": "gold"}})))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = json!({"name": "John", "metadata": {"tier": "gold"}});

    let body = client
        .execute_raw(
            "POST",
            "/v1/customers",
            params.as_object().unwrap(),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(body["id"], json!(CUSTOMER_ID));
}

#[tokio::test]
async fn test_no_content_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/customers/cus_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let body = client
        .execute(
            HttpMethod::Delete,
            "/v1/customers/cus_1",
            &Params::new(),
            &RequestOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_scope_binds_active_client() {
    let server = MockServer::start().await;
    let client = Arc::new(client_for(&server));
    let expected_base = server.uri();

    let base = FrameClient::scope(Arc::clone(&client), async {
        FrameClient::active()
            .unwrap()
            .config()
            .api_base()
            .to_string()
    })
    .await;

    assert_eq!(base, expected_base);
}

#[tokio::test]
async fn test_active_outside_scope_is_default_client() {
    let active = FrameClient::active().unwrap();
    let default = FrameClient::default_client().unwrap();

    assert!(Arc::ptr_eq(&active, &default));
    assert_eq!(
        active.config().api_base().to_string(),
        FrameConfig::default().api_base().to_string()
    );
}

#[test]
fn test_client_is_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FrameClient>();
}
