//! Integration tests for the Customer resource.
//!
//! Each test runs against a wiremock server and checks both the request
//! that was sent and the typed result.

mod common;

use common::{
    client_for, customer_json, customer_with, customers_list_json, CUSTOMER_ID,
    SECOND_CUSTOMER_ID,
};
use frame_api::{
    ApiResource, Creatable, Customer, CustomerCreateParams, CustomerListParams,
    CustomerSearchParams, CustomerStatus, Deletable, FrameError, Listable, RequestOptions, Savable,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn customer_path() -> String {
    format!("/v1/customers/{CUSTOMER_ID}")
}

async fn mount_retrieve(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(customer_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .mount(server)
        .await;
}

// ============================================================================
// Retrieve / Create
// ============================================================================

#[tokio::test]
async fn test_retrieve_customer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(customer_path()))
        .and(header("Authorization", "Bearer frame_test_key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let customer = Customer::retrieve(&client, CUSTOMER_ID, &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(customer.id(), Some(CUSTOMER_ID));
    assert_eq!(customer.name(), Some("John"));
    assert_eq!(customer.email(), Some("john@example.com"));
    assert_eq!(customer.object_name(), Some("customer"));
    assert_eq!(customer.status(), Some(CustomerStatus::Active));
    assert_eq!(customer.created_at().unwrap().timestamp(), 1_700_000_000);
    assert_eq!(
        customer.billing_address().unwrap().get_str("city"),
        Some("Austin")
    );
    assert!(!customer.is_dirty());
}

#[tokio::test]
async fn test_create_customer_posts_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/customers"))
        .and(body_json(json!({"name": "John", "email": "john@example.com"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = CustomerCreateParams {
        name: "John".into(),
        email: "john@example.com".into(),
        ..Default::default()
    };
    let customer = Customer::create(&client, &params, &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(customer.id(), Some(CUSTOMER_ID));
    assert_eq!(customer.name(), Some("John"));
    assert_eq!(customer.class(), Some(Customer::object_class()));
}

#[tokio::test]
async fn test_request_options_override_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(customer_path()))
        .and(header("Authorization", "Bearer other_key"))
        .and(header("Idempotency-Key", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::new()
        .with_api_key(frame_api::ApiKey::new("other_key").unwrap())
        .with_header("Idempotency-Key", "abc");

    Customer::retrieve(&client, CUSTOMER_ID, &opts).await.unwrap();
}

// ============================================================================
// Save
// ============================================================================

#[tokio::test]
async fn test_save_sends_only_changed_fields() {
    let server = MockServer::start().await;
    mount_retrieve(&server).await;
    Mock::given(method("PATCH"))
        .and(path(customer_path()))
        .and(body_json(json!({"name": "John Updated"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(customer_with(json!({"name": "John Updated"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::default();
    let mut customer = Customer::retrieve(&client, CUSTOMER_ID, &opts).await.unwrap();
    customer.set_name("John Updated");
    customer.save(&client, &(), &opts).await.unwrap();

    assert_eq!(customer.name(), Some("John Updated"));
    assert!(!customer.is_dirty());
}

#[tokio::test]
async fn test_save_without_changes_makes_no_request() {
    let server = MockServer::start().await;
    mount_retrieve(&server).await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::default();
    let mut customer = Customer::retrieve(&client, CUSTOMER_ID, &opts).await.unwrap();
    customer.save(&client, &(), &opts).await.unwrap();

    assert_eq!(customer.name(), Some("John"));
}

#[tokio::test]
async fn test_save_merges_extra_params() {
    let server = MockServer::start().await;
    mount_retrieve(&server).await;
    Mock::given(method("PATCH"))
        .and(path(customer_path()))
        .and(body_json(json!({"phone": "+15550000000", "description": "vip"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::default();
    let mut customer = Customer::retrieve(&client, CUSTOMER_ID, &opts).await.unwrap();
    customer.set_phone("+15550000000");
    customer
        .save(&client, &json!({"description": "vip"}), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_save_without_id_is_invalid_parameter() {
    let server = MockServer::start().await;
    let client = client_for(&server);

    let mut customer = Customer::new();
    customer.set_name("Nobody");
    let result = customer.save(&client, &(), &RequestOptions::default()).await;

    assert!(matches!(result, Err(FrameError::InvalidParameter(_))));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_by_id_patches_params() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path(customer_path()))
        .and(body_json(json!({"email": "new@example.com"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(customer_with(json!({"email": "new@example.com"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = frame_api::CustomerUpdateParams {
        email: Some("new@example.com".into()),
        ..Default::default()
    };
    let customer = Customer::update(&client, CUSTOMER_ID, &params, &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(customer.email(), Some("new@example.com"));
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_by_id() {
    let deleted_id = "a8d21fd2-b5ae-499f-b844-c0a66fe183b5";
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/v1/customers/{deleted_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": deleted_id,
            "object": "customer",
            "deleted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let deleted = Customer::delete_by_id(&client, deleted_id, &(), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(deleted.id(), Some(deleted_id));
    assert!(deleted.deleted());
    assert_eq!(deleted.object_name(), Some("customer"));
}

#[tokio::test]
async fn test_delete_instance() {
    let server = MockServer::start().await;
    mount_retrieve(&server).await;
    Mock::given(method("DELETE"))
        .and(path(customer_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": CUSTOMER_ID,
            "object": "customer",
            "deleted": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::default();
    let customer = Customer::retrieve(&client, CUSTOMER_ID, &opts).await.unwrap();
    let deleted = customer.delete(&client, &(), &opts).await.unwrap();

    assert!(deleted.deleted());
}

// ============================================================================
// List / Search
// ============================================================================

#[tokio::test]
async fn test_list_customers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_list_json(false, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let customers = Customer::list(&client, &(), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(customers.len(), 2);
    let first = customers.first().unwrap().as_object().unwrap();
    let last = customers.last().unwrap().as_object().unwrap();
    assert_eq!(first.id(), Some(CUSTOMER_ID));
    assert_eq!(first.get_str("name"), Some("John"));
    assert_eq!(last.id(), Some(SECOND_CUSTOMER_ID));
    assert_eq!(last.get_str("name"), Some("Jane"));
    assert!(!customers.has_more());
    assert_eq!(customers.page(), 1);
    assert_eq!(customers.per_page(), 2);
    assert_eq!(customers.resource_url(), Some("/v1/customers"));
}

#[tokio::test]
async fn test_list_customers_with_page_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_list_json(false, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = CustomerListParams {
        page: Some(1),
        per_page: Some(20),
    };
    let customers = Customer::list(&client, &params, &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(customers.len(), 2);
    assert!(customers.filters().is_empty());
}

#[tokio::test]
async fn test_list_items_convert_to_customer_class() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customers_list_json(false, 1)))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let customers = Customer::list(&client, &(), &RequestOptions::default())
        .await
        .unwrap();

    let typed: Vec<Customer> = customers
        .into_iter()
        .map(|item| Customer::try_from_value(item).unwrap())
        .collect();
    assert_eq!(typed[1].name(), Some("Jane"));
}

#[tokio::test]
async fn test_search_customers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers/search"))
        .and(query_param("name", "John"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [customer_json()],
            "meta": {"has_more": false, "page": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let params = CustomerSearchParams {
        name: Some("John".into()),
        ..Default::default()
    };
    let customers = Customer::search(&client, &params, &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(customers.len(), 1);
    assert_eq!(
        customers[0].as_object().unwrap().id(),
        Some(CUSTOMER_ID)
    );
    assert_eq!(customers.resource_url(), Some("/v1/customers/search"));
    assert_eq!(customers.filters().get("name"), Some(&json!("John")));
}

#[tokio::test]
async fn test_list_with_non_list_response_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = Customer::list(&client, &(), &RequestOptions::default()).await;

    assert!(matches!(result, Err(FrameError::Api(_))));
}

// ============================================================================
// Block / Unblock
// ============================================================================

#[tokio::test]
async fn test_block_customer() {
    let server = MockServer::start().await;
    mount_retrieve(&server).await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/customers/{CUSTOMER_ID}/block")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(customer_with(json!({"status": "blocked"}))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::default();
    let customer = Customer::retrieve(&client, CUSTOMER_ID, &opts).await.unwrap();
    let blocked = customer.block(&client, &(), &opts).await.unwrap();

    assert_eq!(blocked.id(), Some(CUSTOMER_ID));
    assert_eq!(blocked.status(), Some(CustomerStatus::Blocked));
}

#[tokio::test]
async fn test_unblock_customer_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/customers/{CUSTOMER_ID}/unblock")))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let unblocked = Customer::unblock_by_id(&client, CUSTOMER_ID, &(), &RequestOptions::default())
        .await
        .unwrap();

    assert_eq!(unblocked.status(), Some(CustomerStatus::Active));
}

#[tokio::test]
async fn test_block_by_id_and_unblock_instance() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/customers/{CUSTOMER_ID}/block")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(customer_with(json!({"status": "blocked"}))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/v1/customers/{CUSTOMER_ID}/unblock")))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json()))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = RequestOptions::default();
    let blocked = Customer::block_by_id(&client, CUSTOMER_ID, &(), &opts).await.unwrap();
    assert_eq!(blocked.status(), Some(CustomerStatus::Blocked));

    let unblocked = blocked.unblock(&client, &(), &opts).await.unwrap();
    assert_eq!(unblocked.status(), Some(CustomerStatus::Active));
}
