//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::time::Duration;

use frame_api::{ApiBase, ApiKey, FrameClient};
use serde_json::{json, Value};
use wiremock::MockServer;

pub const CUSTOMER_ID: &str = "55435398-ec47-4bb4-ac9e-64031481cf48";
pub const SECOND_CUSTOMER_ID: &str = "66543210-ab12-3cd4-ef56-789012345678";
pub const TEST_API_KEY: &str = "frame_test_key";

/// Creates a client that talks to `server`.
pub fn client_for(server: &MockServer) -> FrameClient {
    FrameClient::builder()
        .api_key(ApiKey::new(TEST_API_KEY).unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

/// Creates a client for `server` with a short read timeout.
pub fn client_with_timeout(server: &MockServer, timeout: Duration) -> FrameClient {
    FrameClient::builder()
        .api_key(ApiKey::new(TEST_API_KEY).unwrap())
        .api_base(ApiBase::new(server.uri()).unwrap())
        .read_timeout(timeout)
        .build()
        .unwrap()
}

pub fn customer_json() -> Value {
    json!({
        "id": CUSTOMER_ID,
        "object": "customer",
        "name": "John",
        "email": "john@example.com",
        "phone": "+12345678900",
        "status": "active",
        "livemode": false,
        "created": 1_700_000_000,
        "updated": 1_700_000_500,
        "metadata": {"tier": "gold"},
        "billing_address": {
            "line_1": "123 Main St",
            "city": "Austin",
            "state": "TX",
            "country": "US",
            "postal_code": "78701"
        },
        "shipping_address": null
    })
}

pub fn customer_with(overrides: Value) -> Value {
    let mut customer = customer_json();
    if let (Value::Object(base), Value::Object(extra)) = (&mut customer, overrides) {
        base.extend(extra);
    }
    customer
}

pub fn second_customer_json() -> Value {
    json!({
        "id": SECOND_CUSTOMER_ID,
        "object": "customer",
        "name": "Jane",
        "email": "jane@example.com",
        "status": "active"
    })
}

pub fn customers_list_json(has_more: bool, page: u32) -> Value {
    json!({
        "data": [customer_json(), second_customer_json()],
        "meta": {
            "has_more": has_more,
            "page": page,
            "url": "/v1/customers?per_page=2"
        }
    })
}
