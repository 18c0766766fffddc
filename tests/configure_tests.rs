//! Process-wide configuration.
//!
//! Kept in its own test binary: `configure` can succeed only once per
//! process.

use std::time::Duration;

use frame_api::{configure, global_config, ApiKey, ConfigError, FrameClient, FrameConfig};

#[test]
fn test_configure_installs_process_defaults_once() {
    let config = FrameConfig::builder()
        .api_key(ApiKey::new("process_key").unwrap())
        .read_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    configure(config).unwrap();
    assert_eq!(global_config().api_key().unwrap().as_ref(), "process_key");

    let client = FrameClient::builder()
        .open_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    assert_eq!(client.config().api_key().unwrap().as_ref(), "process_key");
    assert_eq!(client.config().read_timeout(), Duration::from_secs(5));
    assert_eq!(client.config().open_timeout(), Duration::from_secs(1));

    let default = FrameClient::default_client().unwrap();
    assert_eq!(default.config().api_key().unwrap().as_ref(), "process_key");

    let again = configure(FrameConfig::default());
    assert!(matches!(again, Err(ConfigError::AlreadyConfigured)));
}
