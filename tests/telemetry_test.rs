//! Global subscriber installation
//!
//! Kept in its own test binary: installing the global subscriber would
//! interfere with tests that capture logs.

use captionist::telemetry::{OutputFormat, SubscriberConfig, init_subscriber};

#[test]
fn repeated_init_is_tolerated() {
    let config = SubscriberConfig::builder()
        .output_format(OutputFormat::JsonCompact)
        .build();
    assert!(init_subscriber(config).is_ok());
    assert!(init_subscriber(SubscriberConfig::default()).is_ok());
}
