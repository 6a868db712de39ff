// tests/logging.rs
//
// Runs in its own process, so nothing else has claimed the global subscriber.

use podium_predictor::logging::init_tracing;

#[test]
fn server_subscriber_is_installed_once() {
    init_tracing().expect("first install owns the global subscriber");
    assert!(init_tracing().is_err(), "second install must be rejected");
    tracing::info!(target: "podium_predictor", "subscriber active");
}
