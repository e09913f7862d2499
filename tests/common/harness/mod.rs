//! Test harness for integration tests.
//!
//! Provides isolated database environments for driving the `scribe`
//! binary with `assert_cmd`, and an in-process [`TestApp`] that sends
//! requests straight to the router while carrying the session cookie.

mod app;
mod command;
mod env;

// Re-export main types for external use
#[allow(unused_imports)]
pub use app::{TEST_PASSWORD, TestApp, TestResponse};
#[allow(unused_imports)]
pub use command::ScribeCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
