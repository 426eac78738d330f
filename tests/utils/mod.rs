pub mod match_builder;
pub mod mocks;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use match_builder::MatchBuilder;
#[allow(unused_imports)]
pub use mocks::RecordingNotificationSink;
#[allow(unused_imports)]
pub use setup::{TestSetup, TestSetupBuilder, HOME, SEASON, VISITORS};
