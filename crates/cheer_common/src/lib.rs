// --- File: crates/cheer_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{CheerError, HttpStatusCode};

// Re-export HTTP utilities for easier access
pub use http::{client::create_client, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::init_with_config;

pub use services::{BoxFuture, PushPayload, PushRequest, PushService, BADGE_INCREMENT};
