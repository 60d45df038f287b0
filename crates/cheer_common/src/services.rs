// --- File: crates/cheer_common/src/services.rs ---
//! Service abstractions for external services.
//!
//! These traits decouple the cheer pipeline from the concrete push provider so that
//! the backend can pick one at startup and tests can substitute recording fakes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Badge instruction asking the client to bump its badge count by one.
pub const BADGE_INCREMENT: &str = "Increment";

/// Content of a push notification, independent of the delivery provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    /// Notification title.
    pub title: String,
    /// Notification body (the alert text).
    pub body: String,
    /// Name of a sound file bundled with the client app.
    pub sound: Option<String>,
    /// Badge instruction, e.g. [`BADGE_INCREMENT`].
    pub badge: Option<String>,
    /// Arbitrary key/value data handed to the client app.
    pub data: HashMap<String, String>,
}

/// A push addressed to a single registered installation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushRequest {
    /// Installation id selecting the target device.
    pub installation_id: String,
    pub payload: PushPayload,
}

/// A trait for push notification delivery.
///
/// Delivery is best effort; success or failure is reported per call, not per device.
pub trait PushService: Send + Sync {
    /// Error type returned by push operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Sends one push and returns the provider's message id.
    fn send(&self, request: PushRequest) -> BoxFuture<'_, String, Self::Error>;
}

impl<T: PushService + ?Sized> PushService for Arc<T> {
    type Error = T::Error;

    fn send(&self, request: PushRequest) -> BoxFuture<'_, String, Self::Error> {
        (**self).send(request)
    }
}
