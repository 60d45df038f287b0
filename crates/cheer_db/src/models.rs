//! Records kept by the cheer store.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DbError;

/// A push-capable device registration
///
/// Keyed by the client-chosen `installation_id`; saving is an upsert.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub installation_id: String,
    pub app_name: Option<String>,
    pub app_identifier: Option<String>,
    /// Provider token used to address this device (FCM registration token).
    pub device_token: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Installation {
    pub fn new(
        installation_id: String,
        app_name: Option<String>,
        app_identifier: Option<String>,
        device_token: Option<String>,
    ) -> Self {
        Self {
            installation_id,
            app_name,
            app_identifier,
            device_token,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Result of saving an installation
#[derive(Debug, Clone, PartialEq)]
pub struct SavedInstallation {
    pub installation: Installation,
    /// `true` when the save created the record rather than updating it.
    pub is_new_record: bool,
}

/// Server-side index entry pointing at a registered installation
///
/// Never exposed over HTTP.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallationRef {
    pub id: String,
    pub installation_id: String,
    pub app_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A stored cheer notification, either an initiator or a response
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cheer {
    pub id: String,
    pub from_user_id: String,
    pub from_name: String,
    pub from_installation_id: String,
    pub from_location: String,
    pub to_installation_id: String,
    pub message: String,
    pub has_been_responded_to: bool,
    /// Id of the cheer this one answers; `None` for initiator cheers.
    pub initiation_note_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Cheer {
    pub fn is_initiator(&self) -> bool {
        self.initiation_note_id.is_none()
    }
}

/// Fields of a cheer before the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheer {
    pub from_user_id: String,
    pub from_name: String,
    pub from_installation_id: String,
    pub from_location: String,
    pub to_installation_id: String,
    pub message: String,
    pub has_been_responded_to: bool,
    pub initiation_note_id: Option<String>,
}

/// Free-text feedback sent from the app's contact screen
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub user_id: String,
    pub installation_id: String,
    pub name: String,
    pub location_description: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedback {
    pub user_id: String,
    pub installation_id: String,
    pub name: String,
    pub location_description: String,
    pub text: String,
}

/// Current time at the precision the store keeps, so returned records equal read-back ones.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 so that text order equals time order.
pub(crate) fn timestamp_to_text(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn timestamp_from_text(text: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("invalid timestamp '{}': {}", text, e)))
}
