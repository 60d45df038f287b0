//! Inputs of the cheer functions
//!
//! Function calls arrive as a flat map of string parameters. Each input type pulls the
//! keys it needs and rejects the call when one is missing or blank.

use crate::error::CheerServiceError;
use serde::Deserialize;
use std::collections::HashMap;

/// Raw function-call parameters
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FunctionParams(pub HashMap<String, String>);

impl FunctionParams {
    pub fn required(&self, key: &str) -> Result<String, CheerServiceError> {
        match self.0.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value.clone()),
            _ => Err(CheerServiceError::InvalidRequest(format!(
                "missing parameter: {}",
                key
            ))),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FunctionParams {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Who is sending: the fields shared by both cheer functions
#[derive(Debug, Clone, PartialEq)]
pub struct Sender {
    pub from_user_id: String,
    pub from_installation_id: String,
    pub from_name: String,
    pub from_location: String,
}

impl TryFrom<&FunctionParams> for Sender {
    type Error = CheerServiceError;

    fn try_from(params: &FunctionParams) -> Result<Self, Self::Error> {
        Ok(Self {
            from_user_id: params.required("fromUserId")?,
            from_installation_id: params.required("fromInstallationId")?,
            from_name: params.required("fromName")?,
            from_location: params.required("fromLocation")?,
        })
    }
}

/// Input of `returnCheer`
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnCheerInput {
    pub original_note_id: String,
    pub sender: Sender,
}

impl TryFrom<&FunctionParams> for ReturnCheerInput {
    type Error = CheerServiceError;

    fn try_from(params: &FunctionParams) -> Result<Self, Self::Error> {
        Ok(Self {
            original_note_id: params.required("originalNoteId")?,
            sender: Sender::try_from(params)?,
        })
    }
}
