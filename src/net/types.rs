//! Wire payloads for the screen and status-board channels.
//!
//! DESIGN
//! ======
//! The screen channel has no real protocol: any message means the screen's
//! assignment changed and the page must reload. That is spelled out as a
//! one-variant enum so a second message kind has an obvious home. The
//! broadcast channel carries typed status envelopes; unknown types decode to
//! `None` so newer servers do not break older dashboards.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ClientError;

/// Envelope `type` of a per-screen connection flag broadcast.
pub const SCREEN_STATUS_UPDATE: &str = "screen_status_update";

/// What a screen is currently assigned to show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Free text rendered by the responsive text page.
    Text,
    /// An arbitrary external URL.
    Url,
    /// The server's idle page for the screen.
    #[default]
    Default,
    /// A hosted video file.
    Video,
    /// A hosted picture.
    Picture,
}

/// Screen assignment as pushed by the server when it changes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenContent {
    #[serde(rename = "type")]
    pub kind: ContentKind,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub video: String,
    #[serde(default)]
    pub picture: String,
}

impl ScreenContent {
    /// Idle page of `screen_id` under `base_url` (which ends in `/`).
    pub fn default_url(base_url: &str, screen_id: &str) -> String {
        format!("{base_url}default/{screen_id}")
    }

    /// Page the content window should show for this assignment.
    pub fn content_url(&self, base_url: &str, screen_id: &str) -> String {
        match self.kind {
            ContentKind::Text => format!("{base_url}responsive/{}", self.text),
            ContentKind::Url => self.url.clone(),
            ContentKind::Video => format!("{base_url}video/{}", self.video),
            ContentKind::Picture => format!("{base_url}picture/{}", self.picture),
            ContentKind::Default => Self::default_url(base_url, screen_id),
        }
    }
}

/// A message received on a screen's control channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScreenMessage {
    /// The screen's assigned content changed. `content` is the decoded
    /// assignment when the payload carried one.
    ContentChanged { content: Option<ScreenContent> },
}

impl ScreenMessage {
    /// Interpret a raw payload. Never fails: undecodable payloads still mean
    /// `ContentChanged`.
    pub fn from_payload(payload: &str) -> Self {
        Self::ContentChanged { content: serde_json::from_str(payload).ok() }
    }
}

/// Connection flag of one screen, as fanned out to dashboards.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ScreenStatusUpdate {
    #[serde(deserialize_with = "deserialize_screen_id")]
    pub screen_id: String,
    pub connected: bool,
}

/// A recognized event on the status broadcast channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusEvent {
    ScreenStatusUpdate(ScreenStatusUpdate),
}

impl StatusEvent {
    /// Decode a broadcast payload.
    ///
    /// Returns `Ok(None)` for envelope types this client does not know, and
    /// an error when the payload is not JSON, has no `type`, or a known type
    /// is missing its fields.
    pub fn parse(payload: &str) -> Result<Option<Self>, ClientError> {
        let value: serde_json::Value = serde_json::from_str(payload)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| serde_json::Error::custom("missing envelope type"))?;

        if kind != SCREEN_STATUS_UPDATE {
            return Ok(None);
        }
        let update = serde_json::from_value::<ScreenStatusUpdate>(value)?;
        Ok(Some(Self::ScreenStatusUpdate(update)))
    }
}

/// Screen ids arrive as strings from some server paths and integers from others.
fn deserialize_screen_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(id) if !id.is_empty() => Ok(id),
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int.to_string());
            }
            if let Some(int) = number.as_u64() {
                return Ok(int.to_string());
            }
            Err(D::Error::custom("expected integer screen id"))
        }
        _ => Err(D::Error::custom("expected screen id string or integer")),
    }
}
