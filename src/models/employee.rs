use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maker account created by the logged-in checker.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Maker {
    pub id: Uuid,
    pub email: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Pending,
    Approved,
    Declined,
}

impl EmployeeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EmployeeStatus::Pending => "pending",
            EmployeeStatus::Approved => "approved",
            EmployeeStatus::Declined => "declined",
        }
    }

    /// Verb shown on the review buttons.
    pub fn action_label(self) -> &'static str {
        match self {
            EmployeeStatus::Pending => "reset",
            EmployeeStatus::Approved => "approve",
            EmployeeStatus::Declined => "decline",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee record.
///
/// The list endpoint and the upload/status endpoints use slightly different
/// shapes (`uploaded_by` vs `uploaded_by_email`); both decode here.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Employee {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub status: EmployeeStatus,
    #[serde(default, alias = "uploaded_by_email")]
    pub uploaded_by: Option<String>,
    #[serde(default, alias = "checked_by_email")]
    pub checked_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub photo_url: String,
    #[serde(default)]
    pub resume_url: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_deref().and_then(parse_timestamp)
    }

    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }
}

/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.f]` form the backend
/// emits when it runs without time zone support.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StatusUpdateRequest {
    pub status: EmployeeStatus,
}

/// File picked in the browser, already read into memory so the request can
/// be replayed after a token refresh.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmployeeUpload {
    pub first_name: String,
    pub last_name: String,
    pub photo: Attachment,
    pub resume: Attachment,
}
