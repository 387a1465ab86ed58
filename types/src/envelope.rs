//! The response envelope every catalog endpoint answers with.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pagination::PaginationInfo;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub timestamp: DateTime<Utc>,
    pub is_error: bool,
    pub message: String,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            timestamp: Utc::now(),
            is_error: false,
            message: message.into(),
            data,
            pagination: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            is_error: true,
            message: message.into(),
            data: None,
            pagination: None,
        }
    }

    #[must_use]
    pub const fn with_pagination(mut self, pagination: PaginationInfo) -> Self {
        self.pagination = Some(pagination);
        self
    }
}
