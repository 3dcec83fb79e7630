// src/models/update.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::{not_blank, record_timestamp};
use crate::errors::GalleryError;

pub const DEFAULT_CATEGORY: &str = "general";

/// Organizer news post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Update {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: String,
    pub date: DateTime<Utc>,
}

/// Body of `POST /api/updates`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateUpdateRequest {
    #[validate(required, custom = "not_blank")]
    pub title: Option<String>,
    #[validate(required, custom = "not_blank")]
    pub content: Option<String>,
    pub category: Option<String>,
}

impl Update {
    pub fn new(req: CreateUpdateRequest) -> Result<Self, GalleryError> {
        req.validate().map_err(|_| {
            GalleryError::ValidationError("Title and content required".to_string())
        })?;

        let category = req
            .category
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        Ok(Update {
            id: Uuid::new_v4(),
            title: req.title.unwrap_or_default().trim().to_string(),
            content: req.content.unwrap_or_default().trim().to_string(),
            category,
            date: record_timestamp(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_defaults_category() {
        let req = CreateUpdateRequest {
            title: Some(" Save the Date ".to_string()),
            content: Some("See you in June!".to_string()),
            category: None,
        };
        let update = Update::new(req).unwrap();

        assert_eq!(update.title, "Save the Date");
        assert_eq!(update.content, "See you in June!");
        assert_eq!(update.category, "general");
        assert_eq!(update.date.timestamp_subsec_nanos() % 1000, 0);
    }

    #[test]
    fn test_update_requires_title_and_content() {
        let no_title = CreateUpdateRequest {
            title: None,
            content: Some("body".to_string()),
            category: Some("travel".to_string()),
        };
        assert!(Update::new(no_title).is_err());

        let blank_content = CreateUpdateRequest {
            title: Some("Shuttle".to_string()),
            content: Some("  ".to_string()),
            category: None,
        };
        assert!(Update::new(blank_content).is_err());
    }
}
