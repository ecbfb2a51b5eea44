use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A page believed to reference a given link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Backlink {
    pub backlink_url: String,
    pub backlink_title: String,
    pub backlink_domain: String,
    pub anchor_text: String,
    pub created_at: DateTime<Utc>,
}

impl Backlink {
    pub fn new(
        backlink_url: impl Into<String>,
        backlink_title: impl Into<String>,
        backlink_domain: impl Into<String>,
        anchor_text: impl Into<String>,
    ) -> Self {
        Self {
            backlink_url: backlink_url.into(),
            backlink_title: backlink_title.into(),
            backlink_domain: backlink_domain.into(),
            anchor_text: anchor_text.into(),
            created_at: Utc::now(),
        }
    }
}
