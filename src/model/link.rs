use crate::url::domain_of;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a link stays on the source page's domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Internal,
    External,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
        }
    }
}

/// An outbound hyperlink extracted from a source page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute URL of the link target
    pub url: String,

    /// The anchor's `title` attribute (empty when absent)
    pub title: String,

    pub description: Option<String>,

    /// The page the link was found on
    pub source_url: String,

    /// Domain of `url`; never empty when `url` has a host
    pub domain: String,

    pub link_type: LinkType,

    /// Anchor text, whitespace-trimmed
    pub link_text: String,

    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link found on `source_url`
    ///
    /// The domain is derived from `url` and the link type from comparing it with
    /// the source page's domain.
    pub fn new(url: impl Into<String>, source_url: impl Into<String>) -> Self {
        let url = url.into();
        let source_url = source_url.into();
        let domain = domain_of(&url);
        let link_type = if domain == domain_of(&source_url) {
            LinkType::Internal
        } else {
            LinkType::External
        };

        Self {
            url,
            title: String::new(),
            description: None,
            source_url,
            domain,
            link_type,
            link_text: String::new(),
            created_at: Utc::now(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_link_text(mut self, text: impl Into<String>) -> Self {
        self.link_text = text.into();
        self
    }

    /// Overrides the derived domain; an empty value keeps the derived one
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        let domain = domain.into();
        if !domain.is_empty() {
            self.domain = domain;
        }
        self
    }

    pub fn with_link_type(mut self, link_type: LinkType) -> Self {
        self.link_type = link_type;
        self
    }

    pub fn is_external(&self) -> bool {
        self.link_type == LinkType::External
    }
}
