//! URL handling helpers
//!
//! Domain extraction is the single notion of "site identity" used by the link
//! extractor (internal/external classification) and the in-domain crawler.

mod domain;

pub use domain::{domain_of, extract_domain, site_root};
