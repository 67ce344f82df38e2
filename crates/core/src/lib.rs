pub mod blog;
pub mod config;
pub mod error;
pub mod pages;
pub mod types;

pub use blog::{BlogEntryId, blog_date, blog_slug};
pub use config::{parse_site_toml, parse_site_toml_str};
pub use error::{Error, Result};
pub use pages::{PageMetadata, StaticPageKey, page_metadata};
pub use types::*;
