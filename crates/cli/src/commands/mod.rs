pub mod build;
pub mod init;
pub mod routes;
pub mod validate;

use anyhow::{Context, Result};
use folio_core::{Site, parse_site_toml};
use folio_generator::FsContentSource;
use std::path::Path;
use tracing::debug;

/// Load site.toml and open the content directory of a site
pub fn load_site(path: &Path) -> Result<(Site, FsContentSource)> {
    if !path.exists() {
        anyhow::bail!("Site directory does not exist: {}", path.display());
    }

    let site_toml_path = path.join("site.toml");
    if !site_toml_path.exists() {
        anyhow::bail!(
            "site.toml not found in {}\nRun 'folio init {}' first",
            path.display(),
            path.display()
        );
    }

    let site = parse_site_toml(&site_toml_path).context("Failed to parse site.toml")?;
    debug!(site = %site.site.name, url = %site.site.url, "loaded site.toml");
    Ok((site, FsContentSource::new(path.join("content"))))
}
