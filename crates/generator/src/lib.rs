// Build-time generation: content loading, UI variant tables, OG image
// routes and head metadata

pub mod components;
pub mod content;
pub mod merge;
pub mod og;
pub mod render;
pub mod seo;
pub mod variants;

pub use content::{ContentSource, FsContentSource};
pub use merge::{ClassMerge, TailwindMerge};
pub use og::{ContentFamily, ImageOptions, OgImageRoute, build_routes};
pub use render::{ImageGenerator, ResvgRenderer, SvgRenderer, write_route};
pub use variants::{Selection, VariantSpec};

use folio_core::OgConfig;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct GeneratedSite {
    pub routes: Vec<OgImageRoute>,
    pub images: Vec<PathBuf>, // written files
}

/// Build every OG route from `source` and render its images into `out_dir`
pub async fn generate_site(
    source: &dyn ContentSource,
    og: &OgConfig,
    generator: &dyn ImageGenerator,
    out_dir: &Path,
) -> anyhow::Result<GeneratedSite> {
    let routes = build_routes(source, og).await?;

    let mut images = Vec::new();
    for route in &routes {
        images.extend(write_route(route, generator, out_dir)?);
    }

    Ok(GeneratedSite { routes, images })
}
