//! Open Graph image routes.
//!
//! Each content family (static pages, blog posts, projects) becomes one
//! route: a mapping from route key to [`OgImageRequest`] plus the shared
//! options every image of the family is drawn with. Rasterization happens
//! elsewhere, see [`crate::render`].

use crate::content::ContentSource;
use folio_core::pages;
use folio_core::{Collection, ContentEntry, OgConfig, OgImageRequest, Result, Rgb, blog_slug};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, warn};

/// Name of the route parameter images are served under
pub const ROUTE_PARAM: &str = "route";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFamily {
    Pages,
    Blog,
    Projects,
}

impl ContentFamily {
    pub const ALL: [ContentFamily; 3] = [
        ContentFamily::Pages,
        ContentFamily::Blog,
        ContentFamily::Projects,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContentFamily::Pages => "pages",
            ContentFamily::Blog => "blog",
            ContentFamily::Projects => "projects",
        }
    }

    /// Output directory of the family's images, relative to the site root
    pub fn prefix(self) -> &'static str {
        match self {
            ContentFamily::Pages => "og/pages",
            ContentFamily::Blog => "og/blog",
            ContentFamily::Projects => "og/projects",
        }
    }

    pub fn border_color(self, og: &OgConfig) -> Rgb {
        match self {
            ContentFamily::Pages => og.pages_color,
            ContentFamily::Blog => og.blog_color,
            ContentFamily::Projects => og.projects_color,
        }
    }
}

impl fmt::Display for ContentFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to draw one image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    pub title: String,
    pub description: String,
    pub border: Border,
    /// Top-to-bottom gradient stops
    pub background: Vec<Rgb>,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Border {
    pub color: Rgb,
    pub width: u32,
}

/// One family's key → request mapping
#[derive(Debug, Clone, Serialize)]
pub struct OgImageRoute {
    pub family: ContentFamily,
    pub param: &'static str,
    pub pages: BTreeMap<String, OgImageRequest>,
    #[serde(skip)]
    og: OgConfig,
}

impl OgImageRoute {
    /// Build a route from `(key, title, description)` triples. A repeated
    /// key replaces the earlier request.
    pub fn new<I, K, T, D>(family: ContentFamily, og: &OgConfig, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T, D)>,
        K: Into<String>,
        T: Into<String>,
        D: Into<String>,
    {
        let border_color = family.border_color(og).to_string();
        let mut pages = BTreeMap::new();

        for (key, title, description) in entries {
            let key = key.into();
            let request = OgImageRequest {
                param: ROUTE_PARAM.to_string(),
                title: title.into(),
                description: description.into(),
                border_color: border_color.clone(),
            };
            debug!(family = %family, key = %key, "og route");
            if pages.insert(key.clone(), request).is_some() {
                warn!(family = %family, key = %key, "duplicate og route key, keeping the later entry");
            }
        }

        Self {
            family,
            param: ROUTE_PARAM,
            pages,
            og: og.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Route paths relative to [`ContentFamily::prefix`], one per key
    pub fn static_paths(&self) -> Vec<String> {
        self.pages.keys().map(|key| format!("{}.png", key)).collect()
    }

    pub fn request_for_path(&self, path: &str) -> Option<&OgImageRequest> {
        let key = path.strip_suffix(".png").unwrap_or(path);
        self.pages.get(key)
    }

    /// Combine a request with the family's shared drawing options
    pub fn image_options(&self, path: &str, page: &OgImageRequest) -> ImageOptions {
        let color = page.border_color.parse().unwrap_or_else(|_| {
            warn!(path, color = %page.border_color, "unparsable border color, using family color");
            self.family.border_color(&self.og)
        });

        ImageOptions {
            title: page.title.clone(),
            description: page.description.clone(),
            border: Border {
                color,
                width: self.og.border_width,
            },
            background: self.og.background.clone(),
            width: self.og.width,
            height: self.og.height,
        }
    }

    /// `(path, options)` for every image of the route
    pub fn images(&self) -> impl Iterator<Item = (String, ImageOptions)> + '_ {
        self.pages.iter().map(|(key, page)| {
            let path = format!("{}.png", key);
            let options = self.image_options(&path, page);
            (path, options)
        })
    }
}

/// Route for the static pages, keyed by page key
pub fn pages_route(og: &OgConfig) -> OgImageRoute {
    OgImageRoute::new(
        ContentFamily::Pages,
        og,
        pages::pages().map(|(key, meta)| (key.as_str(), meta.title, meta.description)),
    )
}

/// Route for blog posts, keyed by the slug part of the entry id
pub fn blog_route(og: &OgConfig, entries: &[ContentEntry]) -> Result<OgImageRoute> {
    let keyed = published(ContentFamily::Blog, entries)
        .map(|entry| {
            let slug = blog_slug(&entry.id)?;
            Ok((slug, entry.data.title.as_str(), entry.data.description.as_str()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(OgImageRoute::new(ContentFamily::Blog, og, keyed))
}

/// Route for projects, keyed by the entry's own slug
pub fn projects_route(og: &OgConfig, entries: &[ContentEntry]) -> OgImageRoute {
    OgImageRoute::new(
        ContentFamily::Projects,
        og,
        published(ContentFamily::Projects, entries).map(|entry| {
            (
                entry.slug.as_str(),
                entry.data.title.as_str(),
                entry.data.description.as_str(),
            )
        }),
    )
}

/// Load every collection once and build the three routes
pub async fn build_routes(source: &dyn ContentSource, og: &OgConfig) -> Result<Vec<OgImageRoute>> {
    let blog = source.entries(Collection::Blog).await?;
    let projects = source.entries(Collection::Projects).await?;

    Ok(vec![
        pages_route(og),
        blog_route(og, &blog)?,
        projects_route(og, &projects),
    ])
}

fn published(
    family: ContentFamily,
    entries: &[ContentEntry],
) -> impl Iterator<Item = &ContentEntry> {
    entries.iter().filter(move |entry| {
        if entry.data.draft {
            debug!(family = %family, id = %entry.id, "skipping draft");
        }
        !entry.data.draft
    })
}
