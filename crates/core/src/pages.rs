use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Title and description of a static page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub title: &'static str,
    pub description: &'static str,
}

/// The fixed set of static pages on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticPageKey {
    Home,
    About,
    Blog,
    Projects,
}

impl StaticPageKey {
    /// Every key, in navigation order
    pub const ALL: [StaticPageKey; 4] = [
        StaticPageKey::Home,
        StaticPageKey::About,
        StaticPageKey::Blog,
        StaticPageKey::Projects,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StaticPageKey::Home => "home",
            StaticPageKey::About => "about",
            StaticPageKey::Blog => "blog",
            StaticPageKey::Projects => "projects",
        }
    }

    pub fn metadata(self) -> &'static PageMetadata {
        page_metadata(self)
    }
}

impl fmt::Display for StaticPageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaticPageKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StaticPageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::KeyNotFound(s.to_string()))
    }
}

const HOME: PageMetadata = PageMetadata {
    title: "Home",
    description: "Software engineer writing about systems, tools and the craft of building software.",
};

const ABOUT: PageMetadata = PageMetadata {
    title: "About",
    description: "Background, experience and the things I care about when building software.",
};

const BLOG: PageMetadata = PageMetadata {
    title: "Blog",
    description: "Notes, essays and write-ups on programming, tooling and design.",
};

const PROJECTS: PageMetadata = PageMetadata {
    title: "Projects",
    description: "Open source work and side projects, with links to source and write-ups.",
};

/// Look up the metadata for a static page
pub fn page_metadata(key: StaticPageKey) -> &'static PageMetadata {
    match key {
        StaticPageKey::Home => &HOME,
        StaticPageKey::About => &ABOUT,
        StaticPageKey::Blog => &BLOG,
        StaticPageKey::Projects => &PROJECTS,
    }
}

/// Iterate the registry in navigation order
pub fn pages() -> impl Iterator<Item = (StaticPageKey, &'static PageMetadata)> {
    StaticPageKey::ALL
        .into_iter()
        .map(|key| (key, page_metadata(key)))
}
