use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete site configuration, loaded once from site.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub site: SiteConfig,
    pub author: AuthorConfig,
    pub organization: OrganizationConfig,
    pub og: OgConfig,
}

/// Site-wide descriptive facts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute base URL, without trailing slash
    pub url: String,
    pub description: String,
    pub locale: String,
}

/// Author information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorConfig {
    pub name: String,
    pub email: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Organization published alongside the author in structured data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationConfig {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Shared options for every generated Open Graph image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OgConfig {
    pub width: u32,
    pub height: u32,
    /// Extra font files, relative to the site root
    pub fonts: Vec<PathBuf>,
    /// Top-to-bottom background gradient stops
    pub background: Vec<Rgb>,
    pub border_width: u32,
    pub pages_color: Rgb,
    pub blog_color: Rgb,
    pub projects_color: Rgb,
}

impl Default for OgConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 630,
            fonts: Vec::new(),
            background: vec![Rgb(0x0f, 0x17, 0x2a), Rgb(0x1e, 0x29, 0x3b)],
            border_width: 20,
            pages_color: Rgb(0x38, 0xbd, 0xf8),
            blog_color: Rgb(0xa7, 0x8b, 0xfa),
            projects_color: Rgb(0x34, 0xd3, 0x99),
        }
    }
}

/// An sRGB color, written as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::ConfigParse(format!("Invalid color '{}', expected #rrggbb", s));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A content collection read from the content source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Blog,
    Projects,
}

impl Collection {
    pub const ALL: [Collection; 2] = [Collection::Blog, Collection::Projects];

    /// Directory name of the collection
    pub fn name(self) -> &'static str {
        match self {
            Collection::Blog => "blog",
            Collection::Projects => "projects",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One entry of a content collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentEntry {
    /// File or folder name without extension
    pub id: String,
    pub slug: String,
    pub data: EntryData,
}

/// Front matter of a content entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryData {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub draft: bool,
    /// Front matter keys not modelled above
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, toml::Value>,
}

impl ContentEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            slug: id.clone(),
            id,
            data: EntryData {
                title: title.into(),
                description: description.into(),
                ..EntryData::default()
            },
        }
    }
}

/// Request for one generated Open Graph image
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OgImageRequest {
    /// Name of the route parameter the image is served under
    pub param: String,
    pub title: String,
    pub description: String,
    pub border_color: String,
}
