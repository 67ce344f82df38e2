use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    author: AuthorConfig,
    organization: OrganizationConfig,
    #[serde(default)]
    og: RawOgConfig,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    name: String,
    url: String,
    description: String,
    #[serde(default = "default_locale")]
    locale: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawOgConfig {
    width: Option<u32>,
    height: Option<u32>,
    #[serde(default)]
    fonts: Vec<String>, // Convert to PathBuf
    background: Option<Vec<Rgb>>,
    border_width: Option<u32>,
    pages_color: Option<Rgb>,
    blog_color: Option<Rgb>,
    projects_color: Option<Rgb>,
}

fn default_locale() -> String {
    "en_US".to_string()
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<Site> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<Site> {
    let raw: RawConfig = toml::from_str(content)?;

    validate_url(&raw.site.url, "site.url")?;
    validate_url(&raw.author.url, "author.url")?;
    validate_url(&raw.organization.url, "organization.url")?;

    let defaults = OgConfig::default();
    let fonts = raw
        .og
        .fonts
        .iter()
        .map(|f| validate_path(f, "og.fonts"))
        .collect::<Result<Vec<_>>>()?;

    let background = raw.og.background.unwrap_or(defaults.background);
    if background.is_empty() {
        return Err(Error::ConfigParse(
            "og.background needs at least one color".to_string(),
        ));
    }

    let og = OgConfig {
        width: raw.og.width.unwrap_or(defaults.width),
        height: raw.og.height.unwrap_or(defaults.height),
        fonts,
        background,
        border_width: raw.og.border_width.unwrap_or(defaults.border_width),
        pages_color: raw.og.pages_color.unwrap_or(defaults.pages_color),
        blog_color: raw.og.blog_color.unwrap_or(defaults.blog_color),
        projects_color: raw.og.projects_color.unwrap_or(defaults.projects_color),
    };
    if og.width == 0 || og.height == 0 {
        return Err(Error::ConfigParse(format!(
            "Invalid og image size {}x{}",
            og.width, og.height
        )));
    }

    Ok(Site {
        site: SiteConfig {
            url: raw.site.url.trim_end_matches('/').to_string(),
            name: raw.site.name,
            description: raw.site.description,
            locale: raw.site.locale,
        },
        author: raw.author,
        organization: raw.organization,
        og,
    })
}

fn validate_url(url: &str, field_name: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(Error::ConfigParse(format!(
            "'{}' must be an absolute http(s) URL, got '{}'",
            field_name, url
        )))
    }
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so that
/// site.toml cannot point outside the site directory.
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    if path.components().any(|c| c == Component::ParentDir) {
        return Err(Error::ConfigParse(format!(
            "Parent directory references (..) not allowed in '{}': '{}'",
            field_name, path_str
        )));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r##"
[site]
name = "Jane Doe"
url = "https://jane.example.com/"
description = "Personal site"

[author]
name = "Jane Doe"
email = "jane@example.com"
url = "https://jane.example.com"
github = "janedoe"

[organization]
name = "Doe Labs"
url = "https://doelabs.example.com"
"##;

    #[test]
    fn test_parse_minimal_config() {
        let site = parse_site_toml_str(MINIMAL).unwrap();
        assert_eq!(site.site.name, "Jane Doe");
        assert_eq!(site.site.url, "https://jane.example.com");
        assert_eq!(site.site.locale, "en_US");
        assert_eq!(site.author.github.as_deref(), Some("janedoe"));
        assert!(site.author.twitter.is_none());
        assert_eq!(site.og.width, 1200);
        assert_eq!(site.og.height, 630);
        assert_eq!(site.og.blog_color, OgConfig::default().blog_color);
    }

    #[test]
    fn test_parse_og_overrides() {
        let toml = format!(
            r##"{}
[og]
width = 800
height = 418
fonts = ["fonts/Inter-Bold.ttf"]
background = ["#000000"]
blog_color = "#ff6b35"
"##,
            MINIMAL
        );
        let site = parse_site_toml_str(&toml).unwrap();
        assert_eq!(site.og.width, 800);
        assert_eq!(site.og.fonts, vec![PathBuf::from("fonts/Inter-Bold.ttf")]);
        assert_eq!(site.og.background, vec![Rgb(0, 0, 0)]);
        assert_eq!(site.og.blog_color, Rgb(0xff, 0x6b, 0x35));
        assert_eq!(site.og.pages_color, OgConfig::default().pages_color);
    }

    #[test]
    fn test_rejects_relative_url() {
        let toml = MINIMAL.replace("https://jane.example.com/", "jane.example.com");
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("site.url"));
    }

    #[test]
    fn test_rejects_bad_color() {
        let toml = format!("{}\n[og]\npages_color = \"blue\"\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_rejects_font_path_traversal() {
        let toml = format!("{}\n[og]\nfonts = [\"../../etc/passwd\"]\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("Parent directory references"));

        let toml = format!("{}\n[og]\nfonts = [\"/usr/share/fonts/a.ttf\"]\n", MINIMAL);
        let err = parse_site_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("Absolute paths not allowed"));
    }

    #[test]
    fn test_rejects_zero_size_and_empty_background() {
        let toml = format!("{}\n[og]\nwidth = 0\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());

        let toml = format!("{}\n[og]\nbackground = []\n", MINIMAL);
        assert!(parse_site_toml_str(&toml).is_err());
    }

    #[test]
    fn test_missing_section_is_config_error() {
        let err = parse_site_toml_str("[site]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }
}
