//! Head metadata for pages and entries: title, description, canonical URL,
//! Open Graph / Twitter tags and schema.org JSON-LD.

use crate::og::ContentFamily;
use folio_core::{AuthorConfig, OrganizationConfig, Site, StaticPageKey, blog_slug};
use folio_core::{ContentEntry, Result};
use serde_json::{Value, json};

/// Everything a page's `<head>` needs
#[derive(Debug, Clone, PartialEq)]
pub struct PageHead {
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    pub og_image: String,
    pub og_type: &'static str,
    pub site_name: String,
    pub locale: String,
    pub twitter_handle: Option<String>,
}

impl PageHead {
    /// Head for a static page
    pub fn for_page(site: &Site, key: StaticPageKey) -> Self {
        let meta = key.metadata();
        let title = match key {
            StaticPageKey::Home => site.site.name.clone(),
            _ => format!("{} | {}", meta.title, site.site.name),
        };
        let path = match key {
            StaticPageKey::Home => "/".to_string(),
            _ => format!("/{}/", key.as_str()),
        };

        Self::build(
            site,
            title,
            meta.description.to_string(),
            &path,
            og_image_url(site, ContentFamily::Pages, key.as_str()),
            "website",
        )
    }

    /// Head for a blog post or project entry
    pub fn for_entry(site: &Site, family: ContentFamily, entry: &ContentEntry) -> Result<Self> {
        let key = match family {
            ContentFamily::Blog => blog_slug(&entry.id)?,
            _ => entry.slug.as_str(),
        };
        let path = format!("/{}/{}/", family.name(), key);

        Ok(Self::build(
            site,
            format!("{} | {}", entry.data.title, site.site.name),
            entry.data.description.clone(),
            &path,
            og_image_url(site, family, key),
            if family == ContentFamily::Blog {
                "article"
            } else {
                "website"
            },
        ))
    }

    fn build(
        site: &Site,
        title: String,
        description: String,
        path: &str,
        og_image: String,
        og_type: &'static str,
    ) -> Self {
        Self {
            title,
            description,
            canonical_url: format!("{}{}", site.site.url, path),
            og_image,
            og_type,
            site_name: site.site.name.clone(),
            locale: site.site.locale.clone(),
            twitter_handle: site
                .author
                .twitter
                .as_ref()
                .map(|h| format!("@{}", h.trim_start_matches('@'))),
        }
    }

    /// Render as `<title>`, `<link>` and `<meta>` tags, one per line
    pub fn render(&self) -> String {
        let mut tags = vec![
            format!("<title>{}</title>", html_escape(&self.title)),
            meta_name("description", &self.description),
            format!(
                r#"<link rel="canonical" href="{}">"#,
                html_escape(&self.canonical_url)
            ),
            meta_property("og:type", self.og_type),
            meta_property("og:site_name", &self.site_name),
            meta_property("og:locale", &self.locale),
            meta_property("og:title", &self.title),
            meta_property("og:description", &self.description),
            meta_property("og:url", &self.canonical_url),
            meta_property("og:image", &self.og_image),
            meta_name("twitter:card", "summary_large_image"),
        ];
        if let Some(handle) = &self.twitter_handle {
            tags.push(meta_name("twitter:creator", handle));
        }
        tags.join("\n")
    }
}

/// Absolute URL of the generated OG image for `key`
pub fn og_image_url(site: &Site, family: ContentFamily, key: &str) -> String {
    format!("{}/{}/{}.png", site.site.url, family.prefix(), key)
}

/// schema.org `Person` for the author
pub fn person_json_ld(author: &AuthorConfig) -> Value {
    let same_as: Vec<String> = [
        author
            .github
            .as_ref()
            .map(|h| format!("https://github.com/{}", h)),
        author
            .twitter
            .as_ref()
            .map(|h| format!("https://twitter.com/{}", h.trim_start_matches('@'))),
        author
            .linkedin
            .as_ref()
            .map(|h| format!("https://www.linkedin.com/in/{}", h)),
    ]
    .into_iter()
    .flatten()
    .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": author.name,
        "email": format!("mailto:{}", author.email),
        "url": author.url,
        "sameAs": same_as,
    })
}

/// schema.org `Organization`
pub fn organization_json_ld(org: &OrganizationConfig) -> Value {
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "Organization",
        "name": org.name,
        "url": org.url,
    });
    if let Some(logo) = &org.logo {
        value["logo"] = json!(logo);
    }
    value
}

fn meta_name(name: &str, content: &str) -> String {
    format!(
        r#"<meta name="{}" content="{}">"#,
        name,
        html_escape(content)
    )
}

fn meta_property(property: &str, content: &str) -> String {
    format!(
        r#"<meta property="{}" content="{}">"#,
        property,
        html_escape(content)
    )
}

/// HTML-escape a string for text and attribute positions
fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::parse_site_toml_str;

    fn site() -> Site {
        parse_site_toml_str(
            r##"
[site]
name = "Jane Doe"
url = "https://jane.example.com"
description = "Personal site"

[author]
name = "Jane Doe"
email = "jane@example.com"
url = "https://jane.example.com"
twitter = "@janedoe"
github = "janedoe"

[organization]
name = "Doe Labs"
url = "https://doelabs.example.com"
logo = "https://doelabs.example.com/logo.png"
"##,
        )
        .unwrap()
    }

    #[test]
    fn test_home_head() {
        let head = PageHead::for_page(&site(), StaticPageKey::Home);
        assert_eq!(head.title, "Jane Doe");
        assert_eq!(head.canonical_url, "https://jane.example.com/");
        assert_eq!(
            head.og_image,
            "https://jane.example.com/og/pages/home.png"
        );
        assert_eq!(head.twitter_handle.as_deref(), Some("@janedoe"));
    }

    #[test]
    fn test_static_page_head() {
        let head = PageHead::for_page(&site(), StaticPageKey::About);
        assert_eq!(head.title, "About | Jane Doe");
        assert_eq!(head.canonical_url, "https://jane.example.com/about/");
        assert_eq!(head.description, StaticPageKey::About.metadata().description);
    }

    #[test]
    fn test_blog_entry_head() {
        let entry = ContentEntry::new("2023-01-15-my-post", "My \"Post\"", "About <things>");
        let head = PageHead::for_entry(&site(), ContentFamily::Blog, &entry).unwrap();
        assert_eq!(head.canonical_url, "https://jane.example.com/blog/my-post/");
        assert_eq!(head.og_image, "https://jane.example.com/og/blog/my-post.png");
        assert_eq!(head.og_type, "article");

        let html = head.render();
        assert!(html.contains("<title>My &quot;Post&quot; | Jane Doe</title>"));
        assert!(html.contains(r#"<meta name="description" content="About &lt;things&gt;">"#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
        assert!(html.contains(r#"<meta name="twitter:creator" content="@janedoe">"#));
    }

    #[test]
    fn test_blog_entry_head_malformed_id() {
        let entry = ContentEntry::new("post", "Post", "D");
        assert!(PageHead::for_entry(&site(), ContentFamily::Blog, &entry).is_err());
    }

    #[test]
    fn test_project_entry_head_uses_slug() {
        let mut entry = ContentEntry::new("tool", "Tool", "D");
        entry.slug = "my-tool".into();
        let head = PageHead::for_entry(&site(), ContentFamily::Projects, &entry).unwrap();
        assert_eq!(head.canonical_url, "https://jane.example.com/projects/my-tool/");
        assert_eq!(head.og_type, "website");
    }

    #[test]
    fn test_person_json_ld() {
        let ld = person_json_ld(&site().author);
        assert_eq!(ld["@type"], "Person");
        assert_eq!(ld["email"], "mailto:jane@example.com");
        assert_eq!(
            ld["sameAs"],
            json!(["https://github.com/janedoe", "https://twitter.com/janedoe"])
        );
    }

    #[test]
    fn test_organization_json_ld() {
        let ld = organization_json_ld(&site().organization);
        assert_eq!(ld["@type"], "Organization");
        assert_eq!(ld["logo"], "https://doelabs.example.com/logo.png");
    }
}
