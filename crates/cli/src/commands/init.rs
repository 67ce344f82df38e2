use anyhow::{Context, Result};
use chrono::Local;
use folio_core::parse_site_toml_str;
use std::fs;
use std::path::{Path, PathBuf};

/// Escape a string for safe inclusion in a TOML basic string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Validate email format
/// Checks for basic RFC 5322 shape without full regex
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if domain.is_empty() || domain.len() > 255 || !domain.contains('.') {
        return false;
    }
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
        || domain.contains("..")
    {
        return false;
    }

    // TLD of at least 2 chars
    domain
        .rsplit_once('.')
        .is_some_and(|(_, tld)| tld.len() >= 2)
}

/// Initialize a new site directory.
///
/// Creates `site.toml`, a dated hello-world post under `content/blog/` and
/// an example project under `content/projects/`. Refuses to overwrite an
/// existing `site.toml`.
pub async fn run(
    path: PathBuf,
    name: Option<String>,
    url: Option<String>,
    email: Option<String>,
) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml_path = path.join("site.toml");
    if site_toml_path.exists() {
        anyhow::bail!(
            "site.toml already exists at {}\nHint: Delete it first or use a different directory",
            site_toml_path.display()
        );
    }

    fs::create_dir_all(path.join("content/blog")).context("Failed to create content/blog")?;
    fs::create_dir_all(path.join("content/projects"))
        .context("Failed to create content/projects")?;

    generate_site_toml(&path, name.as_deref(), url.as_deref(), email.as_deref())?;
    let post = generate_sample_content(&path)?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit this to set your name, URL, socials");
    println!("  └── content/");
    println!("      ├── blog/");
    println!("      │   └── {}", post);
    println!("      └── projects/");
    println!("          └── example-project.md");

    println!("\nNext steps:");
    println!("  1. Edit site.toml");
    println!("  2. Check content: folio validate {}", path.display());
    println!(
        "  3. Render images: folio build {} --output dist",
        path.display()
    );

    Ok(())
}

fn generate_site_toml(
    base: &Path,
    name: Option<&str>,
    url: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    if let Some(e) = email
        && !is_valid_email(e)
    {
        anyhow::bail!("Invalid email format: '{}'", e);
    }
    if let Some(u) = url
        && !(u.starts_with("https://") || u.starts_with("http://"))
    {
        anyhow::bail!("Invalid URL '{}': must start with http:// or https://", u);
    }

    let site_name = toml_escape_string(name.unwrap_or("Your Name"));
    let site_url = toml_escape_string(url.unwrap_or("https://example.com"));
    let author_email = toml_escape_string(email.unwrap_or("you@example.com"));

    let name_comment = if name.is_some() { "" } else { "  # Set your name" };
    let url_comment = if url.is_some() { "" } else { "  # Set your domain" };
    let email_comment = if email.is_some() { "" } else { "  # Set your email" };

    let toml = format!(
        "# Generated by folio init\n\
# Edit this file to customize your site\n\
\n\
[site]\n\
name = \"{site_name}\"{name_comment}\n\
url = \"{site_url}\"{url_comment}\n\
description = \"Personal website and blog\"\n\
locale = \"en_US\"\n\
\n\
[author]\n\
name = \"{site_name}\"\n\
email = \"{author_email}\"{email_comment}\n\
url = \"{site_url}\"\n\
# twitter = \"handle\"\n\
# github = \"handle\"\n\
# linkedin = \"handle\"\n\
\n\
[organization]\n\
name = \"{site_name}\"\n\
url = \"{site_url}\"\n\
# logo = \"{site_url}/logo.png\"\n\
\n\
[og]\n\
width = 1200\n\
height = 630\n\
# fonts = [\"fonts/Inter-Bold.ttf\"]  # Relative to this directory\n\
# pages_color = \"#38bdf8\"\n\
# blog_color = \"#a78bfa\"\n\
# projects_color = \"#34d399\"\n"
    );

    // Validate the generated TOML against the real parser
    parse_site_toml_str(&toml)
        .context("Generated site.toml is invalid - this is a bug in the template generator")?;

    fs::write(base.join("site.toml"), toml)?;

    Ok(())
}

/// Write a hello-world post and an example project, returning the post's
/// file name
fn generate_sample_content(base: &Path) -> Result<String> {
    let today = Local::now().format("%Y-%m-%d");
    let post = format!("{}-hello-world.md", today);

    let post_path = base.join("content/blog").join(&post);
    if !post_path.exists() {
        fs::write(
            &post_path,
            r#"+++
title = "Hello, world"
description = "The first post on this site."
tags = ["meta"]
+++

Welcome! This post lives in `content/blog/` and its file name starts with
the publication date.
"#,
        )?;
    }

    let project_path = base.join("content/projects/example-project.md");
    if !project_path.exists() {
        fs::write(
            &project_path,
            r#"+++
title = "Example Project"
description = "A short summary shown in listings and link previews."
+++

Describe the project here.
"#,
        )?;
    }

    Ok(post)
}
