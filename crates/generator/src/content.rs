//! Content collections read at build time.
//!
//! Entries live under `<root>/<collection>/` either as `<id>.md` or as
//! `<id>/index.md`. Each file starts with TOML front matter fenced by
//! `+++` lines:
//!
//! ```text
//! +++
//! title = "My post"
//! description = "What it is about"
//! date = 2023-01-15
//! tags = ["rust"]
//! +++
//!
//! Body in Markdown...
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use folio_core::{Collection, ContentEntry, EntryData, Error, Result, blog_date};
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Longest description derived from an entry body
const DESCRIPTION_LIMIT: usize = 160;

/// Source of content collection entries
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Entries of `collection`, ordered by id
    async fn entries(&self, collection: Collection) -> Result<Vec<ContentEntry>>;
}

/// Reads collections from Markdown files on disk
#[derive(Debug, Clone)]
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn entries(&self, collection: Collection) -> Result<Vec<ContentEntry>> {
        let dir = self.root.join(collection.name());
        if !tokio::fs::try_exists(&dir).await? {
            debug!(dir = %dir.display(), "collection directory missing, no entries");
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        let mut read_dir = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = read_dir.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;

            if file_type.is_dir() {
                let index = path.join("index.md");
                if tokio::fs::try_exists(&index).await?
                    && let Some(id) = path.file_name().and_then(|n| n.to_str())
                {
                    files.push((id.to_string(), index));
                }
            } else if path.extension().is_some_and(|ext| ext == "md")
                && let Some(id) = path.file_stem().and_then(|n| n.to_str())
            {
                files.push((id.to_string(), path.clone()));
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        let mut entries = Vec::with_capacity(files.len());
        for (id, path) in files {
            let content = tokio::fs::read_to_string(&path).await?;
            let mut entry = parse_entry(&id, &content, &path)?;
            if collection == Collection::Blog && entry.data.date.is_none() {
                entry.data.date = blog_date(&id).ok();
            }
            debug!(collection = %collection, id = %entry.id, "loaded entry");
            entries.push(entry);
        }

        Ok(entries)
    }
}

/// Parse one Markdown file with TOML front matter into an entry
pub fn parse_entry(id: &str, content: &str, path: &Path) -> Result<ContentEntry> {
    let front_matter_err = |message: String| Error::FrontMatter {
        path: path.to_path_buf(),
        message,
    };

    let (front_matter, body) = split_front_matter(content)
        .ok_or_else(|| front_matter_err("missing +++ front matter block".to_string()))?;

    let mut table: toml::Table =
        toml::from_str(front_matter).map_err(|e| front_matter_err(e.to_string()))?;

    let title = take_string(&mut table, "title")
        .map_err(front_matter_err)?
        .ok_or_else(|| front_matter_err("missing 'title'".to_string()))?;

    let description = match take_string(&mut table, "description").map_err(front_matter_err)? {
        Some(d) => d,
        None => first_paragraph(body, DESCRIPTION_LIMIT),
    };

    let slug = take_string(&mut table, "slug")
        .map_err(front_matter_err)?
        .unwrap_or_else(|| id.to_string());

    let date = match table.remove("date") {
        None => None,
        Some(value) => Some(parse_date(&value).map_err(front_matter_err)?),
    };

    let tags = match table.remove("tags") {
        None => Vec::new(),
        Some(toml::Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                toml::Value::String(s) => Ok(s),
                other => Err(front_matter_err(format!(
                    "'tags' must be strings, found {}",
                    other.type_str()
                ))),
            })
            .collect::<Result<Vec<_>>>()?,
        Some(other) => {
            return Err(front_matter_err(format!(
                "'tags' must be an array, found {}",
                other.type_str()
            )));
        }
    };

    let draft = match table.remove("draft") {
        None => false,
        Some(toml::Value::Boolean(b)) => b,
        Some(other) => {
            return Err(front_matter_err(format!(
                "'draft' must be a boolean, found {}",
                other.type_str()
            )));
        }
    };

    Ok(ContentEntry {
        id: id.to_string(),
        slug,
        data: EntryData {
            title,
            description,
            date,
            tags,
            draft,
            extra: table.into_iter().collect(),
        },
    })
}

fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = content.strip_prefix("+++")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let (front_matter, body) = if let Some(body) = rest.strip_prefix("+++") {
        ("", body)
    } else {
        let end = rest.find("\n+++")?;
        (rest[..end].trim_end_matches('\r'), &rest[end + 4..])
    };
    let body = body
        .strip_prefix("\r\n")
        .or_else(|| body.strip_prefix('\n'))
        .unwrap_or(body);

    Some((front_matter, body))
}

fn take_string(
    table: &mut toml::Table,
    key: &str,
) -> std::result::Result<Option<String>, String> {
    match table.remove(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(format!(
            "'{}' must be a string, found {}",
            key,
            other.type_str()
        )),
    }
}

/// Accepts a TOML date (`2023-01-15`) or a `"YYYY-MM-DD"` string
fn parse_date(value: &toml::Value) -> std::result::Result<NaiveDate, String> {
    match value {
        toml::Value::Datetime(dt) => dt
            .date
            .and_then(|d| NaiveDate::from_ymd_opt(d.year.into(), d.month.into(), d.day.into()))
            .ok_or_else(|| format!("'date' has no calendar date: {}", dt)),
        toml::Value::String(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{}': {}", s, e)),
        other => Err(format!(
            "'date' must be a date, found {}",
            other.type_str()
        )),
    }
}

/// Plain text of the first Markdown paragraph, truncated to `limit` chars
pub fn first_paragraph(markdown: &str, limit: usize) -> String {
    let mut text = String::new();
    let mut in_paragraph = false;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => in_paragraph = true,
            Event::End(TagEnd::Paragraph) if in_paragraph => break,
            Event::Text(t) | Event::Code(t) if in_paragraph => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    truncate(text.trim(), limit)
}

fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<ContentEntry> {
        parse_entry("2023-01-15-my-post", content, Path::new("blog/2023-01-15-my-post.md"))
    }

    #[test]
    fn test_parse_full_front_matter() {
        let entry = parse(
            r#"+++
title = "My post"
description = "About things"
date = 2023-01-15
tags = ["rust", "web"]
draft = true
hero = "cover.png"
+++

Hello.
"#,
        )
        .unwrap();

        assert_eq!(entry.id, "2023-01-15-my-post");
        assert_eq!(entry.slug, "2023-01-15-my-post");
        assert_eq!(entry.data.title, "My post");
        assert_eq!(entry.data.description, "About things");
        assert_eq!(entry.data.date, NaiveDate::from_ymd_opt(2023, 1, 15));
        assert_eq!(entry.data.tags, vec!["rust", "web"]);
        assert!(entry.data.draft);
        assert_eq!(
            entry.data.extra.get("hero"),
            Some(&toml::Value::String("cover.png".into()))
        );
    }

    #[test]
    fn test_slug_override_and_string_date() {
        let entry = parse("+++\ntitle = \"T\"\ndescription = \"D\"\nslug = \"custom\"\ndate = \"2020-02-29\"\n+++\n").unwrap();
        assert_eq!(entry.slug, "custom");
        assert_eq!(entry.data.date, NaiveDate::from_ymd_opt(2020, 2, 29));
    }

    #[test]
    fn test_description_falls_back_to_first_paragraph() {
        let entry = parse(
            "+++\ntitle = \"T\"\n+++\n# Heading\n\nFirst *paragraph* with `code`\nand a soft break.\n\nSecond paragraph.\n",
        )
        .unwrap();
        assert_eq!(
            entry.data.description,
            "First paragraph with code and a soft break."
        );
    }

    #[test]
    fn test_first_paragraph_truncates_on_char_boundary() {
        let text = "é".repeat(200);
        let desc = first_paragraph(&text, 10);
        assert_eq!(desc.chars().count(), 10);
        assert!(desc.ends_with('…'));
    }

    #[test]
    fn test_missing_front_matter() {
        let err = parse("# just markdown\n").unwrap_err();
        assert!(matches!(err, Error::FrontMatter { .. }));
        assert!(err.to_string().contains("2023-01-15-my-post.md"));
    }

    #[test]
    fn test_missing_title() {
        let err = parse("+++\ndescription = \"D\"\n+++\n").unwrap_err();
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_wrong_types() {
        assert!(parse("+++\ntitle = 3\n+++\n").is_err());
        assert!(parse("+++\ntitle = \"T\"\ntags = \"rust\"\n+++\n").is_err());
        assert!(parse("+++\ntitle = \"T\"\ndraft = \"yes\"\n+++\n").is_err());
        assert!(parse("+++\ntitle = \"T\"\ndate = \"15/01/2023\"\n+++\n").is_err());
    }

    #[test]
    fn test_crlf_front_matter() {
        let entry = parse("+++\r\ntitle = \"T\"\r\ndescription = \"D\"\r\n+++\r\nBody\r\n").unwrap();
        assert_eq!(entry.data.title, "T");
    }

    #[tokio::test]
    async fn test_fs_source_reads_files_and_folders() {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("blog");
        std::fs::create_dir_all(blog.join("2024-03-01-folder-post")).unwrap();
        std::fs::write(
            blog.join("2024-03-01-folder-post/index.md"),
            "+++\ntitle = \"Folder\"\ndescription = \"F\"\n+++\n",
        )
        .unwrap();
        std::fs::write(
            blog.join("2023-01-15-file-post.md"),
            "+++\ntitle = \"File\"\ndescription = \"F\"\n+++\n",
        )
        .unwrap();
        std::fs::write(blog.join("notes.txt"), "ignored").unwrap();
        std::fs::create_dir_all(blog.join("assets")).unwrap();

        let source = FsContentSource::new(dir.path());
        let entries = source.entries(Collection::Blog).await.unwrap();

        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["2023-01-15-file-post", "2024-03-01-folder-post"]);
        // Date derived from the id when front matter has none
        assert_eq!(entries[0].data.date, NaiveDate::from_ymd_opt(2023, 1, 15));
    }

    #[tokio::test]
    async fn test_fs_source_missing_collection_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsContentSource::new(dir.path());
        assert!(source.entries(Collection::Projects).await.unwrap().is_empty());
    }
}
