//! Blog entry ids are folder-style names of the form `YYYY-MM-DD-slug`.
//!
//! The first ten characters carry the publication date, the eleventh is a
//! separator and everything after it is the slug. The slug is opaque: no
//! charset is enforced here.

use crate::error::{Error, Result};
use chrono::NaiveDate;

const DATE_LEN: usize = 10;
const SLUG_OFFSET: usize = DATE_LEN + 1;

/// Slug part of a blog entry id (everything from offset 11)
///
/// ```text
/// blog_slug("2023-01-15-my-post")  → Ok("my-post")
/// blog_slug("2023-01-15-")         → Ok("")
/// blog_slug("my-post")             → Err(MalformedEntryId)
/// ```
pub fn blog_slug(id: &str) -> Result<&str> {
    check_prefix(id)?;
    Ok(&id[SLUG_OFFSET..])
}

/// Publication date encoded in the first 10 characters of a blog entry id
pub fn blog_date(id: &str) -> Result<NaiveDate> {
    check_prefix(id)?;
    NaiveDate::parse_from_str(&id[..DATE_LEN], "%Y-%m-%d").map_err(|e| malformed(id, e.to_string()))
}

/// A parsed blog entry id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlogEntryId {
    id: String,
    date: NaiveDate,
}

impl BlogEntryId {
    pub fn parse(id: &str) -> Result<Self> {
        let date = blog_date(id)?;
        Ok(Self {
            id: id.to_string(),
            date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn slug(&self) -> &str {
        &self.id[SLUG_OFFSET..]
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// The date prefix must be exactly `YYYY-MM-DD` followed by one ASCII
/// separator, so byte offsets line up with character offsets.
fn check_prefix(id: &str) -> Result<()> {
    if id.len() < SLUG_OFFSET {
        return Err(malformed(
            id,
            format!("expected at least {} characters (YYYY-MM-DD-slug)", SLUG_OFFSET),
        ));
    }
    let prefix = &id.as_bytes()[..SLUG_OFFSET];
    if !prefix.is_ascii() {
        return Err(malformed(id, "date prefix must be ASCII YYYY-MM-DD".to_string()));
    }
    let shaped = prefix[..DATE_LEN].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return Err(malformed(id, "date prefix must be YYYY-MM-DD".to_string()));
    }
    Ok(())
}

fn malformed(id: &str, reason: String) -> Error {
    Error::MalformedEntryId {
        id: id.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_slug() {
        assert_eq!(blog_slug("2023-01-15-my-post").unwrap(), "my-post");
        assert_eq!(blog_slug("2024-12-01-a").unwrap(), "a");
        assert_eq!(
            blog_slug("2024-12-01-nested-dashes-here").unwrap(),
            "nested-dashes-here"
        );
    }

    #[test]
    fn test_blog_slug_exactly_eleven_chars_is_empty() {
        assert_eq!(blog_slug("2023-01-15-").unwrap(), "");
    }

    #[test]
    fn test_blog_slug_keeps_non_ascii_slug() {
        assert_eq!(blog_slug("2023-01-15-café").unwrap(), "café");
    }

    #[test]
    fn test_blog_slug_rejects_short_id() {
        let err = blog_slug("my-post").unwrap_err();
        assert!(matches!(err, Error::MalformedEntryId { .. }));
        assert!(err.to_string().contains("my-post"));

        assert!(blog_slug("").is_err());
        assert!(blog_slug("2023-01-15").is_err());
    }

    #[test]
    fn test_blog_slug_rejects_non_ascii_prefix() {
        // Would otherwise split a multi-byte character
        assert!(blog_slug("ééééééé-post").is_err());
    }

    #[test]
    fn test_blog_date() {
        assert_eq!(
            blog_date("2023-01-15-my-post").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()
        );
    }

    #[test]
    fn test_blog_date_rejects_invalid_dates() {
        assert!(blog_date("2023-13-01-bad-month").is_err());
        assert!(blog_date("2023-02-30-bad-day").is_err());
        assert!(blog_date("hello-world-post").is_err());
        assert!(blog_date("2023-1-5-short").is_err());
    }

    #[test]
    fn test_prefix_must_be_four_two_two_digits() {
        for id in [
            "+2023-1-15-post",
            " 2023-1-15-post",
            "2023/01/15-post",
            "20230-1-15-post",
            "2023-01-1x-post",
        ] {
            assert!(
                matches!(blog_date(id), Err(Error::MalformedEntryId { .. })),
                "{} should be rejected",
                id
            );
            assert!(blog_slug(id).is_err(), "{} should have no slug", id);
        }
    }

    #[test]
    fn test_blog_entry_id() {
        let id = BlogEntryId::parse("2022-06-30-rust-notes").unwrap();
        assert_eq!(id.slug(), "rust-notes");
        assert_eq!(id.date(), NaiveDate::from_ymd_opt(2022, 6, 30).unwrap());
        assert_eq!(id.as_str(), "2022-06-30-rust-notes");

        assert!(BlogEntryId::parse("2022-06-31-no-such-day").is_err());
    }

    #[test]
    fn test_slug_and_date_are_deterministic() {
        let id = "2021-03-04-same";
        assert_eq!(blog_slug(id).unwrap(), blog_slug(id).unwrap());
        assert_eq!(blog_date(id).unwrap(), blog_date(id).unwrap());
    }
}
