// Content and output checks run before and after a build

use folio_core::{Collection, ContentEntry, blog_date, blog_slug};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }
}

/// Check the entries of one collection
pub fn validate_entries(collection: Collection, entries: &[ContentEntry]) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for entry in entries {
        let key: &str = match collection {
            Collection::Blog => {
                let slug = blog_date(&entry.id).and_then(|_| blog_slug(&entry.id));
                match slug {
                    Ok("") => {
                        report.errors.push(format!(
                            "{}/{}: empty slug after date prefix",
                            collection, entry.id
                        ));
                        continue;
                    }
                    Ok(slug) => slug,
                    Err(e) => {
                        report.errors.push(format!("{}/{}: {}", collection, entry.id, e));
                        continue;
                    }
                }
            }
            Collection::Projects => {
                if !is_kebab_case(&entry.slug) {
                    report.warnings.push(format!(
                        "{}/{}: slug '{}' is not lowercase kebab-case",
                        collection, entry.id, entry.slug
                    ));
                }
                entry.slug.as_str()
            }
        };

        if !is_path_segment(key) {
            report.errors.push(format!(
                "{}/{}: route key '{}' is not a plain file name",
                collection, entry.id, key
            ));
            continue;
        }

        if entry.data.description.trim().is_empty() {
            report
                .warnings
                .push(format!("{}/{}: empty description", collection, entry.id));
        }

        if entry.data.draft {
            continue;
        }
        if let Some(previous) = seen.insert(key, &entry.id) {
            report.errors.push(format!(
                "{}: '{}' and '{}' both map to route key '{}'",
                collection, previous, entry.id, key
            ));
        }
    }

    report.info.push(format!(
        "{}: {} entries ({} drafts)",
        collection,
        entries.len(),
        entries.iter().filter(|e| e.data.draft).count()
    ));
    report
}

/// Check every PNG under `dir` has the expected dimensions
pub fn validate_images(dir: &Path, width: u32, height: u32) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut checked = 0;

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "png") {
            continue;
        }

        checked += 1;
        match image::image_dimensions(path) {
            Ok((w, h)) if (w, h) == (width, height) => {
                debug!(path = %path.display(), "image ok");
            }
            Ok((w, h)) => report.errors.push(format!(
                "{}: {}x{}, expected {}x{}",
                path.display(),
                w,
                h,
                width,
                height
            )),
            Err(e) => report
                .errors
                .push(format!("{}: unreadable image: {}", path.display(), e)),
        }
    }

    report.info.push(format!("{} images checked", checked));
    report
}

fn is_path_segment(key: &str) -> bool {
    !key.is_empty() && key != "." && key != ".." && !key.contains(['/', '\\'])
}

/// Lowercase ASCII letters and digits separated by single dashes
fn is_kebab_case(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
