//! Drawing OG images.
//!
//! [`SvgCard`] lays out an [`ImageOptions`] as an SVG document and
//! [`ResvgRenderer`] rasterizes it to PNG. Rendering failures are returned
//! as-is from the underlying library.

use crate::og::{ImageOptions, OgImageRoute};
use anyhow::{Context, Result};
use resvg::{tiny_skia, usvg};
use std::fmt::Write as _;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const REFERENCE_WIDTH: f32 = 1200.0;
const TITLE_SIZE: f32 = 64.0;
const DESCRIPTION_SIZE: f32 = 32.0;
const TITLE_CHARS_PER_LINE: usize = 28;
const DESCRIPTION_CHARS_PER_LINE: usize = 60;
const TITLE_MAX_LINES: usize = 3;
const DESCRIPTION_MAX_LINES: usize = 3;
const FONT_FAMILY: &str = "Inter, 'Helvetica Neue', Arial, sans-serif";

/// Turns image options into encoded image bytes
pub trait ImageGenerator {
    fn render(&self, options: &ImageOptions) -> Result<Vec<u8>>;

    /// File extension of the produced images
    fn extension(&self) -> &'static str;
}

/// SVG layout of an OG card
pub struct SvgCard<'a> {
    options: &'a ImageOptions,
}

impl<'a> SvgCard<'a> {
    pub fn new(options: &'a ImageOptions) -> Self {
        Self { options }
    }

    pub fn to_svg(&self) -> String {
        let o = self.options;
        let scale = o.width as f32 / REFERENCE_WIDTH;
        let padding = o.border.width as f32 + 80.0 * scale;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = o.width,
            h = o.height
        );

        svg.push_str(r#"<defs><linearGradient id="bg" x1="0" y1="0" x2="0" y2="1">"#);
        let stops = o.background.len();
        for (i, color) in o.background.iter().enumerate() {
            let offset = if stops > 1 {
                i as f32 / (stops - 1) as f32
            } else {
                0.0
            };
            let _ = write!(svg, r#"<stop offset="{}" stop-color="{}"/>"#, offset, color);
        }
        svg.push_str("</linearGradient></defs>");

        let _ = write!(
            svg,
            r#"<rect width="{}" height="{}" fill="url(#bg)"/>"#,
            o.width, o.height
        );
        let _ = write!(
            svg,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            o.border.width, o.height, o.border.color
        );

        let title_size = TITLE_SIZE * scale;
        let description_size = DESCRIPTION_SIZE * scale;
        let title_lines = wrap_text(&o.title, TITLE_CHARS_PER_LINE, TITLE_MAX_LINES);
        let description_lines =
            wrap_text(&o.description, DESCRIPTION_CHARS_PER_LINE, DESCRIPTION_MAX_LINES);

        let mut y = padding + title_size;
        push_text(
            &mut svg,
            &title_lines,
            padding,
            y,
            title_size,
            "700",
            "#f8fafc",
        );
        y += title_lines.len().saturating_sub(1) as f32 * title_size * 1.2
            + 40.0 * scale
            + description_size;
        push_text(
            &mut svg,
            &description_lines,
            padding,
            y,
            description_size,
            "400",
            "#cbd5e1",
        );

        svg.push_str("</svg>");
        svg
    }
}

fn push_text(
    svg: &mut String,
    lines: &[String],
    x: f32,
    y: f32,
    size: f32,
    weight: &str,
    fill: &str,
) {
    if lines.is_empty() {
        return;
    }
    let _ = write!(
        svg,
        r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="{size}" font-weight="{weight}" fill="{fill}">"#
    );
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { size * 1.2 };
        let _ = write!(
            svg,
            r#"<tspan x="{}" dy="{}">{}</tspan>"#,
            x,
            dy,
            xml_escape(line)
        );
    }
    svg.push_str("</text>");
}

/// Greedy word wrap by character count. Words longer than a line are split
/// and overflow past `max_lines` is cut with an ellipsis.
pub fn wrap_text(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let mut chars: Vec<char> = last.chars().collect();
            chars.truncate(max_chars.saturating_sub(1));
            *last = format!("{}…", chars.into_iter().collect::<String>().trim_end());
        }
    }
    lines
}

fn xml_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&apos;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Writes the SVG card without rasterizing it
#[derive(Debug, Default, Clone, Copy)]
pub struct SvgRenderer;

impl ImageGenerator for SvgRenderer {
    fn render(&self, options: &ImageOptions) -> Result<Vec<u8>> {
        Ok(SvgCard::new(options).to_svg().into_bytes())
    }

    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// Rasterizes the SVG card to PNG with resvg
pub struct ResvgRenderer {
    options: usvg::Options<'static>,
}

impl ResvgRenderer {
    /// Loads system fonts plus the given font files
    pub fn new(fonts: &[PathBuf]) -> Result<Self> {
        let mut options = usvg::Options::default();
        let fontdb = options.fontdb_mut();
        fontdb.load_system_fonts();
        for font in fonts {
            fontdb
                .load_font_file(font)
                .with_context(|| format!("Failed to load font {}", font.display()))?;
        }
        debug!(faces = options.fontdb.len(), "font database ready");
        Ok(Self { options })
    }
}

impl ImageGenerator for ResvgRenderer {
    fn render(&self, options: &ImageOptions) -> Result<Vec<u8>> {
        let svg = SvgCard::new(options).to_svg();
        let tree = usvg::Tree::from_str(&svg, &self.options).context("Failed to parse OG card")?;

        let mut pixmap = tiny_skia::Pixmap::new(options.width, options.height)
            .with_context(|| format!("Invalid image size {}x{}", options.width, options.height))?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        pixmap.encode_png().context("Failed to encode PNG")
    }

    fn extension(&self) -> &'static str {
        "png"
    }
}

/// Render every image of `route` under `out_dir/<family prefix>/`
pub fn write_route(
    route: &OgImageRoute,
    generator: &dyn ImageGenerator,
    out_dir: &Path,
) -> Result<Vec<PathBuf>> {
    // Keys come from front matter and must stay inside the family directory
    if let Some(key) = route.pages.keys().find(|key| !is_file_name(key)) {
        anyhow::bail!(
            "{} route key '{}' is not a plain file name",
            route.family,
            key
        );
    }

    let dir = out_dir.join(route.family.prefix());
    let mut written = Vec::with_capacity(route.len());

    for (path, options) in route.images() {
        let file = dir.join(Path::new(&path).with_extension(generator.extension()));
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let bytes = generator
            .render(&options)
            .with_context(|| format!("Failed to render {} image '{}'", route.family, path))?;
        fs::write(&file, bytes).with_context(|| format!("Failed to write {}", file.display()))?;

        debug!(file = %file.display(), "wrote og image");
        written.push(file);
    }

    Ok(written)
}

/// A single normal path component: no separators, `.`, `..` or roots
fn is_file_name(key: &str) -> bool {
    let mut components = Path::new(key).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !key.contains(['/', '\\'])
}
