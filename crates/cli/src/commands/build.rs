use super::load_site;
use super::validate::print_report;
use anyhow::{Context, Result};
use folio_generator::{ImageGenerator, ResvgRenderer, SvgRenderer, generate_site};
use folio_validator::validate_images;
use std::fs;
use std::path::PathBuf;

/// Render every Open Graph image of the site
pub async fn run(path: PathBuf, output: PathBuf, svg: bool) -> Result<()> {
    println!("🔨 Building Open Graph images...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let (site, source) = load_site(&path)?;
    println!("✓ Loaded: {}", site.site.name);
    println!("  Image size: {}x{}", site.og.width, site.og.height);
    println!();

    fs::create_dir_all(&output).context("Failed to create output directory")?;

    let generator: Box<dyn ImageGenerator> = if svg {
        Box::new(SvgRenderer)
    } else {
        // Font paths in site.toml are relative to the site directory
        let fonts: Vec<PathBuf> = site.og.fonts.iter().map(|f| path.join(f)).collect();
        Box::new(ResvgRenderer::new(&fonts).context("Failed to set up renderer")?)
    };

    println!("🎨 Rendering images...");
    let generated = generate_site(&source, &site.og, generator.as_ref(), &output).await?;
    for route in &generated.routes {
        println!("   ✓ {}: {} image(s)", route.family, route.len());
    }

    if !svg {
        println!("🔍 Checking generated images...");
        let report = validate_images(&output.join("og"), site.og.width, site.og.height);
        print_report(&report);
        if !report.is_ok() {
            anyhow::bail!("{} generated image(s) failed checks", report.errors.len());
        }
    }

    println!();
    println!("✅ Build complete!");
    println!("   {} image(s) in {}", generated.images.len(), output.display());
    println!();

    Ok(())
}
