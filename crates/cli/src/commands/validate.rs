use super::load_site;
use folio_core::Collection;
use folio_generator::ContentSource;
use folio_generator::components;
use folio_validator::{ValidationReport, validate_entries};
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let (site, source) = load_site(&path)?;
    println!("✓ site.toml valid");
    println!("  Site: {} ({})", site.site.name, site.site.url);

    let mut report = ValidationReport::default();
    for collection in Collection::ALL {
        let entries = source.entries(collection).await?;
        report.merge(validate_entries(collection, &entries));
    }

    for (name, spec) in components::ALL {
        if let Err(e) = spec.validate() {
            report.errors.push(format!("component {}: {}", name, e));
        }
    }

    print_report(&report);

    if !report.is_ok() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }
    println!("\n✓ Site is valid");
    Ok(())
}

pub fn print_report(report: &ValidationReport) {
    for line in &report.info {
        println!("  {}", line);
    }
    for line in &report.warnings {
        println!("  ⚠ {}", line);
    }
    for line in &report.errors {
        eprintln!("  ✗ {}", line);
    }
}
