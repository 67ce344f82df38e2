use super::load_site;
use anyhow::Context;
use folio_generator::build_routes;
use std::path::PathBuf;

/// Print every OG route and its requests as JSON
pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    let (site, source) = load_site(&path)?;
    let routes = build_routes(&source, &site.og).await?;

    let json = serde_json::to_string_pretty(&routes).context("Failed to serialize routes")?;
    println!("{}", json);
    Ok(())
}
