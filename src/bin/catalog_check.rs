//! Catalog checker: validates a catalog file and prints its shape.
//!
//! Runs the full load path (schema contract, version, metadata, index
//! invariants) and reports the key, entry count, and per-category counts.
//! Exit code 1 with the anyhow chain on stderr means the catalog is not fit
//! for the filter CLIs.

use anyhow::{Context, Result, bail};
use bibliotypes::{CatalogIndex, default_catalog_path, find_repo_root, summarize_entries};
use std::env;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let catalog_arg = parse_args()?;
    let catalog_path = match catalog_arg {
        Some(path) => path,
        None => default_catalog_path(&find_repo_root()?),
    };

    let index = CatalogIndex::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let catalog = index.catalog();
    let refs: Vec<_> = index.entries().iter().collect();
    let stats = summarize_entries(&refs);

    println!("catalog : {} ({})", index.key().0, catalog.catalog.title);
    println!("schema  : {}", catalog.schema_version);
    println!("entries : {}", stats.total);
    for (label, count) in &stats.categories {
        println!("  {label}: {count}");
    }
    let declared: Vec<&str> = catalog.scope.categories.keys().map(String::as_str).collect();
    println!("declared categories: {}", declared.join(", "));
    Ok(())
}

fn parse_args() -> Result<Option<PathBuf>> {
    let mut args = env::args_os().skip(1);
    let mut catalog: Option<PathBuf> = None;

    while let Some(arg_os) = args.next() {
        let arg = arg_os
            .into_string()
            .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
        match arg.as_str() {
            "--catalog" => {
                if catalog.is_some() {
                    bail!("--catalog may only be provided once");
                }
                let value = args
                    .next()
                    .map(|os| {
                        os.into_string()
                            .map_err(|_| anyhow::anyhow!("value for --catalog is not valid UTF-8"))
                    })
                    .transpose()?
                    .ok_or_else(|| anyhow::anyhow!("missing value for --catalog"))?;
                catalog = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!(
                    "Usage: biblio-check [--catalog PATH]\nValidates a bibliography catalog file and prints its shape."
                );
                std::process::exit(0);
            }
            other => bail!("unknown flag: {other}"),
        }
    }

    Ok(catalog)
}
