//! Filter CLI over the bibliography-type catalog.
//!
//! Loads the validated catalog, applies the query/category criteria, and
//! emits the result as a JSON array, NDJSON lines, or the text card view.
//! An empty result is a successful run: the JSON forms emit nothing to
//! iterate and the text form shows the not-found block.

use anyhow::{Context, Result, bail};
use bibliotypes::{
    CatalogIndex, CategoryFilter, FilterState, default_catalog_path, filter_entries,
    find_repo_root, render_entries,
};
use std::env;
use std::fmt::Write as _;
use std::path::PathBuf;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;

    let catalog_path = match args.catalog {
        Some(path) => path,
        None => default_catalog_path(&find_repo_root()?),
    };
    let index = CatalogIndex::load(&catalog_path)
        .with_context(|| format!("loading catalog {}", catalog_path.display()))?;

    let state = FilterState::new(args.query, args.category);
    let result = filter_entries(index.entries(), &state);

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&result)?);
        }
        OutputFormat::Ndjson => {
            for entry in &result {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
        OutputFormat::Text => {
            let mut output = String::new();
            writeln!(output, "{}", index.catalog().catalog.title)?;
            writeln!(output)?;
            render_entries(&result, &mut output)?;
            print!("{output}");
        }
    }

    Ok(())
}

#[derive(Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Ndjson,
}

impl OutputFormat {
    fn from_str(raw: &str) -> Result<Self> {
        match raw {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "ndjson" => Ok(Self::Ndjson),
            other => bail!("unknown format '{other}' (expected text|json|ndjson)"),
        }
    }
}

struct CliArgs {
    query: String,
    category: CategoryFilter,
    format: OutputFormat,
    catalog: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut query: Option<String> = None;
        let mut category: Option<CategoryFilter> = None;
        let mut format: Option<OutputFormat> = None;
        let mut catalog: Option<PathBuf> = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--query" | "-q" => {
                    if query.is_some() {
                        bail!("--query may only be provided once");
                    }
                    query = Some(next_value(&mut args, "--query")?);
                }
                "--category" | "-c" => {
                    if category.is_some() {
                        bail!("--category may only be provided once");
                    }
                    let raw = next_value(&mut args, "--category")?;
                    category = Some(CategoryFilter::from_token(&raw));
                }
                "--format" | "-f" => {
                    let raw = next_value(&mut args, "--format")?;
                    format = Some(OutputFormat::from_str(&raw)?);
                }
                "--catalog" => {
                    let path = next_value(&mut args, "--catalog")?;
                    if catalog.is_some() {
                        bail!("--catalog may only be provided once");
                    }
                    catalog = Some(PathBuf::from(path));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        Ok(CliArgs {
            query: query.unwrap_or_default(),
            category: category.unwrap_or_default(),
            format: format.unwrap_or_default(),
            catalog,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: biblio [--query TEXT] [--category all|LABEL] [--format text|json|ndjson] [--catalog PATH]\n\
Filters the bibliography-type catalog by a case-insensitive text query over titles and descriptions\n\
and by a category label (default: all), then prints the matching entries in catalog order.\n\n\
Examples:\n  biblio --query библиография\n  biblio --category Временная --format ndjson | biblio-listen\n"
}

fn print_usage() {
    print!("{}", usage());
}
