//! Plain-text listener that turns a catalog-entry stream into the card view.
//!
//! This binary intentionally stays text-only so it can sit in pipelines like
//! `biblio --format ndjson | biblio-listen`. It leans on the shared stream
//! parser so it understands the exact entry shape without rolling a bespoke
//! reader, and renders zero records as the not-found block rather than an
//! error.

use anyhow::{Result, bail};
use bibliotypes::{parse_record_stream, render_entries};
use std::io::{self, IsTerminal, Read};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        bail!(
            "biblio-listen expects catalog-entry JSON on stdin (e.g. biblio --format ndjson | biblio-listen)"
        );
    }

    let mut input = String::new();
    stdin.lock().read_to_string(&mut input)?;
    let records = parse_record_stream(&input)?;

    let refs: Vec<_> = records.iter().collect();
    let mut output = String::new();
    render_entries(&refs, &mut output)?;
    print!("{output}");
    Ok(())
}
