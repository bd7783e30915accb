//! Pipeline A: query NCBI Entrez for nucleotide records of a taxon within a
//! length range, export a CSV length table and a length-by-accession plot.

use anyhow::{Result, anyhow};
use bioscript::entrez::{EntrezClient, EntrezConfig, SearchOutcome};
use bioscript::length_plot::save_length_plot_png;
use bioscript::length_report::write_length_csv;
use clap::Parser;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// NCBI account e-mail (prompted for when omitted)
    #[arg(long)]
    email: Option<String>,

    /// NCBI API key (prompted for when omitted)
    #[arg(long = "api-key")]
    api_key: Option<String>,

    /// Taxonomic id to search, e.g. 9606
    #[arg(long)]
    taxid: Option<String>,

    /// Minimum sequence length, inclusive
    #[arg(long = "min-len")]
    min_len: Option<u64>,

    /// Maximum sequence length, inclusive
    #[arg(long = "max-len")]
    max_len: Option<u64>,

    /// Stop fetching once this many records have accumulated
    #[arg(long = "max-records", default_value_t = 200)]
    max_records: usize,

    /// Directory for the CSV and plot outputs
    #[arg(long = "out-dir", default_value = ".")]
    out_dir: PathBuf,
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_u64(label: &str) -> Result<u64> {
    let raw = prompt(label)?;
    raw.parse()
        .map_err(|e| anyhow!("'{raw}' is not a valid number: {e}"))
}

fn or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt(label),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let email = or_prompt(cli.email, "Enter your NCBI email")?;
    let api_key = or_prompt(cli.api_key, "Enter your NCBI API key")?;
    let taxid = or_prompt(cli.taxid, "Enter taxonomic ID (taxid)")?;
    let min_len = match cli.min_len {
        Some(v) => v,
        None => prompt_u64("Minimum sequence length")?,
    };
    let max_len = match cli.max_len {
        Some(v) => v,
        None => prompt_u64("Maximum sequence length")?,
    };
    if min_len > max_len {
        return Err(anyhow!(
            "Minimum length {min_len} exceeds maximum length {max_len}"
        ));
    }

    let client = EntrezClient::new(EntrezConfig::new(email, api_key));

    // Search-phase failures end the run gracefully; they are reported
    // separately from an empty result set.
    let organism = match client.taxonomy_name(&taxid) {
        Ok(name) => name,
        Err(e) => {
            eprintln!("Search failed: {e}");
            return Ok(());
        }
    };
    println!("Organism: {organism} (TaxID: {taxid})");

    let session = match client.search_nucleotide(&taxid, min_len, max_len) {
        Ok(SearchOutcome::Matches(session)) => session,
        Ok(SearchOutcome::NoMatches) => {
            println!("No records found.");
            return Ok(());
        }
        Err(e) => {
            eprintln!("Search failed: {e}");
            return Ok(());
        }
    };
    println!(
        "Found {} records with length between {min_len} and {max_len}",
        session.count
    );
    info!("search session: {session:?}");

    // Fetch-phase errors propagate and terminate the run; there is no
    // partial-result recovery.
    let records = client.fetch_records(&session, cli.max_records)?;
    if records.is_empty() {
        println!("No records fetched.");
        return Ok(());
    }

    let csv_path = cli.out_dir.join(format!("taxid_{taxid}_filtered.csv"));
    let plot_path = cli.out_dir.join(format!("taxid_{taxid}_plot.png"));

    let rows = write_length_csv(&records, &csv_path)?;
    println!("Saved CSV to: {}", csv_path.display());

    save_length_plot_png(&rows, &plot_path)?;
    println!("Saved plot to: {}", plot_path.display());

    Ok(())
}
