//! Pipeline B: generate a random DNA sequence, splice in a marker string,
//! write the result as a 60-column FASTA file and report the nucleotide
//! composition of the unmarked sequence.

use anyhow::{Result, anyhow};
use bioscript::composition::Composition;
use bioscript::fasta_out::{fasta_path_for, write_fasta};
use bioscript::random_dna::{NUCLEOTIDES, insert_marker, random_dna};
use bioscript::validate;
use clap::Parser;
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Number of bases to generate (prompted for when omitted)
    #[arg(long)]
    length: Option<i64>,

    /// Sequence identifier; letters, digits, '_' and '-' only
    #[arg(long)]
    id: Option<String>,

    /// Free-text description for the FASTA header
    #[arg(long)]
    description: Option<String>,

    /// Marker text spliced into the sequence at a random position
    #[arg(long)]
    marker: Option<String>,
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
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

    let raw_length = match cli.length {
        Some(v) => v,
        None => {
            let raw = prompt("Enter sequence length")?;
            raw.parse()
                .map_err(|e| anyhow!("'{raw}' is not a valid number: {e}"))?
        }
    };
    let id = or_prompt(cli.id, "Enter sequence ID")?;
    let description = or_prompt(cli.description, "Enter sequence description")?;
    let marker = or_prompt(cli.marker, "Enter marker text")?;

    // All validation is fatal and happens before any file is written.
    let length = validate::sequence_length(raw_length)?;
    validate::identifier(&id)?;
    validate::description(&description)?;

    let mut rng = rand::thread_rng();
    let sequence = random_dna(&mut rng, length);
    let marked = insert_marker(&mut rng, &sequence, marker.as_bytes());
    info!("marker spliced at index {}", marked.insert_at);

    let path = PathBuf::from(fasta_path_for(&id));
    write_fasta(&path, &id, &description, &marked.sequence)?;
    println!("Sequence saved to {}", path.display());

    // Statistics cover the generated sequence only; the marker is not
    // nucleotide data and must not skew the composition.
    let stats = Composition::from_sequence(&sequence);
    println!("Sequence statistics:");
    for base in NUCLEOTIDES {
        println!("{}: {:.1}%", base as char, stats.percent(base));
    }
    println!("%CG: {:.1}", stats.percent_cg());

    Ok(())
}
