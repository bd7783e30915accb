//! Two small DNA utility pipelines sharing one library:
//!
//! - `bioscript_fetch` queries NCBI Entrez for nucleotide records matching a
//!   taxonomic id and a length range, exports a CSV length table and renders
//!   a length-by-accession plot.
//! - `bioscript_random` generates a uniformly random DNA sequence, splices a
//!   marker string at a random position, writes a 60-column FASTA file and
//!   reports nucleotide composition statistics.

pub mod composition;
pub mod entrez;
pub mod fasta_out;
pub mod length_plot;
pub mod length_report;
pub mod random_dna;
pub mod record;
pub mod validate;
