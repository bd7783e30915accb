//! Nucleotide records as returned by the paginated Entrez fetch.

use anyhow::{Result, anyhow};
use gb_io::seq::Seq;

/// One parsed nucleotide record. Immutable once parsed; `len()` always
/// equals the number of bases in `sequence`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceRecord {
    pub accession: String,
    pub sequence: Vec<u8>,
    pub description: String,
}

impl SequenceRecord {
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Entrez reports the versioned accession as the record id, so prefer
    /// that, then the bare accession, then the locus name.
    pub fn from_genbank_seq(seq: &Seq) -> Self {
        let accession = seq
            .version
            .clone()
            .or_else(|| seq.accession.clone())
            .or_else(|| seq.name.clone())
            .unwrap_or_else(|| "<unnamed>".to_string());
        let sequence: Vec<u8> = seq
            .seq
            .iter()
            .filter(|b| b.is_ascii_alphabetic())
            .map(|b| b.to_ascii_uppercase())
            .collect();
        SequenceRecord {
            accession,
            sequence,
            description: seq.definition.clone().unwrap_or_default(),
        }
    }
}

/// Parses one `efetch rettype=gb retmode=text` page into records.
pub fn parse_genbank_records(text: &str) -> Result<Vec<SequenceRecord>> {
    let seqs = gb_io::reader::parse_slice(text.as_bytes())
        .map_err(|e| anyhow!("Malformed GenBank response: {e}"))?;
    if seqs.is_empty() {
        return Err(anyhow!("GenBank response contains no records"));
    }
    Ok(seqs.iter().map(SequenceRecord::from_genbank_seq).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOY_GENBANK: &str = "\
LOCUS       TOY1                      12 bp    DNA     linear   SYN 01-JAN-2025
DEFINITION  first toy record.
ACCESSION   TOY1
VERSION     TOY1.1
FEATURES             Location/Qualifiers
     source          1..12
ORIGIN
        1 atgcatgcat gc
//
LOCUS       TOY2                       7 bp    DNA     linear   SYN 01-JAN-2025
DEFINITION  second toy record.
ACCESSION   TOY2
VERSION     TOY2.2
ORIGIN
        1 ggccgga
//
";

    #[test]
    fn test_parse_genbank_records_toy_page() {
        let records = parse_genbank_records(TOY_GENBANK).expect("parse toy page");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].accession, "TOY1.1");
        assert_eq!(records[0].len(), 12);
        assert_eq!(records[0].sequence, b"ATGCATGCATGC");
        assert_eq!(records[0].description, "first toy record.");
        assert_eq!(records[1].accession, "TOY2.2");
        assert_eq!(records[1].len(), 7);
    }

    #[test]
    fn test_parse_genbank_records_rejects_empty_page() {
        assert!(parse_genbank_records("").is_err());
    }

    #[test]
    fn test_record_length_matches_sequence() {
        let record = SequenceRecord {
            accession: "X".to_string(),
            sequence: b"ACGTACGT".to_vec(),
            description: String::new(),
        };
        assert_eq!(record.len(), record.sequence.len());
        assert!(!record.is_empty());
    }
}
