//! FASTA record writer with the standard 60-column body wrap.

use anyhow::{Result, anyhow};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

pub const FASTA_LINE_WIDTH: usize = 60;

/// Output path derived from the identifier. No existing-file check; writing
/// silently overwrites.
pub fn fasta_path_for(identifier: &str) -> String {
    format!("{identifier}.fasta")
}

/// Writes `>{identifier} {description}` followed by the sequence wrapped at
/// 60 characters per line; the last line may be shorter.
pub fn write_fasta(path: &Path, identifier: &str, description: &str, sequence: &[u8]) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| anyhow!("Could not create FASTA file '{}': {e}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let write_failed = |e: std::io::Error| {
        anyhow!("Could not write FASTA file '{}': {e}", path.display())
    };
    writeln!(writer, ">{identifier} {description}").map_err(write_failed)?;
    for line in sequence.chunks(FASTA_LINE_WIDTH) {
        writer.write_all(line).map_err(write_failed)?;
        writeln!(writer).map_err(write_failed)?;
    }
    writer.flush().map_err(write_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_fasta_path_for() {
        assert_eq!(fasta_path_for("abc-1"), "abc-1.fasta");
    }

    #[test]
    fn test_body_wraps_at_60_columns() {
        let td = tempdir().unwrap();
        let path = td.path().join("wrap.fasta");
        // 125 bases: two full lines plus a 5-base remainder.
        let sequence: Vec<u8> = b"ACGT".iter().cycle().take(125).copied().collect();
        write_fasta(&path, "wrap", "wrap test", &sequence).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(">wrap wrap test"));
        let body: Vec<&str> = lines.collect();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].len(), 60);
        assert_eq!(body[1].len(), 60);
        assert_eq!(body[2].len(), 5);
    }

    #[test]
    fn test_round_trip_reconstructs_sequence() {
        let td = tempdir().unwrap();
        let path = td.path().join("roundtrip.fasta");
        let sequence: Vec<u8> = b"GATTACA".iter().cycle().take(121).copied().collect();
        write_fasta(&path, "abc-1", "sample seq", &sequence).unwrap();

        let reader = bio::io::fasta::Reader::from_file(&path).unwrap();
        let records: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id(), "abc-1");
        assert_eq!(records[0].desc(), Some("sample seq"));
        assert_eq!(records[0].seq(), sequence.as_slice());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let td = tempdir().unwrap();
        let path = td.path().join("again.fasta");
        write_fasta(&path, "again", "first", b"AAAA").unwrap();
        write_fasta(&path, "again", "second", b"CCCC").unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, ">again second\nCCCC\n");
    }
}
