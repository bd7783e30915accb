//! Random DNA synthesis and marker insertion.

use rand::Rng;

pub const NUCLEOTIDES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Draws each position independently and uniformly from {A,C,G,T}. No Markov
/// structure, no GC-bias control. Length validation happens upstream.
pub fn random_dna<R: Rng>(rng: &mut R, length: usize) -> Vec<u8> {
    (0..length)
        .map(|_| NUCLEOTIDES[rng.gen_range(0..NUCLEOTIDES.len())])
        .collect()
}

/// A sequence with a marker spliced in, plus where the splice happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkedSequence {
    pub sequence: Vec<u8>,
    pub insert_at: usize,
    pub marker_len: usize,
}

/// Splices `marker` at an index drawn uniformly from `0..=sequence.len()`,
/// so insertion before the first and after the last base are both possible.
pub fn insert_marker<R: Rng>(rng: &mut R, sequence: &[u8], marker: &[u8]) -> MarkedSequence {
    let insert_at = rng.gen_range(0..=sequence.len());
    let mut out = Vec::with_capacity(sequence.len() + marker.len());
    out.extend_from_slice(&sequence[..insert_at]);
    out.extend_from_slice(marker);
    out.extend_from_slice(&sequence[insert_at..]);
    MarkedSequence {
        sequence: out,
        insert_at,
        marker_len: marker.len(),
    }
}
