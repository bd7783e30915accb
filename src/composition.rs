//! Nucleotide composition statistics over a DNA sequence.

/// Base counts for one sequence. Percentages are computed over the full
/// sequence length; %CG is computed over the A/C/G/T count only, and is 0
/// when that count is 0.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Composition {
    a: usize,
    c: usize,
    g: usize,
    t: usize,
    sequence_len: usize,
}

impl Composition {
    pub fn from_sequence(sequence: &[u8]) -> Self {
        let mut ret = Composition {
            sequence_len: sequence.len(),
            ..Composition::default()
        };
        for base in sequence.iter().map(|b| b.to_ascii_uppercase()) {
            match base {
                b'A' => ret.a += 1,
                b'C' => ret.c += 1,
                b'G' => ret.g += 1,
                b'T' => ret.t += 1,
                _ => {}
            }
        }
        ret
    }

    pub fn count(&self, base: u8) -> usize {
        match base.to_ascii_uppercase() {
            b'A' => self.a,
            b'C' => self.c,
            b'G' => self.g,
            b'T' => self.t,
            _ => 0,
        }
    }

    /// Number of recognized A/C/G/T bases.
    pub fn base_total(&self) -> usize {
        self.a + self.c + self.g + self.t
    }

    /// Percentage of the sequence made up of `base`, unrounded.
    pub fn percent(&self, base: u8) -> f64 {
        if self.sequence_len == 0 {
            return 0.0;
        }
        100.0 * self.count(base) as f64 / self.sequence_len as f64
    }

    /// 100 * (C+G) / (A+C+G+T), exactly 0 when no base was counted.
    pub fn percent_cg(&self) -> f64 {
        let total = self.base_total();
        if total == 0 {
            return 0.0;
        }
        100.0 * (self.c + self.g) as f64 / total as f64
    }
}
