//! Random sequences and mutations over alphabet codes, for tests and benches.

use rand::prelude::*;

/// Generates code sequences over `0..alphabet_size`, skipping the wildcard
/// when one is given.
pub struct SequenceSimulator<R: Rng> {
    codes: Vec<u8>,
    rng: R,
}

impl SequenceSimulator<StdRng> {
    pub fn seeded(alphabet_size: usize, wildcard: Option<u8>, seed: u64) -> Self {
        Self::new(alphabet_size, wildcard, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SequenceSimulator<R> {
    pub fn new(alphabet_size: usize, wildcard: Option<u8>, rng: R) -> Self {
        let codes = (0..alphabet_size.min(u8::MAX as usize) as u8)
            .filter(|&c| Some(c) != wildcard)
            .collect();
        Self { codes, rng }
    }

    fn pick(&mut self) -> u8 {
        self.codes[self.rng.gen_range(0..self.codes.len())]
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn random(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.pick()).collect()
    }

    /// Applies between `3k/4` and `k` edits, each a substitution, an insertion
    /// before the original symbol or a deletion.
    pub fn mutate(&mut self, seq: &[u8], k: usize) -> Vec<u8> {
        let edits = self.rng.gen_range(k * 3 / 4..k + 1).min(seq.len());
        let mut kind = vec![Edit::Keep; seq.len()];
        for i in rand::seq::index::sample(&mut self.rng, seq.len(), edits) {
            kind[i] = match self.rng.gen_range(0..3) {
                0 => Edit::Substitute,
                1 => Edit::Insert,
                _ => Edit::Delete,
            };
        }

        let mut out = Vec::with_capacity(seq.len() + edits);
        for (&c, &edit) in seq.iter().zip(kind.iter()) {
            match edit {
                Edit::Keep => out.push(c),
                Edit::Substitute => {
                    let mut sub = self.pick();
                    if sub == c && self.codes.len() > 1 {
                        while sub == c {
                            sub = self.pick();
                        }
                    }
                    out.push(sub);
                }
                Edit::Insert => {
                    out.push(self.pick());
                    out.push(c);
                }
                Edit::Delete => (),
            }
        }
        out
    }

    /// Like [`SequenceSimulator::mutate`], then splices in a random run of
    /// `insert_len` symbols.
    pub fn mutate_with_insert(&mut self, seq: &[u8], k: usize, insert_len: usize) -> Vec<u8> {
        let mut out = self.mutate(seq, k);
        let at = self.rng.gen_range(0..=out.len());
        let insert = self.random(insert_len);
        out.splice(at..at, insert);
        out
    }

    /// `motif` surrounded by random flanks of the given lengths.
    pub fn embed(&mut self, motif: &[u8], left: usize, right: usize) -> Vec<u8> {
        let mut out = self.random(left);
        out.extend_from_slice(motif);
        out.extend(self.random(right));
        out
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Edit {
    Keep,
    Substitute,
    Insert,
    Delete,
}
