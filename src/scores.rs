use crate::alphabet::Alphabet;
use crate::error::AlignError;

/// BLOSUM62 in `ARNDCQEGHILKMFPSTWYVX` order; `X` scores -1 against everything.
#[rustfmt::skip]
pub static BLOSUM62: [[i8; 21]; 21] = [
    //A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V   X
    [ 4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0, -1], // A
    [-1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3, -1], // R
    [-2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3, -1], // N
    [-2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3, -1], // D
    [ 0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1, -1], // C
    [-1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2, -1], // Q
    [-1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2, -1], // E
    [ 0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3, -1], // G
    [-2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3, -1], // H
    [-1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3, -1], // I
    [-1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1, -1], // L
    [-1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2, -1], // K
    [-1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1, -1], // M
    [-2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1, -1], // F
    [-1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2, -1], // P
    [ 1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2, -1], // S
    [ 0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0, -1], // T
    [-3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3, -1], // W
    [-2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1, -1], // Y
    [ 0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4, -1], // V
    [-1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1], // X
];

/// Scores for every pair of alphabet codes, shared read-only by any number
/// of aligners.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubstitutionMatrix {
    alphabet: Alphabet,
    scores: Vec<i8>,
    smallest: i8,
    largest: i8,
}

impl SubstitutionMatrix {
    /// `scores` is row-major, `size * size` entries, indexed by
    /// `database_code * size + query_code`.
    pub fn new(alphabet: Alphabet, scores: Vec<i8>) -> Result<Self, AlignError> {
        let n = alphabet.size();
        if n == 0 {
            return Err(AlignError::InvalidMatrix("empty alphabet".to_owned()));
        }
        if scores.len() != n * n {
            return Err(AlignError::InvalidMatrix(format!(
                "expected {} scores for an alphabet of {} symbols, got {}",
                n * n,
                n,
                scores.len()
            )));
        }

        let smallest = scores.iter().copied().min().unwrap_or(0);
        let largest = scores.iter().copied().max().unwrap_or(0);
        Ok(Self { alphabet, scores, smallest, largest })
    }

    /// Nucleotide scoring: `match_score` on identical bases and `mismatch_score`
    /// otherwise. `N` scores `mismatch_score` against every base, itself included.
    pub fn dna(match_score: i8, mismatch_score: i8) -> Self {
        let alphabet = Alphabet::dna();
        let n = alphabet.size();
        let wildcard = alphabet.wildcard() as usize;
        let mut scores = vec![mismatch_score; n * n];
        for i in 0..n {
            if i != wildcard {
                scores[i * n + i] = match_score;
            }
        }
        let smallest = match_score.min(mismatch_score);
        let largest = match_score.max(mismatch_score);
        Self { alphabet, scores, smallest, largest }
    }

    pub fn blosum62() -> Self {
        let scores = BLOSUM62.iter().flat_map(|row| row.iter().copied()).collect();
        Self { alphabet: Alphabet::protein(), scores, smallest: -4, largest: 11 }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet.size()
    }

    /// Score of database symbol `a` against query symbol `b`.
    #[inline]
    pub fn score(&self, a: u8, b: u8) -> i8 {
        debug_assert!((a as usize) < self.alphabet_size() && (b as usize) < self.alphabet_size());
        self.scores[a as usize * self.alphabet_size() + b as usize]
    }

    pub fn smallest(&self) -> i8 {
        self.smallest
    }

    pub fn largest(&self) -> i8 {
        self.largest
    }

    /// Magnitude of the most negative score, zero when nothing is negative.
    /// Added to every 8-bit profile entry and used by the overflow test.
    pub fn bias(&self) -> u32 {
        (self.smallest.min(0) as i32).unsigned_abs()
    }
}

/// Affine gap costs. A gap of `k` symbols costs `open + k * extend`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GapPenalties {
    pub open: u8,
    pub extend: u8,
}

impl Default for GapPenalties {
    fn default() -> Self {
        Self { open: 3, extend: 1 }
    }
}

impl GapPenalties {
    pub fn new(open: u8, extend: u8) -> Result<Self, AlignError> {
        let gaps = Self { open, extend };
        gaps.validate()?;
        Ok(gaps)
    }

    pub fn validate(&self) -> Result<(), AlignError> {
        let first = self.open as u32 + self.extend as u32;
        if first == 0 || first > u8::MAX as u32 {
            return Err(AlignError::InvalidGapPenalties { open: self.open, extend: self.extend });
        }
        Ok(())
    }

    /// Cost of the first gap symbol.
    #[inline]
    pub fn first(&self) -> u32 {
        self.open as u32 + self.extend as u32
    }

    #[inline]
    pub fn extension(&self) -> u32 {
        self.extend as u32
    }

    pub fn cost(&self, len: usize) -> u64 {
        if len == 0 {
            0
        } else {
            self.open as u64 + len as u64 * self.extend as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dna_matrix() {
        let m = SubstitutionMatrix::dna(2, -1);
        assert_eq!(m.score(0, 0), 2);
        assert_eq!(m.score(0, 3), -1);
        assert_eq!(m.score(4, 4), -1);
        assert_eq!(m.smallest(), -1);
        assert_eq!(m.largest(), 2);
        assert_eq!(m.bias(), 1);
    }

    #[test]
    fn test_blosum62_symmetric() {
        let m = SubstitutionMatrix::blosum62();
        let n = m.alphabet_size();
        for a in 0..n as u8 {
            for b in 0..n as u8 {
                assert_eq!(m.score(a, b), m.score(b, a));
            }
        }
        let w = m.alphabet().code(b'W').unwrap();
        assert_eq!(m.score(w, w), 11);
        assert_eq!(m.bias(), 4);
        assert_eq!(m.smallest(), BLOSUM62.iter().flatten().copied().min().unwrap());
    }

    #[test]
    fn test_custom_matrix() {
        assert!(SubstitutionMatrix::new(Alphabet::dna(), vec![1; 24]).is_err());
        let m = SubstitutionMatrix::new(Alphabet::dna(), vec![3; 25]).unwrap();
        assert_eq!(m.bias(), 0);
    }

    #[test]
    fn test_gaps() {
        let gaps = GapPenalties::new(3, 1).unwrap();
        assert_eq!(gaps.first(), 4);
        assert_eq!(gaps.cost(3), 6);
        assert_eq!(gaps.cost(0), 0);
        assert!(GapPenalties::new(0, 0).is_err());
        assert!(GapPenalties::new(200, 100).is_err());
        assert!(GapPenalties::new(0, 2).is_ok());
    }
}
