//! Lane-striped query profiles.
//!
//! Query position `p` lives in segment `p % seg_len`, lane `p / seg_len`, so a
//! single vector load gives the score of one database symbol against
//! `lanes` query positions spaced `seg_len` apart.
//!
//! ```text
//! query:  q0 q1 q2 q3 q4 q5 q6   (lanes = 4, seg_len = 2)
//!
//!          lane0 lane1 lane2 lane3
//! seg 0:    q0    q2    q4    q6
//! seg 1:    q1    q3    q5    pad
//! ```

use crate::error::AlignError;
use crate::scores::SubstitutionMatrix;
use crate::simd::Lane;

pub struct ScoreProfile<T: Lane> {
    data: Vec<T>,
    query_len: usize,
    alphabet_size: usize,
    segment_len: usize,
    lanes: usize,
    bias: u32,
}

impl<T: Lane> ScoreProfile<T> {
    /// Builds the profile of `query` for vectors of `lanes` lanes.
    pub fn new(query: &[u8], matrix: &SubstitutionMatrix, lanes: usize) -> Result<Self, AlignError> {
        validate_query(query, matrix)?;
        Ok(Self::from_validated(query, matrix, lanes))
    }

    /// Profile of `query[..=end]` read backwards, for the start-finding pass.
    pub fn reversed_prefix(query: &[u8], end: usize, matrix: &SubstitutionMatrix, lanes: usize) -> Result<Self, AlignError> {
        if end >= query.len() {
            return Err(AlignError::PrefixOutOfRange { end, query_len: query.len() });
        }
        validate_query(query, matrix)?;
        Ok(Self::build(end + 1, |p| query[end - p], matrix, lanes))
    }

    pub(crate) fn from_validated(query: &[u8], matrix: &SubstitutionMatrix, lanes: usize) -> Self {
        Self::build(query.len(), |p| query[p], matrix, lanes)
    }

    fn build(query_len: usize, symbol_at: impl Fn(usize) -> u8, matrix: &SubstitutionMatrix, lanes: usize) -> Self {
        let lanes = lanes.max(1);
        let segment_len = (query_len + lanes - 1) / lanes;
        let alphabet_size = matrix.alphabet_size();
        let stride = segment_len * lanes;

        // padding must never score above zero
        let pad = matrix.smallest().min(0) as i32;
        let bias = matrix.bias();
        let offset = if T::BIASED { bias as i32 } else { 0 };

        let mut data = vec![T::ZERO; alphabet_size * stride];
        for (symbol, row) in data.chunks_exact_mut(stride).enumerate() {
            for seg in 0..segment_len {
                for lane in 0..lanes {
                    let p = seg + lane * segment_len;
                    let score = if p < query_len { matrix.score(symbol as u8, symbol_at(p)) as i32 } else { pad };
                    row[seg * lanes + lane] = T::from_i32(score + offset);
                }
            }
        }

        Self { data, query_len, alphabet_size, segment_len, lanes, bias }
    }

    /// Scores of database symbol `symbol` against the whole query,
    /// `segment_len * lanes` entries.
    #[inline(always)]
    pub fn row(&self, symbol: u8) -> &[T] {
        let stride = self.segment_len * self.lanes;
        &self.data[symbol as usize * stride..(symbol as usize + 1) * stride]
    }

    pub fn query_len(&self) -> usize {
        self.query_len
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    pub fn segment_len(&self) -> usize {
        self.segment_len
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Bias folded into 8-bit entries; also the headroom the overflow test
    /// keeps at every width.
    pub fn bias(&self) -> u32 {
        self.bias
    }

    /// Index of query position `p` inside a striped column.
    #[inline]
    pub fn striped_index(&self, p: usize) -> usize {
        (p % self.segment_len) * self.lanes + p / self.segment_len
    }
}

fn validate_query(query: &[u8], matrix: &SubstitutionMatrix) -> Result<(), AlignError> {
    if query.is_empty() {
        return Err(AlignError::EmptyQuery);
    }
    matrix.alphabet().check(query)
}
