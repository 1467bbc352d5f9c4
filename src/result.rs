use crate::kernel::Strand;

/// Best local alignment between a database sequence and the query.
///
/// All four coordinates are inclusive. For [`Strand::Reverse`] the database
/// coordinates index the reverse complement; use
/// [`AlignmentResult::db_range_on_forward_strand`] to map them back. A score of
/// zero means nothing aligned and every coordinate is zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AlignmentResult {
    pub score: u32,
    pub db_start: usize,
    pub db_end: usize,
    pub query_start: usize,
    pub query_end: usize,
    pub strand: Strand,
}

impl AlignmentResult {
    pub fn unaligned(strand: Strand) -> Self {
        Self { score: 0, db_start: 0, db_end: 0, query_start: 0, query_end: 0, strand }
    }

    pub fn is_aligned(&self) -> bool {
        self.score > 0
    }

    pub fn db_span(&self) -> usize {
        if self.is_aligned() { self.db_end - self.db_start + 1 } else { 0 }
    }

    pub fn query_span(&self) -> usize {
        if self.is_aligned() { self.query_end - self.query_start + 1 } else { 0 }
    }

    /// Higher score wins. On equal scores the longer alignment, counting both
    /// the database and the query span, wins unless only end positions were
    /// computed.
    pub fn better(&self, other: &AlignmentResult, compute_only_end: bool) -> bool {
        self.score > other.score
            || (!compute_only_end
                && self.score == other.score
                && self.db_span() + self.query_span() > other.db_span() + other.query_span())
    }

    /// Database interval on the forward strand, `start..=end`, or `None` when
    /// nothing aligned. `db_len` is the length of the aligned database.
    pub fn db_range_on_forward_strand(&self, db_len: usize) -> Option<(usize, usize)> {
        if !self.is_aligned() || self.db_end >= db_len {
            return None;
        }
        match self.strand {
            Strand::Forward => Some((self.db_start, self.db_end)),
            Strand::Reverse => Some((db_len - 1 - self.db_end, db_len - 1 - self.db_start)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(score: u32, db_start: usize, db_end: usize, strand: Strand) -> AlignmentResult {
        AlignmentResult { score, db_start, db_end, query_start: 0, query_end: db_end - db_start, strand }
    }

    #[test]
    fn test_better() {
        let a = result(10, 0, 5, Strand::Forward);
        let b = result(10, 2, 9, Strand::Reverse);
        assert!(b.better(&a, false));
        assert!(!b.better(&a, true));
        assert!(!a.better(&a, false));
        assert!(result(11, 0, 0, Strand::Forward).better(&b, false));
    }

    #[test]
    fn test_better_counts_query_span() {
        let fwd = AlignmentResult { score: 10, db_start: 0, db_end: 4, query_start: 0, query_end: 4, strand: Strand::Forward };
        let rev = AlignmentResult { query_end: 7, strand: Strand::Reverse, ..fwd };
        assert_eq!(fwd.db_span(), rev.db_span());
        assert!(rev.better(&fwd, false));
        assert!(!fwd.better(&rev, false));
        assert!(!rev.better(&fwd, true));
    }

    #[test]
    fn test_forward_coordinates() {
        let r = result(6, 2, 4, Strand::Reverse);
        assert_eq!(r.db_range_on_forward_strand(10), Some((5, 7)));
        assert_eq!(r.db_span(), 3);
        let f = result(6, 2, 4, Strand::Forward);
        assert_eq!(f.db_range_on_forward_strand(10), Some((2, 4)));
        assert_eq!(AlignmentResult::unaligned(Strand::Forward).db_span(), 0);
    }

    #[test]
    fn test_unaligned_has_no_forward_range() {
        let none = AlignmentResult::unaligned(Strand::Reverse);
        assert_eq!(none.db_range_on_forward_strand(0), None);
        assert_eq!(none.db_range_on_forward_strand(8), None);
        assert_eq!(AlignmentResult::unaligned(Strand::Forward).db_range_on_forward_strand(8), None);
        // coordinates past the given length
        assert_eq!(result(6, 2, 4, Strand::Reverse).db_range_on_forward_strand(3), None);
    }
}
