//! Recovering start coordinates with a second, reversed sweep.
//!
//! The forward sweep yields the score and where it ends. Reading the database
//! prefix `[0, db_end]` backwards against the reversed query prefix
//! `[0, query_end]`, the first column to reach the same score is where the
//! alignment starts.

use crate::error::AlignError;
use crate::kernel::{run_sweep, DbView, ReadDirection, SweepOutcome, SweepParams};
use crate::observer::KernelObserver;
use crate::pool::ResourcePool;
use crate::profile::ScoreProfile;
use crate::result::AlignmentResult;
use crate::scores::{GapPenalties, SubstitutionMatrix};
use crate::simd::{Engine, Lane};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    Aligned(AlignmentResult),
    /// One of the two sweeps overflowed the current width.
    Overflow,
}

#[derive(Copy, Clone, Debug)]
pub struct TwoPassLocalizer {
    gaps: GapPenalties,
    engine: Engine,
    compute_only_end: bool,
}

impl TwoPassLocalizer {
    pub fn new(gaps: GapPenalties, engine: Engine) -> Self {
        Self { gaps, engine, compute_only_end: false }
    }

    /// Skip the reverse sweep and report starts equal to ends.
    pub fn compute_only_end(mut self, only_end: bool) -> Self {
        self.compute_only_end = only_end;
        self
    }

    pub fn localize<T: Lane>(
        &self,
        query: &[u8],
        profile: &ScoreProfile<T>,
        matrix: &SubstitutionMatrix,
        db: DbView<'_>,
        pool: &mut ResourcePool<T>,
        observer: &mut dyn KernelObserver,
    ) -> Result<PassOutcome, AlignError> {
        let strand = db.strand();
        let forward = SweepParams::new(&self.gaps);

        let end = match run_sweep(self.engine, profile, db, &forward, pool, observer)? {
            SweepOutcome::Hit(hit) => hit,
            SweepOutcome::Overflow => return Ok(PassOutcome::Overflow),
        };

        if end.score == 0 {
            return Ok(PassOutcome::Aligned(AlignmentResult::unaligned(strand)));
        }

        if self.compute_only_end {
            return Ok(PassOutcome::Aligned(AlignmentResult {
                score: end.score,
                db_start: end.db_end,
                db_end: end.db_end,
                query_start: end.query_end,
                query_end: end.query_end,
                strand,
            }));
        }

        let reversed = ScoreProfile::<T>::reversed_prefix(query, end.query_end, matrix, profile.lanes())?;
        let backward = SweepParams {
            direction: ReadDirection::Backward,
            expected_score: Some(end.score),
            ..forward
        };

        let start = match run_sweep(self.engine, &reversed, db.prefix(end.db_end + 1), &backward, pool, observer)? {
            SweepOutcome::Hit(hit) => hit,
            SweepOutcome::Overflow => return Ok(PassOutcome::Overflow),
        };
        debug_assert_eq!(start.score, end.score);

        Ok(PassOutcome::Aligned(AlignmentResult {
            score: end.score,
            db_start: start.db_end,
            db_end: end.db_end,
            query_start: end.query_end - start.query_end,
            query_end: end.query_end,
            strand,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::kernel::Strand;

    fn localize_i16(db: &[u8], query: &[u8], only_end: bool) -> AlignmentResult {
        let dna = Alphabet::dna();
        let matrix = SubstitutionMatrix::dna(2, -1);
        let db = dna.encode(db).unwrap();
        let query = dna.encode(query).unwrap();

        let engine = Engine::Narrow;
        let lanes = engine.lanes::<i16>();
        let profile = ScoreProfile::<i16>::new(&query, &matrix, lanes).unwrap();
        let mut pool = ResourcePool::with_capacity(query.len(), lanes);
        let localizer = TwoPassLocalizer::new(GapPenalties::default(), engine).compute_only_end(only_end);
        match localizer.localize(&query, &profile, &matrix, DbView::forward(&db), &mut pool, &mut ()).unwrap() {
            PassOutcome::Aligned(r) => r,
            PassOutcome::Overflow => panic!("overflow"),
        }
    }

    #[test]
    fn test_start_recovery() {
        let r = localize_i16(b"AAAACCCC", b"CCCC", false);
        assert_eq!((r.score, r.db_start, r.db_end, r.query_start, r.query_end), (8, 4, 7, 0, 3));

        let r = localize_i16(b"TTTTGGACGTACGTTTT", b"CCACGTACGCC", false);
        assert_eq!(r.score, 14);
        assert_eq!((r.db_start, r.db_end, r.query_start, r.query_end), (6, 12, 2, 8));
    }

    #[test]
    fn test_only_end() {
        let r = localize_i16(b"AAAACCCC", b"CCCC", true);
        assert_eq!((r.score, r.db_start, r.db_end, r.query_start, r.query_end), (8, 7, 7, 3, 3));
        assert_eq!(r.strand, Strand::Forward);
    }

    #[test]
    fn test_no_alignment() {
        let r = localize_i16(b"AAAA", b"TTTT", false);
        assert_eq!(r, AlignmentResult::unaligned(Strand::Forward));
    }
}
