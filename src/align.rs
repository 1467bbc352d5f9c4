//! User facing aligner: one query against many database sequences.

use crate::config::AlignerConfig;
use crate::error::AlignError;
use crate::escalate::{Width, WidthEscalation};
use crate::kernel::{DbView, Strand};
use crate::localize::{PassOutcome, TwoPassLocalizer};
use crate::observer::KernelObserver;
use crate::pool::ResourcePool;
use crate::profile::ScoreProfile;
use crate::result::AlignmentResult;
use crate::scores::SubstitutionMatrix;
use crate::simd::Engine;

#[derive(Default)]
struct Profiles {
    w8: Option<ScoreProfile<u8>>,
    w16: Option<ScoreProfile<i16>>,
    w32: Option<ScoreProfile<i32>>,
}

struct Pools {
    w8: ResourcePool<u8>,
    w16: ResourcePool<i16>,
    w32: ResourcePool<i32>,
}

impl Pools {
    fn new(engine: Engine, max_query_len: usize) -> Self {
        Self {
            w8: ResourcePool::with_capacity(max_query_len, engine.lanes::<u8>()),
            w16: ResourcePool::with_capacity(max_query_len, engine.lanes::<i16>()),
            w32: ResourcePool::with_capacity(max_query_len, engine.lanes::<i32>()),
        }
    }

    fn acquire(&mut self, max_query_len: usize) {
        self.w8.acquire(max_query_len);
        self.w16.acquire(max_query_len);
        self.w32.acquire(max_query_len);
    }
}

/// Aligns a query against database sequences, reusing its profiles and
/// scratch buffers between calls.
///
/// An aligner is mutable scratch state: give each thread its own. The
/// substitution matrix is only borrowed and can be shared freely.
///
/// ```
/// use striped_aligner::{AlignerConfig, Alphabet, LocalAligner, Strand, SubstitutionMatrix};
///
/// let dna = Alphabet::dna();
/// let matrix = SubstitutionMatrix::dna(2, -1);
/// let query = dna.encode(b"CCCC").unwrap();
/// let mut aligner = LocalAligner::with_query(&matrix, AlignerConfig::default(), &query).unwrap();
///
/// let db = dna.encode(b"AAAACCCC").unwrap();
/// let res = aligner.align(&db, Strand::Forward).unwrap();
/// assert_eq!((res.score, res.db_start, res.db_end), (8, 4, 7));
/// ```
pub struct LocalAligner<'m> {
    matrix: &'m SubstitutionMatrix,
    config: AlignerConfig,
    engine: Engine,
    query: Vec<u8>,
    profiles: Profiles,
    pools: Pools,
}

impl<'m> LocalAligner<'m> {
    /// An aligner with no query yet, with pools sized for queries of up to
    /// `max_query_len` symbols.
    pub fn new(matrix: &'m SubstitutionMatrix, config: AlignerConfig, max_query_len: usize) -> Result<Self, AlignError> {
        config.validate()?;
        let engine = config.resolve_engine();
        Ok(Self {
            matrix,
            config,
            engine,
            query: Vec::new(),
            profiles: Profiles::default(),
            pools: Pools::new(engine, max_query_len),
        })
    }

    pub fn with_query(matrix: &'m SubstitutionMatrix, config: AlignerConfig, query: &[u8]) -> Result<Self, AlignError> {
        let mut aligner = Self::new(matrix, config, query.len())?;
        aligner.set_query(query)?;
        Ok(aligner)
    }

    /// Replaces the query. Profiles are rebuilt lazily, per width, on first use.
    /// The pools are not grown: a query longer than the capacity makes
    /// [`LocalAligner::align`] fail with [`AlignError::Capacity`] until
    /// [`LocalAligner::reserve`] is called.
    pub fn set_query(&mut self, query: &[u8]) -> Result<(), AlignError> {
        if query.is_empty() {
            return Err(AlignError::EmptyQuery);
        }
        self.matrix.alphabet().check(query)?;

        self.query.clear();
        self.query.extend_from_slice(query);
        self.profiles = Profiles::default();
        Ok(())
    }

    /// Grows the pools to hold queries of up to `max_query_len` symbols.
    pub fn reserve(&mut self, max_query_len: usize) {
        self.pools.acquire(max_query_len);
    }

    pub fn query(&self) -> &[u8] {
        &self.query
    }

    pub fn engine(&self) -> Engine {
        self.engine
    }

    pub fn config(&self) -> &AlignerConfig {
        &self.config
    }

    pub fn matrix(&self) -> &'m SubstitutionMatrix {
        self.matrix
    }

    pub fn align(&mut self, db: &[u8], strand: Strand) -> Result<AlignmentResult, AlignError> {
        self.align_with_observer(db, strand, &mut ())
    }

    pub fn align_with_observer(
        &mut self,
        db: &[u8],
        strand: Strand,
        observer: &mut dyn KernelObserver,
    ) -> Result<AlignmentResult, AlignError> {
        if self.query.is_empty() {
            return Err(AlignError::EmptyQuery);
        }
        self.matrix.alphabet().check(db)?;

        let view = match strand {
            Strand::Forward => DbView::forward(db),
            Strand::Reverse => {
                let table = self.matrix.alphabet().complement_table().ok_or(AlignError::MissingComplement)?;
                DbView::reverse_complement(db, table)
            }
        }
        .assume_checked();

        let localizer = TwoPassLocalizer::new(self.config.gaps, self.engine).compute_only_end(self.config.compute_only_end);
        let escalation = WidthEscalation::from_policy(self.config.width_policy, self.query.len(), self.matrix);

        escalate(escalation, observer, |width, observer| self.localize_at(width, &localizer, view, observer))
    }

    /// Aligns both strands and keeps the better result, forward on ties.
    /// Alphabets without a complement only try the forward strand.
    pub fn align_best_strand(&mut self, db: &[u8]) -> Result<AlignmentResult, AlignError> {
        let forward = self.align(db, Strand::Forward)?;
        if !self.matrix.alphabet().has_complement() {
            return Ok(forward);
        }

        let reverse = self.align(db, Strand::Reverse)?;
        if reverse.better(&forward, self.config.compute_only_end) {
            Ok(reverse)
        } else {
            Ok(forward)
        }
    }

    fn localize_at(
        &mut self,
        width: Width,
        localizer: &TwoPassLocalizer,
        view: DbView<'_>,
        observer: &mut dyn KernelObserver,
    ) -> Result<PassOutcome, AlignError> {
        let Self { matrix, query, profiles, pools, .. } = self;
        let matrix: &SubstitutionMatrix = matrix;
        let query: &[u8] = query;

        match width {
            Width::W8 => {
                let profile = profiles.w8.get_or_insert_with(|| ScoreProfile::from_validated(query, matrix, pools.w8.lanes()));
                localizer.localize(query, profile, matrix, view, &mut pools.w8, observer)
            }
            Width::W16 => {
                let profile = profiles.w16.get_or_insert_with(|| ScoreProfile::from_validated(query, matrix, pools.w16.lanes()));
                localizer.localize(query, profile, matrix, view, &mut pools.w16, observer)
            }
            Width::W32 => {
                let profile = profiles.w32.get_or_insert_with(|| ScoreProfile::from_validated(query, matrix, pools.w32.lanes()));
                localizer.localize(query, profile, matrix, view, &mut pools.w32, observer)
            }
        }
    }
}

/// Runs `pass` at every width the escalation still allows until one of them
/// does not overflow.
fn escalate<F>(mut escalation: WidthEscalation, observer: &mut dyn KernelObserver, mut pass: F) -> Result<AlignmentResult, AlignError>
where
    F: FnMut(Width, &mut dyn KernelObserver) -> Result<PassOutcome, AlignError>,
{
    while let Some(width) = escalation.width() {
        match pass(width, observer)? {
            PassOutcome::Aligned(res) => return Ok(res),
            PassOutcome::Overflow => {
                escalation.on_overflow();
                if let Some(next) = escalation.width() {
                    observer.escalated(width, next);
                }
            }
        }
    }

    Err(AlignError::ScoreRangeExceeded { bits: Width::W32.bits() })
}
