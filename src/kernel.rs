//! The striped Smith-Waterman sweep.
//!
//! Recurrences, with `gO` the cost of the first gap symbol and `gE` the cost
//! of each further one:
//!
//! ```text
//! E[i][j] = max(E[i][j - 1] - gE, H[i][j - 1] - gO)
//! F[i][j] = max(F[i - 1][j] - gE, H[i - 1][j] - gO)
//! H[i][j] = max(0, H[i - 1][j - 1] + s(db[j], query[i]), E[i][j], F[i][j])
//! ```
//!
//! `i` runs over the query (striped into vectors) and `j` over the database,
//! one column per database symbol. All cells are clamped at zero, which is what
//! lets the 8-bit path use unsigned saturating arithmetic.

use crate::error::AlignError;
use crate::observer::KernelObserver;
use crate::pool::ResourcePool;
use crate::profile::ScoreProfile;
use crate::scores::GapPenalties;
use crate::simd::{Engine, Lane, SimdVector};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    /// The reverse complement of the database.
    Reverse,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReadDirection {
    Forward,
    Backward,
}

/// Read-only view of a database sequence, possibly reverse complemented and
/// cut to a prefix. Nothing is copied.
///
/// A view remembers whether its symbols were already checked against the
/// alphabet, so the sweeps of one alignment scan the sequence only once.
#[derive(Copy, Clone, Debug)]
pub struct DbView<'a> {
    seq: &'a [u8],
    complement: Option<&'a [u8]>,
    len: usize,
    checked: bool,
}

impl<'a> DbView<'a> {
    pub fn forward(seq: &'a [u8]) -> Self {
        Self { seq, complement: None, len: seq.len(), checked: false }
    }

    /// Position `pos` reads `complement[seq[n - 1 - pos]]`. Codes missing from
    /// the table read as themselves.
    pub fn reverse_complement(seq: &'a [u8], complement: &'a [u8]) -> Self {
        Self { seq, complement: Some(complement), len: seq.len(), checked: false }
    }

    /// Checks every symbol of the view against `alphabet_size`. Positions in
    /// errors are view positions.
    pub fn checked(self, alphabet_size: usize) -> Result<Self, AlignError> {
        if self.checked {
            return Ok(self);
        }
        if let Some(position) = (0..self.len).find(|&p| self.symbol(p) as usize >= alphabet_size) {
            return Err(AlignError::InvalidSymbol { symbol: self.symbol(position), position, alphabet_size });
        }
        Ok(Self { checked: true, ..self })
    }

    /// Marks a view whose underlying sequence the caller already checked.
    pub(crate) fn assume_checked(self) -> Self {
        Self { checked: true, ..self }
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// The first `len` positions of this view.
    pub fn prefix(self, len: usize) -> Self {
        Self { len: len.min(self.len), ..self }
    }

    pub fn strand(&self) -> Strand {
        if self.complement.is_some() { Strand::Reverse } else { Strand::Forward }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn symbol(&self, pos: usize) -> u8 {
        debug_assert!(pos < self.len);
        match self.complement {
            None => self.seq[pos],
            Some(table) => {
                let c = self.seq[self.seq.len() - 1 - pos];
                table.get(c as usize).copied().unwrap_or(c)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SweepParams {
    /// Cost of the first symbol of a gap.
    pub gap_open: u32,
    /// Cost of every further symbol.
    pub gap_extend: u32,
    pub direction: ReadDirection,
    /// Stop as soon as the best score reaches this. `None` or `Some(0)` scans
    /// the whole database.
    pub expected_score: Option<u32>,
}

impl SweepParams {
    pub fn new(gaps: &GapPenalties) -> Self {
        Self {
            gap_open: gaps.first(),
            gap_extend: gaps.extension(),
            direction: ReadDirection::Forward,
            expected_score: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SweepHit {
    pub score: u32,
    /// Database position (in view coordinates) of the first column reaching
    /// `score`, in reading order.
    pub db_end: usize,
    /// Smallest query position holding `score` in that column.
    pub query_end: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SweepOutcome {
    Hit(SweepHit),
    /// The score got too close to the lane maximum to be trusted.
    Overflow,
}

/// Sweeps `db` against `profile` with the given engine.
///
/// The pool is reset to the profile's segment length first, so it may hold
/// anything from a previous sweep.
pub fn run_sweep<T: Lane>(
    engine: Engine,
    profile: &ScoreProfile<T>,
    db: DbView<'_>,
    params: &SweepParams,
    pool: &mut ResourcePool<T>,
    observer: &mut dyn KernelObserver,
) -> Result<SweepOutcome, AlignError> {
    let lanes = engine.lanes::<T>();
    if profile.lanes() != lanes || pool.lanes() != lanes {
        return Err(AlignError::LaneMismatch { engine: lanes, profile: profile.lanes(), pool: pool.lanes() });
    }
    if profile.segment_len() == 0 {
        return Err(AlignError::EmptyQuery);
    }
    let db = db.checked(profile.alphabet_size())?;
    pool.reset(profile.segment_len())?;

    let outcome = match engine {
        Engine::Wide => sweep_wide(profile, db, params, pool, observer)?,
        Engine::Narrow => unsafe { sweep::<T, T::Narrow>(profile, db, params, pool, observer) },
        Engine::Scalar => unsafe { sweep::<T, T::Scalar>(profile, db, params, pool, observer) },
    };

    log::trace!(
        "{}-bit {:?} sweep over {} columns ({:?} strand): {:?}",
        T::WIDTH.bits(),
        params.direction,
        db.len(),
        db.strand(),
        outcome
    );
    Ok(outcome)
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn sweep_wide<T: Lane>(
    profile: &ScoreProfile<T>,
    db: DbView<'_>,
    params: &SweepParams,
    pool: &mut ResourcePool<T>,
    observer: &mut dyn KernelObserver,
) -> Result<SweepOutcome, AlignError> {
    if !Engine::Wide.is_available() {
        return Err(AlignError::EngineUnavailable(Engine::Wide));
    }
    Ok(unsafe { sweep_avx2::<T>(profile, db, params, pool, observer) })
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn sweep_wide<T: Lane>(
    _profile: &ScoreProfile<T>,
    _db: DbView<'_>,
    _params: &SweepParams,
    _pool: &mut ResourcePool<T>,
    _observer: &mut dyn KernelObserver,
) -> Result<SweepOutcome, AlignError> {
    Err(AlignError::EngineUnavailable(Engine::Wide))
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
#[target_feature(enable = "avx2")]
unsafe fn sweep_avx2<T: Lane>(
    profile: &ScoreProfile<T>,
    db: DbView<'_>,
    params: &SweepParams,
    pool: &mut ResourcePool<T>,
    observer: &mut dyn KernelObserver,
) -> SweepOutcome {
    sweep::<T, T::Wide>(profile, db, params, pool, observer)
}

#[inline(always)]
unsafe fn sweep<T: Lane, V: SimdVector<Lane = T>>(
    profile: &ScoreProfile<T>,
    db: DbView<'_>,
    params: &SweepParams,
    pool: &mut ResourcePool<T>,
    observer: &mut dyn KernelObserver,
) -> SweepOutcome {
    let lanes = V::LANES;
    let seg_len = profile.segment_len();
    let n = db.len();

    let gap_o = V::splat(T::from_u32(params.gap_open));
    let gap_e = V::splat(T::from_u32(params.gap_extend));
    let bias = V::splat(T::from_u32(if T::BIASED { profile.bias() } else { 0 }));
    let limit = T::MAX.to_u32();
    let target = params.expected_score.filter(|&s| s > 0);

    let mut best = 0u32;
    let mut best_pos = 0usize;

    for step in 0..n {
        let pos = match params.direction {
            ReadDirection::Forward => step,
            ReadDirection::Backward => n - 1 - step,
        };
        observer.column();
        pool.rotate();
        let row = profile.row(db.symbol(pos));

        let mut col_max = V::zero();
        let mut f = V::zero();
        // diagonal predecessor of segment 0 is the last segment, one lane down
        let mut h = V::load(pool.prev_h(seg_len - 1)).shift_lanes();

        for seg in 0..seg_len {
            h = h.adds(V::load(&row[seg * lanes..]));
            if T::BIASED {
                h = h.subs(bias);
            }
            let mut e = V::load(pool.e(seg));
            h = h.max(e).max(f);
            col_max = col_max.max(h);
            h.store(pool.cur_h_mut(seg));

            let h_open = h.subs(gap_o);
            e = e.subs(gap_e).max(h_open);
            e.store(pool.e_mut(seg));
            f = f.subs(gap_e).max(h_open);

            h = V::load(pool.prev_h(seg));
        }

        // F has not crossed lane boundaries yet. Carry it over one lane per
        // pass until it can no longer raise any H.
        'lazy: for _ in 0..lanes {
            observer.lazy_f_pass();
            f = f.shift_lanes();
            for seg in 0..seg_len {
                let h_old = V::load(pool.cur_h(seg));
                let h_new = h_old.max(f);
                h_new.store(pool.cur_h_mut(seg));
                col_max = col_max.max(h_new);

                let e = V::load(pool.e(seg)).max(h_new.subs(gap_o));
                e.store(pool.e_mut(seg));

                f = f.subs(gap_e);
                if f.subs(h_old.subs(gap_o)).is_zero() {
                    break 'lazy;
                }
            }
        }

        let column_best = col_max.hmax().to_u32();
        if column_best > best {
            best = column_best;
            best_pos = pos;
            observer.max_moved();
            if best + profile.bias() >= limit {
                return SweepOutcome::Overflow;
            }
            pool.snapshot_max();
        }

        if let Some(t) = target {
            if best >= t {
                break;
            }
        }
    }

    if best == 0 {
        return SweepOutcome::Hit(SweepHit { score: 0, db_end: 0, query_end: 0 });
    }

    let column = pool.max_column();
    let query_end = (0..profile.query_len())
        .find(|&p| column[profile.striped_index(p)].to_u32() == best)
        .unwrap_or(0);
    SweepOutcome::Hit(SweepHit { score: best, db_end: best_pos, query_end })
}
