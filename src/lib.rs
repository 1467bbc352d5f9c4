//! SIMD-accelerated striped Smith-Waterman local alignment.
//!
//! Computes the best local alignment score of a query against database
//! sequences under affine gap penalties, together with the start and end of
//! the alignment on both sequences. No traceback is kept: the end is found by a
//! forward sweep and the start by a second sweep read backwards from the end.
//!
//! Scores are computed in 8-bit lanes first and recomputed at 16 and 32 bits
//! when they saturate.

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod avx2;

pub mod align;
pub mod alphabet;
pub mod config;
pub mod error;
pub mod escalate;
pub mod kernel;
pub mod localize;
pub mod observer;
pub mod pool;
pub mod portable;
pub mod profile;
pub mod result;
pub mod scalar;
pub mod scores;
pub mod simd;

#[cfg(any(test, feature = "simulate"))]
pub mod simulate;

pub use align::LocalAligner;
pub use alphabet::Alphabet;
pub use config::AlignerConfig;
pub use error::AlignError;
pub use escalate::{Width, WidthPolicy};
pub use kernel::{ReadDirection, Strand};
pub use observer::{KernelObserver, SweepCounters};
pub use result::AlignmentResult;
pub use scores::{GapPenalties, SubstitutionMatrix};
pub use simd::Engine;
