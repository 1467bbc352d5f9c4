//! Array backed vectors for the narrow and scalar engines.
//!
//! Plain loops over fixed size arrays; the compiler is free to vectorize them
//! with whatever the target baseline offers.

use crate::simd::{Lane, SimdVector};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Lanes<T, const N: usize>(pub [T; N]);

impl<T: Lane, const N: usize> SimdVector for Lanes<T, N> {
    type Lane = T;
    const LANES: usize = N;

    #[inline(always)]
    unsafe fn splat(v: T) -> Self { Lanes([v; N]) }

    #[inline(always)]
    unsafe fn load(src: &[T]) -> Self {
        let mut out = [T::ZERO; N];
        out.copy_from_slice(&src[..N]);
        Lanes(out)
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [T]) { dst[..N].copy_from_slice(&self.0) }

    #[inline(always)]
    unsafe fn adds(self, b: Self) -> Self {
        let mut out = self.0;
        for (o, &y) in out.iter_mut().zip(b.0.iter()) {
            *o = o.add_sat(y);
        }
        Lanes(out)
    }

    #[inline(always)]
    unsafe fn subs(self, b: Self) -> Self {
        let mut out = self.0;
        for (o, &y) in out.iter_mut().zip(b.0.iter()) {
            *o = o.sub_floor(y);
        }
        Lanes(out)
    }

    #[inline(always)]
    unsafe fn max(self, b: Self) -> Self {
        let mut out = self.0;
        for (o, &y) in out.iter_mut().zip(b.0.iter()) {
            *o = (*o).max(y);
        }
        Lanes(out)
    }

    #[inline(always)]
    unsafe fn shift_lanes(self) -> Self {
        let mut out = [T::ZERO; N];
        out[1..].copy_from_slice(&self.0[..N - 1]);
        Lanes(out)
    }

    #[inline(always)]
    unsafe fn is_zero(self) -> bool { self.0.iter().all(|&x| x == T::ZERO) }

    #[inline(always)]
    unsafe fn hmax(self) -> T { self.0.iter().copied().max().unwrap_or(T::ZERO) }
}
