#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use crate::simd::SimdVector;

pub type Simd = __m256i;
pub type HalfSimd = __m128i;

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_loadu(ptr: *const Simd) -> Simd { _mm256_loadu_si256(ptr) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_storeu(ptr: *mut Simd, a: Simd) { _mm256_storeu_si256(ptr, a) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_set1_u8(v: u8) -> Simd { _mm256_set1_epi8(v as i8) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_set1_i16(v: i16) -> Simd { _mm256_set1_epi16(v) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_set1_i32(v: i32) -> Simd { _mm256_set1_epi32(v) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_adds_u8(a: Simd, b: Simd) -> Simd { _mm256_adds_epu8(a, b) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_subs_u8(a: Simd, b: Simd) -> Simd { _mm256_subs_epu8(a, b) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_max_u8(a: Simd, b: Simd) -> Simd { _mm256_max_epu8(a, b) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_adds_i16(a: Simd, b: Simd) -> Simd { _mm256_adds_epi16(a, b) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_subs_floor_i16(a: Simd, b: Simd) -> Simd {
    _mm256_max_epi16(_mm256_subs_epi16(a, b), _mm256_setzero_si256())
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_max_i16(a: Simd, b: Simd) -> Simd { _mm256_max_epi16(a, b) }

/// There is no saturating 32-bit add, so overflowing lanes are patched with
/// `i32::MAX` or `i32::MIN` depending on the sign of `a`.
#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_adds_i32(a: Simd, b: Simd) -> Simd {
    let sum = _mm256_add_epi32(a, b);
    let overflow = _mm256_srai_epi32::<31>(_mm256_and_si256(_mm256_xor_si256(a, sum), _mm256_xor_si256(b, sum)));
    let saturated = _mm256_xor_si256(_mm256_srai_epi32::<31>(a), _mm256_set1_epi32(i32::MAX));
    _mm256_blendv_epi8(sum, saturated, overflow)
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_subs_floor_i32(a: Simd, b: Simd) -> Simd {
    // operands are never negative, so a plain subtract cannot wrap
    _mm256_max_epi32(_mm256_sub_epi32(a, b), _mm256_setzero_si256())
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_max_i32(a: Simd, b: Simd) -> Simd { _mm256_max_epi32(a, b) }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_movemask_i8(a: Simd) -> u32 { _mm256_movemask_epi8(a) as u32 }

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_is_zero(a: Simd) -> bool {
    simd_movemask_i8(_mm256_cmpeq_epi8(a, _mm256_setzero_si256())) == u32::MAX
}

// The 128-bit halves of alignr are independent, so the low half of `a` is
// first moved into the high half of a zeroed vector to carry across the middle.

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_sl1_u8(a: Simd) -> Simd {
    _mm256_alignr_epi8::<15>(a, _mm256_permute2x128_si256::<0x08>(a, a))
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_sl1_i16(a: Simd) -> Simd {
    _mm256_alignr_epi8::<14>(a, _mm256_permute2x128_si256::<0x08>(a, a))
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_sl1_i32(a: Simd) -> Simd {
    _mm256_alignr_epi8::<12>(a, _mm256_permute2x128_si256::<0x08>(a, a))
}

#[target_feature(enable = "avx2")]
#[inline]
unsafe fn halfsimd_fold(a: Simd) -> (HalfSimd, HalfSimd) {
    (_mm256_castsi256_si128(a), _mm256_extracti128_si256::<1>(a))
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_hmax_u8(a: Simd) -> u8 {
    let (lo, hi) = halfsimd_fold(a);
    let mut v = _mm_max_epu8(lo, hi);
    v = _mm_max_epu8(v, _mm_srli_si128::<8>(v));
    v = _mm_max_epu8(v, _mm_srli_si128::<4>(v));
    v = _mm_max_epu8(v, _mm_srli_si128::<2>(v));
    v = _mm_max_epu8(v, _mm_srli_si128::<1>(v));
    (_mm_cvtsi128_si32(v) & 0xff) as u8
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_hmax_i16(a: Simd) -> i16 {
    let (lo, hi) = halfsimd_fold(a);
    let mut v = _mm_max_epi16(lo, hi);
    v = _mm_max_epi16(v, _mm_srli_si128::<8>(v));
    v = _mm_max_epi16(v, _mm_srli_si128::<4>(v));
    v = _mm_max_epi16(v, _mm_srli_si128::<2>(v));
    _mm_cvtsi128_si32(v) as i16
}

#[target_feature(enable = "avx2")]
#[inline]
pub unsafe fn simd_hmax_i32(a: Simd) -> i32 {
    let (lo, hi) = halfsimd_fold(a);
    let mut v = _mm_max_epi32(lo, hi);
    v = _mm_max_epi32(v, _mm_srli_si128::<8>(v));
    v = _mm_max_epi32(v, _mm_srli_si128::<4>(v));
    _mm_cvtsi128_si32(v)
}

#[derive(Copy, Clone, Debug)]
pub struct U8x32(Simd);

#[derive(Copy, Clone, Debug)]
pub struct I16x16(Simd);

#[derive(Copy, Clone, Debug)]
pub struct I32x8(Simd);

macro_rules! impl_avx2_vector {
    ($ty:ident, $lane:ty, $lanes:literal, $set1:ident, $adds:ident, $subs:ident, $max:ident, $sl:ident, $hmax:ident) => {
        impl SimdVector for $ty {
            type Lane = $lane;
            const LANES: usize = $lanes;

            #[inline(always)]
            unsafe fn splat(v: $lane) -> Self { $ty($set1(v)) }

            #[inline(always)]
            unsafe fn load(src: &[$lane]) -> Self {
                debug_assert!(src.len() >= $lanes);
                $ty(simd_loadu(src.as_ptr() as *const Simd))
            }

            #[inline(always)]
            unsafe fn store(self, dst: &mut [$lane]) {
                debug_assert!(dst.len() >= $lanes);
                simd_storeu(dst.as_mut_ptr() as *mut Simd, self.0)
            }

            #[inline(always)]
            unsafe fn adds(self, b: Self) -> Self { $ty($adds(self.0, b.0)) }

            #[inline(always)]
            unsafe fn subs(self, b: Self) -> Self { $ty($subs(self.0, b.0)) }

            #[inline(always)]
            unsafe fn max(self, b: Self) -> Self { $ty($max(self.0, b.0)) }

            #[inline(always)]
            unsafe fn shift_lanes(self) -> Self { $ty($sl(self.0)) }

            #[inline(always)]
            unsafe fn is_zero(self) -> bool { simd_is_zero(self.0) }

            #[inline(always)]
            unsafe fn hmax(self) -> $lane { $hmax(self.0) }
        }
    };
}

impl_avx2_vector!(U8x32, u8, 32, simd_set1_u8, simd_adds_u8, simd_subs_u8, simd_max_u8, simd_sl1_u8, simd_hmax_u8);
impl_avx2_vector!(I16x16, i16, 16, simd_set1_i16, simd_adds_i16, simd_subs_floor_i16, simd_max_i16, simd_sl1_i16, simd_hmax_i16);
impl_avx2_vector!(I32x8, i32, 8, simd_set1_i32, simd_adds_i32, simd_subs_floor_i32, simd_max_i32, simd_sl1_i32, simd_hmax_i32);
