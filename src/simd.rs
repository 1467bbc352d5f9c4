//! Lane types, the vector abstraction used by the sweep, and engine selection.

use std::fmt::Debug;

use crate::escalate::Width;
use crate::portable::Lanes;

/// Element type of a score vector.
///
/// `u8` lanes are biased: profile entries carry `score + bias` so that the
/// unsigned saturating sums never need to represent a negative value. The
/// signed widths store scores as they are and clamp subtractions at zero, so
/// every DP cell is non-negative at every width.
pub trait Lane: Copy + Ord + Debug + Default + Send + Sync + 'static {
    const WIDTH: Width;
    const ZERO: Self;
    const MAX: Self;
    const BIASED: bool;

    /// 128-bit portable vector.
    type Narrow: SimdVector<Lane = Self>;
    /// Single lane vector.
    type Scalar: SimdVector<Lane = Self>;
    /// 256-bit AVX2 vector.
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    type Wide: SimdVector<Lane = Self>;

    /// Clamps into the representable range.
    fn from_i32(v: i32) -> Self;
    /// Non-negative values only; negative lanes read as zero.
    fn to_u32(self) -> u32;
    fn add_sat(self, b: Self) -> Self;
    /// Saturating subtraction with a floor of zero.
    fn sub_floor(self, b: Self) -> Self;

    #[inline]
    fn from_u32(v: u32) -> Self {
        Self::from_i32(v.min(i32::MAX as u32) as i32)
    }
}

impl Lane for u8 {
    const WIDTH: Width = Width::W8;
    const ZERO: Self = 0;
    const MAX: Self = u8::MAX;
    const BIASED: bool = true;

    type Narrow = Lanes<u8, 16>;
    type Scalar = Lanes<u8, 1>;
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    type Wide = crate::avx2::U8x32;

    #[inline]
    fn from_i32(v: i32) -> Self { v.clamp(0, u8::MAX as i32) as u8 }
    #[inline]
    fn to_u32(self) -> u32 { self as u32 }
    #[inline]
    fn add_sat(self, b: Self) -> Self { self.saturating_add(b) }
    #[inline]
    fn sub_floor(self, b: Self) -> Self { self.saturating_sub(b) }
}

impl Lane for i16 {
    const WIDTH: Width = Width::W16;
    const ZERO: Self = 0;
    const MAX: Self = i16::MAX;
    const BIASED: bool = false;

    type Narrow = Lanes<i16, 8>;
    type Scalar = Lanes<i16, 1>;
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    type Wide = crate::avx2::I16x16;

    #[inline]
    fn from_i32(v: i32) -> Self { v.clamp(i16::MIN as i32, i16::MAX as i32) as i16 }
    #[inline]
    fn to_u32(self) -> u32 { self.max(0) as u32 }
    #[inline]
    fn add_sat(self, b: Self) -> Self { self.saturating_add(b) }
    #[inline]
    fn sub_floor(self, b: Self) -> Self { self.saturating_sub(b).max(0) }
}

impl Lane for i32 {
    const WIDTH: Width = Width::W32;
    const ZERO: Self = 0;
    const MAX: Self = i32::MAX;
    const BIASED: bool = false;

    type Narrow = Lanes<i32, 4>;
    type Scalar = Lanes<i32, 1>;
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    type Wide = crate::avx2::I32x8;

    #[inline]
    fn from_i32(v: i32) -> Self { v }
    #[inline]
    fn to_u32(self) -> u32 { self.max(0) as u32 }
    #[inline]
    fn add_sat(self, b: Self) -> Self { self.saturating_add(b) }
    #[inline]
    fn sub_floor(self, b: Self) -> Self { self.saturating_sub(b).max(0) }
}

/// Operations the striped sweep needs from a vector of lanes.
///
/// All methods are `unsafe` because the wide implementation requires the
/// matching CPU feature to be present; `load` and `store` additionally expect
/// at least `LANES` elements in the slice.
pub trait SimdVector: Copy {
    type Lane: Lane;
    const LANES: usize;

    unsafe fn splat(v: Self::Lane) -> Self;

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self::splat(<Self::Lane as Lane>::ZERO)
    }

    unsafe fn load(src: &[Self::Lane]) -> Self;
    unsafe fn store(self, dst: &mut [Self::Lane]);

    /// Saturating add.
    unsafe fn adds(self, b: Self) -> Self;
    /// Saturating subtract, never below zero.
    unsafe fn subs(self, b: Self) -> Self;
    unsafe fn max(self, b: Self) -> Self;
    /// Moves lane `i` to lane `i + 1`, lane 0 becomes zero.
    unsafe fn shift_lanes(self) -> Self;
    unsafe fn is_zero(self) -> bool;
    unsafe fn hmax(self) -> Self::Lane;
}

/// Which vector implementation runs the sweep.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Engine {
    /// 256-bit AVX2 vectors.
    Wide,
    /// 128-bit portable vectors.
    Narrow,
    /// One lane per vector.
    Scalar,
}

impl Engine {
    /// Environment variable that overrides CPU detection.
    pub const ENV_VAR: &'static str = "STRIPED_ALIGNER_ENGINE";

    /// Picks the engine for this process.
    ///
    /// The `no_simd` feature always yields [`Engine::Scalar`]. Otherwise
    /// `STRIPED_ALIGNER_ENGINE` (`wide`/`avx2`, `narrow`, `scalar`) wins when
    /// the CPU supports the requested engine, and the widest supported engine
    /// is used when it is unset.
    pub fn detect() -> Engine {
        if cfg!(feature = "no_simd") {
            log::info!("Using {} engine (no_simd build)", Engine::Scalar.description());
            return Engine::Scalar;
        }

        if let Ok(value) = std::env::var(Self::ENV_VAR) {
            match Engine::from_name(&value) {
                Some(engine) if engine.is_available() => {
                    log::info!("Using {} engine (forced by {})", engine.description(), Self::ENV_VAR);
                    return engine;
                }
                Some(engine) => {
                    log::warn!("{}={} requested, but the CPU lacks support for it", Self::ENV_VAR, engine.name());
                }
                None => {
                    log::warn!("Ignoring unknown {} value {:?}", Self::ENV_VAR, value);
                }
            }
        }

        let engine = if wide_supported() { Engine::Wide } else { Engine::Narrow };
        log::info!("Using {} engine", engine.description());
        engine
    }

    pub fn from_name(name: &str) -> Option<Engine> {
        match name.trim().to_ascii_lowercase().as_str() {
            "wide" | "avx2" => Some(Engine::Wide),
            "narrow" | "sse" | "128" => Some(Engine::Narrow),
            "scalar" | "none" => Some(Engine::Scalar),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Engine::Wide => "wide",
            Engine::Narrow => "narrow",
            Engine::Scalar => "scalar",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Engine::Wide => "AVX2 (256-bit)",
            Engine::Narrow => "portable (128-bit)",
            Engine::Scalar => "scalar (1 lane)",
        }
    }

    pub fn is_available(self) -> bool {
        match self {
            Engine::Wide => wide_supported(),
            Engine::Narrow | Engine::Scalar => true,
        }
    }

    /// Engines usable on this machine, widest first.
    pub fn available() -> Vec<Engine> {
        [Engine::Wide, Engine::Narrow, Engine::Scalar]
            .into_iter()
            .filter(|e| e.is_available())
            .collect()
    }

    /// Lanes per vector for element type `T`.
    pub fn lanes<T: Lane>(self) -> usize {
        match self {
            Engine::Wide => wide_lanes::<T>(),
            Engine::Narrow => <T::Narrow as SimdVector>::LANES,
            Engine::Scalar => <T::Scalar as SimdVector>::LANES,
        }
    }
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn wide_supported() -> bool {
    !cfg!(feature = "no_simd") && is_x86_feature_detected!("avx2")
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn wide_supported() -> bool {
    false
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
fn wide_lanes<T: Lane>() -> usize {
    <T::Wide as SimdVector>::LANES
}

#[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
fn wide_lanes<T: Lane>() -> usize {
    <T::Narrow as SimdVector>::LANES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lane_scalar_ops() {
        assert_eq!(250u8.add_sat(10), 255);
        assert_eq!(3u8.sub_floor(5), 0);
        assert_eq!(u8::from_i32(-4), 0);
        assert_eq!(u8::from_i32(300), 255);

        assert_eq!(i16::MAX.add_sat(1), i16::MAX);
        assert_eq!(3i16.sub_floor(5), 0);
        assert_eq!((-7i16).to_u32(), 0);
        assert_eq!(i16::from_i32(-40000), i16::MIN);

        assert_eq!(i32::MAX.add_sat(7), i32::MAX);
        assert_eq!(10i32.sub_floor(4), 6);
        assert_eq!(i32::from_u32(u32::MAX), i32::MAX);
    }

    #[test]
    fn test_engine_lanes() {
        assert_eq!(Engine::Narrow.lanes::<u8>(), 16);
        assert_eq!(Engine::Narrow.lanes::<i16>(), 8);
        assert_eq!(Engine::Narrow.lanes::<i32>(), 4);
        assert_eq!(Engine::Scalar.lanes::<i32>(), 1);
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            assert_eq!(Engine::Wide.lanes::<u8>(), 32);
            assert_eq!(Engine::Wide.lanes::<i16>(), 16);
            assert_eq!(Engine::Wide.lanes::<i32>(), 8);
        }
    }

    #[test]
    fn test_engine_names() {
        assert_eq!(Engine::from_name("AVX2"), Some(Engine::Wide));
        assert_eq!(Engine::from_name(" narrow "), Some(Engine::Narrow));
        assert_eq!(Engine::from_name("scalar"), Some(Engine::Scalar));
        assert_eq!(Engine::from_name("neon"), None);

        let available = Engine::available();
        assert!(available.contains(&Engine::Narrow));
        assert!(available.contains(&Engine::Scalar));
        assert!(available.contains(&Engine::detect()));
    }
}
