use rand::Rng;
use std::fmt;

/// Scalar element type of a [`Grayscale`](crate::Grayscale) buffer.
///
/// Each category (integers, floats, bool) picks its own saturation, negation
/// and random-fill behavior here, so the buffer code never inspects types at
/// runtime.
///
/// Arithmetic never wraps: results are the exact value clamped to
/// `[MIN, MAX]`.
pub trait Sample: Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display {
    const ZERO: Self;
    const MIN: Self;
    const MAX: Self;

    fn saturating_add(self, rhs: Self) -> Self;
    fn saturating_sub(self, rhs: Self) -> Self;
    fn saturating_mul(self, rhs: Self) -> Self;

    /// Additive inverse clamped to `[MIN, MAX]`; logical not for `bool`.
    fn negate(self) -> Self;

    fn to_f64(self) -> f64;

    /// `|self - other|` as `f64`. Integers take the difference in their own
    /// type first, so samples beyond 2^53 still compare exactly.
    fn abs_diff_f64(self, other: Self) -> f64;

    /// Draw one random sample for this category.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

// Integers draw from [0, min(255, MAX)].
macro_rules! impl_integer_sample {
    ($($t:ty => $ceil:expr),* $(,)?) => {
        $(
            impl Sample for $t {
                const ZERO: Self = 0;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    <$t>::saturating_add(self, rhs)
                }
                #[inline]
                fn saturating_sub(self, rhs: Self) -> Self {
                    <$t>::saturating_sub(self, rhs)
                }
                #[inline]
                fn saturating_mul(self, rhs: Self) -> Self {
                    <$t>::saturating_mul(self, rhs)
                }
                #[inline]
                fn negate(self) -> Self {
                    // 0 - x: unsigned clamps to 0, i*::MIN clamps to i*::MAX
                    <$t>::saturating_sub(0, self)
                }
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
                #[inline]
                fn abs_diff_f64(self, other: Self) -> f64 {
                    <$t>::abs_diff(self, other) as f64
                }
                fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    rng.gen_range(0..=$ceil)
                }
            }
        )*
    };
}

impl_integer_sample! {
    u8 => u8::MAX,
    i8 => i8::MAX,
    u16 => 255,
    i16 => 255,
    u32 => 255,
    i32 => 255,
    u64 => 255,
    i64 => 255,
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                const ZERO: Self = 0.0;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;

                #[inline]
                fn saturating_add(self, rhs: Self) -> Self {
                    (self + rhs).clamp(Self::MIN, Self::MAX)
                }
                #[inline]
                fn saturating_sub(self, rhs: Self) -> Self {
                    (self - rhs).clamp(Self::MIN, Self::MAX)
                }
                #[inline]
                fn saturating_mul(self, rhs: Self) -> Self {
                    (self * rhs).clamp(Self::MIN, Self::MAX)
                }
                #[inline]
                fn negate(self) -> Self {
                    -self
                }
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
                #[inline]
                fn abs_diff_f64(self, other: Self) -> f64 {
                    (self as f64 - other as f64).abs()
                }
                fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
                    rng.gen_range(0.0..=255.0)
                }
            }
        )*
    };
}

impl_float_sample!(f32, f64);

/// Booleans behave like a one-bit intensity: add is `or`, sub is `and not`,
/// mul is `and`.
impl Sample for bool {
    const ZERO: Self = false;
    const MIN: Self = false;
    const MAX: Self = true;

    #[inline]
    fn saturating_add(self, rhs: Self) -> Self {
        self | rhs
    }
    #[inline]
    fn saturating_sub(self, rhs: Self) -> Self {
        self & !rhs
    }
    #[inline]
    fn saturating_mul(self, rhs: Self) -> Self {
        self & rhs
    }
    #[inline]
    fn negate(self) -> Self {
        !self
    }
    #[inline]
    fn to_f64(self) -> f64 {
        u8::from(self) as f64
    }
    #[inline]
    fn abs_diff_f64(self, other: Self) -> f64 {
        u8::from(self != other) as f64
    }
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.gen_bool(0.5)
    }
}
