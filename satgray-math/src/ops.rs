use super::grayscale::area;
use super::{Grayscale, GrayscaleError, Sample};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

impl<T: Sample> Grayscale<T> {
    /// Element-wise saturating multiplication.
    ///
    /// Both operands must have identical dimensions.
    pub fn multiply(&self, other: &Self) -> Result<Self, GrayscaleError> {
        if self.width() != other.width() || self.height() != other.height() {
            log::debug!(
                "multiply rejected: {}x{} vs {}x{}",
                self.width(),
                self.height(),
                other.width(),
                other.height()
            );
            return Err(GrayscaleError::SizeMismatch {
                left: (self.width(), self.height()),
                right: (other.width(), other.height()),
            });
        }

        let data = self
            .as_slice()
            .iter()
            .zip(other.as_slice().iter())
            .map(|(&a, &b)| a.saturating_mul(b))
            .collect();

        Ok(Self::from_parts(self.height(), self.width(), data))
    }

    /// Scalar multiplication (saturating)
    pub fn multiply_scalar(&self, scalar: T) -> Self {
        self.map(|v| v.saturating_mul(scalar))
    }

    pub fn multiply_scalar_assign(&mut self, scalar: T) -> &mut Self {
        self.map_in_place(|v| v.saturating_mul(scalar));
        self
    }

    /// Element-wise saturating addition.
    ///
    /// Operands may differ in size: the result covers the larger extent in
    /// each direction and cells missing from an operand count as zero.
    ///
    /// # Panics
    ///
    /// Panics if the padded extent overflows `usize`, e.g. a `0 x usize::MAX`
    /// buffer added to a `usize::MAX x 0` one.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_padded(other, |a, b| a.saturating_add(b))
    }

    pub fn add_scalar(&self, scalar: T) -> Self {
        self.map(|v| v.saturating_add(scalar))
    }

    pub fn add_scalar_assign(&mut self, scalar: T) -> &mut Self {
        self.map_in_place(|v| v.saturating_add(scalar));
        self
    }

    /// Element-wise saturating subtraction with the same zero padding as
    /// [`Grayscale::add`].
    pub fn subtract(&self, other: &Self) -> Self {
        self.zip_padded(other, |a, b| a.saturating_sub(b))
    }

    pub fn subtract_scalar(&self, scalar: T) -> Self {
        self.map(|v| v.saturating_sub(scalar))
    }

    pub fn subtract_scalar_assign(&mut self, scalar: T) -> &mut Self {
        self.map_in_place(|v| v.saturating_sub(scalar));
        self
    }

    /// Per-sample [`Sample::negate`].
    pub fn negate(&self) -> Self {
        self.map(Sample::negate)
    }

    fn zip_padded(&self, other: &Self, f: impl Fn(T, T) -> T) -> Self {
        let width = self.width().max(other.width());
        let height = self.height().max(other.height());

        let len = match area(height, width) {
            Ok(len) => len,
            Err(err) => panic!("{}", err),
        };
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(self.padded(x, y), other.padded(x, y)));
            }
        }

        Self::from_parts(height, width, data)
    }
}

/// `scalar + img`, identical to `img + scalar`.
pub fn scalar_add<T: Sample>(scalar: T, img: &Grayscale<T>) -> Grayscale<T> {
    img.add_scalar(scalar)
}

/// `scalar - img`, computed as `-(img - scalar)`.
pub fn scalar_sub<T: Sample>(scalar: T, img: &Grayscale<T>) -> Grayscale<T> {
    img.subtract_scalar(scalar).negate()
}

impl<T: Sample> Add for &Grayscale<T> {
    type Output = Grayscale<T>;

    fn add(self, rhs: Self) -> Grayscale<T> {
        Grayscale::add(self, rhs)
    }
}

impl<T: Sample> Sub for &Grayscale<T> {
    type Output = Grayscale<T>;

    fn sub(self, rhs: Self) -> Grayscale<T> {
        self.subtract(rhs)
    }
}

impl<T: Sample> Neg for &Grayscale<T> {
    type Output = Grayscale<T>;

    fn neg(self) -> Grayscale<T> {
        self.negate()
    }
}

impl<T: Sample> Neg for Grayscale<T> {
    type Output = Grayscale<T>;

    fn neg(self) -> Grayscale<T> {
        self.negate()
    }
}

// Scalar operators are spelled out per sample type so that the reflected
// forms (`scalar + &img`) can be implemented on the primitive.
macro_rules! impl_scalar_ops {
    ($($t:ty),*) => {
        $(
            impl Add<$t> for &Grayscale<$t> {
                type Output = Grayscale<$t>;
                fn add(self, rhs: $t) -> Grayscale<$t> {
                    self.add_scalar(rhs)
                }
            }

            impl Sub<$t> for &Grayscale<$t> {
                type Output = Grayscale<$t>;
                fn sub(self, rhs: $t) -> Grayscale<$t> {
                    self.subtract_scalar(rhs)
                }
            }

            impl Mul<$t> for &Grayscale<$t> {
                type Output = Grayscale<$t>;
                fn mul(self, rhs: $t) -> Grayscale<$t> {
                    self.multiply_scalar(rhs)
                }
            }

            impl AddAssign<$t> for Grayscale<$t> {
                fn add_assign(&mut self, rhs: $t) {
                    self.add_scalar_assign(rhs);
                }
            }

            impl SubAssign<$t> for Grayscale<$t> {
                fn sub_assign(&mut self, rhs: $t) {
                    self.subtract_scalar_assign(rhs);
                }
            }

            impl MulAssign<$t> for Grayscale<$t> {
                fn mul_assign(&mut self, rhs: $t) {
                    self.multiply_scalar_assign(rhs);
                }
            }

            impl Add<&Grayscale<$t>> for $t {
                type Output = Grayscale<$t>;
                fn add(self, rhs: &Grayscale<$t>) -> Grayscale<$t> {
                    scalar_add(self, rhs)
                }
            }

            impl Sub<&Grayscale<$t>> for $t {
                type Output = Grayscale<$t>;
                fn sub(self, rhs: &Grayscale<$t>) -> Grayscale<$t> {
                    scalar_sub(self, rhs)
                }
            }
        )*
    };
}

impl_scalar_ops!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64, bool);

#[cfg(test)]
mod tests {
    use super::*;

    fn img(height: usize, width: usize, data: Vec<i16>) -> Grayscale<i16> {
        Grayscale::from_vec(height, width, data).unwrap()
    }

    #[test]
    fn test_multiply() {
        let a = img(1, 3, vec![2, -3, 200]);
        let b = img(1, 3, vec![5, 4, 200]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.as_slice(), &[10, -12, i16::MAX]);
    }

    #[test]
    fn test_multiply_negative_saturates_to_min() {
        let a = img(1, 2, vec![-300, 300]);
        let b = img(1, 2, vec![300, -300]);
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.as_slice(), &[i16::MIN, i16::MIN]);
    }

    #[test]
    fn test_multiply_size_mismatch() {
        let a: Grayscale<i16> = Grayscale::zeros(2, 3);
        let b: Grayscale<i16> = Grayscale::zeros(3, 2);
        let err = a.multiply(&b).unwrap_err();
        assert_eq!(
            err,
            GrayscaleError::SizeMismatch {
                left: (3, 2),
                right: (2, 3)
            }
        );
    }

    #[test]
    fn test_mul_scalar_chain() {
        let mut a = img(1, 2, vec![3, 20_000]);
        a.multiply_scalar_assign(2).add_scalar_assign(1);
        assert_eq!(a.as_slice(), &[7, i16::MAX]);
        assert_eq!((&a * 0i16).as_slice(), &[0, 0]);
    }

    #[test]
    fn test_add_padding() {
        let a = img(1, 2, vec![1, 2]);
        let b = img(2, 1, vec![10, 20]);
        let c = &a + &b;
        assert_eq!((c.width(), c.height()), (2, 2));
        assert_eq!(c.as_slice(), &[11, 2, 20, 0]);
    }

    #[test]
    #[should_panic(expected = "overflows usize")]
    fn test_add_padding_overflow_panics() {
        let wide: Grayscale<u8> = Grayscale::zeros(0, usize::MAX);
        let tall: Grayscale<u8> = Grayscale::zeros(usize::MAX, 0);
        let _ = &wide + &tall;
    }

    #[test]
    fn test_subtract_padding_and_saturation() {
        let a = img(1, 1, vec![i16::MIN + 1]);
        let b = img(1, 2, vec![5, 7]);
        let c = a.subtract(&b);
        assert_eq!(c.as_slice(), &[i16::MIN, -7]);
    }

    #[test]
    fn test_scalar_add_saturates() {
        let a = img(1, 3, vec![i16::MAX - 1, 0, -5]);
        let b = &a + 10i16;
        assert_eq!(b.as_slice(), &[i16::MAX, 10, 5]);
    }

    #[test]
    fn test_subtract_assign() {
        let mut a = img(1, 2, vec![i16::MIN, 4]);
        a -= 3i16;
        assert_eq!(a.as_slice(), &[i16::MIN, 1]);
    }

    #[test]
    fn test_reflected_operators() {
        let a = img(2, 2, vec![1, 2, 3, 4]);
        assert_eq!(10i16 + &a, &a + 10i16);
        let diff = 10i16 - &a;
        assert_eq!(diff.as_slice(), &[9, 8, 7, 6]);
        assert_eq!(diff, -(&a - 10i16));
    }

    #[test]
    fn test_negate_bool() {
        let a = Grayscale::from_vec(1, 3, vec![true, false, true]).unwrap();
        assert_eq!(a.negate().as_slice(), &[false, true, false]);
    }

    #[test]
    fn test_unsigned_negate_clamps_to_zero() {
        let a = Grayscale::from_vec(1, 2, vec![0u8, 9]).unwrap();
        assert_eq!((-&a).as_slice(), &[0, 0]);
    }
}
