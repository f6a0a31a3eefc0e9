use crate::sample::Sample;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Absolute tolerance used by [`Grayscale::equals`], applied to the
/// difference of each pair of samples.
pub const EPSILON: f64 = 1e-6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrayscaleError {
    #[error("index ({x}, {y}) out of range for {width}x{height} image")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
    #[error("sizes don't match: {}x{} vs {}x{}", .left.0, .left.1, .right.0, .right.1)]
    SizeMismatch {
        /// (width, height) of the left operand
        left: (usize, usize),
        /// (width, height) of the right operand
        right: (usize, usize),
    },
    #[error("data length {actual} does not match width * height = {expected}")]
    DataLength { expected: usize, actual: usize },
    #[error("{width}x{height} image overflows usize")]
    TooLarge { width: usize, height: usize },
}

/// Sample count of a `height x width` buffer.
pub(crate) fn area(height: usize, width: usize) -> Result<usize, GrayscaleError> {
    width
        .checked_mul(height)
        .ok_or(GrayscaleError::TooLarge { width, height })
}

/// How a freshly constructed buffer is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fill {
    /// Every sample is [`Sample::ZERO`].
    Zero,
    /// Samples drawn from a generator seeded from OS entropy, independently
    /// for each buffer.
    #[default]
    Random,
    /// Samples drawn from a generator seeded with the given value.
    Seeded(u64),
}

/// Dense row-major 2D buffer of samples.
///
/// `(x, y)` lives at `data[y * width + x]`. The buffer is owned; `clone`
/// produces an independent deep copy.
#[derive(Debug, Clone)]
pub struct Grayscale<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T: Sample> Grayscale<T> {
    /// Create a `height x width` buffer, random-filled when `fill_random`
    /// is set and zero-filled otherwise.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn new(height: usize, width: usize, fill_random: bool) -> Self {
        let fill = if fill_random { Fill::Random } else { Fill::Zero };
        Self::with_fill(height, width, fill)
    }

    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`; see
    /// [`try_with_fill`](Self::try_with_fill).
    pub fn with_fill(height: usize, width: usize, fill: Fill) -> Self {
        match Self::try_with_fill(height, width, fill) {
            Ok(img) => img,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn try_with_fill(height: usize, width: usize, fill: Fill) -> Result<Self, GrayscaleError> {
        let len = area(height, width)?;
        let data = match fill {
            Fill::Zero => vec![T::ZERO; len],
            Fill::Random => {
                let mut rng = StdRng::from_entropy();
                (0..len).map(|_| T::random(&mut rng)).collect()
            }
            Fill::Seeded(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..len).map(|_| T::random(&mut rng)).collect()
            }
        };
        log::debug!("new {}x{} grayscale ({:?})", width, height, fill);
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Zero-filled buffer. Panics on overflow like [`with_fill`](Self::with_fill).
    pub fn zeros(height: usize, width: usize) -> Self {
        Self::with_fill(height, width, Fill::Zero)
    }

    /// Buffer with every sample set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`.
    pub fn filled(height: usize, width: usize, value: T) -> Self {
        let len = match area(height, width) {
            Ok(len) => len,
            Err(err) => panic!("{}", err),
        };
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }

    /// Wrap row-major `data` as a `height x width` buffer.
    pub fn from_vec(height: usize, width: usize, data: Vec<T>) -> Result<Self, GrayscaleError> {
        let expected = area(height, width)?;
        if data.len() != expected {
            return Err(GrayscaleError::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of samples (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Rows in increasing `y` order.
    ///
    /// A zero-width buffer still yields `height` empty rows.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.height).map(move |y| &self.data[y * self.width..(y + 1) * self.width])
    }

    /// Row `y` as a mutable slice. Panics if `y >= height`.
    pub(crate) fn row_mut(&mut self, y: usize) -> &mut [T] {
        &mut self.data[y * self.width..(y + 1) * self.width]
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize, GrayscaleError> {
        if x >= self.width || y >= self.height {
            return Err(GrayscaleError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Sample at `(x, y)`.
    pub fn at(&self, x: usize, y: usize) -> Result<T, GrayscaleError> {
        let i = self.index(x, y)?;
        Ok(self.data[i])
    }

    /// Mutable reference to the sample at `(x, y)`.
    pub fn at_mut(&mut self, x: usize, y: usize) -> Result<&mut T, GrayscaleError> {
        let i = self.index(x, y)?;
        Ok(&mut self.data[i])
    }

    pub fn set(&mut self, x: usize, y: usize, value: T) -> Result<(), GrayscaleError> {
        *self.at_mut(x, y)? = value;
        Ok(())
    }

    pub(crate) fn from_parts(height: usize, width: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Sample at `(x, y)`, or `ZERO` outside the buffer. Used by the
    /// zero-padded operators.
    #[inline]
    pub(crate) fn padded(&self, x: usize, y: usize) -> T {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            T::ZERO
        }
    }

    pub(crate) fn map(&self, f: impl Fn(T) -> T) -> Self {
        Self {
            width: self.width,
            height: self.height,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub(crate) fn map_in_place(&mut self, f: impl Fn(T) -> T) {
        for v in &mut self.data {
            *v = f(*v);
        }
    }

    /// Same dimensions, every pair of samples within [`EPSILON`].
    pub fn equals(&self, other: &Self) -> bool {
        if self.width != other.width || self.height != other.height {
            return false;
        }
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(&a, &b)| a.abs_diff_f64(b) <= EPSILON)
    }

    pub fn not_equals(&self, other: &Self) -> bool {
        !self.equals(other)
    }

    /// Fraction of the maximum possible total intensity that is filled:
    /// `sum / (width * height * MAX)`. A zero-sized buffer reports `0.0`.
    pub fn fill_coefficient(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.data.iter().map(|v| v.to_f64()).sum();
        sum / (self.data.len() as f64 * T::MAX.to_f64())
    }

    /// Text rendering split into one string per row.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows()
            .map(|row| {
                row.iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

impl<T: Sample> PartialEq for Grayscale<T> {
    /// Tolerant comparison, see [`Grayscale::equals`].
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Sample> fmt::Display for Grayscale<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (x, v) in row.iter().enumerate() {
                if x > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{}", v)?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
