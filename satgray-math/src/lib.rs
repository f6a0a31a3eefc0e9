//! # satgray-math
//!
//! Dense 2D grayscale buffers with saturating arithmetic.
//!
//! [`Grayscale<T>`] stores `width * height` samples in row-major order. Its
//! arithmetic never wraps around: sums, differences and products that leave
//! the range of `T` are clamped to `T::MIN` / `T::MAX`. The per-type behavior
//! (saturation, negation, random fill) lives in the [`Sample`] trait.
//!
//! ```
//! use satgray_math::{draw_rectangle, Grayscale};
//!
//! let mut img: Grayscale<u8> = Grayscale::zeros(4, 4);
//! draw_rectangle(&mut img, 1, 1, 2, 2, 200);
//!
//! let brighter = &img + 100u8;
//! assert_eq!(brighter.at(1, 1).unwrap(), u8::MAX);
//! assert_eq!(brighter.at(0, 0).unwrap(), 100);
//! ```

pub mod draw;
pub mod grayscale;
pub mod ops;
pub mod sample;

pub use draw::draw_rectangle;
pub use grayscale::{Fill, Grayscale, GrayscaleError, EPSILON};
pub use ops::{scalar_add, scalar_sub};
pub use sample::Sample;
