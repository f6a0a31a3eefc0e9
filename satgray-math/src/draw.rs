use crate::{Grayscale, Sample};

/// Fill the axis-aligned rectangle spanned by `(x1, y1)` and `(x2, y2)`,
/// both corners inclusive and in any order.
///
/// Cells outside the image are clipped away, so a rectangle that is partly or
/// entirely off-canvas is not an error.
pub fn draw_rectangle<T: Sample>(
    img: &mut Grayscale<T>,
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
    fill_value: T,
) {
    let (x_lo, x_hi) = (x1.min(x2), x1.max(x2));
    let (y_lo, y_hi) = (y1.min(y2), y1.max(y2));

    if x_lo >= img.width() || y_lo >= img.height() {
        log::trace!("rectangle ({x1}, {y1})-({x2}, {y2}) lies outside the image");
        return;
    }
    let x_hi = x_hi.min(img.width() - 1);
    let y_hi = y_hi.min(img.height() - 1);

    // both ranges are clipped to the image above
    for y in y_lo..=y_hi {
        img.row_mut(y)[x_lo..=x_hi].fill(fill_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_inside() {
        let mut img: Grayscale<i16> = Grayscale::zeros(5, 5);
        draw_rectangle(&mut img, 1, 1, 3, 3, 9);
        for y in 0..5 {
            for x in 0..5 {
                let inside = (1..=3).contains(&x) && (1..=3).contains(&y);
                assert_eq!(img.at(x, y).unwrap(), if inside { 9 } else { 0 });
            }
        }
    }

    #[test]
    fn test_draw_swapped_corners() {
        let mut a: Grayscale<u8> = Grayscale::zeros(4, 4);
        let mut b: Grayscale<u8> = Grayscale::zeros(4, 4);
        draw_rectangle(&mut a, 0, 2, 2, 0, 5);
        draw_rectangle(&mut b, 2, 0, 0, 2, 5);
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.as_slice().iter().filter(|&&v| v == 5).count(), 9);
    }

    #[test]
    fn test_draw_clipped() {
        let mut img: Grayscale<u8> = Grayscale::zeros(3, 3);
        draw_rectangle(&mut img, 2, 2, usize::MAX, 100, 1);
        assert_eq!(img.as_slice(), &[0, 0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_draw_clipped_on_wide_image() {
        let mut img: Grayscale<u8> = Grayscale::zeros(2, 4);
        draw_rectangle(&mut img, 3, 1, 9, 0, 7);
        assert_eq!(img.as_slice(), &[0, 0, 0, 7, 0, 0, 0, 7]);
    }

    #[test]
    fn test_draw_outside_is_noop() {
        let mut img: Grayscale<u8> = Grayscale::zeros(5, 5);
        draw_rectangle(&mut img, 10, 10, 20, 20, 9);
        assert!(img.as_slice().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_draw_on_empty_image() {
        let mut img: Grayscale<u8> = Grayscale::zeros(0, 0);
        draw_rectangle(&mut img, 0, 0, 0, 0, 9);
        assert!(img.is_empty());
    }
}
