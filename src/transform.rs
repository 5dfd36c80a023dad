//! Drawing-unit to output-unit rescaling
//!
//! 1 cm in the drawing corresponds to 100 mil in the output. Artwork
//! coordinates are 2.3 inch format (1 unit = 1 mil), drill coordinates are
//! ten times finer. Both transforms swap the axes to match the plotter's
//! coordinate convention; division truncates toward zero.

use crate::fig::Point;

/// Rescale a point for artwork output.
pub fn artwork_point(p: Point) -> Point {
    Point {
        x: 2 * p.y / 9,
        y: 2 * p.x / 9,
    }
}

/// Rescale a point for drill output.
pub fn drill_point(p: Point) -> Point {
    Point {
        x: 20 * p.y / 9,
        y: 20 * p.x / 9,
    }
}

/// Rescale a scalar length (radius, half-width) for artwork output.
pub fn artwork_length(value: i32) -> i32 {
    2 * value / 9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artwork_swaps_axes() {
        let p = artwork_point(Point::new(450, 900));
        assert_eq!(p, Point::new(200, 100));
    }

    #[test]
    fn drill_resolution_is_ten_times_finer() {
        let a = artwork_point(Point::new(450, 900));
        let d = drill_point(Point::new(450, 900));
        assert_eq!(d, Point::new(a.x * 10, a.y * 10));
    }

    #[test]
    fn truncates_toward_zero() {
        assert_eq!(artwork_length(8), 1);
        assert_eq!(artwork_length(-8), -1);
        assert_eq!(artwork_point(Point::new(-10, 10)), Point::new(2, -2));
    }

    #[test]
    fn rescaling_round_trips_within_one_unit() {
        for v in [0, 1, 9, 135, 450, 2250, 12345] {
            let out = artwork_length(v);
            let back = out * 9 / 2;
            assert!((v - back).abs() <= 9 / 2 + 1, "{} -> {} -> {}", v, out, back);
            let fine = 20 * v / 9;
            let back = fine * 9 / 20;
            assert!((v - back).abs() <= 1, "{} -> {} -> {}", v, fine, back);
        }
    }
}
