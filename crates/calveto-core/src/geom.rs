//! 3D geometric primitives shared by the trajectory and track-finding code.

use nalgebra::Vector3;

/// Distance returned by [`dist_two_lines`] when the two direction vectors are
/// parallel. Larger than any real detector dimension.
pub const PARALLEL_LINE_DIST: f64 = 100.0;

/// An infinite line through two 3D points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub p1: Vector3<f64>,
    pub p2: Vector3<f64>,
}

impl Line {
    pub fn new(p1: Vector3<f64>, p2: Vector3<f64>) -> Self {
        Self { p1, p2 }
    }

    /// Direction vector `p2 − p1` (not normalized).
    pub fn direction(&self) -> Vector3<f64> {
        self.p2 - self.p1
    }
}

/// Distance between two infinite (generally skew) lines.
///
/// `|((a_dir × b_dir) · (a.p1 − b.p1))| / |a_dir × b_dir|`. When the
/// directions are parallel the common perpendicular is not unique and
/// [`PARALLEL_LINE_DIST`] is returned instead.
pub fn dist_two_lines(a: &Line, b: &Line) -> f64 {
    let e1 = a.p1 - a.p2;
    let e2 = b.p1 - b.p2;
    let crs = e1.cross(&e2);
    let mag = crs.norm();
    if mag == 0.0 {
        PARALLEL_LINE_DIST
    } else {
        (crs.dot(&(a.p1 - b.p1)) / mag).abs()
    }
}

/// Perpendicular distance from a point to an infinite line.
pub fn dist_pt_to_line(point: &Vector3<f64>, line: &Line) -> f64 {
    let d1 = point - line.p1;
    let d2 = point - line.p2;
    d1.cross(&d2).norm() / (line.p1 - line.p2).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f64, y: f64, z: f64) -> Vector3<f64> {
        Vector3::new(x, y, z)
    }

    #[test]
    fn skew_lines_distance() {
        // Line along x at z = 0 and line along y at z = 5: closest approach 5.
        let a = Line::new(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        let b = Line::new(v(0.0, 0.0, 5.0), v(0.0, 1.0, 5.0));
        assert_relative_eq!(dist_two_lines(&a, &b), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn dist_two_lines_is_symmetric() {
        let a = Line::new(v(1.0, 2.0, 3.0), v(4.0, -1.0, 0.5));
        let b = Line::new(v(-2.0, 0.0, 7.0), v(3.0, 3.0, -1.0));
        assert_relative_eq!(
            dist_two_lines(&a, &b),
            dist_two_lines(&b, &a),
            epsilon = 1e-12
        );
    }

    #[test]
    fn parallel_lines_return_sentinel() {
        let a = Line::new(v(0.0, 0.0, 0.0), v(0.0, 0.0, 1.0));
        let b = Line::new(v(3.0, 4.0, 0.0), v(3.0, 4.0, 10.0));
        assert_eq!(dist_two_lines(&a, &b), PARALLEL_LINE_DIST);
        // A line is parallel to itself.
        assert_eq!(dist_two_lines(&a, &a), PARALLEL_LINE_DIST);
    }

    #[test]
    fn intersecting_lines_have_zero_distance() {
        let a = Line::new(v(0.0, 0.0, 0.0), v(1.0, 1.0, 1.0));
        let b = Line::new(v(1.0, 0.0, 0.0), v(0.0, 1.0, 1.0));
        // Both pass through (0.5, 0.5, 0.5).
        assert_relative_eq!(dist_two_lines(&a, &b), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn point_to_line_distance() {
        let line = Line::new(v(0.0, 0.0, 0.0), v(10.0, 0.0, 0.0));
        assert_relative_eq!(dist_pt_to_line(&v(5.0, 3.0, 0.0), &line), 3.0, epsilon = 1e-12);
        assert_relative_eq!(dist_pt_to_line(&v(5.0, 0.0, 4.0), &line), 4.0, epsilon = 1e-12);
        // Point on the line.
        assert_relative_eq!(dist_pt_to_line(&v(-7.0, 0.0, 0.0), &line), 0.0, epsilon = 1e-12);
    }
}
