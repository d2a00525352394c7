//! Planar polygon math shared by topology resolution and shape matching.
//!
//! All functions operate on ordered point sequences sampled along a path and
//! treat the sequence as implicitly closed (index N wraps to index 0).
//! Degenerate inputs (fewer than 3 points, near-zero area) are valid and
//! resolve to zeros rather than errors.

use kurbo::Point;

/// Rotational direction implied by a polygon's point ordering.
///
/// The ambient coordinate space has an inverted vertical axis (y grows
/// downward), so the sign convention is flipped relative to Cartesian:
/// positive signed area means clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

/// Shoelace sum over the point sequence, loop closed implicitly.
///
/// Returns the raw sum (twice the signed area); callers that want the
/// enclosed area use [`polygon_area`].
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        sum += p1.x * p2.y - p2.x * p1.y;
    }
    sum
}

/// Absolute enclosed area; 0 for fewer than 3 points.
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs() / 2.0
}

pub fn winding_order(points: &[Point]) -> Winding {
    if signed_area(points) > 0.0 {
        Winding::Clockwise
    } else {
        Winding::CounterClockwise
    }
}

/// Polygon centroid from the standard signed-area formula.
///
/// Falls back to the origin for degenerate polygons (fewer than 3 points or
/// near-zero area), where the formula would divide by zero.
pub fn centroid(points: &[Point]) -> Point {
    let doubled_area = signed_area(points);
    if points.len() < 3 || doubled_area.abs() < f64::EPSILON {
        return Point::ORIGIN;
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..points.len() {
        let p1 = points[i];
        let p2 = points[(i + 1) % points.len()];
        let cross = p1.x * p2.y - p2.x * p1.y;
        cx += (p1.x + p2.x) * cross;
        cy += (p1.y + p2.y) * cross;
    }
    let scale = 1.0 / (3.0 * doubled_area);
    Point::new(cx * scale, cy * scale)
}

/// Counts how many polygon edges a horizontal rightward ray from `point`
/// crosses, summed over every polygon in `polygons`.
///
/// An edge counts only when the ray's y lies in `[min_y, max_y)` (half-open,
/// so shared vertices are never double-counted) and the crossing x is strictly
/// greater than the query x. Purely horizontal edges never count.
pub fn ray_intersections(point: Point, polygons: &[&[Point]]) -> usize {
    let ray_y = point.y;
    let mut count = 0;
    for polygon in polygons {
        for i in 0..polygon.len() {
            let v1 = polygon[i];
            let v2 = polygon[(i + 1) % polygon.len()];
            // keep p1 the vertex with the smaller y
            let (p1, p2) = if v1.y < v2.y { (v1, v2) } else { (v2, v1) };

            if ray_y < p1.y || ray_y >= p2.y {
                continue;
            }
            if point.x > p1.x.max(p2.x) {
                continue;
            }

            let x_diff = p2.x - p1.x;
            if x_diff == 0.0 {
                // vertical edge
                count += 1;
                continue;
            }
            let m = (p2.y - p1.y) / x_diff;
            if m == 0.0 {
                continue;
            }
            let c = p1.y - m * p1.x;
            let intersect_x = (ray_y - c) / m;
            if intersect_x > point.x {
                count += 1;
            }
        }
    }
    count
}

pub fn distance(a: Point, b: Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}
