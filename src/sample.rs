//! Rendering-independent path sampling.
//!
//! The topology and matching stages need a dense polyline for each subpath.
//! Instead of delegating to a live rendering surface, paths are parsed with
//! kurbo and walked at a fixed arc-length step. The step is a resolution
//! parameter, not a constant; 1.0 matches the original behavior.

use kurbo::{BezPath, ParamCurve, ParamCurveArclen, Point};

use crate::error::{MorphError, MorphResult};

/// Accuracy bound for kurbo arc-length queries. Well below any practical
/// sampling step.
const ARCLEN_ACCURACY: f64 = 1e-3;

/// Samples `d` at `step` units of arc length, starting at the path start.
///
/// Zero-length paths (single-point placeholders) produce an empty sequence;
/// callers fall back to the move coordinates for their query point.
pub fn sample_path(d: &str, step: f64) -> MorphResult<Vec<Point>> {
    if !step.is_finite() || step <= 0.0 {
        return Err(MorphError::validation("sample step must be finite and > 0"));
    }
    let path = BezPath::from_svg(d)
        .map_err(|err| MorphError::malformed_path(format!("unparseable path data: {err}")))?;

    let mut points = Vec::new();
    // distance from the current segment's start to the next sample position
    let mut offset = 0.0;
    for seg in path.segments() {
        let len = seg.arclen(ARCLEN_ACCURACY);
        while offset < len {
            let t = seg.inv_arclen(offset, ARCLEN_ACCURACY);
            points.push(seg.eval(t));
            offset += step;
        }
        offset -= len;
    }
    Ok(points)
}
