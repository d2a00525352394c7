//! Closed-form conversion of primitive shape elements into path data.
//!
//! Each supported element kind maps to one arm of [`to_path_data`]; the output
//! feeds [`crate::normalize::clean_path`] like any hand-written path would.

use crate::error::{MorphError, MorphResult};

/// A top-level shape element, tagged by kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeKind {
    Path {
        d: String,
    },
    Rect {
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
        width: f64,
        height: f64,
        /// Corner radii; a rounded rect is emitted with arc corners.
        #[serde(default)]
        rx: f64,
        #[serde(default)]
        ry: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline {
        points: String,
    },
    Polygon {
        points: String,
    },
}

/// Raw (pre-normalization) path data for any shape kind.
pub fn to_path_data(kind: &ShapeKind) -> MorphResult<String> {
    match kind {
        ShapeKind::Path { d } => Ok(d.clone()),
        ShapeKind::Rect {
            x,
            y,
            width,
            height,
            rx,
            ry,
        } => Ok(rect_to_path(*x, *y, *width, *height, *rx, *ry)),
        ShapeKind::Circle { cx, cy, r } => Ok(ellipse_to_path(*cx, *cy, *r, *r)),
        ShapeKind::Ellipse { cx, cy, rx, ry } => Ok(ellipse_to_path(*cx, *cy, *rx, *ry)),
        ShapeKind::Line { x1, y1, x2, y2 } => Ok(format!("M {x1},{y1} L {x2},{y2}")),
        ShapeKind::Polyline { points } => points_to_path(points, false),
        ShapeKind::Polygon { points } => points_to_path(points, true),
    }
}

fn rect_to_path(x: f64, y: f64, w: f64, h: f64, rx: f64, ry: f64) -> String {
    if rx > 0.0 || ry > 0.0 {
        return format!(
            "M {},{} h {} a {rx},{ry} 0 0 1 {rx},{ry} v {} a {rx},{ry} 0 0 1 -{rx},{ry} \
             h -{} a {rx},{ry} 0 0 1 -{rx},-{ry} v -{} a {rx},{ry} 0 0 1 {rx},-{ry} Z",
            x + rx,
            y,
            w - 2.0 * rx,
            h - 2.0 * ry,
            w - 2.0 * rx,
            h - 2.0 * ry,
        );
    }
    format!("M {x},{y} h {w} v {h} h -{w} Z")
}

/// Two half-turn arcs, closed. A circle is the rx == ry case.
fn ellipse_to_path(cx: f64, cy: f64, rx: f64, ry: f64) -> String {
    format!(
        "M {},{cy} a {rx},{ry} 0 1,0 {},0 a {rx},{ry} 0 1,0 -{},0 Z",
        cx - rx,
        2.0 * rx,
        2.0 * rx,
    )
}

fn points_to_path(points: &str, close: bool) -> MorphResult<String> {
    let mut out = String::new();
    for (index, pair) in points.trim().split_whitespace().enumerate() {
        let mut coords = pair.split(',');
        let (x, y) = match (coords.next(), coords.next()) {
            (Some(x), Some(y)) => (x.trim(), y.trim()),
            _ => {
                return Err(MorphError::malformed_path(format!(
                    "point list entry '{pair}' is not an x,y pair"
                )));
            }
        };
        x.parse::<f64>()
            .and_then(|_| y.parse::<f64>())
            .map_err(|_| {
                MorphError::malformed_path(format!("point list entry '{pair}' is not numeric"))
            })?;
        if index == 0 {
            out.push_str(&format!("M {x},{y}"));
        } else {
            out.push_str(&format!(" L {x},{y}"));
        }
    }
    if out.is_empty() {
        return Err(MorphError::malformed_path("point list is empty"));
    }
    if close {
        out.push_str(" Z");
    }
    Ok(out)
}
