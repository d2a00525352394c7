//! Input document model and the records flowing between pipeline stages.

use std::collections::BTreeMap;

use kurbo::Point;

use crate::{
    convert::ShapeKind,
    error::{MorphError, MorphResult},
    geometry,
    normalize::{self, PathString},
    style::{ResolvedStyle, StyleAttrs},
};

/// One parsed source document: top-level shape elements in source order, the
/// mask constructs they may reference, and the document element's own
/// presentation attributes (the inheritance root for style resolution).
///
/// Source order is semantically significant: it is the default pairing order
/// and the duplication insertion order.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct InputDocument {
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default, rename = "viewBox")]
    pub view_box: Option<ViewBox>,
    #[serde(default)]
    pub style: StyleAttrs,
    pub elements: Vec<ShapeElement>,
    /// Explicit `id -> mask children` map, scoped to this document.
    #[serde(default)]
    pub masks: BTreeMap<String, Vec<ShapeElement>>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShapeElement {
    #[serde(flatten)]
    pub kind: ShapeKind,
    #[serde(flatten)]
    pub style: StyleAttrs,
    /// Mask reference, either a bare id or the `url(#id)` form.
    #[serde(default)]
    pub mask: Option<String>,
}

impl InputDocument {
    /// Overall bounding size: the declared view box wins, else the declared
    /// width/height.
    pub fn size(&self) -> MorphResult<(f64, f64)> {
        if let Some(vb) = &self.view_box {
            return Ok((vb.width, vb.height));
        }
        match (self.width, self.height) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(MorphError::validation(
                "document declares neither a view box nor width/height",
            )),
        }
    }
}

/// One outer contour with its resolved holes and style. Immutable after
/// construction; a recomputation replaces shapes wholesale.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Shape {
    pub main_path: PathString,
    /// Dense samples along `main_path`, used only for geometric tests.
    pub main_points: Vec<Point>,
    pub mask_paths: Vec<PathString>,
    /// Parallel to `mask_paths`.
    pub mask_points: Vec<Vec<Point>>,
    pub style: ResolvedStyle,
}

impl Shape {
    pub fn area(&self) -> f64 {
        geometry::polygon_area(&self.main_points)
    }

    /// Centroid of the sampled outline; for degenerate shapes without enough
    /// samples the move coordinates stand in.
    pub fn centroid(&self) -> Point {
        if self.main_points.len() < 3 {
            return normalize::first_move_point(self.main_path.as_str()).unwrap_or(Point::ORIGIN);
        }
        geometry::centroid(&self.main_points)
    }
}

/// Shapes of one document after topology resolution, with the resolved
/// document size carried along for placeholder synthesis.
#[derive(Clone, Debug, serde::Serialize)]
pub struct Document {
    pub shapes: Vec<Shape>,
    pub width: f64,
    pub height: f64,
}

impl Document {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One end of a correspondence pair: canonical main path, mask list padded to
/// match the other end, and the resolved style.
#[derive(Clone, Debug, serde::Serialize)]
pub struct PairEnd {
    pub path: PathString,
    pub masks: Vec<PathString>,
    pub style: ResolvedStyle,
    /// Shape slot within its document; kept for downstream bookkeeping.
    pub index: usize,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct CorrespondencePair {
    pub from: PairEnd,
    pub to: PairEnd,
}
