//! Shape-count equalization across documents.
//!
//! Morphing needs every document to expose the same number of shapes. The
//! policy decides how a short document is padded up to the maximum count.

use kurbo::Point;

use crate::{
    error::{MorphError, MorphResult},
    model::{Document, Shape},
    normalize::PathString,
    style::ResolvedStyle,
};

/// Padding policy for documents with fewer shapes than the maximum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OneToMany {
    /// Insert copies of existing shapes at wrap indices, keeping duplicates
    /// adjacent to their originals.
    #[default]
    Duplicate,
    /// Append zero-area placeholders at the document center, so the extra
    /// shapes appear out of a point.
    Appear,
}

/// Pads every document up to the maximum shape count.
///
/// Fails with [`MorphError::EmptyDocument`] if any document resolved to zero
/// shapes; a morph needs at least one shape on every end.
#[tracing::instrument(skip(documents))]
pub fn standardize(documents: &mut [Document], policy: OneToMany) -> MorphResult<()> {
    let mut target = 0;
    for (index, doc) in documents.iter().enumerate() {
        if doc.shapes.is_empty() {
            return Err(MorphError::EmptyDocument(index));
        }
        target = target.max(doc.shapes.len());
    }

    for doc in documents.iter_mut() {
        match policy {
            OneToMany::Duplicate => duplicate_pad(&mut doc.shapes, target),
            OneToMany::Appear => {
                let center = doc.center();
                while doc.shapes.len() < target {
                    doc.shapes.push(appear_shape(center));
                }
            }
        }
    }
    Ok(())
}

/// Distributes the deficit over wrap indices `(orig + k) % orig`, inserting
/// each copy at its original's position so duplicate density follows the
/// original list.
fn duplicate_pad(shapes: &mut Vec<Shape>, target: usize) {
    let orig = shapes.len();
    if orig == 0 || orig >= target {
        return;
    }
    let mut copies = vec![1usize; orig];
    for k in 0..(target - orig) {
        copies[(orig + k) % orig] += 1;
    }
    let originals = std::mem::take(shapes);
    for (shape, count) in originals.into_iter().zip(copies) {
        for _ in 0..count - 1 {
            shapes.push(shape.clone());
        }
        shapes.push(shape);
    }
}

/// Single-point closed path at the document center: zero geometry, black
/// fill, fully transparent zero-width stroke.
fn appear_shape(center: Point) -> Shape {
    Shape {
        main_path: PathString::from_point(center),
        main_points: vec![center],
        mask_paths: Vec::new(),
        mask_points: Vec::new(),
        style: ResolvedStyle {
            fill: Some("black".to_string()),
            stroke: "black".to_string(),
            stroke_width: 0.0,
            stroke_opacity: 0.0,
        },
    }
}
