//! Subpath topology resolution: outer contours, holes, and declared masks.
//!
//! For each top-level element the resolver normalizes the path, splits it into
//! subpaths, samples each one, and decides which subpath is the filled outer
//! contour and which subpaths cut holes into it. Explicitly declared mask
//! shapes are merged into the same hole list, so downstream stages see one
//! uniform `Shape` record per outer contour.

use kurbo::Point;

use crate::{
    convert,
    error::{MorphError, MorphResult},
    geometry,
    model::{InputDocument, Shape, ShapeElement},
    normalize::{self, PathString},
    sample,
    style::{self, FillRule},
};

struct SubPath {
    text: String,
    points: Vec<Point>,
    /// Query point for ray casting: the first sample, or the move coordinates
    /// when the subpath is too short to sample.
    first: Point,
}

/// Resolves every element of `doc` into zero or more [`Shape`] records.
///
/// Shape-level failures are recovered here: an element whose path does not
/// normalize is skipped with a warning, and a dangling mask reference degrades
/// to a shape without masks. Anything else propagates.
#[tracing::instrument(skip(doc))]
pub fn extract_shapes(doc: &InputDocument, step: f64) -> MorphResult<Vec<Shape>> {
    let mut shapes = Vec::new();
    for (index, element) in doc.elements.iter().enumerate() {
        match extract_element(doc, element, step) {
            Ok(mut extracted) => shapes.append(&mut extracted),
            Err(err @ MorphError::MalformedPath(_)) => {
                tracing::warn!(element = index, %err, "skipping element");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(shapes)
}

fn extract_element(
    doc: &InputDocument,
    element: &ShapeElement,
    step: f64,
) -> MorphResult<Vec<Shape>> {
    let resolved_style = style::resolve_style(&element.style, &doc.style);
    let raw = convert::to_path_data(&element.kind)?;
    let path = normalize::clean_path(&raw)?;

    // Declared masks come first in the hole list, fill-rule-implied holes
    // are appended after them.
    let mut mask_paths: Vec<PathString> = Vec::new();
    if let Some(reference) = &element.mask {
        match resolve_mask(doc, reference) {
            Ok(paths) => mask_paths.extend(paths),
            Err(err @ MorphError::UnresolvableMask(_)) => {
                tracing::warn!(%err, "emitting shape without declared masks");
            }
            Err(err) => return Err(err),
        }
    }

    let subpaths = sample_subpaths(path.as_str(), step)?;
    let fill_rule = element.style.fill_rule();

    let outer_points = outer_contour(&subpaths);
    let outer_winding = geometry::winding_order(outer_points.unwrap_or(&[]));

    let mut is_hole = vec![false; subpaths.len()];
    for (i, sub) in subpaths.iter().enumerate() {
        let others = other_points(&subpaths, i);
        let crossings = geometry::ray_intersections(sub.first, &others);
        is_hole[i] = match fill_rule {
            FillRule::EvenOdd => crossings % 2 == 1,
            FillRule::NonZero => {
                geometry::winding_order(&sub.points) != outer_winding && crossings % 2 == 1
            }
        };
    }

    // Sample declared masks, then append the implied holes.
    let mut mask_points: Vec<Vec<Point>> = mask_paths
        .iter()
        .map(|p| sample::sample_path(p.as_str(), step))
        .collect::<MorphResult<_>>()?;
    for (i, sub) in subpaths.iter().enumerate() {
        if is_hole[i] {
            mask_paths.push(PathString::from_canonical(sub.text.clone()));
            mask_points.push(sub.points.clone());
        }
    }

    let mut shapes = Vec::new();
    for (i, sub) in subpaths.iter().enumerate() {
        if is_hole[i] {
            continue;
        }
        shapes.push(Shape {
            main_path: PathString::from_canonical(sub.text.clone()),
            main_points: sub.points.clone(),
            mask_paths: mask_paths.clone(),
            mask_points: mask_points.clone(),
            style: resolved_style.clone(),
        });
    }
    Ok(shapes)
}

fn sample_subpaths(path: &str, step: f64) -> MorphResult<Vec<SubPath>> {
    normalize::split_subpaths(path)
        .into_iter()
        .map(|text| {
            let points = sample::sample_path(text, step)?;
            let first = match points.first() {
                Some(p) => *p,
                None => normalize::first_move_point(text)?,
            };
            Ok(SubPath {
                text: text.to_string(),
                points,
                first,
            })
        })
        .collect()
}

/// The first subpath whose query point lies outside an even number of the
/// other subpaths' boundaries.
///
/// For nested topologies deeper than one hole level this heuristic is not
/// proven unique; the first candidate in path order wins.
fn outer_contour(subpaths: &[SubPath]) -> Option<&[Point]> {
    for (i, sub) in subpaths.iter().enumerate() {
        let others = other_points(subpaths, i);
        if geometry::ray_intersections(sub.first, &others) % 2 == 0 {
            return Some(&sub.points);
        }
    }
    None
}

fn other_points(subpaths: &[SubPath], skip: usize) -> Vec<&[Point]> {
    subpaths
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != skip)
        .map(|(_, s)| s.points.as_slice())
        .collect()
}

/// Resolves a mask reference into the validated paths of its children.
///
/// Children whose own fill is absent or white are no-op mask content
/// (background fills) and are skipped, as are children that fail to
/// normalize.
fn resolve_mask(doc: &InputDocument, reference: &str) -> MorphResult<Vec<PathString>> {
    let id = mask_id(reference);
    let children = doc
        .masks
        .get(id)
        .ok_or_else(|| MorphError::unresolvable_mask(id))?;

    let mut paths = Vec::new();
    for child in children {
        match child.style.fill_color().as_deref() {
            None | Some("white") => continue,
            Some(_) => {}
        }
        let raw = convert::to_path_data(&child.kind)?;
        match normalize::clean_path(&raw) {
            Ok(path) => paths.push(path),
            Err(err) => tracing::warn!(%err, "skipping invalid mask child"),
        }
    }
    Ok(paths)
}

/// Extracts the id from either a bare reference or the `url(#id)` form.
fn mask_id(reference: &str) -> &str {
    reference
        .strip_prefix("url(#")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(reference)
}
