#![forbid(unsafe_code)]

//! Path correspondence and topology engine for shape morphing.
//!
//! Given two or more vector documents, the engine normalizes every primitive
//! shape into canonical path data, resolves hole and mask topology, equalizes
//! shape counts, and computes a cyclic pairing of shapes across documents.
//! The resulting [`MorphPlan`] is ready to hand to an external shape
//! interpolation primitive; rendering and playback are out of scope.

pub mod convert;
pub mod correspond;
pub mod error;
pub mod geometry;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod sample;
pub mod standardize;
pub mod style;
pub mod topology;

pub use convert::ShapeKind;
pub use correspond::Matching;
pub use error::{MorphError, MorphResult};
pub use model::{CorrespondencePair, Document, InputDocument, PairEnd, Shape, ShapeElement, ViewBox};
pub use normalize::PathString;
pub use pipeline::{MorphOptions, MorphPlan, MorphSetting, compute_morph};
pub use standardize::OneToMany;
pub use style::{FillRule, ResolvedStyle, StyleAttrs};
