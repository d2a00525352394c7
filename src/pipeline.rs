//! One full recomputation pass: normalize, resolve topology, standardize,
//! build correspondences.
//!
//! The pass is synchronous and single-threaded; every call computes a fresh
//! [`MorphPlan`] from scratch and no state survives between calls. Callers
//! that can receive overlapping triggers serialize them and treat results as
//! last-write-wins.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    correspond::{self, Matching},
    error::{MorphError, MorphResult},
    model::{CorrespondencePair, Document, InputDocument},
    standardize::{self, OneToMany},
    topology,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphSetting {
    pub one_to_many: OneToMany,
    pub matching: Matching,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MorphOptions {
    pub setting: MorphSetting,
    /// Sampling/segment density; `max_segment_length` is derived from it.
    pub quality: u32,
    /// Arc-length step for the point sampler, in document units.
    pub sample_step: f64,
    /// Determinism seed for the `random` matching heuristic.
    pub seed: u64,
}

impl Default for MorphOptions {
    fn default() -> Self {
        Self {
            setting: MorphSetting::default(),
            quality: 10,
            sample_step: 1.0,
            seed: 0,
        }
    }
}

/// The complete result of one pass: for every shape slot of the first
/// document, the closed cycle of correspondence pairs, plus the segment
/// length bound handed to the interpolation primitive.
#[derive(Clone, Debug, serde::Serialize)]
pub struct MorphPlan {
    pub slots: Vec<Vec<CorrespondencePair>>,
    pub max_segment_length: f64,
    pub width: f64,
    pub height: f64,
}

/// Runs one full pass over `documents`.
///
/// Returns a complete plan or a typed failure; a document that yields zero
/// shapes fails the whole pass rather than producing a partial result. Slots
/// whose sweep exhausts matching candidates are skipped with a warning.
#[tracing::instrument(skip(documents, options))]
pub fn compute_morph(
    documents: &[InputDocument],
    options: &MorphOptions,
) -> MorphResult<MorphPlan> {
    if documents.len() < 2 {
        return Err(MorphError::validation(
            "morphing requires at least 2 documents",
        ));
    }
    if options.quality == 0 {
        return Err(MorphError::validation("quality must be > 0"));
    }

    let mut docs = Vec::with_capacity(documents.len());
    for input in documents {
        let (width, height) = input.size()?;
        let shapes = topology::extract_shapes(input, options.sample_step)?;
        docs.push(Document {
            shapes,
            width,
            height,
        });
    }

    standardize::standardize(&mut docs, options.setting.one_to_many)?;

    let mut rng = StdRng::seed_from_u64(options.seed);
    let slot_count = docs[0].shapes.len();
    let mut slots = Vec::with_capacity(slot_count);
    for slot in 0..slot_count {
        match correspond::build_sweep(&docs, slot, options.setting.matching, &mut rng) {
            Ok(pairs) => slots.push(pairs),
            Err(err @ MorphError::NoCandidatePath { .. }) => {
                tracing::warn!(slot, %err, "skipping slot for this pass");
            }
            Err(err) => return Err(err),
        }
    }

    let width = docs[0].width;
    let height = docs[0].height;
    Ok(MorphPlan {
        slots,
        max_segment_length: width / (f64::from(options.quality) * 10.0),
        width,
        height,
    })
}
