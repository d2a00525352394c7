pub type MorphResult<T> = Result<T, MorphError>;

#[derive(thiserror::Error, Debug)]
pub enum MorphError {
    #[error("validation error: {0}")]
    Validation(String),

    /// A path string failed normalization or validation. Recovered per shape:
    /// the offending shape is skipped, the rest of the document proceeds.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// A `mask` reference did not resolve to a known mask element. Recovered:
    /// the referencing shape is emitted without masks.
    #[error("unresolvable mask reference '{0}'")]
    UnresolvableMask(String),

    /// A matching heuristic ran out of unused candidates for one sweep.
    /// Recovered per slot: that slot is skipped for the current pass.
    #[error("no candidate path left for slot {slot} in document {document}")]
    NoCandidatePath { document: usize, slot: usize },

    /// A document produced zero shapes. Fatal to the whole pass.
    #[error("document {0} contains no usable shapes")]
    EmptyDocument(usize),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MorphError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn malformed_path(msg: impl Into<String>) -> Self {
        Self::MalformedPath(msg.into())
    }

    pub fn unresolvable_mask(id: impl Into<String>) -> Self {
        Self::UnresolvableMask(id.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            MorphError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            MorphError::malformed_path("x")
                .to_string()
                .contains("malformed path:")
        );
        assert!(
            MorphError::unresolvable_mask("clip0")
                .to_string()
                .contains("'clip0'")
        );
        assert!(
            MorphError::EmptyDocument(1)
                .to_string()
                .contains("document 1")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = MorphError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
