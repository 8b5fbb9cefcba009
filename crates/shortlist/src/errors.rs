use thiserror::Error;

/// Library-level error type.
///
/// Every failure is atomic: an error means no shortlist was produced, never
/// a partial one. `index` always refers to the record's position in the
/// top-level input collection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShortlistError {
    #[error("top_n must be at least 1, got {got}")]
    InvalidTopN { got: usize },

    #[error("evaluations payload must be a JSON array, got {got}")]
    InvalidPayload { got: &'static str },

    #[error("evaluation #{index}: missing required field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("evaluation #{index}: invalid `{field}`: {detail}")]
    InvalidField {
        index: usize,
        field: &'static str,
        detail: String,
    },

    #[error("evaluation #{index}: `{field}` must not be empty")]
    EmptyField { index: usize, field: &'static str },

    #[error(
        "evaluation #{index} (candidate `{candidate_id}`, persona `{persona_id}`): \
         score {score} is not a finite number in [0, 100]"
    )]
    InvalidScore {
        index: usize,
        candidate_id: String,
        persona_id: String,
        score: f64,
    },
}
