//! Deterministic candidate ranking for persona-based CV evaluation.
//!
//! An upstream evaluator scores every candidate against every generated
//! hiring persona. This crate reduces those per-(candidate, persona) rows to
//! one best-fit result per candidate, orders them by score, balances the
//! shortlist across personas with a diversity cap, and reports summary
//! statistics. Pure computation end to end; transport, storage, and LLM
//! concerns stay in the embedding service.
//!
//! ```
//! use shortlist::{rank_candidates, Evaluation, Grade, RankOptions};
//!
//! let evaluations = vec![Evaluation {
//!     candidate_id: "cv_014".to_string(),
//!     persona_id: "P1".to_string(),
//!     persona_name: "Backend Builder".to_string(),
//!     score: 86.0,
//!     grade: Grade::AMinus,
//!     strengths: vec!["Rust services".to_string()],
//!     gaps: vec![],
//!     explanation: "Strong systems background".to_string(),
//! }];
//!
//! let report = rank_candidates(&evaluations, &RankOptions::default())?;
//! assert_eq!(report.shortlist[0].candidate_id, "cv_014");
//! assert_eq!(report.shortlist[0].rank, 1);
//! # Ok::<(), shortlist::ShortlistError>(())
//! ```

pub mod errors;
pub mod ingest;
pub mod models;
pub mod ranking;

pub use errors::ShortlistError;
pub use ingest::parse_evaluations;
pub use models::{Evaluation, Grade, RankedEntry, RankingReport};
pub use ranking::{rank_candidates, RankOptions, DEFAULT_TOP_N};
