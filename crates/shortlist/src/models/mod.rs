// Data model shared by the ingest boundary and the ranking pipeline.

mod evaluation;
mod report;

pub use evaluation::{Evaluation, Grade};
pub use report::{RankedEntry, RankingReport};

pub(crate) use evaluation::score_in_range;
