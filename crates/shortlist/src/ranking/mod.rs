// Candidate ranking pipeline.
// Implements: input validation, best-per-candidate reduction, persona
// diversity capping, and report assembly. Pure computation throughout.

mod diversity;
mod ranker;
mod reduce;

pub use ranker::{rank_candidates, RankOptions, DEFAULT_TOP_N};
