pub mod classifier;
pub mod composer;
pub mod fields;
pub mod matcher;
pub mod scoring;
pub mod taxonomy;

pub use classifier::classify_job;
pub use composer::{proposal_prompt, select_relevant_projects, Portfolio, Project};
pub use matcher::{MatchOutcome, Matcher, DEFAULT_THRESHOLD};
pub use scoring::score_job;
pub use taxonomy::Category;
