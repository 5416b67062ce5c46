pub mod domain;
pub mod preferences;
pub mod requests;
pub mod responses;

pub use domain::{JobRecord, JobType, MatchReason, ScoredJob};
pub use preferences::{
    BudgetPrefs, ClientCriteria, CriterionWeights, ExclusionPrefs, PreferenceError,
    PreferenceProfile,
};
pub use requests::{ComposeProposalRequest, MatchJobsRequest};
pub use responses::{
    ClassifyResponse, ComposeProposalResponse, ErrorResponse, HealthResponse, MatchJobsResponse,
    ScoreJobResponse,
};
