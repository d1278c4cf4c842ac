/*
[INPUT]:  Submodule type definitions
[OUTPUT]: Public data-layer type surface
[POS]:    Data layer - module wiring
[UPDATE]: When adding new type modules
*/

pub mod enums;
pub mod models;
pub mod requests;
pub mod responses;

pub use enums::{SortType, TaskStatus, TimeFilter};
pub use models::{AnalysisResult, Comment, HistoryEntry, Post};
pub use requests::{AnalysisRequest, MAX_POST_LIMIT, MIN_POST_LIMIT};
pub use responses::{
    AnalyzeAccepted,
    AnalysisStatus,
    HealthResponse,
    HistoryResponse,
    TrendPoint,
    TrendsResponse,
};
