//! Domain services for SIMSARPRAS.
//!
//! Services contain business logic that operates on domain models.

pub mod analysis;

pub use analysis::{
    build_prompt, AnalysisError, AnalysisProvider, AnalysisResponse, AnalysisSnapshot,
    MockAnalysisProvider,
};
