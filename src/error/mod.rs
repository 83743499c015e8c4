// Error types for the musegen application
//
// This module defines custom error types for analysis and generation
// operations. Decode and workflow errors live next to the code that
// produces them.

mod analysis;
mod generation;

pub use analysis::AnalysisError;
pub use generation::GenerationError;
