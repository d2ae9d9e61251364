//! Analysis engine for determining version bumps and next releases from commits

pub mod bump_analyzer;
pub mod release_analyzer;

pub use bump_analyzer::calc_bump_type;
pub use release_analyzer::ReleaseAnalyzer;
