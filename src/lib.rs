pub mod batch;
pub mod dominance;
pub mod dominance_config;
pub mod error;
pub mod h2h_match;
pub mod logging;
pub mod normalize;
pub mod report;
