use std::env;

use rayon::prelude::*;

use crate::dominance::evaluate;
use crate::dominance_config::DominanceConfig;
use crate::error::DominanceError;
use crate::h2h_match::{DominanceQuery, MatchRecord};
use crate::report::DominanceReport;

/// One upcoming fixture plus its normalised head-to-head history.
#[derive(Debug, Clone)]
pub struct H2hPairing {
    pub query: DominanceQuery,
    pub matches: Vec<MatchRecord>,
}

/// Evaluate every pairing independently; results keep the input order.
///
/// Runs on a pool sized by `DOMINANCE_PARALLELISM` (1..=32, default 4), or on
/// the global rayon pool if that one cannot be built.
pub fn evaluate_all(
    pairings: &[H2hPairing],
    config: &DominanceConfig,
) -> Vec<Result<DominanceReport, DominanceError>> {
    let run = || {
        pairings
            .par_iter()
            .map(|p| evaluate(&p.matches, &p.query, config))
            .collect()
    };
    let threads = env::var("DOMINANCE_PARALLELISM")
        .ok()
        .and_then(|val| val.trim().parse::<usize>().ok())
        .unwrap_or(4)
        .clamp(1, 32);
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(run),
        Err(_) => run(),
    }
}

/// Pairings that triggered at least one rule, with their reports.
pub fn dominant_only<'a>(
    pairings: &'a [H2hPairing],
    results: Vec<Result<DominanceReport, DominanceError>>,
) -> Vec<(&'a H2hPairing, DominanceReport)> {
    pairings
        .iter()
        .zip(results)
        .filter_map(|(pairing, result)| match result {
            Ok(report) if !report.is_empty() => Some((pairing, report)),
            _ => None,
        })
        .collect()
}
