use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use chrono::{Duration, TimeZone, Utc};
use h2h_dominance::batch::{H2hPairing, evaluate_all};
use h2h_dominance::dominance::evaluate;
use h2h_dominance::dominance_config::DominanceConfig;
use h2h_dominance::h2h_match::{DominanceQuery, MatchRecord, TeamRef};
use h2h_dominance::normalize::{normalize, parse_h2h_json};

fn sample_history(home: u32, away: u32, len: usize) -> Vec<MatchRecord> {
    let latest = Utc.with_ymd_and_hms(2025, 1, 1, 15, 0, 0).unwrap();
    let h = TeamRef::new(home, format!("Team {home}"));
    let a = TeamRef::new(away, format!("Team {away}"));
    (0..len)
        .map(|i| {
            let ts = latest - Duration::days(60 * i as i64);
            let (hs, as_) = ((i % 3) as u32, ((i + 1) % 2) as u32);
            if i % 2 == 0 {
                MatchRecord::new(ts, h.clone(), a.clone(), hs, as_)
            } else {
                MatchRecord::new(ts, a.clone(), h.clone(), hs, as_)
            }
        })
        .collect()
}

fn sample_h2h_json(len: usize) -> String {
    let items: Vec<String> = (0..len)
        .map(|i| {
            format!(
                r#"{{"fixture":{{"id":{},"timestamp":{},"status":{{"short":"FT"}}}},"teams":{{"home":{{"id":40,"name":"Liverpool","winner":null}},"away":{{"id":50,"name":"Manchester City","winner":null}}}},"goals":{{"home":{},"away":{}}}}}"#,
                9000 + i,
                1_600_000_000 + i * 86_400,
                i % 3,
                i % 2
            )
        })
        .collect();
    format!(r#"{{"response":[{}]}}"#, items.join(","))
}

fn bench_normalize(c: &mut Criterion) {
    let raw = sample_h2h_json(30);
    c.bench_function("h2h_normalize", |b| {
        b.iter(|| {
            let fixtures = parse_h2h_json(black_box(&raw)).unwrap();
            let normalized = normalize(&fixtures);
            black_box(normalized.matches.len());
        })
    });
}

fn bench_evaluate(c: &mut Criterion) {
    let matches = sample_history(40, 50, 30);
    let query = DominanceQuery::new(TeamRef::new(40, "Team 40"), TeamRef::new(50, "Team 50"));
    let cfg = DominanceConfig::default();
    c.bench_function("dominance_evaluate", |b| {
        b.iter(|| {
            let report = evaluate(black_box(&matches), black_box(&query), &cfg).unwrap();
            black_box(report.triggers.len());
        })
    });
}

fn bench_evaluate_all(c: &mut Criterion) {
    let pairings: Vec<H2hPairing> = (0..200u32)
        .map(|i| {
            let (home, away) = (i * 2 + 1, i * 2 + 2);
            H2hPairing {
                query: DominanceQuery::new(
                    TeamRef::new(home, format!("Team {home}")),
                    TeamRef::new(away, format!("Team {away}")),
                ),
                matches: sample_history(home, away, 20),
            }
        })
        .collect();
    let cfg = DominanceConfig::default();
    c.bench_function("dominance_evaluate_all", |b| {
        b.iter(|| {
            let results = evaluate_all(black_box(&pairings), &cfg);
            black_box(results.len());
        })
    });
}

criterion_group!(benches, bench_normalize, bench_evaluate, bench_evaluate_all);
criterion_main!(benches);
