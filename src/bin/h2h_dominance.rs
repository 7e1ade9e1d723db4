use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use h2h_dominance::dominance::evaluate;
use h2h_dominance::dominance_config::DominanceConfig;
use h2h_dominance::h2h_match::{DominanceQuery, MatchRecord, Side, TeamRef};
use h2h_dominance::logging::init_logger;
use h2h_dominance::normalize::{normalize, parse_h2h_json};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    init_logger(args.iter().any(|a| a == "-v" || a == "--verbose"));

    let path = positional_path(&args)
        .context("usage: h2h_dominance <h2h.json> [--home ID] [--away ID] [-v]")?;
    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let fixtures = parse_h2h_json(&raw)?;
    let normalized = normalize(&fixtures);
    if normalized.matches.is_empty() {
        return Err(anyhow!("no completed meetings in {}", path.display()));
    }

    let query = resolve_query(
        &normalized.matches,
        parse_id_arg(&args, "--home"),
        parse_id_arg(&args, "--away"),
    )?;
    let config = DominanceConfig::from_env().context("invalid dominance config")?;
    let report = evaluate(&normalized.matches, &query, &config)?;

    println!("{} vs {}", report.home.name, report.away.name);
    println!(
        "Meetings: {} (skipped {} incomplete, {} malformed)",
        report.total_matches,
        normalized.incomplete,
        normalized.rejected.len()
    );
    for side in Side::BOTH {
        let rec = report.record(side);
        println!(
            "{side}: W{} D{} L{} ({:.0}% wins)",
            rec.wins,
            rec.draws,
            rec.losses,
            report.win_rate(side) * 100.0
        );
    }
    if !report.sufficient_history {
        println!("Not enough history (min {})", config.effective_min_matches());
        return Ok(());
    }
    if report.is_empty() {
        println!("Dominance: none");
        return Ok(());
    }
    println!("Dominance:");
    for t in &report.triggers {
        println!("  {:<10} {:<20} {}", t.label(), t.rule.description(), t.evidence());
    }
    Ok(())
}

fn positional_path(args: &[String]) -> Option<PathBuf> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--home" || arg == "--away" {
            skip_next = true;
            continue;
        }
        if arg.starts_with('-') {
            continue;
        }
        return Some(PathBuf::from(arg));
    }
    None
}

fn parse_id_arg(args: &[String], flag: &str) -> Option<u32> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(raw) = arg.strip_prefix(&prefix) {
            return raw.trim().parse().ok();
        }
        if arg == flag
            && let Some(next) = args.get(idx + 1)
        {
            return next.trim().parse().ok();
        }
    }
    None
}

/// Defaults to the orientation of the most recent meeting.
fn resolve_query(
    matches: &[MatchRecord],
    home_id: Option<u32>,
    away_id: Option<u32>,
) -> Result<DominanceQuery> {
    let latest = matches.first().context("empty history")?;
    let team = |id: u32| -> Result<TeamRef> {
        matches
            .iter()
            .find_map(|m| m.side_of(id).map(|side| m.team(side).clone()))
            .ok_or_else(|| anyhow!("team {id} does not appear in the h2h history"))
    };
    let other = |id: u32| -> Result<TeamRef> {
        if latest.home.id == id {
            Ok(latest.away.clone())
        } else if latest.away.id == id {
            Ok(latest.home.clone())
        } else {
            Err(anyhow!("team {id} does not appear in the h2h history"))
        }
    };

    let query = match (home_id, away_id) {
        (Some(h), Some(a)) => DominanceQuery::new(team(h)?, team(a)?),
        (Some(h), None) => DominanceQuery::new(team(h)?, other(h)?),
        (None, Some(a)) => DominanceQuery::new(other(a)?, team(a)?),
        (None, None) => DominanceQuery::new(latest.home.clone(), latest.away.clone()),
    };
    Ok(query)
}
