use tracing::debug;

use crate::dominance_config::{D4_MIN_SAMPLE, DominanceConfig};
use crate::error::{DominanceError, InvalidQuery};
use crate::h2h_match::{DominanceQuery, MatchRecord, Side, TeamResult};
use crate::report::{DominanceReport, RuleCode, RuleMetric, TeamTally, TriggeredRule};

/// Evaluate D1-D5 for both sides of `query` over `ordered_matches`.
///
/// `ordered_matches` must be most recent first (see
/// `normalize::sort_most_recent_first`). Every record must be between the two
/// queried teams; anything else is a caller bug and fails the whole call.
/// The config is validated here too, whichever way it was built.
pub fn evaluate(
    ordered_matches: &[MatchRecord],
    query: &DominanceQuery,
    config: &DominanceConfig,
) -> Result<DominanceReport, DominanceError> {
    config.validate()?;
    check_query(ordered_matches, query)?;

    let total = ordered_matches.len();
    let home_record = tally(ordered_matches, query.home.id);
    let away_record = tally(ordered_matches, query.away.id);

    let mut report = DominanceReport {
        home: query.home.clone(),
        away: query.away.clone(),
        total_matches: total,
        draws: home_record.draws,
        home_record,
        away_record,
        sufficient_history: total >= config.effective_min_matches(),
        triggers: Vec::new(),
    };

    if !report.sufficient_history {
        debug!(
            home = query.home.id,
            away = query.away.id,
            total,
            "insufficient h2h history"
        );
        return Ok(report);
    }

    for side in Side::BOTH {
        let team = query.team(side);
        let tally = *report.record(side);
        let mut push = |rule, metric| {
            report.triggers.push(TriggeredRule {
                rule,
                side,
                team: team.clone(),
                metric,
            });
        };

        let win_rate = tally.wins as f64 / total as f64;
        if win_rate >= config.d1_threshold {
            push(RuleCode::D1, RuleMetric::WinRate(win_rate));
        }

        let window = config.d2_window.min(total);
        if unbeaten(&ordered_matches[..window], team.id) {
            push(RuleCode::D2, RuleMetric::Unbeaten { window });
        }

        let venue_matches = ordered_matches
            .iter()
            .filter(|m| m.side_of(team.id) == Some(side))
            .count();
        if venue_matches > 0 && venue_unbeaten(ordered_matches, team.id, side) {
            push(
                RuleCode::D3,
                RuleMetric::VenueUnbeaten {
                    matches: venue_matches,
                },
            );
        }

        if total >= D4_MIN_SAMPLE && tally.losses <= config.d4_max_losses {
            push(
                RuleCode::D4,
                RuleMetric::Losses {
                    losses: tally.losses,
                    total,
                },
            );
        }

        let streak = win_streak(ordered_matches, team.id);
        if streak >= config.d5_streak_length {
            push(RuleCode::D5, RuleMetric::WinStreak(streak));
        }
    }

    debug!(
        home = query.home.id,
        away = query.away.id,
        total,
        triggers = report.triggers.len(),
        "h2h dominance evaluated"
    );
    Ok(report)
}

fn check_query(matches: &[MatchRecord], query: &DominanceQuery) -> Result<(), InvalidQuery> {
    if query.home.id == query.away.id {
        return Err(InvalidQuery::SameTeam {
            team_id: query.home.id,
        });
    }
    for (index, m) in matches.iter().enumerate() {
        if !m.involves_pair(query.home.id, query.away.id) {
            return Err(InvalidQuery::ForeignRecord {
                index,
                home_id: m.home.id,
                away_id: m.away.id,
                query_home: query.home.id,
                query_away: query.away.id,
            });
        }
    }
    Ok(())
}

fn tally(matches: &[MatchRecord], team_id: u32) -> TeamTally {
    let mut out = TeamTally::default();
    for result in matches.iter().filter_map(|m| m.result_for(team_id)) {
        match result {
            TeamResult::Win => out.wins += 1,
            TeamResult::Draw => out.draws += 1,
            TeamResult::Loss => out.losses += 1,
        }
    }
    out
}

fn unbeaten(matches: &[MatchRecord], team_id: u32) -> bool {
    matches
        .iter()
        .all(|m| m.result_for(team_id) != Some(TeamResult::Loss))
}

fn venue_unbeaten(matches: &[MatchRecord], team_id: u32, side: Side) -> bool {
    matches
        .iter()
        .filter(|m| m.side_of(team_id) == Some(side))
        .all(|m| m.result_for(team_id) != Some(TeamResult::Loss))
}

/// Consecutive outright wins counted back from the most recent meeting.
fn win_streak(matches: &[MatchRecord], team_id: u32) -> usize {
    matches
        .iter()
        .take_while(|m| m.result_for(team_id) == Some(TeamResult::Win))
        .count()
}
