use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::MalformedRecord;
use crate::h2h_match::{DominanceQuery, MatchRecord, Outcome, TeamRef};

// api-football short status codes for a match that went the distance.
const FINAL_STATUSES: &[&str] = &["FT", "AET", "PEN"];

/// One fixture as delivered by the api-football `fixtures` and
/// `fixtures/headtohead` endpoints. Every field is optional; the normalizer
/// decides what is usable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFixture {
    #[serde(default)]
    pub fixture: RawFixtureInfo,
    #[serde(default)]
    pub teams: RawTeams,
    #[serde(default)]
    pub goals: RawGoals,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFixtureInfo {
    pub id: Option<u64>,
    pub date: Option<String>,
    pub timestamp: Option<i64>,
    pub status: Option<RawStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatus {
    pub short: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeams {
    pub home: Option<RawTeam>,
    pub away: Option<RawTeam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTeam {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub winner: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGoals {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum H2hPayload {
    Envelope {
        #[serde(default)]
        response: Vec<RawFixture>,
    },
    Bare(Vec<RawFixture>),
}

/// Normalizer output: usable records most recent first, plus what was left out.
#[derive(Debug, Clone, Default)]
pub struct NormalizedH2h {
    pub matches: Vec<MatchRecord>,
    pub rejected: Vec<MalformedRecord>,
    pub incomplete: usize,
}

pub fn parse_h2h_json(raw: &str) -> Result<Vec<RawFixture>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    let payload: H2hPayload = serde_json::from_str(trimmed).context("invalid h2h json")?;
    Ok(match payload {
        H2hPayload::Envelope { response } => response,
        H2hPayload::Bare(items) => items,
    })
}

/// Canonicalise raw fixtures for the rule engine.
///
/// Records without a final score are dropped silently (counted in
/// `incomplete`); malformed ones are logged and collected in `rejected`.
pub fn normalize(raw_matches: &[RawFixture]) -> NormalizedH2h {
    let mut out = NormalizedH2h::default();
    for raw in raw_matches {
        match normalize_fixture(raw) {
            Ok(Some(record)) => out.matches.push(record),
            Ok(None) => out.incomplete += 1,
            Err(err) => {
                warn!("skipping h2h record: {err}");
                out.rejected.push(err);
            }
        }
    }
    sort_most_recent_first(&mut out.matches);
    out
}

/// `Ok(None)` means the fixture has no usable final score.
pub fn normalize_fixture(raw: &RawFixture) -> Result<Option<MatchRecord>, MalformedRecord> {
    let fixture_id = raw.fixture.id;
    let malformed = |reason| MalformedRecord { fixture_id, reason };

    let home = team_ref(raw.teams.home.as_ref()).ok_or_else(|| malformed("missing home team id"))?;
    let away = team_ref(raw.teams.away.as_ref()).ok_or_else(|| malformed("missing away team id"))?;
    if home.id == away.id {
        return Err(malformed("home and away share a team id"));
    }

    if let Some(short) = raw.fixture.status.as_ref().and_then(|s| s.short.as_deref())
        && !FINAL_STATUSES.contains(&short.trim())
    {
        return Ok(None);
    }
    let (Some(home_score), Some(away_score)) = (raw.goals.home, raw.goals.away) else {
        return Ok(None);
    };

    let timestamp =
        fixture_timestamp(&raw.fixture).ok_or_else(|| malformed("missing or invalid timestamp"))?;

    let mut record = MatchRecord::new(timestamp, home, away, home_score, away_score);
    record.fixture_id = fixture_id;
    note_winner_flag_disagreement(raw, &record);
    Ok(Some(record))
}

/// Query for an upcoming fixture from the same api-football shape.
pub fn query_from_fixture(raw: &RawFixture) -> Result<DominanceQuery, MalformedRecord> {
    let fixture_id = raw.fixture.id;
    let home = team_ref(raw.teams.home.as_ref()).ok_or(MalformedRecord {
        fixture_id,
        reason: "missing home team id",
    })?;
    let away = team_ref(raw.teams.away.as_ref()).ok_or(MalformedRecord {
        fixture_id,
        reason: "missing away team id",
    })?;
    Ok(DominanceQuery::new(home, away))
}

/// Descending by kick-off; same-instant records fall back to the higher fixture id.
pub fn sort_most_recent_first(matches: &mut [MatchRecord]) {
    matches.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| b.fixture_id.cmp(&a.fixture_id))
    });
}

fn team_ref(raw: Option<&RawTeam>) -> Option<TeamRef> {
    let raw = raw?;
    let id = raw.id?;
    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Team {id}"));
    Some(TeamRef { id, name })
}

fn fixture_timestamp(info: &RawFixtureInfo) -> Option<DateTime<Utc>> {
    if let Some(secs) = info.timestamp {
        return DateTime::from_timestamp(secs, 0);
    }
    let date = info.date.as_deref()?.trim();
    DateTime::parse_from_rfc3339(date)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn note_winner_flag_disagreement(raw: &RawFixture, record: &MatchRecord) {
    let home_flag = raw.teams.home.as_ref().and_then(|t| t.winner);
    let away_flag = raw.teams.away.as_ref().and_then(|t| t.winner);
    let flagged = match (home_flag, away_flag) {
        (Some(true), _) => Some(Outcome::HomeWin),
        (_, Some(true)) => Some(Outcome::AwayWin),
        (Some(false), Some(false)) => Some(Outcome::Draw),
        _ => None,
    };
    if let Some(flagged) = flagged
        && flagged != record.outcome()
    {
        debug!(
            fixture_id = ?record.fixture_id,
            score = %format!("{}-{}", record.home_score, record.away_score),
            ?flagged,
            "winner flag disagrees with score; using score"
        );
    }
}
