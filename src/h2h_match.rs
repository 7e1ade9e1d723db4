use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u32,
    pub name: String,
}

impl TeamRef {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// Identity is the provider id; display names drift between endpoints.
impl PartialEq for TeamRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TeamRef {}

impl Hash for TeamRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn opposite(self) -> Self {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// A historical match seen from one participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamResult {
    Win,
    Draw,
    Loss,
}

pub fn classify_outcome(home_score: u32, away_score: u32) -> Outcome {
    if home_score > away_score {
        Outcome::HomeWin
    } else if home_score < away_score {
        Outcome::AwayWin
    } else {
        Outcome::Draw
    }
}

/// One completed fixture between the two teams under study.
///
/// The outcome is never stored: it is always derived from the score pair, so a
/// record cannot disagree with itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub fixture_id: Option<u64>,
    pub timestamp: DateTime<Utc>,
    pub home: TeamRef,
    pub away: TeamRef,
    pub home_score: u32,
    pub away_score: u32,
}

impl MatchRecord {
    pub fn new(
        timestamp: DateTime<Utc>,
        home: TeamRef,
        away: TeamRef,
        home_score: u32,
        away_score: u32,
    ) -> Self {
        Self {
            fixture_id: None,
            timestamp,
            home,
            away,
            home_score,
            away_score,
        }
    }

    pub fn with_fixture_id(mut self, fixture_id: u64) -> Self {
        self.fixture_id = Some(fixture_id);
        self
    }

    pub fn outcome(&self) -> Outcome {
        classify_outcome(self.home_score, self.away_score)
    }

    /// Orientation `team_id` played in for this historical match.
    pub fn side_of(&self, team_id: u32) -> Option<Side> {
        if self.home.id == team_id {
            Some(Side::Home)
        } else if self.away.id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn result_for(&self, team_id: u32) -> Option<TeamResult> {
        let side = self.side_of(team_id)?;
        let result = match (self.outcome(), side) {
            (Outcome::Draw, _) => TeamResult::Draw,
            (Outcome::HomeWin, Side::Home) | (Outcome::AwayWin, Side::Away) => TeamResult::Win,
            _ => TeamResult::Loss,
        };
        Some(result)
    }

    /// True when the record is between `a` and `b`, in either orientation.
    pub fn involves_pair(&self, a: u32, b: u32) -> bool {
        (self.home.id == a && self.away.id == b) || (self.home.id == b && self.away.id == a)
    }
}

/// The two teams of an upcoming fixture. Venue-relative rules key off this
/// designation, not the orientation of past meetings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominanceQuery {
    pub home: TeamRef,
    pub away: TeamRef,
}

impl DominanceQuery {
    pub fn new(home: TeamRef, away: TeamRef) -> Self {
        Self { home, away }
    }

    pub fn team(&self, side: Side) -> &TeamRef {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{MatchRecord, Outcome, Side, TeamRef, TeamResult, classify_outcome};

    fn record(home_score: u32, away_score: u32) -> MatchRecord {
        MatchRecord::new(
            Utc.with_ymd_and_hms(2024, 3, 9, 15, 0, 0).unwrap(),
            TeamRef::new(40, "Liverpool"),
            TeamRef::new(50, "Manchester City"),
            home_score,
            away_score,
        )
    }

    #[test]
    fn outcome_follows_the_scoreline() {
        assert_eq!(classify_outcome(2, 1), Outcome::HomeWin);
        assert_eq!(classify_outcome(0, 3), Outcome::AwayWin);
        assert_eq!(classify_outcome(1, 1), Outcome::Draw);
    }

    #[test]
    fn result_is_relative_to_the_team() {
        let m = record(0, 2);
        assert_eq!(m.result_for(40), Some(TeamResult::Loss));
        assert_eq!(m.result_for(50), Some(TeamResult::Win));
        assert_eq!(m.result_for(99), None);

        let d = record(1, 1);
        assert_eq!(d.result_for(40), Some(TeamResult::Draw));
        assert_eq!(d.result_for(50), Some(TeamResult::Draw));
    }

    #[test]
    fn side_and_pair_lookup() {
        let m = record(1, 0);
        assert_eq!(m.side_of(40), Some(Side::Home));
        assert_eq!(m.side_of(50), Some(Side::Away));
        assert!(m.involves_pair(50, 40));
        assert!(!m.involves_pair(40, 41));
        assert_eq!(Side::Home.opposite(), Side::Away);
    }

    #[test]
    fn team_equality_ignores_name() {
        assert_eq!(TeamRef::new(40, "Liverpool"), TeamRef::new(40, "Liverpool FC"));
        assert_ne!(TeamRef::new(40, "Liverpool"), TeamRef::new(41, "Liverpool"));
    }
}
