use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::h2h_match::{Side, TeamRef};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter,
)]
pub enum RuleCode {
    D1,
    D2,
    D3,
    D4,
    D5,
}

impl RuleCode {
    pub fn description(self) -> &'static str {
        match self {
            RuleCode::D1 => "Win >= 70%",
            RuleCode::D2 => "Unbeaten in last N",
            RuleCode::D3 => "Unbeaten Home/Away",
            RuleCode::D4 => "<=4 Losses in 12+",
            RuleCode::D5 => "Winning streak",
        }
    }
}

/// Evidence backing a triggered rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RuleMetric {
    /// Share of all meetings won, in `[0, 1]`.
    WinRate(f64),
    Unbeaten { window: usize },
    VenueUnbeaten { matches: usize },
    Losses { losses: usize, total: usize },
    WinStreak(usize),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggeredRule {
    pub rule: RuleCode,
    pub side: Side,
    pub team: TeamRef,
    pub metric: RuleMetric,
}

impl TriggeredRule {
    /// `"D1 - Home"` style label.
    pub fn label(&self) -> String {
        format!("{} - {}", self.rule, self.side)
    }

    pub fn evidence(&self) -> String {
        match self.metric {
            RuleMetric::WinRate(rate) => format!("{:.0}% wins", rate * 100.0),
            RuleMetric::Unbeaten { window } => format!("unbeaten in last {window}"),
            RuleMetric::VenueUnbeaten { matches } => {
                let venue = match self.side {
                    Side::Home => "home",
                    Side::Away => "away",
                };
                format!("unbeaten in {matches} {venue} meetings")
            }
            RuleMetric::Losses { losses, total } => format!("{losses} losses in {total}"),
            RuleMetric::WinStreak(len) => format!("{len} straight wins"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeamTally {
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DominanceReport {
    pub home: TeamRef,
    pub away: TeamRef,
    pub total_matches: usize,
    pub draws: usize,
    pub home_record: TeamTally,
    pub away_record: TeamTally,
    /// False when the history was below the configured floor and no rule ran.
    pub sufficient_history: bool,
    pub triggers: Vec<TriggeredRule>,
}

impl DominanceReport {
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    pub fn record(&self, side: Side) -> &TeamTally {
        match side {
            Side::Home => &self.home_record,
            Side::Away => &self.away_record,
        }
    }

    pub fn triggers_for(&self, side: Side) -> impl Iterator<Item = &TriggeredRule> {
        self.triggers.iter().filter(move |t| t.side == side)
    }

    pub fn has(&self, rule: RuleCode, side: Side) -> bool {
        self.triggers.iter().any(|t| t.rule == rule && t.side == side)
    }

    pub fn win_rate(&self, side: Side) -> f64 {
        ratio(self.record(side).wins, self.total_matches)
    }

    pub fn draw_rate(&self) -> f64 {
        ratio(self.draws, self.total_matches)
    }

    pub fn labels(&self) -> Vec<String> {
        self.triggers.iter().map(TriggeredRule::label).collect()
    }
}

fn ratio(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64
    }
}
