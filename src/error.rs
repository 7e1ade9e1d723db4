use thiserror::Error;

/// A raw fixture that cannot be turned into a `MatchRecord`. Callers skip it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record (fixture {}): {reason}", fixture_label(.fixture_id))]
pub struct MalformedRecord {
    pub fixture_id: Option<u64>,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidQuery {
    #[error("query names team {team_id} on both sides")]
    SameTeam { team_id: u32 },

    #[error(
        "record {index} ({home_id} vs {away_id}) does not involve exactly the queried teams {query_home} and {query_away}"
    )]
    ForeignRecord {
        index: usize,
        home_id: u32,
        away_id: u32,
        query_home: u32,
        query_away: u32,
    },
}

/// Why the engine refused to evaluate a pairing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DominanceError {
    #[error("{0}")]
    InvalidQuery(#[from] InvalidQuery),

    #[error("{0}")]
    InvalidConfig(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("cannot parse {key}={value:?}")]
    Unparseable { key: &'static str, value: String },

    #[error("{key} out of range: {detail}")]
    OutOfRange { key: &'static str, detail: String },
}

fn fixture_label(fixture_id: &Option<u64>) -> String {
    fixture_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

#[cfg(test)]
mod tests {
    use super::{InvalidQuery, MalformedRecord};

    #[test]
    fn malformed_record_message_names_fixture() {
        let err = MalformedRecord {
            fixture_id: Some(710),
            reason: "missing home team id",
        };
        assert_eq!(
            err.to_string(),
            "malformed record (fixture 710): missing home team id"
        );

        let err = MalformedRecord {
            fixture_id: None,
            reason: "missing timestamp",
        };
        assert_eq!(err.to_string(), "malformed record (fixture n/a): missing timestamp");
    }

    #[test]
    fn same_team_message() {
        let err = InvalidQuery::SameTeam { team_id: 33 };
        assert_eq!(err.to_string(), "query names team 33 on both sides");
    }
}
