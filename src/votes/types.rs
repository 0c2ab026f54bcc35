use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Vote tallies for one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub url: String,
    pub upvotes: u64,
    pub downvotes: u64,
}

impl VoteRecord {
    /// Tallies for a URL nobody has voted on
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            upvotes: 0,
            downvotes: 0,
        }
    }
}

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    /// Column incremented by this vote
    pub(crate) fn column(self) -> &'static str {
        match self {
            Self::Up => "upvotes",
            Self::Down => "downvotes",
        }
    }
}

impl FromStr for VoteKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(Error::invalid_input(format!(
                "vote must be 'up' or 'down', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vote_kind() {
        assert_eq!("up".parse::<VoteKind>().unwrap(), VoteKind::Up);
        assert_eq!("down".parse::<VoteKind>().unwrap(), VoteKind::Down);
        assert!(matches!(
            "sideways".parse::<VoteKind>(),
            Err(Error::InvalidInput(_))
        ));
        assert!("UP".parse::<VoteKind>().is_err());
        assert!("".parse::<VoteKind>().is_err());
    }

    #[test]
    fn test_record_json_shape() {
        let record = VoteRecord {
            url: "https://example.com".to_string(),
            upvotes: 3,
            downvotes: 1,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://example.com", "upvotes": 3, "downvotes": 1})
        );
    }
}
