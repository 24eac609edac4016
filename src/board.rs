use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchId(pub u64);

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub id: MatchId,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub kicked_off: DateTime<Utc>,
}

impl Match {
    pub fn total_goals(&self) -> u64 {
        u64::from(self.home_score) + u64::from(self.away_score)
    }

    pub fn score_line(&self) -> String {
        format!(
            "{} {} - {} {}",
            self.home_team, self.home_score, self.away_team, self.away_score
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("no match {0} on the board")]
    MatchNotFound(MatchId),
}

/// In-play matches in kickoff order; a failed operation leaves the board unchanged.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    matches: Vec<Match>,
    // minted once per match and never reused, even after a finish
    next_id: u64,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            matches: Vec::with_capacity(16),
            next_id: 1,
        }
    }

    /// Starts a new match and returns its id. Every match begins blank (unnamed
    /// teams, 0-0); initial values cannot be supplied, only edited in afterwards.
    pub fn start_match(&mut self) -> MatchId {
        let id = MatchId(self.next_id);
        self.next_id += 1;
        self.matches.push(Match {
            id,
            home_team: String::new(),
            away_team: String::new(),
            home_score: 0,
            away_score: 0,
            kicked_off: Utc::now(),
        });
        id
    }

    /// Overwrites the teams and the score in one step; id and kickoff are untouched.
    pub fn update_match(
        &mut self,
        id: MatchId,
        home_score: u32,
        away_score: u32,
        home_team: &str,
        away_team: &str,
    ) -> Result<(), BoardError> {
        let m = self
            .matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(BoardError::MatchNotFound(id))?;
        m.home_score = home_score;
        m.away_score = away_score;
        m.home_team = home_team.to_string();
        m.away_team = away_team.to_string();
        Ok(())
    }

    pub fn finish_match(&mut self, id: MatchId) -> Result<Match, BoardError> {
        let pos = self.position_of(id).ok_or(BoardError::MatchNotFound(id))?;
        Ok(self.matches.remove(pos))
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn snapshot(&self) -> Vec<Match> {
        self.matches.clone()
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn position_of(&self, id: MatchId) -> Option<usize> {
        self.matches.iter().position(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
