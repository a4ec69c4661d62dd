//! Form record types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Form parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// Character that is not one of W, D or L
    #[error("invalid form symbol {symbol:?} at position {position}")]
    InvalidFormSymbol { symbol: char, position: usize },
}

/// Result of a single past match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormSymbol {
    Win,
    Draw,
    Loss,
}

impl FormSymbol {
    /// League points awarded for the result (W=2, D=1, L=0)
    pub fn points(self) -> u32 {
        match self {
            FormSymbol::Win => 2,
            FormSymbol::Draw => 1,
            FormSymbol::Loss => 0,
        }
    }

    fn as_char(self) -> char {
        match self {
            FormSymbol::Win => 'W',
            FormSymbol::Draw => 'D',
            FormSymbol::Loss => 'L',
        }
    }
}

impl TryFrom<char> for FormSymbol {
    type Error = char;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'W' => Ok(FormSymbol::Win),
            'D' => Ok(FormSymbol::Draw),
            'L' => Ok(FormSymbol::Loss),
            other => Err(other),
        }
    }
}

/// Sequence of recent results, oldest first and most recent last.
///
/// Any length is accepted; the usual feed provides the last five matches.
/// Ordering does not influence the goal-rate estimate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord(Vec<FormSymbol>);

impl FormRecord {
    pub fn new(symbols: Vec<FormSymbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[FormSymbol] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Mean points per match, 0.0 for an empty record
    pub fn average_points(&self) -> f64 {
        if self.0.is_empty() {
            return 0.0;
        }
        let total: u32 = self.0.iter().map(|s| s.points()).sum();
        total as f64 / self.0.len() as f64
    }
}

impl FromStr for FormRecord {
    type Err = FormError;

    /// Parses strings like `"WWDLW"`. Case is ignored, whitespace is skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .filter(|(_, c)| !c.is_whitespace())
            .map(|(position, c)| {
                FormSymbol::try_from(c)
                    .map_err(|symbol| FormError::InvalidFormSymbol { symbol, position })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FormRecord)
    }
}

impl fmt::Display for FormRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// Expected goals per side for one match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalRatePair {
    pub home: f64,
    pub away: f64,
}

impl GoalRatePair {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }
}
