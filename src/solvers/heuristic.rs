use std::str::FromStr;

use crate::error::{MazeError, Result};
use crate::maze::Position;

/// Estimate of the remaining cost from a cell to the goal.
///
/// Both are admissible on a 4-connected grid with unit edge cost. Manhattan is
/// exact in an open grid; Euclidean never exceeds it.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heuristic {
    #[default]
    Euclidean,
    Manhattan,
}

impl Heuristic {
    pub fn estimate(self, from: Position, to: Position) -> f64 {
        let d_row = from.row.abs_diff(to.row) as f64;
        let d_col = from.col.abs_diff(to.col) as f64;
        match self {
            Heuristic::Euclidean => (d_row * d_row + d_col * d_col).sqrt(),
            Heuristic::Manhattan => d_row + d_col,
        }
    }
}

impl std::fmt::Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Heuristic::Euclidean => write!(f, "Euclidean"),
            Heuristic::Manhattan => write!(f, "Manhattan"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            // "euclidian" is the spelling older saved settings use
            "euclidean" | "euclidian" => Ok(Heuristic::Euclidean),
            "manhattan" => Ok(Heuristic::Manhattan),
            _ => Err(MazeError::InvalidArgument(format!(
                "unknown heuristic: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimates() {
        let a = Position::new(1, 1);
        let b = Position::new(4, 5);
        assert_eq!(Heuristic::Manhattan.estimate(a, b), 7.0);
        assert_eq!(Heuristic::Euclidean.estimate(a, b), 5.0);
        assert_eq!(Heuristic::Euclidean.estimate(b, a), 5.0);
        assert_eq!(Heuristic::Manhattan.estimate(a, a), 0.0);
    }

    #[test]
    fn test_euclidean_never_exceeds_manhattan() {
        let goal = Position::new(7, 3);
        for row in 0..10 {
            for col in 0..10 {
                let p = Position::new(row, col);
                assert!(Heuristic::Euclidean.estimate(p, goal) <= Heuristic::Manhattan.estimate(p, goal));
            }
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("manhattan".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!("Euclidian".parse::<Heuristic>().unwrap(), Heuristic::Euclidean);
        assert!(matches!(
            "chebyshev".parse::<Heuristic>(),
            Err(MazeError::InvalidArgument(_))
        ));
    }
}
