//! Score averaging and letter-grade mapping.

use serde::{Deserialize, Serialize};

use crate::models::common::{BadgeColor, BadgeValue, Facet};

/// Letter grade derived from a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLetter {
    A,
    B,
    C,
    D,
    E,
}

impl GradeLetter {
    pub const ALL: [GradeLetter; 5] = [
        GradeLetter::A,
        GradeLetter::B,
        GradeLetter::C,
        GradeLetter::D,
        GradeLetter::E,
    ];

    /// Maps a score to its letter.
    ///
    /// Total over every `f64`: scores above 100 are an A, negative scores
    /// and NaN are an E.
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s.is_nan() => GradeLetter::E,
            s if s >= 90.0 => GradeLetter::A,
            s if s >= 80.0 => GradeLetter::B,
            s if s >= 70.0 => GradeLetter::C,
            s if s >= 60.0 => GradeLetter::D,
            _ => GradeLetter::E,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GradeLetter::A => "A",
            GradeLetter::B => "B",
            GradeLetter::C => "C",
            GradeLetter::D => "D",
            GradeLetter::E => "E",
        }
    }

    /// Lower bound of the band, inclusive.
    pub fn min_score(&self) -> f64 {
        match self {
            GradeLetter::A => 90.0,
            GradeLetter::B => 80.0,
            GradeLetter::C => 70.0,
            GradeLetter::D => 60.0,
            GradeLetter::E => 0.0,
        }
    }
}

impl BadgeValue for GradeLetter {
    fn facet(&self) -> Facet<'static> {
        let key = self.as_str();
        Facet::new(key, key, key)
    }

    fn color(&self) -> BadgeColor {
        match self {
            GradeLetter::A => BadgeColor::Green,
            GradeLetter::B => BadgeColor::Blue,
            GradeLetter::C => BadgeColor::Yellow,
            GradeLetter::D => BadgeColor::Orange,
            GradeLetter::E => BadgeColor::Red,
        }
    }
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn average(scores: &[f64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    Some(scores.iter().sum::<f64>() / scores.len() as f64)
}

/// Rounds to two decimal places for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage of `part` in `total`, 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(part as f64 * 100.0 / total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_boundaries() {
        assert_eq!(GradeLetter::from_score(100.0), GradeLetter::A);
        assert_eq!(GradeLetter::from_score(90.0), GradeLetter::A);
        assert_eq!(GradeLetter::from_score(89.99), GradeLetter::B);
        assert_eq!(GradeLetter::from_score(80.0), GradeLetter::B);
        assert_eq!(GradeLetter::from_score(79.9), GradeLetter::C);
        assert_eq!(GradeLetter::from_score(70.0), GradeLetter::C);
        assert_eq!(GradeLetter::from_score(60.0), GradeLetter::D);
        assert_eq!(GradeLetter::from_score(59.9), GradeLetter::E);
        assert_eq!(GradeLetter::from_score(0.0), GradeLetter::E);
    }

    #[test]
    fn test_letter_out_of_range_scores() {
        assert_eq!(GradeLetter::from_score(120.0), GradeLetter::A);
        assert_eq!(GradeLetter::from_score(-5.0), GradeLetter::E);
        assert_eq!(GradeLetter::from_score(f64::NAN), GradeLetter::E);
        assert_eq!(GradeLetter::from_score(f64::NEG_INFINITY), GradeLetter::E);
        assert_eq!(GradeLetter::from_score(f64::INFINITY), GradeLetter::A);
    }

    #[test]
    fn test_letter_is_monotonic_over_range() {
        let mut previous = GradeLetter::from_score(0.0);
        let mut score = 0.0;
        while score <= 100.0 {
            let letter = GradeLetter::from_score(score);
            // Ord puts A first, so a higher score never yields a later letter.
            assert!(letter <= previous, "score {score} regressed");
            previous = letter;
            score += 0.25;
        }
    }

    #[test]
    fn test_letter_min_score_round_trip() {
        for letter in GradeLetter::ALL {
            assert_eq!(GradeLetter::from_score(letter.min_score()), letter);
        }
    }

    #[test]
    fn test_letter_colors() {
        assert_eq!(GradeLetter::A.color(), BadgeColor::Green);
        assert_eq!(GradeLetter::E.color(), BadgeColor::Red);
    }

    #[test]
    fn test_average_worked_example() {
        let avg = average(&[95.0, 98.0, 94.0, 97.0, 97.0]).unwrap();
        assert_eq!(avg, 96.2);
    }

    #[test]
    fn test_average_empty() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(3, 4), 75.0);
    }
}
