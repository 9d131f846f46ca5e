//! Net Promoter Score classification
//!
//! Scores are on a 1-10 scale. Promoters score 9 or 10, passives 7 or 8,
//! everything at or below 6 is a detractor.

use serde::{Deserialize, Serialize};

/// Lowest score counted as a promoter
pub const PROMOTER_MIN: u8 = 9;
/// Lowest score counted as a passive
pub const PASSIVE_MIN: u8 = 7;

/// NPS band of a single score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NpsCategory {
    Promoter,
    Passive,
    Detractor,
}

impl NpsCategory {
    /// Classify a raw score
    pub fn from_score(score: u8) -> Self {
        if score >= PROMOTER_MIN {
            NpsCategory::Promoter
        } else if score >= PASSIVE_MIN {
            NpsCategory::Passive
        } else {
            NpsCategory::Detractor
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NpsCategory::Promoter => "promotor",
            NpsCategory::Passive => "pasivo",
            NpsCategory::Detractor => "detractor",
        }
    }
}

/// Aggregate counts over a set of scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpsBreakdown {
    pub promoters: u64,
    pub passives: u64,
    pub detractors: u64,
}

impl NpsBreakdown {
    /// Count every score into its band
    pub fn from_scores<I>(scores: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        scores.into_iter().fold(Self::default(), |mut acc, score| {
            acc.record(score);
            acc
        })
    }

    /// Add one score
    pub fn record(&mut self, score: u8) {
        match NpsCategory::from_score(score) {
            NpsCategory::Promoter => self.promoters += 1,
            NpsCategory::Passive => self.passives += 1,
            NpsCategory::Detractor => self.detractors += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.promoters + self.passives + self.detractors
    }

    /// `(promoters - detractors) / total * 100`, zero when empty
    pub fn score(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        (self.promoters as f64 - self.detractors as f64) / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(NpsCategory::from_score(10), NpsCategory::Promoter);
        assert_eq!(NpsCategory::from_score(9), NpsCategory::Promoter);
        assert_eq!(NpsCategory::from_score(8), NpsCategory::Passive);
        assert_eq!(NpsCategory::from_score(7), NpsCategory::Passive);
        assert_eq!(NpsCategory::from_score(6), NpsCategory::Detractor);
        assert_eq!(NpsCategory::from_score(1), NpsCategory::Detractor);
    }

    #[test]
    fn test_breakdown_over_ten_scores() {
        let scores = [10, 9, 9, 8, 7, 7, 6, 5, 3, 10];
        let breakdown = NpsBreakdown::from_scores(scores);

        assert_eq!(breakdown.promoters, 4);
        assert_eq!(breakdown.passives, 3);
        assert_eq!(breakdown.detractors, 3);
        assert_eq!(breakdown.total(), 10);
        assert!((breakdown.score() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_breakdown() {
        let breakdown = NpsBreakdown::from_scores(Vec::new());
        assert_eq!(breakdown.total(), 0);
        assert_eq!(breakdown.score(), 0.0);
    }
}
