//! Rating types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::{id_from_any, EntityId, EntityRef, DEFAULT_PAGE_SIZE};
use crate::error::{CoreError, CoreResult};
use crate::nps::{NpsBreakdown, NpsCategory};

/// Lowest allowed score
pub const SCORE_MIN: u8 = 1;
/// Highest allowed score
pub const SCORE_MAX: u8 = 10;

/// A class rating submitted by a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(deserialize_with = "id_from_any")]
    pub id: EntityId,
    #[serde(deserialize_with = "id_from_any")]
    pub branch_id: EntityId,
    #[serde(default)]
    pub branch: Option<EntityRef>,
    #[serde(deserialize_with = "id_from_any")]
    pub instructor_id: EntityId,
    #[serde(default)]
    pub instructor: Option<EntityRef>,
    #[serde(default)]
    pub discipline: Option<String>,
    #[serde(default)]
    pub schedule: Option<String>,
    pub instructor_rating: u8,
    pub cleanliness_rating: u8,
    pub audio_rating: u8,
    pub attention_quality_rating: u8,
    pub amenities_rating: u8,
    pub punctuality_rating: u8,
    pub nps_score: u8,
    #[serde(default)]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    /// The six sub-scores in a fixed order
    pub fn sub_scores(&self) -> [u8; 6] {
        [
            self.instructor_rating,
            self.cleanliness_rating,
            self.audio_rating,
            self.attention_quality_rating,
            self.amenities_rating,
            self.punctuality_rating,
        ]
    }

    /// Mean of the six sub-scores
    pub fn average_score(&self) -> f64 {
        let scores = self.sub_scores();
        scores.iter().map(|s| *s as f64).sum::<f64>() / scores.len() as f64
    }

    pub fn nps_category(&self) -> NpsCategory {
        NpsCategory::from_score(self.nps_score)
    }
}

/// NPS counts for a slice of ratings
pub fn nps_breakdown(ratings: &[Rating]) -> NpsBreakdown {
    NpsBreakdown::from_scores(ratings.iter().map(|r| r.nps_score))
}

/// Create rating request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRatingDto {
    pub branch_id: EntityId,
    pub instructor_id: EntityId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    pub instructor_rating: u8,
    pub cleanliness_rating: u8,
    pub audio_rating: u8,
    pub attention_quality_rating: u8,
    pub amenities_rating: u8,
    pub punctuality_rating: u8,
    pub nps_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
}

impl CreateRatingDto {
    /// Check every score is on the 1-10 scale
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("instructorRating", self.instructor_rating),
            ("cleanlinessRating", self.cleanliness_rating),
            ("audioRating", self.audio_rating),
            ("attentionQualityRating", self.attention_quality_rating),
            ("amenitiesRating", self.amenities_rating),
            ("punctualityRating", self.punctuality_rating),
            ("npsScore", self.nps_score),
        ];

        for (field, value) in fields {
            if !(SCORE_MIN..=SCORE_MAX).contains(&value) {
                return Err(CoreError::score_out_of_range(field, value, SCORE_MIN, SCORE_MAX));
            }
        }

        if self.branch_id.trim().is_empty() {
            return Err(CoreError::missing("branchId"));
        }
        if self.instructor_id.trim().is_empty() {
            return Err(CoreError::missing("instructorId"));
        }

        Ok(())
    }
}

/// Partial rating update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

/// Rating list filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Default for RatingFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            branch_id: None,
            instructor_id: None,
            discipline: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// Average of every sub-score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingAverages {
    pub instructor: f64,
    pub cleanliness: f64,
    pub audio: f64,
    pub attention_quality: f64,
    pub amenities: f64,
    pub punctuality: f64,
    pub nps: f64,
}

/// NPS figures as computed by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NpsSummary {
    pub promoters: u64,
    pub passives: u64,
    pub detractors: u64,
    pub score: f64,
}

/// Per-instructor averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstructorAverage {
    pub instructor_id: String,
    pub instructor_name: String,
    pub average: f64,
    pub count: u64,
}

/// Statistics returned by `/ratings/stats`
///
/// The response also nests pagination under `pagination`; that part is read
/// through [`crate::NestedPage`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingStats {
    pub total_ratings: u64,
    pub averages: RatingAverages,
    pub nps: NpsSummary,
    pub by_instructor: Vec<InstructorAverage>,
}

/// One point of a rating trend series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrendPoint {
    pub period: String,
    pub average_score: f64,
    pub nps_score: f64,
    pub count: u64,
}

/// Per-branch averages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchAverage {
    pub branch_id: String,
    pub branch_name: String,
    pub average: f64,
    pub count: u64,
}

/// Payload of `/ratings/analytics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RatingAnalytics {
    pub trends: Vec<TrendPoint>,
    pub by_branch: Vec<BranchAverage>,
}
