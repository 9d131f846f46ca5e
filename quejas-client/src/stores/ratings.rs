//! Rating store
//!
//! Besides the list, ratings expose aggregate statistics and analytics.
//! The statistics response nests its pagination under a `pagination` key;
//! when present it replaces the store's pagination.

use quejas_core::{
    nps_breakdown, query_pairs, CreateRatingDto, EnvelopeShape, NpsBreakdown, PageEnvelope,
    Rating, RatingAnalytics, RatingFilters, RatingStats, UpdateRatingDto,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{ClientError, ClientResult};
use crate::store::{Resource, ResourceStore, StoreMessages};

/// Aggregates kept next to the rating list
#[derive(Debug, Clone, Default)]
pub struct RatingInsights {
    pub stats: Option<RatingStats>,
    pub analytics: Option<RatingAnalytics>,
}

/// `/ratings`
pub struct Ratings;

impl Resource for Ratings {
    type Entity = Rating;
    type Create = CreateRatingDto;
    type Update = UpdateRatingDto;
    type Filters = RatingFilters;
    type Extra = RatingInsights;

    const NAME: &'static str = "ratings";
    const PATH: &'static str = "/ratings";
    const MESSAGES: StoreMessages = StoreMessages {
        fetch: "Error al cargar las calificaciones",
        fetch_one: "Error al cargar la calificación",
        create: "Error al crear la calificación",
        update: "Error al actualizar la calificación",
        delete: "Error al eliminar la calificación",
    };
}

pub type RatingStore = ResourceStore<Ratings>;

const STATS_PATH: &str = "/ratings/stats";
const ANALYTICS_PATH: &str = "/ratings/analytics";

impl ResourceStore<Ratings> {
    /// Validate scores locally, then create
    pub async fn submit(&self, dto: &CreateRatingDto) -> ClientResult<Option<Rating>> {
        if let Err(e) = dto.validate() {
            return self
                .run(Ratings::MESSAGES.create, move || async move { Err(ClientError::from(e)) })
                .await;
        }
        self.create(dto).await
    }

    /// Fetch `/ratings/stats`
    pub async fn stats(&self, filters: &RatingFilters) -> ClientResult<RatingStats> {
        self.run("Error al cargar las estadísticas de calificaciones", || async {
            let body: Value = self
                .client()
                .get(STATS_PATH, &query_pairs(filters))
                .await?;
            let stats: RatingStats = serde_json::from_value(body.clone())
                .map_err(|e| ClientError::decode(format!("{}: {}", STATS_PATH, e)))?;
            info!(
                total = stats.total_ratings,
                nps = stats.nps.score,
                "Fetched rating stats"
            );
            match PageEnvelope::<Value>::decode(EnvelopeShape::Nested, body) {
                Ok(page) => self.set_pagination(page.pagination()),
                Err(e) => debug!(error = %e, "Rating stats carry no pagination"),
            }
            self.update_extra(|extra| extra.stats = Some(stats.clone()));
            Ok(stats)
        })
        .await
    }

    /// Fetch `/ratings/analytics`
    pub async fn analytics(&self, filters: &RatingFilters) -> ClientResult<RatingAnalytics> {
        self.run("Error al cargar el análisis de calificaciones", || async {
            let analytics: RatingAnalytics = self
                .client()
                .get(ANALYTICS_PATH, &query_pairs(filters))
                .await?;
            info!(points = analytics.trends.len(), "Fetched rating analytics");
            self.update_extra(|extra| extra.analytics = Some(analytics.clone()));
            Ok(analytics)
        })
        .await
    }

    /// NPS over the currently loaded page
    pub fn nps_breakdown(&self) -> NpsBreakdown {
        nps_breakdown(&self.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::test_support::client;
    use crate::transport::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn rating(id: u32, nps: u8) -> serde_json::Value {
        json!({
            "id": id,
            "branchId": 1,
            "instructorId": 4,
            "instructorRating": 9,
            "cleanlinessRating": 8,
            "audioRating": 7,
            "attentionQualityRating": 9,
            "amenitiesRating": 6,
            "punctualityRating": 10,
            "npsScore": nps,
            "createdAt": "2024-06-01T08:30:00Z"
        })
    }

    #[tokio::test]
    async fn test_nps_over_loaded_page() {
        let (client, mock) = client();
        let data: Vec<_> = [10, 9, 8, 7, 3]
            .iter()
            .enumerate()
            .map(|(i, s)| rating(i as u32 + 1, *s))
            .collect();
        mock.on(
            Method::GET,
            "/ratings",
            200,
            json!({"data": data, "page": 1, "limit": 10, "total": 5, "totalPages": 1}),
        );

        let store = RatingStore::new(Arc::new(client));
        store.fetch(RatingFilters::default()).await.unwrap();

        let nps = store.nps_breakdown();
        assert_eq!(nps.promoters, 2);
        assert_eq!(nps.passives, 2);
        assert_eq!(nps.detractors, 1);
        assert!((nps.score() - 20.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_stats_nested_pagination_updates_store() {
        let (client, mock) = client();
        mock.on(
            Method::GET,
            "/ratings/stats",
            200,
            json!({
                "totalRatings": 42,
                "averages": {"instructor": 8.5, "nps": 7.9},
                "nps": {"promoters": 20, "passives": 12, "detractors": 10, "score": 23.8},
                "pagination": {"page": 2, "limit": 20, "total": 42, "totalPages": 3}
            }),
        );

        let store = RatingStore::new(Arc::new(client));
        let stats = store.stats(&RatingFilters::default()).await.unwrap();

        assert_eq!(stats.total_ratings, 42);
        assert_eq!(stats.nps.promoters, 20);
        let pagination = store.pagination();
        assert_eq!(pagination.page, 2);
        assert_eq!(pagination.total_pages, 3);
        assert!(store.extra().stats.is_some());
    }

    #[tokio::test]
    async fn test_stats_without_pagination_keeps_current() {
        let (client, mock) = client();
        mock.on(Method::GET, "/ratings/stats", 200, json!({"totalRatings": 0}));

        let store = RatingStore::new(Arc::new(client));
        store.stats(&RatingFilters::default()).await.unwrap();
        assert_eq!(store.pagination(), quejas_core::Pagination::default());
    }

    #[tokio::test]
    async fn test_analytics() {
        let (client, mock) = client();
        mock.on(
            Method::GET,
            "/ratings/analytics",
            200,
            json!({
                "trends": [{"period": "2024-05", "averageScore": 8.1, "npsScore": 30.0, "count": 12}],
                "byBranch": [{"branchId": "1", "branchName": "Polanco", "average": 8.4, "count": 7}]
            }),
        );

        let store = RatingStore::new(Arc::new(client));
        let filters = RatingFilters {
            branch_id: Some("1".into()),
            ..Default::default()
        };
        let analytics = store.analytics(&filters).await.unwrap();
        assert_eq!(analytics.trends[0].period, "2024-05");
        assert_eq!(analytics.by_branch[0].branch_name, "Polanco");
        assert_eq!(store.extra().analytics.unwrap().trends.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_rejects_out_of_range_score() {
        let (client, mock) = client();
        let store = RatingStore::new(Arc::new(client));

        let dto = CreateRatingDto {
            branch_id: "1".into(),
            instructor_id: "4".into(),
            discipline: None,
            schedule: None,
            instructor_rating: 11,
            cleanliness_rating: 8,
            audio_rating: 8,
            attention_quality_rating: 8,
            amenities_rating: 8,
            punctuality_rating: 8,
            nps_score: 9,
            comments: None,
        };

        assert!(store.submit(&dto).await.is_err());
        assert_eq!(mock.request_count(), 0);
        assert!(store.error().is_some());
        assert!(!store.is_loading());
    }
}
