//! Complaint store

use quejas_core::{
    query_pairs, Complaint, ComplaintFilters, ComplaintStats, ComplaintStatus,
    CreateComplaintDto, StatsFilters, UpdateComplaintDto,
};
use tracing::info;

use crate::error::ClientResult;
use crate::store::{Resource, ResourceStore, StoreMessages};

/// State kept next to the complaint list
#[derive(Debug, Clone, Default)]
pub struct ComplaintExtra {
    pub stats: Option<ComplaintStats>,
}

/// `/complaints`
pub struct Complaints;

impl Resource for Complaints {
    type Entity = Complaint;
    type Create = CreateComplaintDto;
    type Update = UpdateComplaintDto;
    type Filters = ComplaintFilters;
    type Extra = ComplaintExtra;

    const NAME: &'static str = "complaints";
    const PATH: &'static str = "/complaints";
    const MESSAGES: StoreMessages = StoreMessages {
        fetch: "Error al cargar las quejas",
        fetch_one: "Error al cargar la queja",
        create: "Error al crear la queja",
        update: "Error al actualizar la queja",
        delete: "Error al eliminar la queja",
    };
}

pub type ComplaintStore = ResourceStore<Complaints>;

const STATS_PATH: &str = "/complaints/stats";
const STATS_ERROR: &str = "Error al cargar las estadísticas de quejas";

impl ResourceStore<Complaints> {
    /// Fetch `/complaints/stats` and keep the result
    pub async fn stats(&self, filters: &StatsFilters) -> ClientResult<ComplaintStats> {
        self.run(STATS_ERROR, || async {
            let stats: ComplaintStats = self
                .client()
                .get(STATS_PATH, &query_pairs(filters))
                .await?;
            info!(total = stats.total, pending = stats.pending, "Fetched complaint stats");
            self.update_extra(|extra| extra.stats = Some(stats.clone()));
            Ok(stats)
        })
        .await
    }

    /// Ask the backend to move a complaint to another status
    pub async fn update_status(
        &self,
        id: &str,
        status: ComplaintStatus,
        resolution: Option<String>,
    ) -> ClientResult<Option<Complaint>> {
        let dto = UpdateComplaintDto {
            status: Some(status),
            resolution,
            ..Default::default()
        };
        self.update(id, &dto).await
    }

    /// Complaints of the loaded page with the given status
    pub fn with_status(&self, status: ComplaintStatus) -> Vec<Complaint> {
        self.items()
            .into_iter()
            .filter(|c| c.status == status)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::test_support::client;
    use crate::transport::Method;
    use serde_json::json;
    use std::sync::Arc;

    fn complaint(id: u32, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "fullName": "Ana",
            "email": "ana@example.com",
            "branchId": 1,
            "observationType": "Servicio",
            "detail": "Clase empezó tarde",
            "priority": "MEDIUM",
            "status": status,
            "createdAt": "2024-05-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_fetch_sends_filters_as_query() {
        let (client, mock) = client();
        mock.on(
            Method::GET,
            "/complaints",
            200,
            json!({
                "data": [complaint(1, "PENDING"), complaint(2, "RESOLVED")],
                "page": 2, "limit": 2, "total": 4, "totalPages": 2
            }),
        );

        let store = ComplaintStore::new(Arc::new(client));
        let filters = ComplaintFilters {
            page: 2,
            limit: 2,
            status: Some(ComplaintStatus::Pending),
            branch_id: Some("1".into()),
            ..Default::default()
        };
        store.fetch(filters).await.unwrap();

        let request = mock.last_request().unwrap();
        assert_eq!(request.query_param("page").as_deref(), Some("2"));
        assert_eq!(request.query_param("status").as_deref(), Some("PENDING"));
        assert_eq!(request.query_param("branchId").as_deref(), Some("1"));
        assert!(request.query_param("search").is_none());

        assert_eq!(store.pagination().total_pages, 2);
        assert_eq!(store.with_status(ComplaintStatus::Resolved).len(), 1);
    }

    #[tokio::test]
    async fn test_stats_kept_in_store() {
        let (client, mock) = client();
        mock.on(
            Method::GET,
            "/complaints/stats",
            200,
            json!({"total": 10, "pending": 4, "inProgress": 3, "resolved": 2, "rejected": 1,
                   "byPriority": {"high": 5, "medium": 3, "low": 2}}),
        );

        let store = ComplaintStore::new(Arc::new(client));
        let filters = StatsFilters {
            branch_id: Some("3".into()),
            ..Default::default()
        };
        let stats = store.stats(&filters).await.unwrap();

        assert_eq!(stats.in_progress, 3);
        assert_eq!(stats.by_priority.high, 5);
        assert_eq!(store.extra().stats.unwrap().total, 10);
        assert_eq!(mock.last_request().unwrap().query_param("branchId").as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_stats_failure_sets_error() {
        let (client, mock) = client();
        mock.fail_once(Method::GET, "/complaints/stats", "timeout");

        let store = ComplaintStore::new(Arc::new(client));
        assert!(store.stats(&StatsFilters::default()).await.is_err());
        assert_eq!(store.error().as_deref(), Some(STATS_ERROR));
        assert!(store.extra().stats.is_none());
    }

    #[tokio::test]
    async fn test_update_status_body() {
        let (client, mock) = client();
        mock.on(Method::PATCH, "/complaints/7", 200, complaint(7, "RESOLVED"));
        mock.on(
            Method::GET,
            "/complaints",
            200,
            json!({"data": [], "page": 1, "limit": 10, "total": 0, "totalPages": 0}),
        );

        let store = ComplaintStore::new(Arc::new(client));
        let updated = store
            .update_status("7", ComplaintStatus::Resolved, Some("Reembolso aplicado".into()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ComplaintStatus::Resolved);

        let patch = mock
            .requests()
            .into_iter()
            .find(|r| r.method == Method::PATCH)
            .unwrap();
        let body = patch.json_body().unwrap();
        assert_eq!(body["status"], "RESOLVED");
        assert_eq!(body["resolution"], "Reembolso aplicado");
        assert!(body.get("priority").is_none());
    }
}
