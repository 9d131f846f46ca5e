//! Complaint types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::common::{id_from_any, EntityId, EntityRef, DEFAULT_PAGE_SIZE};
use crate::error::CoreError;

/// Complaint priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintPriority {
    #[serde(alias = "ALTA")]
    High,
    #[serde(alias = "MEDIA")]
    Medium,
    #[serde(alias = "BAJA")]
    Low,
}

impl ComplaintPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for ComplaintPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HIGH" | "ALTA" => Ok(Self::High),
            "MEDIUM" | "MEDIA" => Ok(Self::Medium),
            "LOW" | "BAJA" => Ok(Self::Low),
            _ => Err(CoreError::unknown("priority", s)),
        }
    }
}

/// Complaint lifecycle status
///
/// Transitions are performed by the backend; the client only requests them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    #[serde(alias = "PENDIENTE")]
    Pending,
    #[serde(alias = "EN_PROCESO")]
    InProgress,
    #[serde(alias = "RESUELTO")]
    Resolved,
    #[serde(alias = "RECHAZADO")]
    Rejected,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Rejected => "REJECTED",
        }
    }

    /// Resolved and rejected complaints receive no further work
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "PENDING" | "PENDIENTE" => Ok(Self::Pending),
            "IN_PROGRESS" | "EN_PROCESO" => Ok(Self::InProgress),
            "RESOLVED" | "RESUELTO" => Ok(Self::Resolved),
            "REJECTED" | "RECHAZADO" => Ok(Self::Rejected),
            _ => Err(CoreError::unknown("status", s)),
        }
    }
}

/// A customer complaint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    #[serde(deserialize_with = "id_from_any")]
    pub id: EntityId,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(deserialize_with = "id_from_any")]
    pub branch_id: EntityId,
    #[serde(default)]
    pub branch: Option<EntityRef>,
    pub observation_type: String,
    pub detail: String,
    pub priority: ComplaintPriority,
    pub status: ComplaintStatus,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Complaint {
    /// Branch display name, falling back to the raw id
    pub fn branch_name(&self) -> &str {
        self.branch
            .as_ref()
            .map(|b| b.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.branch_id)
    }
}

/// Create complaint request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComplaintDto {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub branch_id: EntityId,
    pub observation_type: String,
    pub detail: String,
    pub priority: ComplaintPriority,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

/// Partial complaint update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateComplaintDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<ComplaintPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

/// Complaint list filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ComplaintStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<ComplaintPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl Default for ComplaintFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            status: None,
            priority: None,
            branch_id: None,
            search: None,
            start_date: None,
            end_date: None,
        }
    }
}

/// Count of complaints for one branch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchCount {
    pub branch_id: String,
    pub branch_name: String,
    pub count: u64,
}

/// Counts per priority
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityCounts {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

/// Statistics returned by `/complaints/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplaintStats {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
    pub rejected: u64,
    pub by_priority: PriorityCounts,
    pub by_branch: Vec<BranchCount>,
}

impl ComplaintStats {
    /// Share of complaints already resolved, in percent
    pub fn resolution_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.resolved as f64 / self.total as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_complaint_deserialization_accepts_spanish_values() {
        let body = json!({
            "id": 42,
            "fullName": "Ana López",
            "email": "ana@example.com",
            "branchId": 3,
            "branch": {"id": 3, "name": "Roma"},
            "observationType": "Instalaciones",
            "detail": "Regadera sin agua caliente",
            "priority": "ALTA",
            "status": "EN_PROCESO",
            "createdAt": "2024-05-01T10:00:00Z"
        });

        let complaint: Complaint = serde_json::from_value(body).unwrap();
        assert_eq!(complaint.id, "42");
        assert_eq!(complaint.priority, ComplaintPriority::High);
        assert_eq!(complaint.status, ComplaintStatus::InProgress);
        assert_eq!(complaint.branch_name(), "Roma");
        assert!(complaint.attachments.is_empty());
    }

    #[test]
    fn test_update_dto_skips_absent_fields() {
        let dto = UpdateComplaintDto {
            status: Some(ComplaintStatus::Resolved),
            resolution: Some("Se reparó el calentador".into()),
            ..Default::default()
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["status"], "RESOLVED");
        assert!(value.get("priority").is_none());
        assert!(value.get("attachments").is_none());
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("in-progress".parse::<ComplaintStatus>().unwrap(), ComplaintStatus::InProgress);
        assert_eq!("resuelto".parse::<ComplaintStatus>().unwrap(), ComplaintStatus::Resolved);
        assert!("closed".parse::<ComplaintStatus>().is_err());
        assert!(ComplaintStatus::Rejected.is_terminal());
        assert!(!ComplaintStatus::Pending.is_terminal());
    }

    #[test]
    fn test_resolution_rate() {
        let stats = ComplaintStats {
            total: 8,
            resolved: 2,
            ..Default::default()
        };
        assert_eq!(stats.resolution_rate(), 25.0);
        assert_eq!(ComplaintStats::default().resolution_rate(), 0.0);
    }
}
