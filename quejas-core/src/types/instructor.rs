//! Instructor types

use serde::{Deserialize, Serialize};

use super::common::{id_from_any, EntityId, EntityRef, DEFAULT_PAGE_SIZE};

/// An instructor teaching at one or more branches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    #[serde(deserialize_with = "id_from_any")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub disciplines: Vec<String>,
    #[serde(default)]
    pub branches: Vec<EntityRef>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Instructor {
    /// Whether the instructor teaches at the given branch
    pub fn teaches_at(&self, branch_id: &str) -> bool {
        self.branches.iter().any(|b| b.id == branch_id)
    }
}

/// Create instructor request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstructorDto {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disciplines: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branch_ids: Vec<EntityId>,
}

/// Partial instructor update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstructorDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disciplines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_ids: Option<Vec<EntityId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Instructor list filters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorFilters {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for InstructorFilters {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            branch_id: None,
            discipline: None,
            is_active: None,
            search: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_teaches_at() {
        let instructor: Instructor = serde_json::from_value(json!({
            "id": 7,
            "name": "Carla",
            "branches": [{"id": 1, "name": "Roma"}, {"id": "2", "name": "Condesa"}]
        }))
        .unwrap();

        assert!(instructor.teaches_at("1"));
        assert!(instructor.teaches_at("2"));
        assert!(!instructor.teaches_at("3"));
    }
}
