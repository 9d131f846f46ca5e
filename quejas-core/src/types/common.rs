//! Common types: identifiers, pagination and list envelopes

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Backend entity identifier
///
/// The backend emits both numeric and string ids depending on the table,
/// so ids are normalised to strings on the way in.
pub type EntityId = String;

/// Default page size used by every list endpoint
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Deserialize an id that may arrive as a JSON number or string
pub fn id_from_any<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Same as [`id_from_any`] for optional ids
pub fn opt_id_from_any<'de, D>(deserializer: D) -> Result<Option<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Pagination metadata attached to every list-bearing store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            total: 0,
            total_pages: 0,
        }
    }
}

impl Pagination {
    /// Whether a page after the current one exists
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page before the current one exists
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// Which list envelope a resource endpoint returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeShape {
    /// `{data, page, limit, total, totalPages}`
    Flat,
    /// `{data, pagination: {page, limit, total, totalPages}}`
    Nested,
}

/// Flat list envelope used by most resources
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatPage<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// List envelope with pagination nested under a `pagination` key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// A decoded page, whichever envelope it arrived in
#[derive(Debug, Clone)]
pub enum PageEnvelope<T> {
    Flat(FlatPage<T>),
    Nested(NestedPage<T>),
}

impl<T> PageEnvelope<T> {
    /// Decode a JSON body according to the declared envelope shape
    pub fn decode(shape: EnvelopeShape, body: Value) -> Result<Self, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        match shape {
            EnvelopeShape::Flat => serde_json::from_value(body).map(PageEnvelope::Flat),
            EnvelopeShape::Nested => serde_json::from_value(body).map(PageEnvelope::Nested),
        }
    }

    /// Pagination metadata regardless of envelope
    pub fn pagination(&self) -> Pagination {
        match self {
            PageEnvelope::Flat(p) => Pagination {
                page: p.page,
                limit: p.limit,
                total: p.total,
                total_pages: p.total_pages,
            },
            PageEnvelope::Nested(p) => p.pagination,
        }
    }

    /// Split into items and pagination
    pub fn into_parts(self) -> (Vec<T>, Pagination) {
        let pagination = self.pagination();
        let data = match self {
            PageEnvelope::Flat(p) => p.data,
            PageEnvelope::Nested(p) => p.data,
        };
        (data, pagination)
    }
}

/// Turn any serialisable filter struct into query pairs
///
/// Null values are dropped; nested objects and arrays are ignored since no
/// list endpoint accepts them.
pub fn query_pairs<T: Serialize>(filters: &T) -> Vec<(String, String)> {
    let value = match serde_json::to_value(filters) {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let Value::Object(map) = value else {
        return Vec::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(s) => Some((key, s)),
            Value::Number(n) => Some((key, n.to_string())),
            Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect()
}

/// Page/limit pair shared by filter structs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Filters accepted by the statistics endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Reference to a related entity embedded in a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(deserialize_with = "id_from_any")]
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
}
