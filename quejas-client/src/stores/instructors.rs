//! Instructor store

use quejas_core::{
    query_pairs, CreateInstructorDto, EnvelopeShape, Instructor, InstructorFilters, PageEnvelope,
    PageRequest, Pagination, Rating, UpdateInstructorDto,
};
use serde_json::Value;
use tracing::info;

use crate::error::{ClientError, ClientResult};
use crate::store::{Resource, ResourceStore, StoreMessages};

/// Ratings page for one instructor
#[derive(Debug, Clone, Default)]
pub struct InstructorRatings {
    pub instructor_id: String,
    pub ratings: Vec<Rating>,
    pub pagination: Pagination,
}

/// `/instructors`
pub struct Instructors;

impl Resource for Instructors {
    type Entity = Instructor;
    type Create = CreateInstructorDto;
    type Update = UpdateInstructorDto;
    type Filters = InstructorFilters;
    type Extra = Option<InstructorRatings>;

    const NAME: &'static str = "instructors";
    const PATH: &'static str = "/instructors";
    const MESSAGES: StoreMessages = StoreMessages {
        fetch: "Error al cargar los instructores",
        fetch_one: "Error al cargar el instructor",
        create: "Error al crear el instructor",
        update: "Error al actualizar el instructor",
        delete: "Error al eliminar el instructor",
    };
}

pub type InstructorStore = ResourceStore<Instructors>;

impl ResourceStore<Instructors> {
    /// Fetch one page of an instructor's ratings
    pub async fn ratings_for(&self, id: &str, page: u32, limit: u32) -> ClientResult<InstructorRatings> {
        self.run("Error al cargar las calificaciones del instructor", || async {
            let query = query_pairs(&PageRequest { page, limit });
            let body: Value = self
                .client()
                .get(&format!("{}/ratings", Instructors::item_path(id)), &query)
                .await?;

            let (ratings, pagination) = PageEnvelope::<Rating>::decode(EnvelopeShape::Flat, body)
                .map_err(|e| ClientError::decode(format!("instructor {} ratings: {}", id, e)))?
                .into_parts();
            info!(instructor = id, count = ratings.len(), "Fetched instructor ratings");

            let result = InstructorRatings {
                instructor_id: id.to_string(),
                ratings,
                pagination,
            };
            self.update_extra(|extra| *extra = Some(result.clone()));
            Ok(result)
        })
        .await
    }

    /// Instructors of the loaded page teaching at a branch
    pub fn at_branch(&self, branch_id: &str) -> Vec<Instructor> {
        self.items()
            .into_iter()
            .filter(|i| i.teaches_at(branch_id))
            .collect()
    }
}
