//! Manager (back-office user) store
//!
//! Users live under `/auth/users`; new ones are created through
//! `/auth/register`.

use quejas_core::{CreateManagerDto, Manager, ManagerFilters, UpdateManagerDto};

use crate::store::{Resource, ResourceStore, StoreMessages};

pub struct Managers;

impl Resource for Managers {
    type Entity = Manager;
    type Create = CreateManagerDto;
    type Update = UpdateManagerDto;
    type Filters = ManagerFilters;
    type Extra = ();

    const NAME: &'static str = "managers";
    const PATH: &'static str = "/auth/users";
    const MESSAGES: StoreMessages = StoreMessages {
        fetch: "Error al cargar los usuarios",
        fetch_one: "Error al cargar el usuario",
        create: "Error al crear el usuario",
        update: "Error al actualizar el usuario",
        delete: "Error al eliminar el usuario",
    };

    fn create_path() -> String {
        "/auth/register".to_string()
    }
}

pub type ManagerStore = ResourceStore<Managers>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::test_support::client;
    use crate::transport::Method;
    use quejas_core::UserRole;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_goes_through_register() {
        let (client, mock) = client();
        mock.on(
            Method::POST,
            "/auth/register",
            201,
            json!({"id": 3, "name": "Mara", "email": "mara@siclo.com", "role": "MANAGER", "branchId": 2}),
        );
        mock.on(
            Method::GET,
            "/auth/users",
            200,
            json!({"data": [], "page": 1, "limit": 10, "total": 0, "totalPages": 0}),
        );

        let store = ManagerStore::new(Arc::new(client));
        let dto = CreateManagerDto {
            name: "Mara".into(),
            email: "mara@siclo.com".into(),
            password: "s3cret".into(),
            role: UserRole::Manager,
            branch_id: Some("2".into()),
        };
        let created = store.create(&dto).await.unwrap().unwrap();

        assert_eq!(created.branch_id.as_deref(), Some("2"));
        assert_eq!(mock.count(Method::POST, "/auth/register"), 1);
        assert_eq!(mock.count(Method::POST, "/auth/users"), 0);
        assert_eq!(mock.count(Method::GET, "/auth/users"), 1);
    }

    #[tokio::test]
    async fn test_delete_uses_users_path() {
        let (client, mock) = client();
        mock.on(Method::DELETE, "/auth/users/3", 200, json!({"success": true}));
        mock.on(
            Method::GET,
            "/auth/users",
            200,
            json!({"data": [], "page": 1, "limit": 10, "total": 0, "totalPages": 0}),
        );

        let store = ManagerStore::new(Arc::new(client));
        store.delete("3").await.unwrap();
        assert_eq!(mock.count(Method::DELETE, "/auth/users/3"), 1);
    }
}
