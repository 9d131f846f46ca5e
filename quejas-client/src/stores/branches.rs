//! Branch store

use quejas_core::{Branch, BranchFilters, CreateBranchDto, UpdateBranchDto};

use crate::store::{Resource, ResourceStore, StoreMessages};

/// `/branches`
pub struct Branches;

impl Resource for Branches {
    type Entity = Branch;
    type Create = CreateBranchDto;
    type Update = UpdateBranchDto;
    type Filters = BranchFilters;
    type Extra = ();

    const NAME: &'static str = "branches";
    const PATH: &'static str = "/branches";
    const MESSAGES: StoreMessages = StoreMessages {
        fetch: "Error al cargar las sucursales",
        fetch_one: "Error al cargar la sucursal",
        create: "Error al crear la sucursal",
        update: "Error al actualizar la sucursal",
        delete: "Error al eliminar la sucursal",
    };
}

pub type BranchStore = ResourceStore<Branches>;

impl ResourceStore<Branches> {
    /// Active branches of the loaded page
    pub fn active_branches(&self) -> Vec<Branch> {
        self.items().into_iter().filter(|b| b.is_active).collect()
    }

    /// Display name for a branch id, if it is on the loaded page
    pub fn branch_name(&self, id: &str) -> Option<String> {
        self.items().into_iter().find(|b| b.id == id).map(|b| b.name)
    }
}
