//! Design state management
//!
//! A single owned `DesignState` holds the active design. Every action is a
//! method on it; there is no global store.

mod container_ops;
mod design_ops;
pub mod display;
mod opening_ops;
pub mod persistence;

pub use display::{container_display_name, opening_appearance, opening_display_name, short_id, Appearance};

use shared::{
    default_catalog, find_opening_type, Container, ContainerId, DesignStats, OpeningType,
    SlabDimensions, DEFAULT_DESIGN_NAME,
};

/// Editable state of the active design
#[derive(Debug, Clone)]
pub struct DesignState {
    pub(crate) containers: Vec<Container>,
    /// At most one container is selected
    pub(crate) selected_container: Option<ContainerId>,
    pub(crate) opening_types: Vec<OpeningType>,
    /// Type used for the next placement, independent of container selection
    pub(crate) selected_opening_type: Option<String>,
    pub(crate) slab_dimensions: SlabDimensions,
    pub(crate) current_design_name: String,
    /// Monotonically increasing version counter for render cache invalidation
    pub(crate) version: u64,
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
            selected_container: None,
            opening_types: default_catalog(),
            selected_opening_type: None,
            slab_dimensions: SlabDimensions::default(),
            current_design_name: DEFAULT_DESIGN_NAME.to_string(),
            version: 0,
        }
    }
}

impl DesignState {
    /// Current state version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    /// Get a container by ID
    pub fn container(&self, id: &str) -> Option<&Container> {
        self.containers.iter().find(|c| c.id == id)
    }

    pub(crate) fn container_mut(&mut self, id: &str) -> Option<&mut Container> {
        self.containers.iter_mut().find(|c| c.id == id)
    }

    pub fn selected_container(&self) -> Option<&str> {
        self.selected_container.as_deref()
    }

    /// The selected container itself
    pub fn selected_container_data(&self) -> Option<&Container> {
        self.container(self.selected_container.as_deref()?)
    }

    /// Opening type catalog
    pub fn opening_types(&self) -> &[OpeningType] {
        &self.opening_types
    }

    pub fn opening_type(&self, id: &str) -> Option<&OpeningType> {
        find_opening_type(&self.opening_types, id)
    }

    pub fn selected_opening_type(&self) -> Option<&str> {
        self.selected_opening_type.as_deref()
    }

    pub fn selected_opening_type_data(&self) -> Option<&OpeningType> {
        self.opening_type(self.selected_opening_type.as_deref()?)
    }

    pub fn slab_dimensions(&self) -> SlabDimensions {
        self.slab_dimensions
    }

    pub fn current_design_name(&self) -> &str {
        &self.current_design_name
    }

    /// Container count, floor area and slab area
    pub fn stats(&self) -> DesignStats {
        DesignStats::compute(&self.containers, &self.slab_dimensions)
    }

    pub(crate) fn notify_mutated(&mut self) {
        self.version += 1;
    }
}

/// Fresh collision-resistant id with a readable prefix
pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
