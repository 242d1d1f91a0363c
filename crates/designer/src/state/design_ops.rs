//! Whole-design operations: slab, load, clear, snapshot

use chrono::Utc;
use shared::{Design, SlabDimensions};

use super::DesignState;

impl DesignState {
    /// Replace slab dimensions. Values are stored as given; clamping is done on input.
    pub fn update_slab_dimensions(&mut self, dims: SlabDimensions) {
        self.slab_dimensions = dims;
        self.notify_mutated();
    }

    pub fn set_current_design_name(&mut self, name: impl Into<String>) {
        self.current_design_name = name.into();
        self.notify_mutated();
    }

    /// Replace containers, slab and name wholesale. Clears both selections.
    pub fn load_design(&mut self, design: &Design) {
        self.containers = design.containers.clone();
        self.slab_dimensions = design.slab_dimensions;
        self.current_design_name = design.name.clone();
        self.selected_container = None;
        self.selected_opening_type = None;
        self.notify_mutated();
        tracing::info!(
            name = %design.name,
            containers = design.containers.len(),
            "design loaded"
        );
    }

    /// Reset to an empty design
    pub fn clear_design(&mut self) {
        let version = self.version;
        *self = DesignState::default();
        self.version = version + 1;
    }

    /// Snapshot of the current state with a fresh timestamp
    pub fn get_current_design(&self) -> Design {
        Design {
            name: self.current_design_name.clone(),
            containers: self.containers.clone(),
            slab_dimensions: self.slab_dimensions,
            created_at: Utc::now(),
        }
    }
}
