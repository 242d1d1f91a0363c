//! Editor session: design state plus the optional persistence API.
//!
//! Mirrors what the control panel does around the store: input clamping,
//! "select first" checks, save/load round-trips. Every failing call leaves
//! `state` exactly as it was.

use shared::validation::{clamp_offset, clamp_slab_dimensions, validate_design_name};
use shared::{ContainerDimensions, DesignError, DesignPatch, OpeningId, SlabDimensions, StoredDesign, Wall};

use crate::client::DesignClient;
use crate::state::DesignState;

#[derive(Default)]
pub struct Session {
    pub state: DesignState,
    client: Option<DesignClient>,
    /// Last fetched list of saved designs
    designs: Vec<StoredDesign>,
}

impl Session {
    /// Session without a persistence API (local editing and file export only)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: DesignClient) -> Self {
        Self {
            client: Some(client),
            ..Self::default()
        }
    }

    fn client(&self) -> Result<&DesignClient, DesignError> {
        self.client
            .as_ref()
            .ok_or_else(|| DesignError::Transport("persistence API is not configured".into()))
    }

    /// Saved designs from the last `refresh_designs`
    pub fn designs(&self) -> &[StoredDesign] {
        &self.designs
    }

    // ── Local editing ─────────────────────────────────────────

    /// Place the selected opening type on the selected container.
    ///
    /// The offset is clamped so the opening stays on the chosen wall.
    pub fn place_opening(&mut self, wall: Wall, offset: f64) -> Result<OpeningId, DesignError> {
        let (container_id, kind) = match (
            self.state.selected_container_data(),
            self.state.selected_opening_type_data(),
        ) {
            (Some(c), Some(t)) => (c.id.clone(), t.clone()),
            _ => {
                return Err(DesignError::validation(
                    "select a container and a window/door type first",
                ))
            }
        };

        let offset = clamp_offset(wall, offset, kind.width, &ContainerDimensions::STANDARD);
        self.state
            .add_window_door(&container_id, kind.spec(wall, offset))
            .ok_or_else(|| DesignError::NotFound(container_id))
    }

    /// Update one or both slab sides, clamped to the allowed range
    pub fn set_slab(&mut self, width: Option<f64>, depth: Option<f64>) -> SlabDimensions {
        let current = self.state.slab_dimensions();
        let dims = clamp_slab_dimensions(SlabDimensions {
            width: width.unwrap_or(current.width),
            depth: depth.unwrap_or(current.depth),
        });
        self.state.update_slab_dimensions(dims);
        dims
    }

    // ── Persistence ───────────────────────────────────────────

    /// Save the current design as a new document under `name`
    pub async fn save_design(&mut self, name: &str) -> Result<StoredDesign, DesignError> {
        validate_design_name(name)?;

        let mut design = self.state.get_current_design();
        design.name = name.trim().to_string();

        let stored = self.client()?.create(&design).await.inspect_err(|e| {
            tracing::warn!("Failed to save design: {e}");
        })?;

        self.state.set_current_design_name(stored.name.clone());
        tracing::info!(id = %stored.id, name = %stored.name, "design saved");

        if let Err(e) = self.refresh_designs().await {
            tracing::warn!("Failed to refresh design list: {e}");
        }
        Ok(stored)
    }

    /// Overwrite an existing document with the current design
    pub async fn update_design(&mut self, id: &str) -> Result<StoredDesign, DesignError> {
        let design = self.state.get_current_design();
        let patch = DesignPatch {
            name: Some(design.name),
            containers: Some(design.containers),
            slab_dimensions: Some(design.slab_dimensions),
        };
        let stored = self.client()?.update(id, &patch).await.inspect_err(|e| {
            tracing::warn!(id = %id, "Failed to update design: {e}");
        })?;

        if let Some(cached) = self.designs.iter_mut().find(|d| d.id == stored.id) {
            *cached = stored.clone();
        }
        Ok(stored)
    }

    /// Fetch a saved design and make it the active one
    pub async fn load_design(&mut self, id: &str) -> Result<(), DesignError> {
        let stored = self.client()?.get(id).await.inspect_err(|e| {
            tracing::warn!(id = %id, "Failed to load design: {e}");
        })?;
        self.state.load_design(&stored.to_design());
        Ok(())
    }

    pub async fn refresh_designs(&mut self) -> Result<&[StoredDesign], DesignError> {
        let designs = self.client()?.list().await?;
        self.designs = designs;
        Ok(&self.designs)
    }

    pub async fn delete_design(&mut self, id: &str) -> Result<(), DesignError> {
        self.client()?.delete(id).await?;
        self.designs.retain(|d| d.id != id);
        Ok(())
    }
}
