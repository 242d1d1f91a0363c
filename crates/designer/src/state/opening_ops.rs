//! Window/door placement on container walls

use shared::{opening_placement, ContainerDimensions, OpeningId, OpeningSpec, Placement};

use super::{new_id, DesignState};

impl DesignState {
    /// Append an opening to a container's wall.
    ///
    /// Returns `None` and changes nothing if the container does not exist.
    pub fn add_window_door(&mut self, container_id: &str, spec: OpeningSpec) -> Option<OpeningId> {
        let id = new_id("wd");
        let container = self.container_mut(container_id)?;
        container.openings.push(spec.into_opening(id.clone()));
        self.notify_mutated();
        tracing::debug!(container = %container_id, id = %id, "opening added");
        Some(id)
    }

    /// Remove an opening from one container only
    pub fn remove_window_door(&mut self, container_id: &str, opening_id: &str) -> bool {
        let Some(container) = self.container_mut(container_id) else {
            return false;
        };
        let before = container.openings.len();
        container.openings.retain(|o| o.id != opening_id);
        let removed = container.openings.len() != before;
        if removed {
            self.notify_mutated();
        }
        removed
    }

    /// Set or clear the type used for the next placement. Unknown ids are ignored.
    pub fn select_opening_type(&mut self, type_id: Option<&str>) -> bool {
        match type_id {
            Some(id) if self.opening_type(id).is_none() => false,
            _ => {
                self.selected_opening_type = type_id.map(str::to_string);
                self.notify_mutated();
                true
            }
        }
    }

    /// Local transforms of a container's openings, in list order
    pub fn opening_placements(&self, container_id: &str) -> Vec<(OpeningId, Placement)> {
        self.container(container_id)
            .map(|c| {
                c.openings
                    .iter()
                    .map(|o| {
                        let placement =
                            opening_placement(o.wall, o.offset, &ContainerDimensions::STANDARD);
                        (o.id.clone(), placement)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
