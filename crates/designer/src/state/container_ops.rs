//! Container add/remove/move/select

use shared::{Container, ContainerId};

use super::{new_id, DesignState};

impl DesignState {
    /// Append a new empty container at the origin
    pub fn add_container(&mut self) -> ContainerId {
        let id = new_id("container");
        self.containers.push(Container::new(id.clone()));
        self.notify_mutated();
        tracing::debug!(id = %id, "container added");
        id
    }

    /// Remove a container. Clears the selection if it pointed at it.
    pub fn remove_container(&mut self, id: &str) -> bool {
        let before = self.containers.len();
        self.containers.retain(|c| c.id != id);
        if self.containers.len() == before {
            return false;
        }

        if self.selected_container.as_deref() == Some(id) {
            self.selected_container = None;
        }
        self.notify_mutated();
        tracing::debug!(id = %id, "container removed");
        true
    }

    /// Replace a container's position. No bounds checking.
    pub fn update_container_position(&mut self, id: &str, position: [f64; 3]) -> bool {
        match self.container_mut(id) {
            Some(container) => {
                container.position = position;
                self.notify_mutated();
                true
            }
            None => false,
        }
    }

    /// Set or clear the selection pointer. Unknown ids are ignored.
    pub fn select_container(&mut self, id: Option<&str>) -> bool {
        match id {
            Some(id) if self.container(id).is_none() => false,
            _ => {
                self.selected_container = id.map(str::to_string);
                self.notify_mutated();
                true
            }
        }
    }
}
