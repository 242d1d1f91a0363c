//! JSON command protocol for driving the designer headlessly.
//!
//! One command per JSON object, tagged by `command`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::layout::{footprint_within_slab, SlabGeometry};
use shared::{opening_world_position, DesignError, Wall};

use crate::session::Session;
use crate::state::display::container_color;
use crate::state::{container_display_name, opening_appearance, opening_display_name};

/// A command the designer can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum AgentCommand {
    /// Add a container at the origin
    AddContainer,
    /// Remove a container (defaults to the selected one)
    RemoveContainer {
        #[serde(default)]
        id: Option<String>,
    },
    /// Move a container (defaults to the selected one)
    MoveContainer {
        #[serde(default)]
        id: Option<String>,
        position: [f64; 3],
    },
    /// Select a container, or clear the selection with `null`
    SelectContainer {
        #[serde(default)]
        id: Option<String>,
    },
    /// Choose the opening type for the next placement
    SelectOpeningType {
        #[serde(default)]
        type_id: Option<String>,
    },
    /// Place the selected type on the selected container
    PlaceOpening {
        wall: String,
        #[serde(default)]
        offset: f64,
    },
    RemoveOpening {
        container_id: String,
        opening_id: String,
    },
    /// Resize the slab (clamped to 20..=100 ft per side)
    SetSlab {
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        depth: Option<f64>,
    },
    Rename {
        name: String,
    },
    /// Reset to an empty design
    Clear,
    /// Summary of the whole design
    Inspect,
    /// Render data for one container's openings
    Placements {
        container_id: String,
    },
    /// Write the design as a standalone JSON file
    Export {
        #[serde(default)]
        dir: Option<PathBuf>,
    },
    Import {
        path: PathBuf,
    },
    /// Save as a new document via the API
    Save {
        name: String,
    },
    /// Overwrite an existing document via the API
    Update {
        id: String,
    },
    Load {
        id: String,
    },
    ListDesigns,
    DeleteDesign {
        id: String,
    },
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl From<DesignError> for CommandResponse {
    fn from(err: DesignError) -> Self {
        CommandResponse::err(err.to_string())
    }
}

fn target_container(session: &Session, id: Option<String>) -> Result<String, DesignError> {
    id.or_else(|| session.state.selected_container().map(str::to_string))
        .ok_or_else(|| DesignError::validation("no container given and none selected"))
}

/// Execute a single command on the session.
pub async fn execute_command(session: &mut Session, cmd: AgentCommand) -> CommandResponse {
    match cmd {
        AgentCommand::AddContainer => {
            let id = session.state.add_container();
            CommandResponse::ok_with_data(json!({ "id": id }))
        }

        AgentCommand::RemoveContainer { id } => match target_container(session, id) {
            Ok(id) => {
                let removed = session.state.remove_container(&id);
                CommandResponse::ok_with_data(json!({ "removed": removed }))
            }
            Err(e) => e.into(),
        },

        AgentCommand::MoveContainer { id, position } => match target_container(session, id) {
            Ok(id) => {
                if session.state.update_container_position(&id, position) {
                    CommandResponse::ok_with_data(json!({ "id": id, "position": position }))
                } else {
                    DesignError::NotFound(id).into()
                }
            }
            Err(e) => e.into(),
        },

        AgentCommand::SelectContainer { id } => {
            if session.state.select_container(id.as_deref()) {
                CommandResponse::ok_with_data(json!({ "selected": id }))
            } else {
                DesignError::NotFound(id.unwrap_or_default()).into()
            }
        }

        AgentCommand::SelectOpeningType { type_id } => {
            if session.state.select_opening_type(type_id.as_deref()) {
                CommandResponse::ok_with_data(json!({ "selected": type_id }))
            } else {
                DesignError::validation(format!(
                    "unknown opening type '{}'",
                    type_id.unwrap_or_default()
                ))
                .into()
            }
        }

        AgentCommand::PlaceOpening { wall, offset } => {
            let wall: Wall = match wall.parse() {
                Ok(w) => w,
                Err(e) => return CommandResponse::err(e.to_string()),
            };
            match session.place_opening(wall, offset) {
                Ok(id) => CommandResponse::ok_with_data(json!({ "id": id })),
                Err(e) => e.into(),
            }
        }

        AgentCommand::RemoveOpening {
            container_id,
            opening_id,
        } => {
            let removed = session.state.remove_window_door(&container_id, &opening_id);
            CommandResponse::ok_with_data(json!({ "removed": removed }))
        }

        AgentCommand::SetSlab { width, depth } => {
            let dims = session.set_slab(width, depth);
            CommandResponse::ok_with_data(json!({ "slabDimensions": dims }))
        }

        AgentCommand::Rename { name } => {
            session.state.set_current_design_name(name);
            CommandResponse::ok()
        }

        AgentCommand::Clear => {
            session.state.clear_design();
            CommandResponse::ok()
        }

        AgentCommand::Inspect => CommandResponse::ok_with_data(inspect(session)),

        AgentCommand::Placements { container_id } => {
            let state = &session.state;
            let Some(container) = state.container(&container_id) else {
                return DesignError::NotFound(container_id).into();
            };
            let items: Vec<serde_json::Value> = state
                .opening_placements(&container_id)
                .into_iter()
                .zip(&container.openings)
                .map(|((id, placement), opening)| {
                    json!({
                        "id": id,
                        "position": placement.position,
                        "rotation": placement.rotation(),
                        "worldPosition": opening_world_position(container, opening),
                        "size": [opening.width, opening.height],
                        "appearance": opening_appearance(state.opening_types(), opening),
                    })
                })
                .collect();
            CommandResponse::ok_with_data(json!({ "containerId": container_id, "openings": items }))
        }

        AgentCommand::Export { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            match session.state.export_to_dir(Path::new(&dir)) {
                Ok(path) => CommandResponse::ok_with_data(json!({ "path": path })),
                Err(e) => CommandResponse::err(e.to_string()),
            }
        }

        AgentCommand::Import { path } => match session.state.import_from_file(&path) {
            Ok(()) => CommandResponse::ok(),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        AgentCommand::Save { name } => match session.save_design(&name).await {
            Ok(stored) => CommandResponse::ok_with_data(json!({ "id": stored.id, "name": stored.name })),
            Err(e) => e.into(),
        },

        AgentCommand::Update { id } => match session.update_design(&id).await {
            Ok(stored) => CommandResponse::ok_with_data(json!({ "id": stored.id, "updatedAt": stored.updated_at })),
            Err(e) => e.into(),
        },

        AgentCommand::Load { id } => match session.load_design(&id).await {
            Ok(()) => CommandResponse::ok_with_data(json!({ "name": session.state.current_design_name() })),
            Err(e) => e.into(),
        },

        AgentCommand::ListDesigns => match session.refresh_designs().await {
            Ok(designs) => {
                let items: Vec<serde_json::Value> = designs
                    .iter()
                    .map(|d| {
                        json!({
                            "id": d.id,
                            "name": d.name,
                            "containerCount": d.containers.len(),
                            "createdAt": d.created_at,
                        })
                    })
                    .collect();
                CommandResponse::ok_with_data(json!({ "designs": items }))
            }
            Err(e) => e.into(),
        },

        AgentCommand::DeleteDesign { id } => match session.delete_design(&id).await {
            Ok(()) => CommandResponse::ok(),
            Err(e) => e.into(),
        },
    }
}

fn inspect(session: &Session) -> serde_json::Value {
    let state = &session.state;
    let slab = state.slab_dimensions();
    let containers: Vec<serde_json::Value> = state
        .containers()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let openings: Vec<serde_json::Value> = c
                .openings
                .iter()
                .map(|o| {
                    json!({
                        "id": o.id,
                        "label": opening_display_name(state.opening_types(), o),
                        "wall": o.wall,
                        "offset": o.offset,
                    })
                })
                .collect();
            json!({
                "id": c.id,
                "label": container_display_name(i, c),
                "position": c.position,
                "color": container_color(state.selected_container() == Some(c.id.as_str())),
                "onSlab": footprint_within_slab(c, &slab),
                "openings": openings,
            })
        })
        .collect();

    json!({
        "name": state.current_design_name(),
        "slabDimensions": slab,
        "slab": SlabGeometry::from_dimensions(&slab),
        "selectedContainer": state.selected_container(),
        "selectedOpeningType": state.selected_opening_type(),
        "stats": state.stats(),
        "containers": containers,
    })
}

/// Parse and execute a single JSON command string.
pub async fn execute_json(session: &mut Session, json: &str) -> Result<CommandResponse, String> {
    let cmd: AgentCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(session, cmd).await)
}
