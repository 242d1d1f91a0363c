//! Factory functions for creating test data.
//!
//! Provides helpers to construct `Container`, `Opening` and `Design` values
//! used in tests and by the stub API server in integration tests.

use chrono::{TimeZone, Utc};
use shared::*;

/// Create an opening from a catalog type id with catalog dimensions.
pub fn opening(id: &str, type_id: &str, wall: Wall, offset: f64) -> Opening {
    let catalog = default_catalog();
    let (width, height) = find_opening_type(&catalog, type_id)
        .map(|t| (t.width, t.height))
        .unwrap_or((1.0, 1.0));
    Opening {
        id: id.to_string(),
        type_id: type_id.to_string(),
        wall,
        offset,
        width,
        height,
    }
}

/// Create a container at a position with no openings.
pub fn container_at(id: &str, position: [f64; 3]) -> Container {
    Container {
        id: id.to_string(),
        position,
        openings: Vec::new(),
    }
}

/// Two stacked containers, the lower one with a door and a window.
pub fn two_storey_containers() -> Vec<Container> {
    let mut lower = container_at("container-lower", [0.0, 0.0, 0.0]);
    lower.openings = vec![
        opening("wd-door", "entry-door", Wall::Front, 0.0),
        opening("wd-window", "fixed-window", Wall::Back, -3.0),
    ];
    let mut upper = container_at("container-upper", [0.0, 8.5, 0.0]);
    upper.openings = vec![opening("wd-slider", "sliding-glass", Wall::Right, 1.0)];
    vec![lower, upper]
}

/// A named design snapshot with a fixed timestamp.
pub fn sample_design(name: &str) -> Design {
    Design {
        name: name.to_string(),
        containers: two_storey_containers(),
        slab_dimensions: SlabDimensions {
            width: 50.0,
            depth: 30.0,
        },
        created_at: Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).single().unwrap_or_default(),
    }
}

/// Store a design under an id, as the API would return it.
pub fn stored(id: &str, design: &Design) -> StoredDesign {
    StoredDesign {
        id: id.to_string(),
        name: design.name.clone(),
        containers: design.containers.clone(),
        slab_dimensions: design.slab_dimensions,
        created_at: design.created_at,
        updated_at: design.created_at,
    }
}
