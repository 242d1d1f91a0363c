//! Display helpers for containers and openings

use serde::Serialize;
use shared::{find_opening_type, Container, Opening, OpeningCategory, OpeningType};

/// Colour and transparency handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Appearance {
    pub color: &'static str,
    pub opacity: f32,
}

impl Appearance {
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0
    }
}

const GLAZED_OPACITY: f32 = 0.6;
const FALLBACK_COLOR: &str = "#cccccc";

/// Get display name for a container
pub fn container_display_name(index: usize, container: &Container) -> String {
    format!("Container {} ({})", index + 1, short_id(&container.id))
}

/// Catalog name and wall, e.g. "Fixed Window - back"
pub fn opening_display_name(catalog: &[OpeningType], opening: &Opening) -> String {
    let name = find_opening_type(catalog, &opening.type_id)
        .map(|t| t.name.as_str())
        .unwrap_or(opening.type_id.as_str());
    format!("{} - {}", name, opening.wall)
}

/// Appearance of a catalog entry, from its category and glazing
pub fn type_appearance(kind: &OpeningType) -> Appearance {
    let color = match (kind.category, kind.glazed) {
        (OpeningCategory::Window, _) => "#add8e6",
        (OpeningCategory::Door, true) => "#87ceeb",
        (OpeningCategory::Door, false) => "#8b4513",
    };
    let opacity = if kind.glazed { GLAZED_OPACITY } else { 1.0 };
    Appearance { color, opacity }
}

/// Appearance of a placed opening. Types missing from the catalog get the fallback grey.
pub fn opening_appearance(catalog: &[OpeningType], opening: &Opening) -> Appearance {
    find_opening_type(catalog, &opening.type_id)
        .map(type_appearance)
        .unwrap_or(Appearance {
            color: FALLBACK_COLOR,
            opacity: 1.0,
        })
}

/// Container body colour
pub fn container_color(selected: bool) -> &'static str {
    if selected {
        "#4a90e2"
    } else {
        "#c45911"
    }
}

/// Get shortened ID: prefix plus the first 8 characters of the unique part
pub fn short_id(id: &str) -> &str {
    let start = id.find('-').map(|i| i + 1).unwrap_or(0);
    let end = id
        .char_indices()
        .nth(start + 8)
        .map(|(i, _)| i)
        .unwrap_or(id.len());
    &id[..end]
}
