use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod error;
pub mod layout;
pub mod placement;
pub mod validation;

pub use catalog::{default_catalog, find_opening_type, OpeningCategory, OpeningType};
pub use error::{DesignError, PlacementError};
pub use layout::{DesignStats, Footprint, SlabGeometry};
pub use placement::{
    opening_placement, opening_placement_str, opening_world_position, ContainerDimensions,
    Placement, Wall, WALL_CLEARANCE,
};

/// Идентификатор контейнера
pub type ContainerId = String;

/// Идентификатор проёма (окна или двери)
pub type OpeningId = String;

/// Идентификатор сохранённого проекта
pub type DesignId = String;

/// Имя нового (ещё не сохранённого) проекта
pub const DEFAULT_DESIGN_NAME: &str = "Untitled Design";

/// Проём в стене контейнера.
///
/// Положение задаётся только в локальной системе стены: `wall` + `offset`
/// от центра стены. Мировые координаты всегда вычисляются, никогда не хранятся.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: OpeningId,
    /// ID типа из каталога
    #[serde(rename = "type")]
    pub type_id: String,
    pub wall: Wall,
    /// Смещение (фут) вдоль основной оси стены от её центра
    pub offset: f64,
    pub width: f64,
    pub height: f64,
}

/// Параметры нового проёма (без ID: его выдаёт хранилище)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningSpec {
    #[serde(rename = "type")]
    pub type_id: String,
    pub wall: Wall,
    #[serde(default)]
    pub offset: f64,
    pub width: f64,
    pub height: f64,
}

impl OpeningSpec {
    /// Превратить спецификацию в проём с заданным ID
    pub fn into_opening(self, id: OpeningId) -> Opening {
        Opening {
            id,
            type_id: self.type_id,
            wall: self.wall,
            offset: self.offset,
            width: self.width,
            height: self.height,
        }
    }
}

/// Контейнерный модуль. Габариты фиксированы (см. `ContainerDimensions::STANDARD`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    pub id: ContainerId,
    /// Позиция центра контейнера (фут)
    pub position: [f64; 3],
    /// Проёмы, принадлежащие контейнеру
    #[serde(rename = "windowsDoors", default)]
    pub openings: Vec<Opening>,
}

impl Container {
    /// Пустой контейнер в начале координат
    pub fn new(id: ContainerId) -> Self {
        Self {
            id,
            position: [0.0, 0.0, 0.0],
            openings: Vec::new(),
        }
    }

    /// Найти проём по ID
    pub fn opening(&self, opening_id: &str) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == opening_id)
    }
}

/// Размеры фундаментной плиты (фут)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabDimensions {
    pub width: f64,
    pub depth: f64,
}

impl SlabDimensions {
    pub const DEFAULT: SlabDimensions = SlabDimensions {
        width: 40.0,
        depth: 20.0,
    };

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}

impl Default for SlabDimensions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Снимок проекта: формат экспорта и результат `get_current_design`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Design {
    pub name: String,
    pub containers: Vec<Container>,
    pub slab_dimensions: SlabDimensions,
    pub created_at: DateTime<Utc>,
}

/// Проект в хранилище документов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDesign {
    pub id: DesignId,
    pub name: String,
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub slab_dimensions: SlabDimensions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDesign {
    /// Создать документ из проверенного запроса
    pub fn new(id: DesignId, name: String, request: CreateDesignRequest, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            containers: request.containers,
            slab_dimensions: request.slab_dimensions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Частичное обновление: заменяются только присутствующие поля
    pub fn apply_patch(&mut self, patch: DesignPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(containers) = patch.containers {
            self.containers = containers;
        }
        if let Some(slab) = patch.slab_dimensions {
            self.slab_dimensions = slab;
        }
        self.updated_at = now;
    }

    /// Снимок для загрузки в редактор
    pub fn to_design(&self) -> Design {
        Design {
            name: self.name.clone(),
            containers: self.containers.clone(),
            slab_dimensions: self.slab_dimensions,
            created_at: self.created_at,
        }
    }
}

/// Тело POST /designs. Лишние поля (например, `createdAt` от клиента) игнорируются.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateDesignRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub slab_dimensions: SlabDimensions,
}

impl From<&Design> for CreateDesignRequest {
    fn from(design: &Design) -> Self {
        Self {
            name: Some(design.name.clone()),
            containers: design.containers.clone(),
            slab_dimensions: design.slab_dimensions,
        }
    }
}

/// Тело PUT /designs/{id}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DesignPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slab_dimensions: Option<SlabDimensions>,
}

impl DesignPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.containers.is_none() && self.slab_dimensions.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_container() -> Container {
        Container {
            id: "container-1".to_string(),
            position: [10.0, 0.0, -4.0],
            openings: vec![Opening {
                id: "wd-1".to_string(),
                type_id: "entry-door".to_string(),
                wall: Wall::Front,
                offset: 2.5,
                width: 3.0,
                height: 6.67,
            }],
        }
    }

    #[test]
    fn test_container_json_shape() {
        let json = serde_json::to_value(sample_container()).unwrap();
        assert_eq!(json["position"], serde_json::json!([10.0, 0.0, -4.0]));
        let wd = &json["windowsDoors"][0];
        assert_eq!(wd["type"], "entry-door");
        assert_eq!(wd["wall"], "front");
        assert_eq!(wd["offset"], 2.5);
        assert!(json.get("openings").is_none());
    }

    #[test]
    fn test_container_missing_openings_defaults_empty() {
        let c: Container =
            serde_json::from_str(r#"{"id":"c","position":[0,0,0]}"#).unwrap();
        assert!(c.openings.is_empty());
    }

    #[test]
    fn test_unknown_wall_rejected() {
        let json = r#"{"id":"wd","type":"entry-door","wall":"roof","offset":0,"width":3,"height":6.67}"#;
        assert!(serde_json::from_str::<Opening>(json).is_err());
    }

    #[test]
    fn test_design_json_keys() {
        let design = Design {
            name: "Cabin".to_string(),
            containers: vec![sample_container()],
            slab_dimensions: SlabDimensions::default(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let json = serde_json::to_value(&design).unwrap();
        assert_eq!(json["slabDimensions"]["width"], 40.0);
        assert_eq!(json["slabDimensions"]["depth"], 20.0);
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");

        let back: Design = serde_json::from_value(json).unwrap();
        assert_eq!(back, design);
    }

    #[test]
    fn test_create_request_ignores_created_at() {
        let json = r#"{"name":"A","containers":[],"slabDimensions":{"width":50,"depth":30},"createdAt":"2024-01-01T00:00:00Z"}"#;
        let req: CreateDesignRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name.as_deref(), Some("A"));
        assert_eq!(req.slab_dimensions, SlabDimensions { width: 50.0, depth: 30.0 });
    }

    #[test]
    fn test_create_request_defaults() {
        let req: CreateDesignRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.containers.is_empty());
        assert_eq!(req.slab_dimensions, SlabDimensions::DEFAULT);
    }

    #[test]
    fn test_apply_patch_replaces_only_present_fields() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let mut stored = StoredDesign::new(
            "d1".to_string(),
            "Before".to_string(),
            CreateDesignRequest {
                name: None,
                containers: vec![sample_container()],
                slab_dimensions: SlabDimensions::default(),
            },
            t0,
        );

        stored.apply_patch(
            DesignPatch {
                name: Some("After".to_string()),
                ..Default::default()
            },
            t1,
        );

        assert_eq!(stored.name, "After");
        assert_eq!(stored.containers.len(), 1);
        assert_eq!(stored.created_at, t0);
        assert_eq!(stored.updated_at, t1);
    }

    #[test]
    fn test_patch_serialization_skips_absent() {
        let patch = DesignPatch {
            slab_dimensions: Some(SlabDimensions { width: 60.0, depth: 20.0 }),
            ..Default::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, r#"{"slabDimensions":{"width":60.0,"depth":20.0}}"#);
        assert!(DesignPatch::default().is_empty());
    }

    #[test]
    fn test_stored_to_design_keeps_created_at() {
        let t0 = Utc.with_ymd_and_hms(2023, 3, 3, 3, 3, 3).unwrap();
        let stored = StoredDesign::new(
            "d".to_string(),
            "N".to_string(),
            CreateDesignRequest::default(),
            t0,
        );
        let design = stored.to_design();
        assert_eq!(design.name, "N");
        assert_eq!(design.created_at, t0);
    }
}
