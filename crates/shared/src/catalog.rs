//! Каталог типов окон и дверей.

use serde::{Deserialize, Serialize};

use crate::{OpeningSpec, Wall};

/// Категория проёма
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpeningCategory {
    Window,
    Door,
}

/// Запись каталога. Неизменна во время работы.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningType {
    pub id: String,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub category: OpeningCategory,
    /// Остеклённый (рисуется полупрозрачным)
    #[serde(default)]
    pub glazed: bool,
}

impl OpeningType {
    /// Спецификация нового проёма: размеры копируются из каталога в момент создания
    pub fn spec(&self, wall: Wall, offset: f64) -> OpeningSpec {
        OpeningSpec {
            type_id: self.id.clone(),
            wall,
            offset,
            width: self.width,
            height: self.height,
        }
    }
}

/// Стандартный каталог
pub fn default_catalog() -> Vec<OpeningType> {
    vec![
        OpeningType {
            id: "sliding-glass".to_string(),
            name: "Sliding Glass Door".to_string(),
            width: 3.0,
            height: 6.67,
            category: OpeningCategory::Door,
            glazed: true,
        },
        OpeningType {
            id: "fixed-window".to_string(),
            name: "Fixed Window".to_string(),
            width: 4.0,
            height: 2.0,
            category: OpeningCategory::Window,
            glazed: true,
        },
        OpeningType {
            id: "entry-door".to_string(),
            name: "Insulated Entry Door".to_string(),
            width: 3.0,
            height: 6.67,
            category: OpeningCategory::Door,
            glazed: false,
        },
    ]
}

/// Найти тип по ID
pub fn find_opening_type<'a>(catalog: &'a [OpeningType], id: &str) -> Option<&'a OpeningType> {
    catalog.iter().find(|t| t.id == id)
}
