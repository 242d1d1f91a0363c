//! Геометрия размещения проёмов на стенах контейнера.
//!
//! Все функции чистые: одинаковые входные данные всегда дают одинаковый результат.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use glam::{DMat4, DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::{Container, Opening, PlacementError};

/// Зазор между стеной и проёмом, чтобы проём не «тонул» в стене
pub const WALL_CLEARANCE: f64 = 0.05;

/// Габариты контейнера (фут)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerDimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl ContainerDimensions {
    /// 20-футовый контейнер: одинаков для всех экземпляров
    pub const STANDARD: ContainerDimensions = ContainerDimensions {
        width: 20.0,
        height: 8.5,
        depth: 8.0,
    };

    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }

    pub fn half_depth(&self) -> f64 {
        self.depth / 2.0
    }

    /// Площадь пола (кв. фут)
    pub fn floor_area(&self) -> f64 {
        self.width * self.depth
    }
}

impl Default for ContainerDimensions {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Стена контейнера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wall {
    Front,
    Back,
    Left,
    Right,
}

impl Wall {
    pub const ALL: [Wall; 4] = [Wall::Front, Wall::Back, Wall::Left, Wall::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            Wall::Front => "front",
            Wall::Back => "back",
            Wall::Left => "left",
            Wall::Right => "right",
        }
    }

    /// Длинная стена (вдоль оси X)?
    pub fn is_long_side(&self) -> bool {
        matches!(self, Wall::Front | Wall::Back)
    }
}

impl fmt::Display for Wall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wall {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Wall::Front),
            "back" => Ok(Wall::Back),
            "left" => Ok(Wall::Left),
            "right" => Ok(Wall::Right),
            other => Err(PlacementError::InvalidWall(other.to_string())),
        }
    }
}

/// Локальная трансформация проёма относительно центра контейнера
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub position: [f64; 3],
    /// Поворот вокруг оси Y (радианы)
    pub rotation_y: f64,
}

impl Placement {
    /// Поворот в виде углов Эйлера [x, y, z]
    pub fn rotation(&self) -> [f64; 3] {
        [0.0, self.rotation_y, 0.0]
    }

    /// Матрица для рендерера
    pub fn to_matrix(&self) -> DMat4 {
        DMat4::from_rotation_translation(
            DQuat::from_rotation_y(self.rotation_y),
            DVec3::from_array(self.position),
        )
    }
}

/// Половина длины стены вдоль её основной оси
pub fn wall_half_extent(wall: Wall, dims: &ContainerDimensions) -> f64 {
    if wall.is_long_side() {
        dims.half_width()
    } else {
        dims.half_depth()
    }
}

/// Положение и поворот проёма по стене и смещению.
///
/// `offset` не проверяется на выход за пределы стены.
pub fn opening_placement(wall: Wall, offset: f64, dims: &ContainerDimensions) -> Placement {
    let hw = dims.half_width() + WALL_CLEARANCE;
    let hd = dims.half_depth() + WALL_CLEARANCE;

    match wall {
        Wall::Front => Placement {
            position: [offset, 0.0, hd],
            rotation_y: 0.0,
        },
        Wall::Back => Placement {
            position: [offset, 0.0, -hd],
            rotation_y: PI,
        },
        Wall::Left => Placement {
            position: [-hw, 0.0, offset],
            rotation_y: FRAC_PI_2,
        },
        Wall::Right => Placement {
            position: [hw, 0.0, offset],
            rotation_y: -FRAC_PI_2,
        },
    }
}

/// То же, но стена задана строкой (например, из UI)
pub fn opening_placement_str(
    wall: &str,
    offset: f64,
    dims: &ContainerDimensions,
) -> Result<Placement, PlacementError> {
    let wall: Wall = wall.parse()?;
    Ok(opening_placement(wall, offset, dims))
}

/// Мировая позиция контейнера совпадает с хранимой
pub fn container_world_position(container: &Container) -> [f64; 3] {
    container.position
}

/// Мировая позиция проёма (вычисляется, не хранится)
pub fn opening_world_position(container: &Container, opening: &Opening) -> [f64; 3] {
    let local = opening_placement(opening.wall, opening.offset, &ContainerDimensions::STANDARD);
    (DVec3::from_array(container.position) + DVec3::from_array(local.position)).to_array()
}
