//! Раскладка контейнеров на плите и сводная статистика проекта.

use serde::{Deserialize, Serialize};

use crate::{Container, ContainerDimensions, SlabDimensions};

/// Толщина плиты (фут)
pub const SLAB_THICKNESS: f64 = 0.5;

/// Высота центра плиты: верх плиты под дном контейнера
pub const SLAB_CENTER_Y: f64 = -4.5;

/// Геометрия плиты для рендерера
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabGeometry {
    pub center: [f64; 3],
    /// Размер бокса [ширина, толщина, глубина]
    pub size: [f64; 3],
}

impl SlabGeometry {
    pub fn from_dimensions(slab: &SlabDimensions) -> Self {
        Self {
            center: [0.0, SLAB_CENTER_Y, 0.0],
            size: [slab.width, SLAB_THICKNESS, slab.depth],
        }
    }
}

/// Прямоугольник в плоскости XZ
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Footprint {
    /// Пятно контейнера на плите
    pub fn of_container(position: [f64; 3], dims: &ContainerDimensions) -> Self {
        let [x, _, z] = position;
        Self {
            min: [x - dims.half_width(), z - dims.half_depth()],
            max: [x + dims.half_width(), z + dims.half_depth()],
        }
    }

    /// Пятно плиты (центрирована в начале координат)
    pub fn of_slab(slab: &SlabDimensions) -> Self {
        Self {
            min: [-slab.width / 2.0, -slab.depth / 2.0],
            max: [slab.width / 2.0, slab.depth / 2.0],
        }
    }

    pub fn contains(&self, other: &Footprint) -> bool {
        other.min[0] >= self.min[0]
            && other.min[1] >= self.min[1]
            && other.max[0] <= self.max[0]
            && other.max[1] <= self.max[1]
    }
}

/// Стоит ли контейнер целиком на плите. Только информативно, ничего не запрещает.
pub fn footprint_within_slab(container: &Container, slab: &SlabDimensions) -> bool {
    Footprint::of_slab(slab)
        .contains(&Footprint::of_container(container.position, &ContainerDimensions::STANDARD))
}

/// Сводка для панели статистики
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignStats {
    pub container_count: usize,
    pub opening_count: usize,
    /// Суммарная площадь пола контейнеров (кв. фут)
    pub total_floor_area: f64,
    pub slab_area: f64,
}

impl DesignStats {
    pub fn compute(containers: &[Container], slab: &SlabDimensions) -> Self {
        let floor = ContainerDimensions::STANDARD.floor_area();
        Self {
            container_count: containers.len(),
            opening_count: containers.iter().map(|c| c.openings.len()).sum(),
            total_floor_area: containers.len() as f64 * floor,
            slab_area: slab.area(),
        }
    }
}
