use wasm_bindgen::prelude::*;

use shared::layout::SlabGeometry;
use shared::validation::{clamp_offset, validate_document};
use shared::{
    default_catalog, opening_placement_str, ContainerDimensions, CreateDesignRequest, DesignStats,
    SlabDimensions, Wall,
};

fn to_js(e: impl std::fmt::Display) -> JsError {
    JsError::new(&e.to_string())
}

fn placement_json(wall: &str, offset: f64) -> Result<String, String> {
    let placement = opening_placement_str(wall, offset, &ContainerDimensions::STANDARD)
        .map_err(|e| e.to_string())?;
    let info = serde_json::json!({
        "position": placement.position,
        "rotation": placement.rotation(),
    });
    Ok(info.to_string())
}

fn stats_json(design_json: &str) -> Result<String, String> {
    let design: CreateDesignRequest = serde_json::from_str(design_json).map_err(|e| e.to_string())?;
    let slab = design.slab_dimensions;
    let stats = DesignStats::compute(&design.containers, &slab);
    serde_json::to_string(&stats).map_err(|e| e.to_string())
}

fn check_design(design_json: &str) -> Result<(), String> {
    let design: CreateDesignRequest = serde_json::from_str(design_json).map_err(|e| e.to_string())?;
    let name = design.name.unwrap_or_default();
    let slab = design.slab_dimensions;
    validate_document(&name, &design.containers, &slab).map_err(|e| e.to_string())
}

/// Локальная позиция и поворот проёма на стене контейнера (JSON)
#[wasm_bindgen]
pub fn opening_placement_json(wall: &str, offset: f64) -> Result<String, JsError> {
    placement_json(wall, offset).map_err(to_js)
}

/// Матрица 4x4 (по столбцам) для размещения меша проёма
#[wasm_bindgen]
pub fn opening_transform(wall: &str, offset: f64) -> Result<js_sys::Float64Array, JsError> {
    let placement =
        opening_placement_str(wall, offset, &ContainerDimensions::STANDARD).map_err(to_js)?;
    let cols = placement.to_matrix().to_cols_array();
    Ok(js_sys::Float64Array::from(&cols[..]))
}

/// Ограничивает смещение так, чтобы проём остался на стене
#[wasm_bindgen]
pub fn clamp_opening_offset(wall: &str, offset: f64, opening_width: f64) -> Result<f64, JsError> {
    let wall: Wall = wall.parse().map_err(to_js)?;
    Ok(clamp_offset(wall, offset, opening_width, &ContainerDimensions::STANDARD))
}

/// Каталог типов окон и дверей
#[wasm_bindgen]
pub fn opening_catalog_json() -> String {
    serde_json::to_string(&default_catalog()).unwrap_or_else(|_| "[]".to_string())
}

/// Бокс фундаментной плиты: центр и размер
#[wasm_bindgen]
pub fn slab_geometry_json(width: f64, depth: f64) -> String {
    let geometry = SlabGeometry::from_dimensions(&SlabDimensions { width, depth });
    serde_json::json!({ "center": geometry.center, "size": geometry.size }).to_string()
}

/// Сводка по проекту: число контейнеров, проёмов, площади
#[wasm_bindgen]
pub fn design_stats_json(design_json: &str) -> Result<String, JsError> {
    stats_json(design_json).map_err(to_js)
}

/// Проверка проекта перед сохранением; ошибка также пишется в консоль
#[wasm_bindgen]
pub fn validate_design(design_json: &str) -> Result<(), JsError> {
    check_design(design_json).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e));
        to_js(e)
    })
}
