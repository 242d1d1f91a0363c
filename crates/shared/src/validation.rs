//! Проверка и ограничение пользовательского ввода.
//!
//! Хранилище состояния ничего не ограничивает само: ограничения применяются
//! на входе (команды, UI) и на сервере при сохранении.

use crate::placement::wall_half_extent;
use crate::{Container, ContainerDimensions, DesignError, SlabDimensions, Wall};

/// Допустимый диапазон каждой стороны плиты (фут)
pub const SLAB_RANGE: (f64, f64) = (20.0, 100.0);

/// Имя проекта обязательно
pub fn validate_design_name(name: &str) -> Result<(), DesignError> {
    if name.trim().is_empty() {
        return Err(DesignError::validation("design name is required"));
    }
    Ok(())
}

/// Ограничить размеры плиты диапазоном [20, 100]
pub fn clamp_slab_dimensions(dims: SlabDimensions) -> SlabDimensions {
    let (min, max) = SLAB_RANGE;
    SlabDimensions {
        width: dims.width.clamp(min, max),
        depth: dims.depth.clamp(min, max),
    }
}

/// Максимальное |offset|, при котором проём шириной `opening_width` целиком на стене
pub fn offset_limit(wall: Wall, opening_width: f64, dims: &ContainerDimensions) -> f64 {
    (wall_half_extent(wall, dims) - opening_width / 2.0).max(0.0)
}

/// Ограничить смещение по длине конкретной стены
pub fn clamp_offset(wall: Wall, offset: f64, opening_width: f64, dims: &ContainerDimensions) -> f64 {
    let limit = offset_limit(wall, opening_width, dims);
    offset.clamp(-limit, limit)
}

fn check_positive(value: f64, what: &str) -> Result<(), DesignError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DesignError::Validation(format!(
            "{what} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

/// Проверка документа перед сохранением на сервере
pub fn validate_document(
    name: &str,
    containers: &[Container],
    slab: &SlabDimensions,
) -> Result<(), DesignError> {
    validate_design_name(name)?;
    check_positive(slab.width, "slab width")?;
    check_positive(slab.depth, "slab depth")?;

    for container in containers {
        if container.id.is_empty() {
            return Err(DesignError::validation("container id is required"));
        }
        if container.position.iter().any(|v| !v.is_finite()) {
            return Err(DesignError::Validation(format!(
                "container '{}' has a non-finite position",
                container.id
            )));
        }
        for opening in &container.openings {
            check_positive(opening.width, "opening width")?;
            check_positive(opening.height, "opening height")?;
            if !opening.offset.is_finite() {
                return Err(DesignError::Validation(format!(
                    "opening '{}' has a non-finite offset",
                    opening.id
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DIMS: ContainerDimensions = ContainerDimensions::STANDARD;

    #[test]
    fn test_design_name_required() {
        assert!(validate_design_name("Cabin").is_ok());
        assert!(matches!(validate_design_name(""), Err(DesignError::Validation(_))));
        assert!(matches!(validate_design_name("   \t"), Err(DesignError::Validation(_))));
    }

    #[test]
    fn test_clamp_slab() {
        let c = clamp_slab_dimensions(SlabDimensions { width: 150.0, depth: 20.0 });
        assert_eq!(c, SlabDimensions { width: 100.0, depth: 20.0 });

        let c = clamp_slab_dimensions(SlabDimensions { width: 5.0, depth: 55.0 });
        assert_eq!(c, SlabDimensions { width: 20.0, depth: 55.0 });
    }

    #[test]
    fn test_offset_limit_per_wall() {
        // дверь 3 фута на длинной стене: 10 - 1.5
        assert_abs_diff_eq!(offset_limit(Wall::Front, 3.0, &DIMS), 8.5);
        // окно 4 фута на торце: 4 - 2
        assert_abs_diff_eq!(offset_limit(Wall::Left, 4.0, &DIMS), 2.0);
        // шире стены: допустим только центр
        assert_abs_diff_eq!(offset_limit(Wall::Right, 12.0, &DIMS), 0.0);
    }

    #[test]
    fn test_clamp_offset() {
        assert_abs_diff_eq!(clamp_offset(Wall::Back, 9.0, 3.0, &DIMS), 8.5);
        assert_abs_diff_eq!(clamp_offset(Wall::Back, -9.0, 3.0, &DIMS), -8.5);
        assert_abs_diff_eq!(clamp_offset(Wall::Right, 7.0, 3.0, &DIMS), 2.5);
        assert_abs_diff_eq!(clamp_offset(Wall::Front, 1.0, 3.0, &DIMS), 1.0);
    }

    #[test]
    fn test_validate_document() {
        let slab = SlabDimensions::default();
        assert!(validate_document("A", &[], &slab).is_ok());
        assert!(validate_document("", &[], &slab).is_err());
        assert!(validate_document("A", &[], &SlabDimensions { width: 0.0, depth: 20.0 }).is_err());

        let mut c = Container::new("c".to_string());
        c.openings.push(
            crate::default_catalog()[2]
                .spec(Wall::Front, 0.0)
                .into_opening("wd".to_string()),
        );
        assert!(validate_document("A", &[c.clone()], &slab).is_ok());

        c.openings[0].width = -1.0;
        assert!(validate_document("A", &[c.clone()], &slab).is_err());

        c.openings[0].width = 3.0;
        c.position[1] = f64::INFINITY;
        assert!(validate_document("A", &[c], &slab).is_err());
    }
}
