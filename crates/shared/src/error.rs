use thiserror::Error;

/// Ошибки уровня пользовательского действия.
///
/// Ни одна из них не фатальна: вызывающий код показывает сообщение и
/// оставляет состояние редактора как было.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    /// Не заполнено обязательное поле или значение вне диапазона
    #[error("Validation error: {0}")]
    Validation(String),
    /// Проект с таким ID не найден
    #[error("Design not found: {0}")]
    NotFound(String),
    /// Хранилище недоступно
    #[error("Transport error: {0}")]
    Transport(String),
}

impl DesignError {
    pub fn validation(msg: impl Into<String>) -> Self {
        DesignError::Validation(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DesignError::NotFound(_))
    }
}

/// Ошибки геометрии размещения
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    #[error("Invalid wall '{0}': expected one of front, back, left, right")]
    InvalidWall(String),
}
