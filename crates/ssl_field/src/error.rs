use thiserror::Error;

#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Extra distance {extra} is smaller than the negative defense radius")]
    NegativeDefenseRadius { extra: f64 },

    #[error("Way {way} is out of bounds for extra distance {extra}")]
    WayOutOfRange { way: f64, extra: f64 },

    #[error("Corridor direction can not be a zero vector")]
    DegenerateCorridor,

    #[error("Field geometry has not been initialized")]
    NotInitialized,

    #[error("Field geometry is already initialized")]
    AlreadyInitialized,
}

impl FieldError {
    /// Errors caused by bad input data rather than a caller bug
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            FieldError::InvalidGeometry(_) | FieldError::Deserialization(_) | FieldError::Yaml(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
