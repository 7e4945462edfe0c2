use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid year-month value: {0}")]
    InvalidYearMonth(String),
    #[error("month out of range (1-12): {0}")]
    InvalidMonth(u32),
    #[error("filter label must not be empty")]
    EmptyLabel,
    #[error("filter '{label}': default option '{option}' is not an available option")]
    UnknownDefaultOption { label: String, option: String },
    #[error("filter '{label}': slider min {min} exceeds max {max}")]
    InvalidSliderBounds { label: String, min: f64, max: f64 },
    #[error("filter '{label}': slider bounds must be finite, got {min} to {max}")]
    NonFiniteSliderBound { label: String, min: f64, max: f64 },
        #[error("filter '{label}': accessor has no fields")]
    EmptyAccessor { label: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
