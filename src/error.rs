use thiserror::Error;

/// Rejected engine input. Messages are shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidArgument {
    #[error(
        "Invalid urgency profile: '{0}'. Must be one of: standard, expedite, fixed-date, intangible"
    )]
    UnknownUrgencyProfile(String),

    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },

    #[error("{field} must be non-negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("{field} must be at most {max} (got {value})")]
    TooLarge {
        field: &'static str,
        max: f64,
        value: f64,
    },

    #[error("developmentWeeks must be greater than zero")]
    ZeroDevelopmentWeeks,
}
