use thiserror::Error;

/// Everything the engine can report. Per-body variants are recovered locally:
/// the affected body is skipped and every other body carries on.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("no ephemeris source for body {body}: {reason}")]
    MissingSource { body: String, reason: String },

    #[error("no sample for body {body} on {date}")]
    DateNotFound { body: String, date: String },

    #[error("window [{start}, {end}] holds no samples for body {body}")]
    EmptyWindow {
        body: String,
        start: String,
        end: String,
    },

    #[error("orbit plane of body {body} is undefined (collinear or missing endpoints)")]
    DegenerateGeometry { body: String },

    #[error("unknown body identifier: {0}")]
    UnknownBody(String),

    #[error("duplicate body identifier in catalog: {0}")]
    DuplicateBody(String),

    #[error("unrecognized date format: {0}")]
    InvalidDate(String),

    #[error("animation duration must be positive and finite, got {0}")]
    InvalidDuration(f32),

    #[error("malformed ephemeris table: {0}")]
    Table(#[from] csv::Error),

    #[error("unable to read ephemeris data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        use EngineError::*;
        match (self, other) {
            (
                MissingSource { body: a, reason: ra },
                MissingSource { body: b, reason: rb },
            ) => a == b && ra == rb,
            (DateNotFound { body: a, date: da }, DateNotFound { body: b, date: db }) => {
                a == b && da == db
            }
            (
                EmptyWindow { body: a, start: sa, end: ea },
                EmptyWindow { body: b, start: sb, end: eb },
            ) => a == b && sa == sb && ea == eb,
            (DegenerateGeometry { body: a }, DegenerateGeometry { body: b }) => a == b,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (DuplicateBody(a), DuplicateBody(b)) => a == b,
            (InvalidDate(a), InvalidDate(b)) => a == b,
            (InvalidDuration(a), InvalidDuration(b)) => a == b,

            // Wrapped library errors only compare by variant.
            (Table(_), Table(_)) => true,
            (Io(_), Io(_)) => true,
            (Config(_), Config(_)) => true,

            _ => false,
        }
    }
}

impl EngineError {
    /// The body this error concerns, when it is a per-body diagnostic.
    pub fn body(&self) -> Option<&str> {
        match self {
            EngineError::MissingSource { body, .. }
            | EngineError::DateNotFound { body, .. }
            | EngineError::EmptyWindow { body, .. }
            | EngineError::DegenerateGeometry { body } => Some(body),
            EngineError::UnknownBody(body) | EngineError::DuplicateBody(body) => Some(body),
            _ => None,
        }
    }
}
