use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("coordinates ({x}, {y}) outside map bounds [0, {bound}]")]
    InvalidCoordinates { x: f64, y: f64, bound: f64 },

    #[error("unknown NPC kind: {0}")]
    UnknownKind(String),

    #[error("duplicate NPC name: {0}")]
    DuplicateName(String),

    #[error("malformed roster line {line}: {text:?}")]
    MalformedLine { line: usize, text: String },

    #[error("simulation has already run")]
    AlreadyRan,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
