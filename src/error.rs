use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("center {center} still overlaps a station after {attempts} nudges")]
    CenterPlacement { center: String, attempts: usize },

    #[error("no destination different from {src} after {attempts} draws")]
    SamplingExhausted { src: String, attempts: usize },

    #[error("could not parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type GenResult<T> = Result<T, GenError>;
