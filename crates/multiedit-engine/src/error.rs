#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid marker pattern {pattern:?}: {source}")]
    InvalidMarker {
        pattern: String,
        source: regex::Error,
    },
    #[error("Marker pattern {0:?} can match without consuming any text")]
    EmptyMarker(String),
    #[error("Wrapper {wrapper:?} contains the marker {pattern:?}")]
    WrapperContainsMarker { pattern: String, wrapper: String },
    #[error("Unknown editor mode: {0}")]
    UnknownMode(String),
}
