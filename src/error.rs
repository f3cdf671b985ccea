use std::path::PathBuf;

/// Errors raised while loading the catalog and similarity artifacts.
///
/// Every variant is fatal: the process must refuse to serve when the
/// startup data cannot be loaded or fails validation.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog record {index} is missing a title")]
    MissingTitle { index: usize },

    #[error("similarity matrix has {found} rows, expected {expected}")]
    RowCount { found: usize, expected: usize },

    #[error("similarity matrix row {row} has {found} entries, expected {expected}")]
    RowLength {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Per-request errors inside the poster lookup path.
///
/// These never reach an HTTP response: the poster resolver converts
/// every failure into the placeholder URL at its boundary. The enum
/// exists so the provider internals can use `?` and so failure causes
/// show up in logs with their original context.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

pub type AppResult<T> = Result<T, AppError>;
