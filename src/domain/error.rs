//! Domain error types.

/// Top-level error type for goldencross.
///
/// Per-ticker conditions (`DataSource`, `MissingColumn`, `InsufficientData`)
/// are normally absorbed by the runner as skips; they only reach a caller
/// from single-ticker commands such as `info`.
#[derive(Debug, thiserror::Error)]
pub enum GoldenCrossError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot discover price data in {path}: {reason}")]
    Discovery { path: String, reason: String },

    #[error("data error for {ticker}: {reason}")]
    DataSource { ticker: String, reason: String },

    #[error("required column '{column}' not found for {ticker}")]
    MissingColumn { ticker: String, column: String },

    #[error("insufficient data for {ticker}: have {bars} bars, need {minimum}")]
    InsufficientData {
        ticker: String,
        bars: usize,
        minimum: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GoldenCrossError> for std::process::ExitCode {
    fn from(err: &GoldenCrossError) -> Self {
        let code: u8 = match err {
            GoldenCrossError::Io(_) => 1,
            GoldenCrossError::ConfigParse { .. }
            | GoldenCrossError::ConfigMissing { .. }
            | GoldenCrossError::ConfigInvalid { .. } => 2,
            GoldenCrossError::Discovery { .. } => 3,
            GoldenCrossError::DataSource { .. }
            | GoldenCrossError::MissingColumn { .. }
            | GoldenCrossError::InsufficientData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
