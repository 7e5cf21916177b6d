use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BaconError {
    #[error("unknown performer: '{0}'")]
    UnknownPerformer(String),

    #[error("unknown production: '{0}'")]
    UnknownProduction(String),

    #[error("malformed record on line {line}: '{text}'")]
    MalformedRecord { line: usize, text: String },

    #[error("the dataset contains no records")]
    EmptyDataset,

    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("config error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("logger error: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

pub type Result<T> = std::result::Result<T, BaconError>;

impl From<std::io::Error> for BaconError {
    fn from(source: std::io::Error) -> Self {
        BaconError::Io {
            source,
            path: PathBuf::from("<stream>"),
        }
    }
}

impl BaconError {
    /// Attach the path that was being read when an I/O error occurred.
    pub fn at_path(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        BaconError::Io {
            source,
            path: path.into(),
        }
    }

    /// True for the errors a user can recover from by asking again.
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            BaconError::UnknownPerformer(_) | BaconError::UnknownProduction(_)
        )
    }
}
