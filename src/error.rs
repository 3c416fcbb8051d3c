use thiserror::Error;

/// Failures coming back from the document store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Index {name} already exists with a different definition")]
    IndexConflict { name: String },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(feature = "server")]
impl From<mongodb::error::Error> for StoreError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        match *err.kind {
            ErrorKind::ServerSelection { .. }
            | ErrorKind::Io(_)
            | ErrorKind::DnsResolve { .. }
            | ErrorKind::ConnectionPoolCleared { .. } => StoreError::Connection(err.to_string()),
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                StoreError::Serialization(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamError {
    #[error("Route parameter _id is missing")]
    Missing,

    #[error("Route parameter could not be read: {0}")]
    Unreadable(String),
}

#[cfg(feature = "server")]
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Migration {id} failed: {source}")]
    Failed {
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("Changelog lists unknown migration {id}")]
    Unknown { id: String },

    #[error("Changelog error: {0}")]
    Changelog(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ParamError> for AppError {
    fn from(err: ParamError) -> Self {
        AppError::NotFound(err.to_string())
    }
}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        let status = match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, self.to_string()).into_response()
    }
}
