use thiserror::Error;

/// Failure while scanning the catalog data source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("catalog io error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog record in {path}: {source}")]
    Record {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog scan failed: {0}")]
    Scan(String),
}

/// Failure talking to the snapshot cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(#[from] sled::Error),

    #[error("cache entry encoding error: {0}")]
    Entry(#[from] bincode::Error),
}

/// Failure encoding or decoding a snapshot.
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("snapshot json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported snapshot format version {found}, newest supported is {supported}")]
    UnsupportedVersion { found: u64, supported: u64 },

    #[error("snapshot format_version is not an unsigned integer")]
    InvalidVersionTag,

    #[error("snapshot trie is malformed: {0}")]
    CorruptTrie(String),
}

/// Top-level error surfaced by build and administrative operations.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("data source error: {0}")]
    DataSource(#[from] SourceError),

    #[error("serialization error: {0}")]
    Serialization(#[from] SerializationError),

    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),
}

pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    /// Whether retrying the same operation later may succeed.
    pub fn is_retriable(&self) -> bool {
        matches!(self, SearchError::DataSource(_) | SearchError::CacheUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_version_message_names_both_versions() {
        let err = SerializationError::UnsupportedVersion { found: 9, supported: 2 };
        let msg = err.to_string();
        assert!(msg.contains('9'));
        assert!(msg.contains('2'));
    }

    #[test]
    fn source_errors_are_retriable() {
        let err: SearchError = SourceError::Scan("connection reset".into()).into();
        assert!(err.is_retriable());
        let err: SearchError = SerializationError::InvalidVersionTag.into();
        assert!(!err.is_retriable());
    }
}
