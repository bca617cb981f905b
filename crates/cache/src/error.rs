use sift_pattern::PatternError;

/// Errors reported by [`crate::RegexMatchCache`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
	/// The pattern engine failed; regex-side knowledge has been discarded.
	#[error(transparent)]
	Pattern(#[from] PatternError),

	/// The regex is unknown or still has pending evaluation work.
	#[error("regex {pattern:?} is not ready to find matches")]
	NotReady { pattern: String },
}

/// Errors from loading a [`crate::CacheConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid cache config: {0}")]
	Parse(#[from] toml::de::Error),
}

pub type Result<T, E = CacheError> = std::result::Result<T, E>;
