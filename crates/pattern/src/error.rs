/// Failure surfaced by a [`crate::PatternEngine`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
	/// Pattern text was rejected at compile time.
	#[error("invalid pattern {pattern:?}: {message}")]
	Compile { pattern: String, message: String },
	/// Engine gave up while testing a candidate.
	#[error("pattern {pattern:?} failed on {candidate:?}: {message}")]
	Evaluate {
		pattern: String,
		candidate: String,
		message: String,
	},
}

impl PatternError {
	/// Returns the pattern text the failure belongs to.
	pub fn pattern(&self) -> &str {
		match self {
			Self::Compile { pattern, .. } | Self::Evaluate { pattern, .. } => pattern,
		}
	}
}
