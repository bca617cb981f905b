//! Pattern-matching capability consumed by the match cache.
//!
//! The cache never interprets pattern text itself. It asks a [`PatternEngine`] to compile a
//! pattern once per evaluation run and then asks the resulting [`CompiledPattern`] whether
//! individual candidates match. Both steps may fail; callers decide how to recover.
//!
//! [`RegexEngine`] is the default engine, built on `regex-syntax` and the `regex-automata` meta
//! engine (the same stack the `regex` crate wraps). It matches whole candidates unless
//! [`EngineOptions::full_match`] is turned off.

mod error;
mod memo;
mod regex_engine;

pub use error::PatternError;
pub use memo::PatternMemo;
pub use regex_engine::{EngineOptions, RegexEngine};

/// Compiles pattern text into something that can test candidates.
///
/// Implementations must be deterministic: compiling the same text twice must yield patterns
/// that agree on every candidate. The cache relies on this to rebuild discarded knowledge.
pub trait PatternEngine: Send + Sync {
	fn compile(&self, pattern: &str) -> Result<Box<dyn CompiledPattern>, PatternError>;
}

/// A compiled pattern.
pub trait CompiledPattern: Send + Sync {
	/// Tests one candidate.
	///
	/// Returns [`PatternError::Evaluate`] when the engine gives up on the candidate (for
	/// example a backtracking or size limit), which is distinct from a clean non-match.
	fn matches(&self, candidate: &str) -> Result<bool, PatternError>;
}
