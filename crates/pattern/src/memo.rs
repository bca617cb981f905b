use rustc_hash::FxHashMap;

use crate::{CompiledPattern, PatternEngine, PatternError};

/// Compiled patterns memoized by pattern text.
///
/// Compile failures are not memoized; a failing pattern is recompiled (and fails again) on
/// every request.
#[derive(Default)]
pub struct PatternMemo {
	compiled: FxHashMap<Box<str>, Box<dyn CompiledPattern>>,
}

impl PatternMemo {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the compiled form of `pattern`, compiling it through `engine` on first use.
	pub fn get_or_compile(
		&mut self,
		engine: &dyn PatternEngine,
		pattern: &str,
	) -> Result<&dyn CompiledPattern, PatternError> {
		if !self.compiled.contains_key(pattern) {
			let compiled = engine.compile(pattern)?;
			self.compiled.insert(Box::from(pattern), compiled);
		}
		Ok(self.compiled[pattern].as_ref())
	}

	/// Tests `candidate` against the memoized form of `pattern`.
	pub fn matches(
		&mut self,
		engine: &dyn PatternEngine,
		pattern: &str,
		candidate: &str,
	) -> Result<bool, PatternError> {
		self.get_or_compile(engine, pattern)?.matches(candidate)
	}

	pub fn len(&self) -> usize {
		self.compiled.len()
	}

	pub fn is_empty(&self) -> bool {
		self.compiled.is_empty()
	}

	pub fn clear(&mut self) {
		self.compiled.clear();
	}
}
