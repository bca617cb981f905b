//! Test engines and helpers shared by unit and invariant tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use sift_pattern::{CompiledPattern, PatternEngine, PatternError, RegexEngine};

use crate::{ConsistencyOracle, RegexMatchCache, Violation};

/// Regex engine that counts compilations and candidate evaluations, and can be scripted to
/// fail or panic on a specific candidate.
#[derive(Default)]
pub(crate) struct MockEngine {
	inner: RegexEngine,
	pub(crate) compiles: AtomicUsize,
	pub(crate) evaluations: Arc<AtomicUsize>,
	pub(crate) fail_on: Option<String>,
	pub(crate) panic_on: Option<String>,
}

impl MockEngine {
	pub(crate) fn failing_on(candidate: &str) -> Self {
		Self {
			fail_on: Some(candidate.to_owned()),
			..Self::default()
		}
	}

	pub(crate) fn panicking_on(candidate: &str) -> Self {
		Self {
			panic_on: Some(candidate.to_owned()),
			..Self::default()
		}
	}

	pub(crate) fn compiles(&self) -> usize {
		self.compiles.load(Ordering::SeqCst)
	}

	pub(crate) fn evaluations(&self) -> usize {
		self.evaluations.load(Ordering::SeqCst)
	}
}

impl PatternEngine for MockEngine {
	fn compile(&self, pattern: &str) -> Result<Box<dyn CompiledPattern>, PatternError> {
		self.compiles.fetch_add(1, Ordering::SeqCst);
		Ok(Box::new(MockPattern {
			pattern: pattern.to_owned(),
			inner: self.inner.compile(pattern)?,
			evaluations: Arc::clone(&self.evaluations),
			fail_on: self.fail_on.clone(),
			panic_on: self.panic_on.clone(),
		}))
	}
}

struct MockPattern {
	pattern: String,
	inner: Box<dyn CompiledPattern>,
	evaluations: Arc<AtomicUsize>,
	fail_on: Option<String>,
	panic_on: Option<String>,
}

impl CompiledPattern for MockPattern {
	fn matches(&self, candidate: &str) -> Result<bool, PatternError> {
		self.evaluations.fetch_add(1, Ordering::SeqCst);
		if self.panic_on.as_deref() == Some(candidate) {
			panic!("mock engine panicked on {candidate:?}");
		}
		if self.fail_on.as_deref() == Some(candidate) {
			return Err(PatternError::Evaluate {
				pattern: self.pattern.clone(),
				candidate: candidate.to_owned(),
				message: "scripted failure".to_owned(),
			});
		}
		self.inner.matches(candidate)
	}
}

/// Cache over a fresh [`MockEngine`], returning both.
pub(crate) fn mock_cache(engine: MockEngine) -> (RegexMatchCache, Arc<MockEngine>) {
	let engine = Arc::new(engine);
	(RegexMatchCache::with_engine(engine.clone()), engine)
}

/// Cache preloaded with `strings` over the default engine.
pub(crate) fn cache_with(strings: &[&str]) -> RegexMatchCache {
	let mut cache = RegexMatchCache::new();
	for s in strings {
		cache.add_string(s);
	}
	cache
}

/// Sorted owned copy of a match list, for order-independent comparisons.
pub(crate) fn sorted<S: AsRef<str>>(items: impl IntoIterator<Item = S>) -> Vec<String> {
	let mut out: Vec<String> = items.into_iter().map(|s| s.as_ref().to_owned()).collect();
	out.sort();
	out
}

/// Consistency violations against an independent default engine.
pub(crate) fn violations(cache: &RegexMatchCache) -> Vec<Violation> {
	let mut oracle = ConsistencyOracle::new(Arc::new(RegexEngine::default()));
	cache.consistency(&mut oracle).unwrap()
}
