use regex_automata::meta::{self, Regex};
use regex_syntax::ParserBuilder;
use regex_syntax::hir::{Hir, Look};
use serde::{Deserialize, Serialize};

use crate::{CompiledPattern, PatternEngine, PatternError};

/// Compile options for [`RegexEngine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
	/// Require the pattern to match the entire candidate rather than a substring.
	pub full_match: bool,
	/// Match letters case-insensitively.
	pub case_insensitive: bool,
	/// Upper bound on compiled program size in bytes (engine default when unset).
	pub size_limit: Option<usize>,
	/// Upper bound on lazy DFA cache size in bytes (engine default when unset).
	pub dfa_size_limit: Option<usize>,
}

impl Default for EngineOptions {
	fn default() -> Self {
		Self {
			full_match: true,
			case_insensitive: false,
			size_limit: None,
			dfa_size_limit: None,
		}
	}
}

/// Default engine, built on the same parser and meta engine as the `regex` crate.
#[derive(Debug, Clone, Default)]
pub struct RegexEngine {
	options: EngineOptions,
}

impl RegexEngine {
	pub fn new(options: EngineOptions) -> Self {
		Self { options }
	}

	pub fn options(&self) -> &EngineOptions {
		&self.options
	}

	fn parse(&self, pattern: &str) -> Result<Hir, regex_syntax::Error> {
		ParserBuilder::new()
			.case_insensitive(self.options.case_insensitive)
			.build()
			.parse(pattern)
	}

	fn build(&self, hir: &Hir) -> Result<Regex, meta::BuildError> {
		let mut config = meta::Config::new();
		if let Some(limit) = self.options.size_limit {
			config = config
				.nfa_size_limit(Some(limit))
				.onepass_size_limit(Some(limit));
		}
		if let Some(limit) = self.options.dfa_size_limit {
			config = config
				.hybrid_cache_capacity(limit)
				.dfa_size_limit(Some(limit));
		}
		meta::Builder::new().configure(config).build_from_hir(hir)
	}
}

impl PatternEngine for RegexEngine {
	fn compile(&self, pattern: &str) -> Result<Box<dyn CompiledPattern>, PatternError> {
		let compile_err = |message: String| PatternError::Compile {
			pattern: pattern.to_owned(),
			message,
		};

		let mut hir = self.parse(pattern).map_err(|e| compile_err(e.to_string()))?;
		if self.options.full_match {
			// Anchors sit outside the pattern's own flag scope, so verbose-mode comments and
			// flag groups cannot swallow them.
			hir = Hir::concat(vec![Hir::look(Look::Start), hir, Hir::look(Look::End)]);
		}
		let regex = self.build(&hir).map_err(|e| compile_err(e.to_string()))?;

		Ok(Box::new(RegexPattern(regex)))
	}
}

struct RegexPattern(Regex);

impl CompiledPattern for RegexPattern {
	fn matches(&self, candidate: &str) -> Result<bool, PatternError> {
		Ok(self.0.is_match(candidate))
	}
}
