//! Cache configuration.
//!
//! ```toml
//! [engine]
//! full_match = true
//! case_insensitive = false
//!
//! [retention]
//! policy = "drop_after"
//! ttl_secs = 300
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sift_pattern::EngineOptions;

use crate::error::ConfigError;
use crate::time::Timestamp;

/// Top-level cache configuration. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
	/// Options for the default regex engine.
	pub engine: EngineOptions,
	/// How [`crate::RegexMatchCache::purge_expired`] picks its threshold.
	pub retention: RetentionPolicy,
}

impl CacheConfig {
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(source)?)
	}
}

/// Regex retention policy (memory control).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum RetentionPolicy {
	/// Never drop.
	#[default]
	Keep,
	/// Drop regexes not queried within the TTL.
	DropAfter { ttl_secs: u64 },
}

impl RetentionPolicy {
	/// Purge threshold for `now`, or `None` when nothing should be dropped.
	pub fn expiry(&self, now: Timestamp) -> Option<Timestamp> {
		match *self {
			Self::Keep => None,
			Self::DropAfter { ttl_secs } => Some(now.saturating_sub(Duration::from_secs(ttl_secs))),
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn test_empty_config_uses_defaults() {
		let config = CacheConfig::from_toml_str("").unwrap();
		assert_eq!(config, CacheConfig::default());
		assert!(config.engine.full_match);
		assert_eq!(config.retention, RetentionPolicy::Keep);
	}

	#[test]
	fn test_full_config() {
		const CONFIG: &str = r#"
			[engine]
			full_match = false
			case_insensitive = true
			size_limit = 1048576

			[retention]
			policy = "drop_after"
			ttl_secs = 300
		"#;
		let config = CacheConfig::from_toml_str(CONFIG).unwrap();

		assert_eq!(
			config,
			CacheConfig {
				engine: EngineOptions {
					full_match: false,
					case_insensitive: true,
					size_limit: Some(1_048_576),
					dfa_size_limit: None,
				},
				retention: RetentionPolicy::DropAfter { ttl_secs: 300 },
			}
		);
	}

	#[test]
	fn test_unknown_policy_is_rejected() {
		let err = CacheConfig::from_toml_str("[retention]\npolicy = \"lru\"\n").unwrap_err();
		assert!(err.to_string().starts_with("invalid cache config"));
	}

	#[test]
	fn test_expiry() {
		let now = Timestamp::from_nanos(400_000_000_000);
		assert_eq!(RetentionPolicy::Keep.expiry(now), None);
		assert_eq!(
			RetentionPolicy::DropAfter { ttl_secs: 100 }.expiry(now),
			Some(Timestamp::from_nanos(300_000_000_000))
		);
	}
}
