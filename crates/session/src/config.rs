// Copyright (c) tidaldb.dev 2025
// This file is licensed under the MIT, see license.md file

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Name of the option selecting the legacy exception contract.
pub const LEGACY_EXCEPTION_COMPLIANCE: &str = "legacy-exception-compliance";

/// Failure shaping contract of a session.
///
/// Fixed at session construction; there is no runtime toggle.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
pub enum CompatibilityMode {
	/// Failures reach the terminal handler wrapped in a
	/// [`tidal_type::CompletionError`] carrier.
	#[default]
	Default,
	/// Emulates the 5.1 era contract: the classified error itself is
	/// the observable failure, with no outer carrier. Kept for
	/// sessions that have not migrated; not extended by new features.
	Legacy51,
}

/// Configuration for a [`crate::Session`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
	/// Present failures with the pre-rework shape, i.e. without the
	/// completion carrier.
	pub legacy_exception_compliance: bool,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			legacy_exception_compliance: false,
		}
	}
}

impl SessionConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn legacy_exception_compliance(mut self, enabled: bool) -> Self {
		self.legacy_exception_compliance = enabled;
		self
	}

	/// Reads recognized options from a key value map.
	///
	/// Unknown keys are ignored so a shared settings map can be
	/// passed through unfiltered.
	pub fn from_options(
		options: &HashMap<String, String>,
	) -> Result<Self, ConfigError> {
		let mut config = Self::default();
		if let Some(value) = options.get(LEGACY_EXCEPTION_COMPLIANCE) {
			config.legacy_exception_compliance =
				parse_bool(LEGACY_EXCEPTION_COMPLIANCE, value)?;
		}
		Ok(config)
	}

	pub fn compatibility_mode(&self) -> CompatibilityMode {
		if self.legacy_exception_compliance {
			CompatibilityMode::Legacy51
		} else {
			CompatibilityMode::Default
		}
	}
}

fn parse_bool(
	option: &'static str,
	value: &str,
) -> Result<bool, ConfigError> {
	match value {
		"true" => Ok(true),
		"false" => Ok(false),
		other => Err(ConfigError::InvalidValue {
			option,
			value: other.to_string(),
		}),
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid value {value:?} for option {option}")]
	InvalidValue {
		option: &'static str,
		value: String,
	},
}
