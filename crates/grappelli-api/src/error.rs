//! Load-time configuration errors.

use thiserror::Error;

/// Failures raised while an API definition is being configured.
///
/// Both variants surface synchronously at the point of the offending
/// declaration, so misconfiguration aborts application boot instead of
/// appearing at request time.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// A trait name was referenced that is not present in the registry.
	#[error("trait `{name}` not found in the system")]
	InvalidTrait { name: String },

	/// A schema, route or response was configured inconsistently.
	#[error("invalid configuration: {reason}")]
	InvalidConfiguration { reason: String },
}

impl ConfigError {
	pub fn invalid(reason: impl Into<String>) -> Self {
		Self::InvalidConfiguration { reason: reason.into() }
	}
}
