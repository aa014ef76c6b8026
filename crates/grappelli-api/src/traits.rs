//! Named, reusable configuration snippets.

use std::fmt;
use std::sync::Arc;

use crate::action::ActionDefinition;
use crate::error::ConfigError;

type TraitConfig = Arc<dyn Fn(&mut ActionDefinition) -> Result<(), ConfigError> + Send + Sync>;

/// A registered configuration snippet applied to actions by reference.
///
/// Application is not deduplicated: applying the same trait twice layers its
/// configuration twice. Traits that declare schema attributes are still
/// effectively idempotent because child-attribute merge is first-wins.
#[derive(Clone)]
pub struct Trait {
	name: String,
	config: TraitConfig,
}

impl Trait {
	pub fn new(
		name: impl Into<String>,
		config: impl Fn(&mut ActionDefinition) -> Result<(), ConfigError> + Send + Sync + 'static,
	) -> Self {
		Self {
			name: name.into(),
			config: Arc::new(config),
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Run the stored configuration against an action, as if inlined at the
	/// point of application.
	pub fn apply(&self, action: &mut ActionDefinition) -> Result<(), ConfigError> {
		(self.config)(action)
	}
}

impl fmt::Debug for Trait {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Trait").field("name", &self.name).finish_non_exhaustive()
	}
}
