//! Resource-level context shared by all actions of a resource.

use std::fmt;
use std::sync::Arc;

use grappelli_schema::MediaType;

use crate::action::{ActionConfig, ActionDefinition};
use crate::error::ConfigError;

/// The declaration context every action of a resource is constructed with:
/// version, media type, routing prefix, traits to apply, and the defaults
/// block run before each action's own configuration.
#[derive(Clone)]
pub struct ResourceDefinition {
	name: String,
	version: String,
	version_prefix: Option<String>,
	media_type: Option<Arc<MediaType>>,
	routing_prefix: Vec<String>,
	traits: Vec<String>,
	action_defaults: Option<ActionConfig>,
}

impl ResourceDefinition {
	pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			version: version.into(),
			version_prefix: None,
			media_type: None,
			routing_prefix: Vec::new(),
			traits: Vec::new(),
			action_defaults: None,
		}
	}

	pub fn with_media_type(mut self, media_type: Arc<MediaType>) -> Self {
		self.media_type = Some(media_type);
		self
	}

	pub fn with_version_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.version_prefix = Some(prefix.into());
		self
	}

	/// Append a routing prefix segment applied to every route of the resource.
	pub fn with_routing_prefix(mut self, segment: impl Into<String>) -> Self {
		self.routing_prefix.push(segment.into());
		self
	}

	/// Append a trait applied to every action, in declaration order.
	pub fn with_trait(mut self, name: impl Into<String>) -> Self {
		self.traits.push(name.into());
		self
	}

	/// Defaults run after traits and before each action's own block.
	pub fn with_action_defaults(
		mut self,
		defaults: impl Fn(&mut ActionDefinition) -> Result<(), ConfigError> + Send + Sync + 'static,
	) -> Self {
		self.action_defaults = Some(Arc::new(defaults));
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn media_type(&self) -> Option<&Arc<MediaType>> {
		self.media_type.as_ref()
	}

	pub fn routing_prefix(&self) -> &[String] {
		&self.routing_prefix
	}

	pub fn traits(&self) -> &[String] {
		&self.traits
	}

	pub fn action_defaults(&self) -> Option<&ActionConfig> {
		self.action_defaults.as_ref()
	}

	/// Path prefix contributed by the resource's version, `/v{version}`
	/// unless overridden.
	pub fn version_prefix(&self) -> String {
		self.version_prefix
			.clone()
			.unwrap_or_else(|| format!("/v{}", self.version))
	}
}

impl fmt::Debug for ResourceDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResourceDefinition")
			.field("name", &self.name)
			.field("version", &self.version)
			.field("routing_prefix", &self.routing_prefix)
			.field("traits", &self.traits)
			.finish_non_exhaustive()
	}
}
