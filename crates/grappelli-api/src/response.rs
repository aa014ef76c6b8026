//! Response templates and compiled responses.

use serde_json::{json, Map, Value};

use crate::action::ActionDefinition;

/// Registered blueprint for a reusable response.
#[derive(Debug, Clone)]
pub struct ResponseTemplate {
	name: String,
	status: u16,
	description: Option<String>,
	media_type: Option<String>,
}

impl ResponseTemplate {
	pub fn new(name: impl Into<String>, status: u16) -> Self {
		Self {
			name: name.into(),
			status,
			description: None,
			media_type: None,
		}
	}

	pub fn with_description(mut self, text: impl Into<String>) -> Self {
		self.description = Some(text.into());
		self
	}

	pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
		self.media_type = Some(media_type.into());
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Compile this template against a concrete action.
	///
	/// Argument values win over template values; a media type falls back to
	/// the owning resource's declared media type.
	pub fn compile(&self, action: &ActionDefinition, args: ResponseArgs) -> Response {
		Response {
			name: self.name.clone(),
			status: args.status.unwrap_or(self.status),
			description: args.description.or_else(|| self.description.clone()),
			media_type: args
				.media_type
				.or_else(|| self.media_type.clone())
				.or_else(|| {
					action
						.resource()
						.media_type()
						.map(|media| media.name().to_string())
				}),
		}
	}
}

/// Per-use overrides supplied when binding a template to an action.
#[derive(Debug, Clone, Default)]
pub struct ResponseArgs {
	pub status: Option<u16>,
	pub description: Option<String>,
	pub media_type: Option<String>,
}

impl ResponseArgs {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_status(mut self, status: u16) -> Self {
		self.status = Some(status);
		self
	}

	pub fn with_description(mut self, text: impl Into<String>) -> Self {
		self.description = Some(text.into());
		self
	}

	pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
		self.media_type = Some(media_type.into());
		self
	}
}

/// A response compiled for one specific action.
#[derive(Debug, Clone)]
pub struct Response {
	name: String,
	status: u16,
	description: Option<String>,
	media_type: Option<String>,
}

impl Response {
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn status(&self) -> u16 {
		self.status
	}

	pub fn describe(&self) -> Value {
		let mut tree = Map::new();
		tree.insert("status".to_string(), json!(self.status));
		if let Some(description) = &self.description {
			tree.insert("description".to_string(), json!(description));
		}
		if let Some(media_type) = &self.media_type {
			tree.insert("media_type".to_string(), json!(media_type));
		}
		Value::Object(tree)
	}
}
