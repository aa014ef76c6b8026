//! The process-wide definition registry.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use grappelli_schema::Attribute;

use crate::action::ActionDefinition;
use crate::response::ResponseTemplate;
use crate::traits::Trait;

/// Callback run over every freshly built description tree, for every action.
///
/// Lets plugins enrich generated documentation late, after the base tree is
/// assembled.
pub type DocDecoration = Arc<dyn Fn(&ActionDefinition, &mut Map<String, Value>) + Send + Sync>;

/// Per-version API information shared by every resource of that version.
#[derive(Debug, Clone)]
pub struct ApiInfo {
	version: String,
	base_path: String,
	description: Option<String>,
	base_params: Option<Attribute>,
}

impl ApiInfo {
	pub fn new(version: impl Into<String>, base_path: impl Into<String>) -> Self {
		Self {
			version: version.into(),
			base_path: base_path.into(),
			description: None,
			base_params: None,
		}
	}

	pub fn with_description(mut self, text: impl Into<String>) -> Self {
		self.description = Some(text.into());
		self
	}

	/// Version-wide parameters seeded into every action's params schema.
	pub fn with_base_params(mut self, params: Attribute) -> Self {
		self.base_params = Some(params);
		self
	}

	pub fn version(&self) -> &str {
		&self.version
	}

	pub fn base_path(&self) -> &str {
		&self.base_path
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	pub fn base_params(&self) -> Option<&Attribute> {
		self.base_params.as_ref()
	}
}

/// Registry of version info, traits, response templates and doc decorations.
///
/// Built once during application load, then shared read-only behind an
/// `Arc`. Constructing one registry per test keeps tests isolated from each
/// other and from registration order.
#[derive(Default)]
pub struct ApiRegistry {
	infos: HashMap<String, ApiInfo>,
	traits: IndexMap<String, Trait>,
	responses: IndexMap<String, ResponseTemplate>,
	doc_decorations: Vec<DocDecoration>,
}

impl ApiRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_info(&mut self, info: ApiInfo) -> &mut Self {
		self.infos.insert(info.version().to_string(), info);
		self
	}

	pub fn register_trait(&mut self, definition: Trait) -> &mut Self {
		self.traits.insert(definition.name().to_string(), definition);
		self
	}

	pub fn register_response(&mut self, template: ResponseTemplate) -> &mut Self {
		self.responses.insert(template.name().to_string(), template);
		self
	}

	/// Register a documentation decoration callback.
	pub fn decorate_docs(
		&mut self,
		callback: impl Fn(&ActionDefinition, &mut Map<String, Value>) + Send + Sync + 'static,
	) -> &mut Self {
		self.doc_decorations.push(Arc::new(callback));
		self
	}

	pub fn info(&self, version: &str) -> Option<&ApiInfo> {
		self.infos.get(version)
	}

	pub fn trait_def(&self, name: &str) -> Option<&Trait> {
		self.traits.get(name)
	}

	pub fn response_template(&self, name: &str) -> Option<&ResponseTemplate> {
		self.responses.get(name)
	}

	pub fn doc_decorations(&self) -> &[DocDecoration] {
		&self.doc_decorations
	}
}
