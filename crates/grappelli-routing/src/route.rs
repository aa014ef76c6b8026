//! Immutable route values.

use http::Method;
use serde_json::{json, Map, Value};

use crate::path::PathTemplate;

/// One declared route: HTTP verb, path template, optional name and version.
///
/// Mutable only while its [`RoutingBuilder`](crate::RoutingBuilder) block
/// runs; the owning action exposes routes by shared reference afterwards.
#[derive(Debug, Clone)]
pub struct Route {
	verb: Method,
	path: PathTemplate,
	name: Option<String>,
	version: Option<String>,
}

impl Route {
	pub fn new(verb: Method, path: PathTemplate) -> Self {
		Self {
			verb,
			path,
			name: None,
			version: None,
		}
	}

	/// Name this route so it appears in the action's `named_routes`.
	pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
		self.name = Some(name.into());
		self
	}

	pub(crate) fn set_version(&mut self, version: impl Into<String>) {
		self.version = Some(version.into());
	}

	pub fn verb(&self) -> &Method {
		&self.verb
	}

	pub fn path(&self) -> &PathTemplate {
		&self.path
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn version(&self) -> Option<&str> {
		self.version.as_deref()
	}

	/// Serializable description of this route.
	pub fn describe(&self) -> Value {
		let mut tree = Map::new();
		tree.insert("verb".to_string(), json!(self.verb.as_str()));
		tree.insert("path".to_string(), json!(self.path.as_str()));
		if let Some(name) = &self.name {
			tree.insert("name".to_string(), json!(name));
		}
		if let Some(version) = &self.version {
			tree.insert("version".to_string(), json!(version));
		}
		Value::Object(tree)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_describe() {
		let mut route = Route::new(Method::GET, PathTemplate::parse("/widgets/{id}"));
		route.named("show");
		route.set_version("1.0");

		let tree = route.describe();
		assert_eq!(tree["verb"], json!("GET"));
		assert_eq!(tree["path"], json!("/widgets/{id}"));
		assert_eq!(tree["name"], json!("show"));
		assert_eq!(tree["version"], json!("1.0"));
	}

	#[test]
	fn test_describe_omits_unset_fields() {
		let route = Route::new(Method::POST, PathTemplate::parse("/widgets"));
		let tree = route.describe();
		assert!(tree.get("name").is_none());
		assert!(tree.get("version").is_none());
	}
}
