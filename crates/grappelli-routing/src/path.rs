//! Path templates with named capture segments.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

static CAPTURE_PATTERN: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("capture pattern is valid"));

/// Failures while expanding a template into a concrete URL.
#[derive(Debug, Error)]
pub enum PathError {
	#[error("missing value for path parameter `{0}`")]
	MissingParam(String),
}

/// A path with `{name}` capture segments, e.g. `/widgets/{id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
	template: String,
	captures: Vec<String>,
}

impl PathTemplate {
	pub fn parse(template: impl Into<String>) -> Self {
		let template = template.into();
		let captures = CAPTURE_PATTERN
			.captures_iter(&template)
			.map(|capture| capture[1].to_string())
			.collect();
		Self { template, captures }
	}

	pub fn as_str(&self) -> &str {
		&self.template
	}

	/// Parameter names bound from the path, in template order.
	pub fn named_captures(&self) -> &[String] {
		&self.captures
	}

	/// Substitute every capture with its value from `values`.
	pub fn expand(&self, values: &Map<String, Value>) -> Result<String, PathError> {
		let mut expanded = self.template.clone();
		for name in &self.captures {
			let value = values
				.get(name)
				.ok_or_else(|| PathError::MissingParam(name.clone()))?;
			expanded = expanded.replace(&format!("{{{name}}}"), &scalar_to_string(value));
		}
		Ok(expanded)
	}
}

fn scalar_to_string(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn values(pairs: &[(&str, Value)]) -> Map<String, Value> {
		pairs
			.iter()
			.map(|(key, value)| (key.to_string(), value.clone()))
			.collect()
	}

	#[test]
	fn test_named_captures_in_order() {
		let template = PathTemplate::parse("/orgs/{org_id}/widgets/{id}");
		assert_eq!(template.named_captures(), ["org_id", "id"]);
	}

	#[test]
	fn test_expand() {
		let template = PathTemplate::parse("/orgs/{org_id}/widgets/{id}");
		let url = template
			.expand(&values(&[("org_id", json!("acme")), ("id", json!(42))]))
			.unwrap();
		assert_eq!(url, "/orgs/acme/widgets/42");
	}

	#[test]
	fn test_expand_missing_param() {
		let template = PathTemplate::parse("/widgets/{id}");
		let err = template.expand(&Map::new()).unwrap_err();
		assert!(matches!(err, PathError::MissingParam(name) if name == "id"));
	}

	#[test]
	fn test_template_without_captures() {
		let template = PathTemplate::parse("/widgets");
		assert!(template.named_captures().is_empty());
		assert_eq!(template.expand(&Map::new()).unwrap(), "/widgets");
	}
}
