//! Description-tree derivation for action definitions.

use serde_json::{json, Map, Value};
use tracing::warn;

use grappelli_routing::Route;
use grappelli_schema::{Attribute, ExampleContext};

use crate::action::ActionDefinition;

impl ActionDefinition {
	/// Derive the machine-readable description of this action.
	///
	/// A pure derivation over the composed definition: repeated calls with
	/// the same context produce identical trees. Emits description, name and
	/// metadata, the schema descriptions with generated examples, per-route
	/// synthesized example URLs, compiled responses, the applied trait list,
	/// and finally runs every registered doc-decoration callback.
	pub fn describe(&self, ctx: &ExampleContext) -> Value {
		let mut tree = Map::new();
		tree.insert(
			"description".to_string(),
			self.description().map_or(Value::Null, |text| json!(text)),
		);
		tree.insert("name".to_string(), json!(self.name()));
		tree.insert("metadata".to_string(), Value::Object(self.metadata().clone()));

		if let Some(headers) = self.headers() {
			let example = headers.example(&ctx.child("headers"));
			tree.insert("headers".to_string(), headers.describe(Some(&example)));
		}

		let params_example = self.params().map(|params| params.example(&ctx.child("params")));
		if let (Some(params), Some(example)) = (self.params(), params_example.as_ref()) {
			tree.insert("params".to_string(), self.params_description(params, example));
		}

		if let Some(payload) = self.payload() {
			let example = payload.example(&ctx.child("payload"));
			tree.insert("payload".to_string(), payload.describe(Some(&example)));
		}

		let mut responses = Map::new();
		for response in self.responses().values() {
			responses.insert(response.name().to_string(), response.describe());
		}
		tree.insert("responses".to_string(), Value::Object(responses));

		if !self.traits().is_empty() {
			tree.insert("traits".to_string(), json!(self.traits()));
		}

		let urls: Vec<Value> = self
			.routes()
			.iter()
			.filter_map(|route| self.url_description(route, params_example.as_ref()))
			.collect();
		tree.insert("urls".to_string(), Value::Array(urls));

		for decoration in self.registry().doc_decorations() {
			(decoration.as_ref())(self, &mut tree);
		}

		Value::Object(tree)
	}

	/// Describe the params schema, annotating each attribute with its
	/// source: `url` when the primary route binds it from the path, `query`
	/// otherwise. With no route declared, all params degrade to `query`.
	fn params_description(&self, params: &Attribute, example: &Value) -> Value {
		let route_params: Vec<String> = match self.primary_route() {
			Some(route) => route.path().named_captures().to_vec(),
			None => {
				warn!(
					resource = self.resource().name(),
					action = self.name(),
					"no routes defined; documenting all params as query-sourced"
				);
				Vec::new()
			}
		};

		let mut description = params.describe(Some(example));
		if let Some(attributes) = description
			.get_mut("type")
			.and_then(|node| node.get_mut("attributes"))
			.and_then(Value::as_object_mut)
		{
			for (name, attribute) in attributes.iter_mut() {
				let source = if route_params.iter().any(|param| param == name) {
					"url"
				} else {
					"query"
				};
				if let Some(node) = attribute.as_object_mut() {
					node.insert("source".to_string(), json!(source));
				}
			}
		}
		description
	}

	/// Synthesize an example request URL for one route.
	///
	/// Params named by the route's captures bind to the path; of the rest,
	/// only the required ones join the query string, so the example never
	/// mixes mutually incompatible optional parameters.
	fn url_description(&self, route: &Route, params_example: Option<&Value>) -> Option<Value> {
		let example = params_example?.as_object()?;
		let params = self.params()?;

		let capture_names = route.path().named_captures();
		let mut path_values = Map::new();
		let mut query_pairs: Vec<(String, String)> = Vec::new();
		for (name, attribute) in params.attributes() {
			let Some(value) = example.get(name) else {
				continue;
			};
			if capture_names.iter().any(|capture| capture == name) {
				path_values.insert(name.clone(), value.clone());
			} else if attribute.options().is_required() {
				query_pairs.push((name.clone(), query_value(value)));
			}
		}

		let mut url = match route.path().expand(&path_values) {
			Ok(url) => url,
			Err(err) => {
				warn!(
					action = self.name(),
					route = route.path().as_str(),
					%err,
					"cannot synthesize example URL"
				);
				return None;
			}
		};
		if !query_pairs.is_empty() {
			match serde_urlencoded::to_string(&query_pairs) {
				Ok(query_string) => {
					url.push('?');
					url.push_str(&query_string);
				}
				Err(err) => {
					warn!(action = self.name(), %err, "cannot encode example query string");
				}
			}
		}

		let mut description = route.describe();
		if let Some(node) = description.as_object_mut() {
			node.insert("example".to_string(), json!(url));
		}
		Some(description)
	}
}

fn query_value(value: &Value) -> String {
	match value {
		Value::String(text) => text.clone(),
		other => other.to_string(),
	}
}
