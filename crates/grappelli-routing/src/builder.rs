//! Ephemeral builder evaluated by an action's `routing` block.

use http::Method;

use crate::path::PathTemplate;
use crate::route::Route;

/// Accumulates routes against a version, base path and prefix stack.
///
/// The builder is seeded by the owning action (API base path + resource
/// version prefix, resource routing prefix) and discarded after the block
/// runs; only the accumulated routes are retained.
#[derive(Debug)]
pub struct RoutingBuilder {
	version: Option<String>,
	base: String,
	prefix: Vec<String>,
	routes: Vec<Route>,
}

impl RoutingBuilder {
	pub fn new(version: Option<String>, base: impl Into<String>, prefix: Vec<String>) -> Self {
		Self {
			version,
			base: base.into(),
			prefix,
			routes: Vec::new(),
		}
	}

	/// Push a prefix segment applied to subsequently declared routes.
	pub fn push_prefix(&mut self, segment: impl Into<String>) -> &mut Self {
		self.prefix.push(segment.into());
		self
	}

	/// Pop the most recently pushed prefix segment.
	pub fn pop_prefix(&mut self) -> &mut Self {
		self.prefix.pop();
		self
	}

	/// Declare a route; returns it for in-place naming.
	pub fn route(&mut self, verb: Method, path: &str) -> &mut Route {
		let template = PathTemplate::parse(self.full_path(path));
		let mut route = Route::new(verb, template);
		if let Some(version) = &self.version {
			route.set_version(version.clone());
		}
		self.routes.push(route);
		let last = self.routes.len() - 1;
		&mut self.routes[last]
	}

	pub fn get(&mut self, path: &str) -> &mut Route {
		self.route(Method::GET, path)
	}

	pub fn post(&mut self, path: &str) -> &mut Route {
		self.route(Method::POST, path)
	}

	pub fn put(&mut self, path: &str) -> &mut Route {
		self.route(Method::PUT, path)
	}

	pub fn patch(&mut self, path: &str) -> &mut Route {
		self.route(Method::PATCH, path)
	}

	pub fn delete(&mut self, path: &str) -> &mut Route {
		self.route(Method::DELETE, path)
	}

	pub fn head(&mut self, path: &str) -> &mut Route {
		self.route(Method::HEAD, path)
	}

	pub fn options(&mut self, path: &str) -> &mut Route {
		self.route(Method::OPTIONS, path)
	}

	/// Routes accumulated so far, inspectable from within the block.
	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	pub fn finish(self) -> Vec<Route> {
		self.routes
	}

	fn full_path(&self, path: &str) -> String {
		let mut raw = String::with_capacity(self.base.len() + path.len() + 16);
		raw.push_str(&self.base);
		for segment in &self.prefix {
			raw.push('/');
			raw.push_str(segment);
		}
		raw.push('/');
		raw.push_str(path);
		normalize(&raw)
	}
}

/// Collapse duplicate slashes, strip the trailing one, force the leading one.
fn normalize(raw: &str) -> String {
	let mut path = String::with_capacity(raw.len());
	let mut previous_was_slash = false;
	for ch in raw.chars() {
		if ch == '/' {
			if previous_was_slash {
				continue;
			}
			previous_was_slash = true;
		} else {
			previous_was_slash = false;
		}
		path.push(ch);
	}
	if path.len() > 1 && path.ends_with('/') {
		path.pop();
	}
	if !path.starts_with('/') {
		path.insert(0, '/');
	}
	path
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/api/v1.0//widgets/", "/api/v1.0/widgets")]
	#[case("//", "/")]
	#[case("api", "/api")]
	#[case("/api/v1.0/{id}", "/api/v1.0/{id}")]
	fn test_normalize(#[case] raw: &str, #[case] expected: &str) {
		assert_eq!(normalize(raw), expected);
	}

	#[test]
	fn test_routes_are_anchored_at_base_and_prefix() {
		let mut builder = RoutingBuilder::new(
			Some("1.0".to_string()),
			"/api/v1.0",
			vec!["widgets".to_string()],
		);
		builder.get("/{id}").named("show");
		builder.post("");

		let routes = builder.finish();
		assert_eq!(routes[0].path().as_str(), "/api/v1.0/widgets/{id}");
		assert_eq!(routes[0].name(), Some("show"));
		assert_eq!(routes[0].version(), Some("1.0"));
		assert_eq!(routes[1].path().as_str(), "/api/v1.0/widgets");
		assert_eq!(routes[1].verb(), &Method::POST);
		assert_eq!(routes[1].name(), None);
	}

	#[test]
	fn test_prefix_stack() {
		let mut builder = RoutingBuilder::new(None, "/api", vec![]);
		builder.push_prefix("admin");
		builder.get("/widgets");
		builder.pop_prefix();
		builder.get("/widgets");

		let routes = builder.finish();
		assert_eq!(routes[0].path().as_str(), "/api/admin/widgets");
		assert_eq!(routes[1].path().as_str(), "/api/widgets");
	}

	#[test]
	fn test_routes_are_inspectable_mid_build() {
		let mut builder = RoutingBuilder::new(None, "/api", vec![]);
		builder.get("/widgets");
		assert_eq!(builder.routes().len(), 1);
		assert_eq!(builder.routes()[0].path().as_str(), "/api/widgets");

		builder.delete("/widgets/{id}");
		assert_eq!(builder.routes().len(), 2);
	}

	#[test]
	fn test_declaration_order_is_kept() {
		let mut builder = RoutingBuilder::new(None, "/api", vec![]);
		builder.get("/widgets");
		builder.delete("/widgets/{id}");

		let routes = builder.finish();
		assert_eq!(routes[0].verb(), &Method::GET);
		assert_eq!(routes[1].verb(), &Method::DELETE);
	}
}
