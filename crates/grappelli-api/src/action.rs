//! Action definitions: the orchestrating entity of an API declaration.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use once_cell::sync::OnceCell;
use serde_json::{Map, Value};

use grappelli_routing::{Route, RoutingBuilder};
use grappelli_schema::{AttrKind, Attribute, AttributeOptions, MediaType, RecordBuilder};

use crate::error::ConfigError;
use crate::registry::ApiRegistry;
use crate::resource::ResourceDefinition;
use crate::response::{Response, ResponseArgs};

/// Configuration closure applied to an action during construction.
pub type ActionConfig = Arc<dyn Fn(&mut ActionDefinition) -> Result<(), ConfigError> + Send + Sync>;

/// One documented, routable operation of a resource.
///
/// Constructed once at application load time, in a fixed order: collections
/// are initialized, the resource's media type is checked as a reference
/// schema source, the routing base is computed, the resource's traits are
/// applied in declaration order, the resource's action defaults run, and
/// finally the action's own configuration closure runs. Later steps may
/// override or extend anything earlier steps established, never the reverse.
/// After construction the definition is read-only; [`describe`] and
/// [`wire_header_keys`] are safe under concurrent readers.
///
/// [`describe`]: ActionDefinition::describe
/// [`wire_header_keys`]: ActionDefinition::wire_header_keys
pub struct ActionDefinition {
	name: String,
	resource: Arc<ResourceDefinition>,
	registry: Arc<ApiRegistry>,
	description: Option<String>,
	metadata: Map<String, Value>,
	traits: Vec<String>,
	routes: Vec<Route>,
	named_routes: IndexMap<String, Route>,
	params: Option<Attribute>,
	payload: Option<Attribute>,
	headers: Option<Attribute>,
	responses: IndexMap<String, Response>,
	reference_media_type: Option<Arc<MediaType>>,
	route_base: String,
	route_prefix: Vec<String>,
	wire_header_key_cache: OnceCell<IndexMap<String, String>>,
}

impl ActionDefinition {
	pub fn new(
		name: impl Into<String>,
		resource: Arc<ResourceDefinition>,
		registry: Arc<ApiRegistry>,
		config: impl FnOnce(&mut ActionDefinition) -> Result<(), ConfigError>,
	) -> Result<Self, ConfigError> {
		let name = name.into();
		let info = registry.info(resource.version()).ok_or_else(|| {
			ConfigError::invalid(format!(
				"no API info registered for version `{}` (action `{}`)",
				resource.version(),
				name
			))
		})?;
		let route_base = format!("{}{}", info.base_path(), resource.version_prefix());
		let reference_media_type = resource
			.media_type()
			.filter(|media| media.is_reference_source())
			.cloned();

		let mut action = Self {
			name,
			description: None,
			metadata: Map::new(),
			traits: Vec::new(),
			routes: Vec::new(),
			named_routes: IndexMap::new(),
			params: None,
			payload: None,
			headers: None,
			responses: IndexMap::new(),
			reference_media_type,
			route_base,
			route_prefix: resource.routing_prefix().to_vec(),
			resource: Arc::clone(&resource),
			registry: Arc::clone(&registry),
			wire_header_key_cache: OnceCell::new(),
		};

		for trait_name in resource.traits().to_vec() {
			action.apply_trait(&trait_name)?;
		}
		if let Some(defaults) = resource.action_defaults() {
			(defaults.as_ref())(&mut action)?;
		}
		config(&mut action)?;
		Ok(action)
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn resource(&self) -> &ResourceDefinition {
		&self.resource
	}

	pub(crate) fn registry(&self) -> &ApiRegistry {
		&self.registry
	}

	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Set the documentation text.
	pub fn set_description(&mut self, text: impl Into<String>) -> &mut Self {
		self.description = Some(text.into());
		self
	}

	/// Opaque user-defined metadata, carried into generated documents.
	pub fn metadata(&self) -> &Map<String, Value> {
		&self.metadata
	}

	/// Merge entries into the metadata bag. Merge-only: existing keys may be
	/// overwritten, none are ever removed.
	pub fn merge_metadata(&mut self, entries: Map<String, Value>) -> &mut Self {
		for (key, value) in entries {
			self.metadata.insert(key, value);
		}
		self
	}

	/// Exclude this action from generated documentation.
	pub fn nodoc(&mut self) -> &mut Self {
		self.metadata
			.insert("doc_visibility".to_string(), Value::String("none".to_string()));
		self
	}

	/// Names of the traits applied so far, in application order.
	pub fn traits(&self) -> &[String] {
		&self.traits
	}

	/// Apply a registered trait by name.
	///
	/// Reapplying a trait layers its configuration again; there is no dedup.
	pub fn apply_trait(&mut self, trait_name: &str) -> Result<(), ConfigError> {
		let definition = match self.registry.trait_def(trait_name) {
			Some(definition) => definition.clone(),
			None => {
				return Err(ConfigError::InvalidTrait { name: trait_name.to_string() });
			}
		};
		definition.apply(self)?;
		self.traits.push(trait_name.to_string());
		Ok(())
	}

	/// Alias for [`apply_trait`](ActionDefinition::apply_trait).
	pub fn use_trait(&mut self, trait_name: &str) -> Result<(), ConfigError> {
		self.apply_trait(trait_name)
	}

	pub fn params(&self) -> Option<&Attribute> {
		self.params.as_ref()
	}

	pub fn payload(&self) -> Option<&Attribute> {
		self.payload.as_ref()
	}

	pub fn headers(&self) -> Option<&Attribute> {
		self.headers.as_ref()
	}

	pub fn responses(&self) -> &IndexMap<String, Response> {
		&self.responses
	}

	pub fn routes(&self) -> &[Route] {
		&self.routes
	}

	/// The first-declared route; decides which params are path-sourced.
	pub fn primary_route(&self) -> Option<&Route> {
		self.routes.first()
	}

	/// Routes that were given an explicit name, keyed by that name.
	pub fn named_routes(&self) -> &IndexMap<String, Route> {
		&self.named_routes
	}

	/// Declare or extend the request parameter schema.
	///
	/// On first declaration, version-wide base parameters are merged in
	/// first-wins, so action-declared params of the same name win.
	pub fn define_params(
		&mut self,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Result<&mut Self, ConfigError> {
		self.define_params_with(AttrKind::Record, AttributeOptions::new(), build)
	}

	/// Declare or extend the params schema with an explicit root kind.
	pub fn define_params_with(
		&mut self,
		kind: AttrKind,
		options: AttributeOptions,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Result<&mut Self, ConfigError> {
		if let Some(existing) = self.params.as_mut() {
			if !existing.kind().can_extend_with(&kind) {
				return Err(ConfigError::invalid(format!(
					"invalid type received for extending params: {}",
					kind.name()
				)));
			}
			existing.update(options, build);
		} else {
			let mut params = self.create_attribute(kind, options, build);
			if let Some(info) = self.registry.info(self.resource.version()) {
				if let Some(base) = info.base_params() {
					params.merge_attributes(base.attributes());
				}
			}
			self.params = Some(params);
		}
		Ok(self)
	}

	/// Declare or extend the request payload schema.
	pub fn define_payload(
		&mut self,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Result<&mut Self, ConfigError> {
		self.define_payload_with(AttrKind::Record, AttributeOptions::new(), build)
	}

	/// Declare or extend the payload schema with an explicit root kind.
	pub fn define_payload_with(
		&mut self,
		kind: AttrKind,
		options: AttributeOptions,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Result<&mut Self, ConfigError> {
		if let Some(existing) = self.payload.as_mut() {
			if !existing.kind().can_extend_with(&kind) {
				return Err(ConfigError::invalid(format!(
					"invalid type received for extending payload: {}",
					kind.name()
				)));
			}
			existing.update(options, build);
		} else {
			self.payload = Some(self.create_attribute(kind, options, build));
		}
		Ok(self)
	}

	/// Declare or extend the request header schema.
	///
	/// Header lookup is case-insensitive unless the options say otherwise.
	/// Every successful mutation resets the cached wire-key table.
	pub fn define_headers(
		&mut self,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Result<&mut Self, ConfigError> {
		self.define_headers_with(AttrKind::Record, AttributeOptions::new(), build)
	}

	/// Declare or extend the header schema with an explicit root kind.
	pub fn define_headers_with(
		&mut self,
		kind: AttrKind,
		options: AttributeOptions,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Result<&mut Self, ConfigError> {
		if let Some(existing) = self.headers.as_mut() {
			if !existing.kind().can_extend_with(&kind) {
				return Err(ConfigError::invalid(format!(
					"invalid type received for extending headers: {}",
					kind.name()
				)));
			}
			existing.update(options, build);
		} else {
			let mut options = options;
			if options.case_insensitive.is_none() {
				options.case_insensitive = Some(true);
			}
			self.headers = Some(self.create_attribute(kind, options, build));
		}
		self.wire_header_key_cache = OnceCell::new();
		Ok(self)
	}

	/// Wire-format header key table for the server adapter.
	///
	/// Maps CGI-convention keys (upcased, hyphens to underscores, `HTTP_`
	/// prefix except `CONTENT_TYPE` and `CONTENT_LENGTH`, which pass through
	/// unprefixed) back to the declared attribute names, so the adapter
	/// avoids per-request string transformation. Computed lazily from the
	/// header schema; a concurrent race recomputes the same table.
	pub fn wire_header_keys(&self) -> &IndexMap<String, String> {
		self.wire_header_key_cache.get_or_init(|| {
			let mut table = IndexMap::new();
			if let Some(headers) = &self.headers {
				for declared in headers.attributes().keys() {
					let normalized = declared.replace('-', "_").to_uppercase();
					let wire = if normalized == "CONTENT_TYPE" || normalized == "CONTENT_LENGTH" {
						normalized
					} else {
						format!("HTTP_{normalized}")
					};
					table.insert(wire, declared.clone());
				}
			}
			table
		})
	}

	/// Declare the action's routes.
	///
	/// The builder is seeded with the resource's version, the API base path
	/// plus version prefix, and the resource routing prefix. Invoking
	/// `routing` again replaces the previous route list wholesale.
	pub fn routing(&mut self, build: impl FnOnce(&mut RoutingBuilder)) -> &mut Self {
		let mut builder = RoutingBuilder::new(
			Some(self.resource.version().to_string()),
			self.route_base.clone(),
			self.route_prefix.clone(),
		);
		build(&mut builder);
		self.routes = builder.finish();
		self.named_routes = IndexMap::new();
		for route in &self.routes {
			if let Some(name) = route.name() {
				self.named_routes.insert(name.to_string(), route.clone());
			}
		}
		self
	}

	/// Bind a registered response template to this action.
	///
	/// Duplicate names overwrite the earlier binding.
	pub fn respond_with(&mut self, name: &str, args: ResponseArgs) -> Result<&mut Self, ConfigError> {
		let template = match self.registry.response_template(name) {
			Some(template) => template.clone(),
			None => {
				return Err(ConfigError::invalid(format!(
					"response template `{name}` is not registered"
				)));
			}
		};
		let compiled = template.compile(self, args);
		self.responses.insert(name.to_string(), compiled);
		Ok(self)
	}

	fn create_attribute(
		&self,
		kind: AttrKind,
		mut options: AttributeOptions,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Attribute {
		if options.reference.is_none() {
			if let Some(media) = &self.reference_media_type {
				options.reference = Some(Arc::clone(media));
			}
		}
		Attribute::build(kind, options, build)
	}
}

impl fmt::Debug for ActionDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionDefinition")
			.field("name", &self.name)
			.field("resource", &self.resource.name())
			.field("traits", &self.traits)
			.field("routes", &self.routes)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::registry::ApiInfo;
	use crate::traits::Trait;
	use grappelli_schema::Primitive;
	use rstest::rstest;

	fn registry() -> Arc<ApiRegistry> {
		let mut registry = ApiRegistry::new();
		registry.register_info(ApiInfo::new("1.0", "/api"));
		registry.register_trait(Trait::new("authenticated", |action| {
			action.define_headers(|headers| {
				headers.string("Authorization", AttributeOptions::new().required());
			})?;
			Ok(())
		}));
		Arc::new(registry)
	}

	fn resource() -> Arc<ResourceDefinition> {
		Arc::new(ResourceDefinition::new("widgets", "1.0").with_routing_prefix("widgets"))
	}

	fn action(
		config: impl FnOnce(&mut ActionDefinition) -> Result<(), ConfigError>,
	) -> ActionDefinition {
		ActionDefinition::new("index", resource(), registry(), config).unwrap()
	}

	#[test]
	fn test_unknown_trait_fails() {
		let err = ActionDefinition::new("index", resource(), registry(), |action| {
			action.apply_trait("nonexistent")
		})
		.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidTrait { name } if name == "nonexistent"));
	}

	#[test]
	fn test_unknown_version_fails() {
		let resource = Arc::new(ResourceDefinition::new("widgets", "9.9"));
		let err = ActionDefinition::new("index", resource, registry(), |_| Ok(())).unwrap_err();
		assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
	}

	#[test]
	fn test_trait_reapplication_layers_twice() {
		let action = action(|action| {
			action.apply_trait("authenticated")?;
			action.apply_trait("authenticated")?;
			Ok(())
		});
		assert_eq!(action.traits(), ["authenticated", "authenticated"]);
		// schema effects stay idempotent through first-wins child merge
		assert_eq!(action.headers().unwrap().attributes().len(), 1);
	}

	#[rstest]
	#[case("X-Request-Id", "HTTP_X_REQUEST_ID")]
	#[case("Content-Type", "CONTENT_TYPE")]
	#[case("Content-Length", "CONTENT_LENGTH")]
	#[case("Accept", "HTTP_ACCEPT")]
	fn test_wire_header_keys(#[case] declared: &str, #[case] wire: &str) {
		let action = action(|action| {
			action.define_headers(|headers| {
				headers.string(declared, AttributeOptions::new());
			})?;
			Ok(())
		});
		assert_eq!(
			action.wire_header_keys().get(wire).map(String::as_str),
			Some(declared)
		);
	}

	#[test]
	fn test_wire_header_keys_recomputed_after_mutation() {
		let mut action = action(|action| {
			action.define_headers(|headers| {
				headers.string("X-One", AttributeOptions::new());
			})?;
			Ok(())
		});
		assert_eq!(action.wire_header_keys().len(), 1);

		action
			.define_headers(|headers| {
				headers.string("X-Two", AttributeOptions::new());
			})
			.unwrap();
		assert_eq!(action.wire_header_keys().len(), 2);
		assert!(action.wire_header_keys().contains_key("HTTP_X_TWO"));
	}

	#[test]
	fn test_headers_default_to_case_insensitive() {
		let action = action(|action| {
			action.define_headers(|headers| {
				headers.string("X-Request-Id", AttributeOptions::new());
			})?;
			Ok(())
		});
		assert_eq!(action.headers().unwrap().options().case_insensitive, Some(true));
	}

	#[test]
	fn test_routing_replaces_prior_routes() {
		let mut action = action(|action| {
			action.routing(|routes| {
				routes.get("/{id}").named("show");
			});
			Ok(())
		});
		assert!(action.named_routes().contains_key("show"));

		action.routing(|routes| {
			routes.get("").named("list");
		});
		assert_eq!(action.routes().len(), 1);
		assert!(action.named_routes().contains_key("list"));
		assert!(!action.named_routes().contains_key("show"));
	}

	#[test]
	fn test_routes_anchor_at_base_and_prefix() {
		let action = action(|action| {
			action.routing(|routes| {
				routes.get("/{id}");
			});
			Ok(())
		});
		let route = action.primary_route().unwrap();
		assert_eq!(route.path().as_str(), "/api/v1.0/widgets/{id}");
		assert_eq!(route.version(), Some("1.0"));
	}

	#[test]
	fn test_params_extension_with_incompatible_kind_fails() {
		let err = ActionDefinition::new("index", resource(), registry(), |action| {
			action.define_params(|params| {
				params.integer("id", AttributeOptions::new().required());
			})?;
			action.define_params_with(
				AttrKind::Map { value: Primitive::String },
				AttributeOptions::new(),
				|_| {},
			)?;
			Ok(())
		})
		.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
	}

	#[test]
	fn test_payload_extension_onto_map_root_fails() {
		let err = ActionDefinition::new("create", resource(), registry(), |action| {
			action.define_payload_with(
				AttrKind::Map { value: Primitive::String },
				AttributeOptions::new(),
				|_| {},
			)?;
			action.define_payload(|payload| {
				payload.string("name", AttributeOptions::new());
			})?;
			Ok(())
		})
		.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
	}

	#[test]
	fn test_params_extension_merges() {
		let action = action(|action| {
			action.define_params(|params| {
				params.integer("id", AttributeOptions::new().required());
			})?;
			action.define_params(|params| {
				params.string("id", AttributeOptions::new());
				params.boolean("verbose", AttributeOptions::new());
			})?;
			Ok(())
		});
		let params = action.params().unwrap();
		// first declaration of `id` wins; `verbose` is added
		assert_eq!(
			params.attribute("id").unwrap().kind(),
			&AttrKind::Primitive(Primitive::Integer)
		);
		assert!(params.attribute("verbose").is_some());
	}

	#[test]
	fn test_debug_names_action_and_resource() {
		let action = action(|action| {
			action.routing(|routes| {
				routes.get("/{id}");
			});
			Ok(())
		});
		let rendered = format!("{action:?}");
		assert!(rendered.contains("\"index\""));
		assert!(rendered.contains("\"widgets\""));
		assert!(rendered.contains("/api/v1.0/widgets/{id}"));
	}

	#[test]
	fn test_nodoc_sets_metadata_flag() {
		let action = action(|action| {
			action.nodoc();
			Ok(())
		});
		assert_eq!(
			action.metadata().get("doc_visibility"),
			Some(&Value::String("none".to_string()))
		);
	}

	#[test]
	fn test_unknown_response_template_fails() {
		let err = ActionDefinition::new("index", resource(), registry(), |action| {
			action.respond_with("no_such_template", ResponseArgs::new())?;
			Ok(())
		})
		.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidConfiguration { .. }));
	}
}
