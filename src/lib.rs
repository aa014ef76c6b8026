//! Grappelli: a declarative REST API definition framework.
//!
//! Applications describe each API action once (its routes, request
//! parameter schema, payload schema, header schema and response templates)
//! and derive machine-readable documentation, including synthesized example
//! request URLs, from that single declaration.
//!
//! This facade crate re-exports the framework's member crates:
//!
//! - [`schema`]: composable attribute schemas with merge/override semantics
//! - [`routing`]: path templates, route values and the routing builder
//! - [`api`]: registries, traits, resources and [`api::ActionDefinition`]

pub use grappelli_api as api;
pub use grappelli_routing as routing;
pub use grappelli_schema as schema;

/// Commonly used types, importable in one line.
pub mod prelude {
	pub use grappelli_api::{
		ActionDefinition, ApiInfo, ApiRegistry, ConfigError, ResourceDefinition, Response,
		ResponseArgs, ResponseTemplate, Trait,
	};
	pub use grappelli_routing::{PathTemplate, Route, RoutingBuilder};
	pub use grappelli_schema::{
		AttrKind, Attribute, AttributeOptions, ExampleContext, MediaType, Primitive, RecordBuilder,
	};
}
