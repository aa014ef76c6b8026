//! Route values, path templates and the routing builder.
//!
//! A [`PathTemplate`] is a concrete path with `{name}` capture segments; a
//! [`Route`] pairs a template with an HTTP verb and an optional name. Routes
//! are declared through a [`RoutingBuilder`] seeded with the owning
//! resource's version, base path and routing-prefix stack, and are immutable
//! once the builder finishes.

pub mod builder;
pub mod path;
pub mod route;

pub use builder::RoutingBuilder;
pub use path::{PathError, PathTemplate};
pub use route::Route;
