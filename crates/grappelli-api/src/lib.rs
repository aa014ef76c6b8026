//! Action definitions, registries and documentation derivation.
//!
//! The central entity is [`ActionDefinition`]: one documented, routable
//! operation of a resource. An action is constructed once at application
//! load time (resource traits first, then resource defaults, then the
//! action's own configuration closure, so later layers always take
//! precedence) and is read-only afterwards. [`ActionDefinition::describe`]
//! derives the machine-readable description tree, including synthesized
//! example request URLs that partition parameters between path segments and
//! the query string.
//!
//! Registries ([`ApiRegistry`]) are explicit objects shared by `Arc` rather
//! than hidden globals, so tests can build isolated registries.

pub mod action;
mod describe;
pub mod error;
pub mod registry;
pub mod resource;
pub mod response;
pub mod traits;

pub use action::{ActionConfig, ActionDefinition};
pub use error::ConfigError;
pub use registry::{ApiInfo, ApiRegistry, DocDecoration};
pub use resource::ResourceDefinition;
pub use response::{Response, ResponseArgs, ResponseTemplate};
pub use traits::Trait;
