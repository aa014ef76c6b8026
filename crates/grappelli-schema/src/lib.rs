//! Composable attribute schemas for the Grappelli API definition framework.
//!
//! An [`Attribute`] is a schema node: a closed kind tag ([`AttrKind`]), an
//! options bag ([`AttributeOptions`]) and, for record kinds, named child
//! attributes. Schemas are built incrementally through [`RecordBuilder`]
//! closures and composed across declaration layers with two deliberate,
//! opposite merge precedences:
//!
//! - child attributes merge **first-wins** (an earlier declaration of a name
//!   is never silently replaced by a later one)
//! - options merge **last-wins** (later layers override earlier defaults)
//!
//! Example values are generated deterministically from an
//! [`ExampleContext`], so derived documentation is stable across runs.

pub mod attribute;
pub mod builder;
pub mod example;
pub mod kind;
pub mod media_type;

pub use attribute::{Attribute, AttributeOptions};
pub use builder::RecordBuilder;
pub use example::ExampleContext;
pub use kind::{AttrKind, Primitive};
pub use media_type::MediaType;
