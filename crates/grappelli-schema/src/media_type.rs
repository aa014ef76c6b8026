//! Canonical media-type schemas used as reference sources.

use crate::attribute::Attribute;
use crate::kind::AttrKind;

/// A named, canonical schema.
///
/// When a resource declares a media type, attribute definitions on its
/// actions may reference it: children declared without documentation,
/// defaults or examples inherit those from the media type's attribute of the
/// same name.
#[derive(Debug, Clone)]
pub struct MediaType {
	name: String,
	schema: Attribute,
}

impl MediaType {
	pub fn new(name: impl Into<String>, schema: Attribute) -> Self {
		Self { name: name.into(), schema }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn schema(&self) -> &Attribute {
		&self.schema
	}

	/// Only record-rooted media types can donate per-attribute defaults.
	pub fn is_reference_source(&self) -> bool {
		matches!(self.schema.kind(), AttrKind::Record)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::attribute::AttributeOptions;
	use crate::kind::Primitive;

	#[test]
	fn test_reference_source_eligibility() {
		let record = Attribute::new(AttrKind::Record, AttributeOptions::new());
		assert!(MediaType::new("Widget", record).is_reference_source());

		let scalar = Attribute::new(
			AttrKind::Primitive(Primitive::String),
			AttributeOptions::new(),
		);
		assert!(!MediaType::new("Blob", scalar).is_reference_source());
	}
}
