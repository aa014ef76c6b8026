//! Explicit builder handed to schema configuration closures.

use indexmap::IndexMap;

use crate::attribute::{Attribute, AttributeOptions};
use crate::kind::{AttrKind, Primitive};

/// Declares the named children of a record schema.
///
/// Configuration closures receive this builder explicitly instead of an
/// implicit evaluation context. Declarations are first-wins: re-declaring an
/// existing name leaves the earlier definition in place, which protects
/// action-declared attributes from later defaults of the same name.
pub struct RecordBuilder<'a> {
	attributes: &'a mut IndexMap<String, Attribute>,
}

impl<'a> RecordBuilder<'a> {
	pub(crate) fn new(attributes: &'a mut IndexMap<String, Attribute>) -> Self {
		Self { attributes }
	}

	/// Declare a child attribute. No-op when the name is already declared.
	pub fn attribute(&mut self, name: &str, kind: AttrKind, options: AttributeOptions) -> &mut Self {
		self.attributes
			.entry(name.to_string())
			.or_insert_with(|| Attribute::new(kind, options));
		self
	}

	/// Declare a nested record child with its own builder closure.
	pub fn record(
		&mut self,
		name: &str,
		options: AttributeOptions,
		build: impl FnOnce(&mut RecordBuilder),
	) -> &mut Self {
		self.attributes
			.entry(name.to_string())
			.or_insert_with(|| Attribute::build(AttrKind::Record, options, build));
		self
	}

	pub fn string(&mut self, name: &str, options: AttributeOptions) -> &mut Self {
		self.attribute(name, AttrKind::Primitive(Primitive::String), options)
	}

	pub fn integer(&mut self, name: &str, options: AttributeOptions) -> &mut Self {
		self.attribute(name, AttrKind::Primitive(Primitive::Integer), options)
	}

	pub fn float(&mut self, name: &str, options: AttributeOptions) -> &mut Self {
		self.attribute(name, AttrKind::Primitive(Primitive::Float), options)
	}

	pub fn boolean(&mut self, name: &str, options: AttributeOptions) -> &mut Self {
		self.attribute(name, AttrKind::Primitive(Primitive::Boolean), options)
	}

	pub fn datetime(&mut self, name: &str, options: AttributeOptions) -> &mut Self {
		self.attribute(name, AttrKind::Primitive(Primitive::DateTime), options)
	}

	pub fn uuid(&mut self, name: &str, options: AttributeOptions) -> &mut Self {
		self.attribute(name, AttrKind::Primitive(Primitive::Uuid), options)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_declaration_order_is_preserved() {
		let schema = Attribute::build(AttrKind::Record, AttributeOptions::new(), |record| {
			record
				.integer("id", AttributeOptions::new())
				.string("name", AttributeOptions::new())
				.boolean("active", AttributeOptions::new());
		});
		let names: Vec<&String> = schema.attributes().keys().collect();
		assert_eq!(names, ["id", "name", "active"]);
	}

	#[test]
	fn test_nested_records() {
		let schema = Attribute::build(AttrKind::Record, AttributeOptions::new(), |record| {
			record.record("filters", AttributeOptions::new(), |filters| {
				filters.string("status", AttributeOptions::new().required());
			});
		});
		let filters = schema.attribute("filters").unwrap();
		assert_eq!(filters.kind(), &AttrKind::Record);
		assert!(filters.attribute("status").unwrap().options().is_required());
	}

	#[test]
	fn test_redeclaration_is_a_no_op() {
		let schema = Attribute::build(AttrKind::Record, AttributeOptions::new(), |record| {
			record.integer("id", AttributeOptions::new().required());
			record.string("id", AttributeOptions::new());
		});
		assert_eq!(
			schema.attribute("id").unwrap().kind(),
			&AttrKind::Primitive(Primitive::Integer)
		);
	}
}
