//! Closed enumeration of schema kinds and the extension compatibility table.

/// Primitive leaf kinds supported by the schema engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
	String,
	Integer,
	Float,
	Boolean,
	DateTime,
	Uuid,
}

impl Primitive {
	pub fn name(&self) -> &'static str {
		match self {
			Primitive::String => "String",
			Primitive::Integer => "Integer",
			Primitive::Float => "Float",
			Primitive::Boolean => "Boolean",
			Primitive::DateTime => "DateTime",
			Primitive::Uuid => "Uuid",
		}
	}
}

/// Root kind of a schema node.
///
/// A closed tag enumeration: whether an existing schema may be extended with
/// additional fields is decided by the explicit compatibility table in
/// [`AttrKind::can_extend_with`], never by open-ended subtype checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrKind {
	/// Structured record with named, individually typed fields.
	Record,
	/// Homogeneous string-keyed map.
	Map { value: Primitive },
	/// A single leaf value.
	Primitive(Primitive),
}

impl AttrKind {
	/// Human-readable kind name used in error messages and description trees.
	pub fn name(&self) -> String {
		match self {
			AttrKind::Record => "Record".to_string(),
			AttrKind::Map { value } => format!("Map<String, {}>", value.name()),
			AttrKind::Primitive(value) => value.name().to_string(),
		}
	}

	/// Compatibility table for schema extension: only record roots accept
	/// additional fields, and only from another record declaration.
	pub fn can_extend_with(&self, requested: &AttrKind) -> bool {
		matches!(self, AttrKind::Record) && matches!(requested, AttrKind::Record)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(AttrKind::Record, AttrKind::Record, true)]
	#[case(AttrKind::Record, AttrKind::Map { value: Primitive::String }, false)]
	#[case(AttrKind::Record, AttrKind::Primitive(Primitive::Integer), false)]
	#[case(AttrKind::Map { value: Primitive::String }, AttrKind::Record, false)]
	#[case(AttrKind::Primitive(Primitive::String), AttrKind::Record, false)]
	fn test_extension_compatibility(
		#[case] existing: AttrKind,
		#[case] requested: AttrKind,
		#[case] compatible: bool,
	) {
		assert_eq!(existing.can_extend_with(&requested), compatible);
	}

	#[test]
	fn test_kind_names() {
		assert_eq!(AttrKind::Record.name(), "Record");
		assert_eq!(
			AttrKind::Map { value: Primitive::String }.name(),
			"Map<String, String>"
		);
		assert_eq!(AttrKind::Primitive(Primitive::Uuid).name(), "Uuid");
	}
}
