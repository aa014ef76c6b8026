//! Schema nodes and their merge semantics.

use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::builder::RecordBuilder;
use crate::example::ExampleContext;
use crate::kind::AttrKind;
use crate::media_type::MediaType;

/// Options bag attached to every attribute.
///
/// Fields are `Option`-valued so that merging two bags only overwrites the
/// entries the newer bag actually sets: options merge is last-wins, while
/// child-attribute merge (see [`Attribute::merge_attributes`]) is first-wins.
#[derive(Debug, Clone, Default)]
pub struct AttributeOptions {
	pub required: Option<bool>,
	pub description: Option<String>,
	pub default: Option<Value>,
	pub example: Option<Value>,
	/// Reference media type donating per-attribute documentation defaults.
	pub reference: Option<Arc<MediaType>>,
	/// Whether keyed lookup against this schema ignores case (headers).
	pub case_insensitive: Option<bool>,
	/// Open extension point for options this crate does not interpret.
	pub extra: IndexMap<String, Value>,
}

impl AttributeOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn required(mut self) -> Self {
		self.required = Some(true);
		self
	}

	pub fn optional(mut self) -> Self {
		self.required = Some(false);
		self
	}

	pub fn with_description(mut self, text: impl Into<String>) -> Self {
		self.description = Some(text.into());
		self
	}

	pub fn with_default(mut self, value: impl Into<Value>) -> Self {
		self.default = Some(value.into());
		self
	}

	pub fn with_example(mut self, value: impl Into<Value>) -> Self {
		self.example = Some(value.into());
		self
	}

	pub fn with_reference(mut self, media_type: Arc<MediaType>) -> Self {
		self.reference = Some(media_type);
		self
	}

	pub fn case_insensitive(mut self) -> Self {
		self.case_insensitive = Some(true);
		self
	}

	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	pub fn is_required(&self) -> bool {
		self.required.unwrap_or(false)
	}

	/// Last-wins merge: entries present in `newer` replace the current ones,
	/// everything `newer` leaves unset is kept.
	pub fn merge(&mut self, newer: AttributeOptions) {
		if newer.required.is_some() {
			self.required = newer.required;
		}
		if newer.description.is_some() {
			self.description = newer.description;
		}
		if newer.default.is_some() {
			self.default = newer.default;
		}
		if newer.example.is_some() {
			self.example = newer.example;
		}
		if newer.reference.is_some() {
			self.reference = newer.reference;
		}
		if newer.case_insensitive.is_some() {
			self.case_insensitive = newer.case_insensitive;
		}
		for (key, value) in newer.extra {
			self.extra.insert(key, value);
		}
	}
}

/// A schema node: a kind tag, an options bag and, for records, the named
/// child attributes in declaration order.
#[derive(Debug, Clone)]
pub struct Attribute {
	kind: AttrKind,
	options: AttributeOptions,
	attributes: IndexMap<String, Attribute>,
}

impl Attribute {
	/// Create a leaf attribute (no child declarations).
	pub fn new(kind: AttrKind, options: AttributeOptions) -> Self {
		Self {
			kind,
			options,
			attributes: IndexMap::new(),
		}
	}

	/// Create an attribute and run a record builder over its children.
	///
	/// When the options carry a record-rooted reference media type, children
	/// declared without description/default/example inherit those from the
	/// reference's attribute of the same name.
	pub fn build(
		kind: AttrKind,
		options: AttributeOptions,
		build: impl FnOnce(&mut RecordBuilder),
	) -> Self {
		let mut attribute = Self::new(kind, options);
		{
			let mut builder = RecordBuilder::new(&mut attribute.attributes);
			build(&mut builder);
		}
		attribute.apply_reference();
		attribute
	}

	/// Extend an existing attribute in place.
	///
	/// Options merge last-wins; the builder re-runs over the existing child
	/// map, where insertion is first-wins, so earlier-declared children are
	/// never silently replaced.
	pub fn update(&mut self, options: AttributeOptions, build: impl FnOnce(&mut RecordBuilder)) {
		self.options.merge(options);
		{
			let mut builder = RecordBuilder::new(&mut self.attributes);
			build(&mut builder);
		}
		self.apply_reference();
	}

	fn apply_reference(&mut self) {
		let Some(reference) = self.options.reference.clone() else {
			return;
		};
		if !reference.is_reference_source() {
			return;
		}
		for (name, child) in self.attributes.iter_mut() {
			let Some(source) = reference.schema().attribute(name) else {
				continue;
			};
			let options = &mut child.options;
			if options.description.is_none() {
				options.description = source.options().description.clone();
			}
			if options.default.is_none() {
				options.default = source.options().default.clone();
			}
			if options.example.is_none() {
				options.example = source.options().example.clone();
			}
		}
	}

	pub fn kind(&self) -> &AttrKind {
		&self.kind
	}

	pub fn options(&self) -> &AttributeOptions {
		&self.options
	}

	pub fn attributes(&self) -> &IndexMap<String, Attribute> {
		&self.attributes
	}

	pub fn attribute(&self, name: &str) -> Option<&Attribute> {
		self.attributes.get(name)
	}

	/// First-wins merge of child attributes: names already declared here are
	/// kept, everything else is adopted from `incoming`.
	pub fn merge_attributes(&mut self, incoming: &IndexMap<String, Attribute>) {
		for (name, attribute) in incoming {
			self.attributes
				.entry(name.clone())
				.or_insert_with(|| attribute.clone());
		}
	}

	/// Generate a representative example value for this schema.
	///
	/// Explicit `example`/`default` options win; otherwise the value is
	/// derived deterministically from the context.
	pub fn example(&self, ctx: &ExampleContext) -> Value {
		if let Some(example) = &self.options.example {
			return example.clone();
		}
		if let Some(default) = &self.options.default {
			return default.clone();
		}
		match &self.kind {
			AttrKind::Record => {
				let mut object = Map::new();
				for (name, child) in &self.attributes {
					object.insert(name.clone(), child.example(&ctx.child(name)));
				}
				Value::Object(object)
			}
			AttrKind::Map { value } => {
				// one representative entry keeps generated documents small
				let mut object = Map::new();
				object.insert("key".to_string(), ctx.child("key").value_for(*value));
				Value::Object(object)
			}
			AttrKind::Primitive(primitive) => ctx.value_for(*primitive),
		}
	}

	/// Serializable description of this schema node.
	///
	/// Record children are described recursively, each against its slice of
	/// the supplied example.
	pub fn describe(&self, example: Option<&Value>) -> Value {
		let mut tree = Map::new();
		tree.insert("type".to_string(), self.type_description(example));
		if let Some(required) = self.options.required {
			tree.insert("required".to_string(), json!(required));
		}
		if let Some(description) = &self.options.description {
			tree.insert("description".to_string(), json!(description));
		}
		if let Some(default) = &self.options.default {
			tree.insert("default".to_string(), default.clone());
		}
		if let Some(case_insensitive) = self.options.case_insensitive {
			tree.insert("case_insensitive".to_string(), json!(case_insensitive));
		}
		for (key, value) in &self.options.extra {
			tree.insert(key.clone(), value.clone());
		}
		if let Some(example) = example {
			tree.insert("example".to_string(), example.clone());
		}
		Value::Object(tree)
	}

	fn type_description(&self, example: Option<&Value>) -> Value {
		match &self.kind {
			AttrKind::Record => {
				let mut attributes = Map::new();
				for (name, child) in &self.attributes {
					let child_example = example.and_then(|value| value.get(name));
					attributes.insert(name.clone(), child.describe(child_example));
				}
				json!({ "name": "Record", "attributes": attributes })
			}
			other => json!({ "name": other.name() }),
		}
	}
}
