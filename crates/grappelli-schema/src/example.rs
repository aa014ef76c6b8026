//! Deterministic example value generation.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::kind::Primitive;

const WORDS: &[&str] = &[
	"alpha", "bravo", "charlie", "delta", "echo", "foxtrot", "golf", "hotel", "india", "juliett",
];

/// Seed for example generation.
///
/// Values are derived from the context seed and the attribute's path within
/// the schema, so the same context always yields the same example tree and
/// generated documentation stays stable across runs.
#[derive(Debug, Clone, Default)]
pub struct ExampleContext {
	seed: u64,
	path: Vec<String>,
}

impl ExampleContext {
	pub fn new(seed: u64) -> Self {
		Self { seed, path: Vec::new() }
	}

	/// Context for a named child of the current node.
	pub fn child(&self, name: &str) -> Self {
		let mut path = self.path.clone();
		path.push(name.to_string());
		Self { seed: self.seed, path }
	}

	fn rng(&self) -> StdRng {
		let mut hasher = DefaultHasher::new();
		self.seed.hash(&mut hasher);
		self.path.hash(&mut hasher);
		StdRng::seed_from_u64(hasher.finish())
	}

	/// Representative value for a primitive leaf at this position.
	pub fn value_for(&self, primitive: Primitive) -> Value {
		let mut rng = self.rng();
		match primitive {
			Primitive::String => json!(WORDS[rng.gen_range(0..WORDS.len())]),
			Primitive::Integer => json!(rng.gen_range(1..=1000)),
			Primitive::Float => json!(rng.gen_range(1..=10_000) as f64 / 100.0),
			Primitive::Boolean => json!(rng.gen_bool(0.5)),
			Primitive::DateTime => json!(format!(
				"2026-{:02}-{:02}T{:02}:{:02}:00Z",
				rng.gen_range(1..=12),
				rng.gen_range(1..=28),
				rng.gen_range(0..24),
				rng.gen_range(0..60)
			)),
			Primitive::Uuid => json!(Uuid::from_u128(rng.r#gen::<u128>()).to_string()),
		}
	}
}
