//! Character roster builder for tests.

use crate::CharacterRoster;

/// Builder for [`CharacterRoster`] with a four-character default.
#[derive(Debug, Clone)]
pub struct RosterBuilder {
	names: Vec<String>,
	image_uris: Vec<String>,
	hit_points: Vec<u64>,
	attack_damage: Vec<u64>,
}

impl Default for RosterBuilder {
	fn default() -> Self {
		Self {
			names: vec![
				"Alpha".to_string(),
				"Bravo".to_string(),
				"Charlie".to_string(),
				"Delta".to_string(),
			],
			image_uris: (0..4).map(|i| format!("ipfs://character/{i}")).collect(),
			hit_points: vec![300, 300, 300, 300],
			attack_damage: vec![125, 150, 175, 150],
		}
	}
}

impl RosterBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_names(mut self, names: Vec<&str>) -> Self {
		self.names = names.into_iter().map(String::from).collect();
		self
	}

	pub fn with_image_uris(mut self, image_uris: Vec<&str>) -> Self {
		self.image_uris = image_uris.into_iter().map(String::from).collect();
		self
	}

	pub fn with_hit_points(mut self, hit_points: Vec<u64>) -> Self {
		self.hit_points = hit_points;
		self
	}

	pub fn with_attack_damage(mut self, attack_damage: Vec<u64>) -> Self {
		self.attack_damage = attack_damage;
		self
	}

	pub fn build(self) -> CharacterRoster {
		CharacterRoster {
			names: self.names,
			image_uris: self.image_uris,
			hit_points: self.hit_points,
			attack_damage: self.attack_damage,
		}
	}
}
