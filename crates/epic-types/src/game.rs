//! Game contract constructor types.
//!
//! The game contract is deployed with a roster of playable characters given as
//! four parallel arrays (names, image URIs, hit points and attack damage) and,
//! for the boss-battle version of the contract, a single boss entity.

use alloy_dyn_abi::DynSolValue;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when a character roster is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
	/// The four parallel arrays do not have the same length.
	#[error(
		"Roster arrays must have equal length: names={names}, image_uris={image_uris}, \
		 hit_points={hit_points}, attack_damage={attack_damage}"
	)]
	LengthMismatch {
		names: usize,
		image_uris: usize,
		hit_points: usize,
		attack_damage: usize,
	},
	/// The roster contains no characters.
	#[error("Roster must contain at least one character")]
	Empty,
	/// A character index does not exist in the roster.
	#[error("Character index {index} is out of range for a roster of {len}")]
	IndexOutOfRange { index: u64, len: usize },
}

/// Playable characters passed to the game contract constructor.
///
/// Kept as parallel arrays because that is the shape of the constructor
/// signature. Use [`CharacterRoster::validate`] before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRoster {
	/// Character display names.
	pub names: Vec<String>,
	/// Character image URIs, one per name.
	pub image_uris: Vec<String>,
	/// Starting hit points, one per name.
	pub hit_points: Vec<u64>,
	/// Attack damage, one per name.
	pub attack_damage: Vec<u64>,
}

impl CharacterRoster {
	/// Builds a roster from string slices and numeric slices.
	pub fn from_parts(
		names: &[&str],
		image_uris: &[&str],
		hit_points: &[u64],
		attack_damage: &[u64],
	) -> Self {
		Self {
			names: names.iter().map(|s| s.to_string()).collect(),
			image_uris: image_uris.iter().map(|s| s.to_string()).collect(),
			hit_points: hit_points.to_vec(),
			attack_damage: attack_damage.to_vec(),
		}
	}

	/// Number of characters, as given by the names array.
	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Returns true if `index` addresses a character template.
	pub fn contains_index(&self, index: u64) -> bool {
		(index as usize) < self.len()
	}

	/// Fails with [`RosterError::IndexOutOfRange`] unless `index` addresses a
	/// character template.
	pub fn check_index(&self, index: u64) -> Result<(), RosterError> {
		if self.contains_index(index) {
			Ok(())
		} else {
			Err(RosterError::IndexOutOfRange {
				index,
				len: self.len(),
			})
		}
	}

	/// Checks that the parallel arrays line up and are not empty.
	pub fn validate(&self) -> Result<(), RosterError> {
		let names = self.names.len();
		if names != self.image_uris.len()
			|| names != self.hit_points.len()
			|| names != self.attack_damage.len()
		{
			return Err(RosterError::LengthMismatch {
				names,
				image_uris: self.image_uris.len(),
				hit_points: self.hit_points.len(),
				attack_damage: self.attack_damage.len(),
			});
		}
		if names == 0 {
			return Err(RosterError::Empty);
		}
		Ok(())
	}
}

/// The boss entity of the boss-battle contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossSpec {
	pub name: String,
	pub image_uri: String,
	pub hit_points: u64,
	pub attack_damage: u64,
}

/// The two versions of the game contract.
///
/// They take different constructor arguments and are deployed by different
/// flows, so one is never treated as a superset of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameVariant {
	/// Roster-only constructor, followed by minting a fixed character sequence.
	#[default]
	#[serde(alias = "mint")]
	CharacterMint,
	/// Roster plus boss constructor, deployment only.
	#[serde(alias = "boss")]
	BossBattle,
}

impl GameVariant {
	/// Number of positional constructor arguments this contract version takes.
	pub fn constructor_arity(&self) -> usize {
		match self {
			Self::CharacterMint => 4,
			Self::BossBattle => 8,
		}
	}

	/// Whether the deployment is followed by the minting phase.
	pub fn mints_characters(&self) -> bool {
		matches!(self, Self::CharacterMint)
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::CharacterMint => "character-mint",
			Self::BossBattle => "boss-battle",
		}
	}
}

impl fmt::Display for GameVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GameVariant {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"mint" | "character-mint" => Ok(Self::CharacterMint),
			"boss" | "boss-battle" => Ok(Self::BossBattle),
			other => Err(format!(
				"Unknown game variant '{other}' (expected 'mint' or 'boss')"
			)),
		}
	}
}

/// Ordered constructor arguments for a game contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentParams {
	pub roster: CharacterRoster,
	#[serde(default)]
	pub boss: Option<BossSpec>,
}

impl DeploymentParams {
	pub fn new(roster: CharacterRoster, boss: Option<BossSpec>) -> Self {
		Self { roster, boss }
	}

	/// Number of positional constructor arguments.
	pub fn arity(&self) -> usize {
		if self.boss.is_some() {
			8
		} else {
			4
		}
	}

	/// Constructor arguments in signature order, ready for ABI encoding.
	///
	/// `(string[], string[], uint256[], uint256[])`, followed by
	/// `(string, string, uint256, uint256)` when a boss is present.
	pub fn abi_values(&self) -> Vec<DynSolValue> {
		let strings = |values: &[String]| {
			DynSolValue::Array(values.iter().cloned().map(DynSolValue::String).collect())
		};
		let uints = |values: &[u64]| {
			DynSolValue::Array(values.iter().map(|v| uint256(*v)).collect())
		};

		let mut values = vec![
			strings(&self.roster.names),
			strings(&self.roster.image_uris),
			uints(&self.roster.hit_points),
			uints(&self.roster.attack_damage),
		];

		if let Some(boss) = &self.boss {
			values.push(DynSolValue::String(boss.name.clone()));
			values.push(DynSolValue::String(boss.image_uri.clone()));
			values.push(uint256(boss.hit_points));
			values.push(uint256(boss.attack_damage));
		}

		values
	}

	/// ABI-encodes the constructor arguments as a parameter sequence.
	pub fn abi_encode(&self) -> Vec<u8> {
		DynSolValue::Tuple(self.abi_values())
			.abi_encode_sequence()
			.unwrap_or_default()
	}
}

fn uint256(value: u64) -> DynSolValue {
	DynSolValue::Uint(U256::from(value), 256)
}

/// A named contract plus the arguments to deploy it with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRequest {
	/// Contract identifier used to resolve the compiled artifact.
	pub contract_name: String,
	pub params: DeploymentParams,
}

impl DeploymentRequest {
	pub fn new(contract_name: impl Into<String>, params: DeploymentParams) -> Self {
		Self {
			contract_name: contract_name.into(),
			params,
		}
	}
}
