//! Constants used by the deployment tool
//!
//! Holds the literal constructor arguments of both game contract versions,
//! the default minting sequence, and the well-known development account used
//! against a local node.

use epic_types::{BossSpec, CharacterRoster};

/// Name under which the game contract artifact is resolved.
pub const GAME_CONTRACT_NAME: &str = "MyEpicGame";

/// Character display names, in roster order.
pub const CHARACTER_NAMES: [&str; 4] = ["Michelangelo", "Leonardo", "Raphael", "Donatello"];

/// Character image URIs, one per name.
pub const CHARACTER_IMAGE_URIS: [&str; 4] = [
	"https://upload.wikimedia.org/wikipedia/en/f/f3/Michelangelo_%28Teenage_Mutant_Ninja_Turtles%29.jpg",
	"https://upload.wikimedia.org/wikipedia/en/e/ed/Leonardo_%28Teenage_Mutant_Ninja_Turtles%29.jpg",
	"https://upload.wikimedia.org/wikipedia/en/7/72/Raphael_%28Teenage_Mutant_Ninja_Tutles%29.jpg",
	"https://upload.wikimedia.org/wikipedia/en/5/5a/Donatello_%28Teenage_Mutant_Ninja_Turtles%29.jpg",
];

/// Starting hit points, one per name.
pub const CHARACTER_HIT_POINTS: [u64; 4] = [300, 300, 300, 300];

/// Attack damage, one per name.
pub const CHARACTER_ATTACK_DAMAGE: [u64; 4] = [125, 150, 175, 150];

/// Boss of the boss-battle contract.
pub const BOSS_NAME: &str = "Shredder";
pub const BOSS_IMAGE_URI: &str =
	"https://upload.wikimedia.org/wikipedia/en/2/2e/Shredder_%28Teenage_Mutant_Ninja_Turtles%29.jpg";
pub const BOSS_HIT_POINTS: u64 = 10_000;
pub const BOSS_ATTACK_DAMAGE: u64 = 50;

/// Character indices minted after deployment, in submission order.
///
/// Index 1 appears twice: the same character template can be minted more
/// than once.
pub const SEED_CHARACTER_INDICES: [u64; 5] = [0, 1, 2, 3, 1];

/// The roster both contract versions are deployed with.
pub fn default_roster() -> CharacterRoster {
	CharacterRoster::from_parts(
		&CHARACTER_NAMES,
		&CHARACTER_IMAGE_URIS,
		&CHARACTER_HIT_POINTS,
		&CHARACTER_ATTACK_DAMAGE,
	)
}

/// The boss the boss-battle version is deployed with.
pub fn default_boss() -> BossSpec {
	BossSpec {
		name: BOSS_NAME.to_string(),
		image_uri: BOSS_IMAGE_URI.to_string(),
		hit_points: BOSS_HIT_POINTS,
		attack_damage: BOSS_ATTACK_DAMAGE,
	}
}

/// Well-known development account for local nodes
///
/// This is account #0 of the standard test mnemonic used by local EVM
/// development nodes. Never use it on a public network.
pub mod dev_accounts {
	/// Deployer account address
	pub const DEPLOYER_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

	/// Private key for the deployer account
	pub const DEPLOYER_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
}
