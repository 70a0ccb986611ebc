//! # Content
//!
//! Herein is the hand-authored game content: curated letter pools, the
//! two-letter allowlist, the embedded fallback word list, cities, letter
//! styles, power-ups, achievements, and the scoring arithmetic. Everything in
//! this module is fixed data or a pure function of its arguments.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////
//                            Two-letter allowlist.                           //
////////////////////////////////////////////////////////////////////////////////

/// The fixed set of valid two-letter words. Common dictionaries are full of
/// abbreviations and ambiguous short tokens, so the main dictionary is never
/// trusted for two-letter words; this curated list is the sole authority.
/// Sorted, for binary search.
pub const TWO_LETTER_WORDS: [&str; 30] = [
	"AH", "AM", "AN", "AS", "AT", "BE", "BY", "DO", "GO", "HA",
	"HE", "IF", "IN", "IS", "IT", "LA", "MA", "ME", "MY", "NO",
	"OF", "OH", "ON", "OR", "PA", "SO", "TO", "UP", "US", "WE"
];

/// Check whether the given word is on the two-letter allowlist. The word must
/// already be uppercase.
///
/// # Arguments
///
/// * `word` - The word to check.
///
/// # Returns
///
/// `true` if the word is on the allowlist, `false` otherwise.
#[inline]
#[must_use]
pub fn is_allowed_two_letter_word(word: &str) -> bool
{
	TWO_LETTER_WORDS.binary_search(&word).is_ok()
}

////////////////////////////////////////////////////////////////////////////////
//                               Fallback words.                              //
////////////////////////////////////////////////////////////////////////////////

/// The embedded fallback word list, used verbatim when the primary word-list
/// resource is unavailable. Small, but enough to keep the game playable.
pub const FALLBACK_WORDS: [&str; 24] = [
	"CAT", "DOG", "BIRD", "FISH", "GAME", "PLAY", "WORD", "SURGE",
	"THE", "AND", "FOR", "ARE", "BUT", "NOT", "YOU", "ALL",
	"CAN", "HAD", "HER", "WAS", "ONE", "OUR", "OUT", "DAY"
];

////////////////////////////////////////////////////////////////////////////////
//                                Letter pools.                               //
////////////////////////////////////////////////////////////////////////////////

/// The easy letter pool: four-letter sets that yield a friendly number of
/// short words.
pub const EASY_SETS: [&str; 5] = ["CATS", "DOGS", "PLAY", "READ", "TEAM"];

/// The medium letter pool: five-letter sets.
pub const MEDIUM_SETS: [&str; 8] = [
	"POWER", "STARE", "BRAVE", "STORM", "DREAM", "LIGHT", "MAGIC", "SPARK"
];

/// The hard letter pool: six-letter sets, including ones with repeated
/// letters.
pub const HARD_SETS: [&str; 5] =
	["STRONG", "CHANGE", "PLANET", "WINTER", "SUMMER"];

////////////////////////////////////////////////////////////////////////////////
//                                   Cities.                                  //
////////////////////////////////////////////////////////////////////////////////

/// A city is an unlockable location with its own curated puzzles and
/// collectible word cards.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct City
{
	/// The stable identifier of the city.
	pub id: &'static str,

	/// The display name of the city.
	pub name: &'static str,

	/// The cost, in coins, to unlock the city.
	pub cost: u32,

	/// The curated letter sets played in this city.
	pub puzzles: &'static [&'static str],

	/// The word cards collectible in this city.
	pub word_cards: &'static [&'static str]
}

/// The complete roster of cities, cheapest first. The first city is free and
/// unlocked by default.
pub const CITIES: [City; 3] = [
	City {
		id: "baltimore",
		name: "Baltimore",
		cost: 0,
		puzzles: &["RAVEN", "HARBO", "CRABS"],
		word_cards: &["RAVEN", "HARBOR", "CRAB", "CHARM"]
	},
	City {
		id: "paris",
		name: "Paris",
		cost: 1000,
		puzzles: &["LOUVRE", "EIFFEL", "ARTIS"],
		word_cards: &["LOUVRE", "EIFFEL", "ARTIST", "WINE"]
	},
	City {
		id: "tokyo",
		name: "Tokyo",
		cost: 2500,
		puzzles: &["SUSHI", "KARATE", "NINJA"],
		word_cards: &["SUSHI", "KARATE", "NINJA", "RAMEN"]
	}
];

/// Look up a city by its identifier.
///
/// # Arguments
///
/// * `id` - The identifier of the city.
///
/// # Returns
///
/// The city, if any.
#[must_use]
pub fn city(id: &str) -> Option<&'static City>
{
	CITIES.iter().find(|city| city.id == id)
}

////////////////////////////////////////////////////////////////////////////////
//                               Letter styles.                               //
////////////////////////////////////////////////////////////////////////////////

/// A letter style is a purely cosmetic tile treatment that the player can
/// unlock and equip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct LetterStyle
{
	/// The stable identifier of the style.
	pub id: &'static str,

	/// The display name of the style.
	pub name: &'static str,

	/// The cost, in coins, to unlock the style.
	pub cost: u32
}

/// The complete roster of letter styles. The first style is free and equipped
/// by default.
pub const LETTER_STYLES: [LetterStyle; 4] = [
	LetterStyle { id: "neon", name: "Neon", cost: 0 },
	LetterStyle { id: "cyber", name: "Cyber", cost: 500 },
	LetterStyle { id: "gold", name: "Gold", cost: 1000 },
	LetterStyle { id: "rainbow", name: "Rainbow", cost: 2000 }
];

/// Look up a letter style by its identifier.
///
/// # Arguments
///
/// * `id` - The identifier of the style.
///
/// # Returns
///
/// The style, if any.
#[must_use]
pub fn letter_style(id: &str) -> Option<&'static LetterStyle>
{
	LETTER_STYLES.iter().find(|style| style.id == id)
}

////////////////////////////////////////////////////////////////////////////////
//                                 Power-ups.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The complete enumeration of consumable power-ups.
#[derive(
	Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize
)]
#[must_use]
pub enum PowerUp
{
	/// Add ten seconds to the round clock.
	TimeFreeze,

	/// Rearrange the letter tiles.
	Shuffle,

	/// Double the points for the next accepted word.
	DoublePoints,

	/// Reveal the shortest word not yet found.
	HintBomb,

	/// Auto-complete the longest word not yet found.
	LetterMagnet
}

/// All power-ups, in shop order.
pub const POWER_UPS: [PowerUp; 5] = [
	PowerUp::TimeFreeze,
	PowerUp::Shuffle,
	PowerUp::DoublePoints,
	PowerUp::HintBomb,
	PowerUp::LetterMagnet
];

impl PowerUp
{
	/// Get the display name of the power-up.
	///
	/// # Returns
	///
	/// The display name.
	#[must_use]
	pub const fn name(self) -> &'static str
	{
		match self
		{
			Self::TimeFreeze => "Time Freeze",
			Self::Shuffle => "Letter Shuffle",
			Self::DoublePoints => "Double Points",
			Self::HintBomb => "Hint Bomb",
			Self::LetterMagnet => "Letter Magnet"
		}
	}

	/// Get the cost, in coins, of one use of the power-up.
	///
	/// # Returns
	///
	/// The cost.
	#[must_use]
	pub const fn cost(self) -> u32
	{
		match self
		{
			Self::TimeFreeze => 150,
			Self::Shuffle => 100,
			Self::DoublePoints => 200,
			Self::HintBomb => 250,
			Self::LetterMagnet => 175
		}
	}

	/// Get the shop description of the power-up.
	///
	/// # Returns
	///
	/// The description.
	#[must_use]
	pub const fn description(self) -> &'static str
	{
		match self
		{
			Self::TimeFreeze => "Add 10 seconds to the clock",
			Self::Shuffle => "Rearrange the letters",
			Self::DoublePoints => "2x points for the next word",
			Self::HintBomb => "Reveal an unfound word",
			Self::LetterMagnet => "Auto-complete a word"
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Achievements.                                //
////////////////////////////////////////////////////////////////////////////////

/// An achievement is a lifetime goal tracked against the player profile.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use]
pub struct Achievement
{
	/// The stable identifier of the achievement.
	pub id: &'static str,

	/// The display name of the achievement.
	pub name: &'static str,

	/// The display description of the achievement.
	pub description: &'static str,

	/// The counter value at which the achievement is earned.
	pub goal: u32
}

/// The complete roster of achievements.
pub const ACHIEVEMENTS: [Achievement; 8] = [
	Achievement {
		id: "first_word",
		name: "First Steps",
		description: "Find your first word",
		goal: 1
	},
	Achievement {
		id: "word_master",
		name: "Word Master",
		description: "Find 1000 total words",
		goal: 1000
	},
	Achievement {
		id: "speed_demon",
		name: "Speed Demon",
		description: "Find 10 words in 30 seconds",
		goal: 10
	},
	Achievement {
		id: "perfectionist",
		name: "Perfectionist",
		description: "Complete 5 perfect rounds",
		goal: 5
	},
	Achievement {
		id: "combo_king",
		name: "Combo King",
		description: "Reach 10x combo",
		goal: 10
	},
	Achievement {
		id: "pangram_hunter",
		name: "Pangram Hunter",
		description: "Find 50 pangrams",
		goal: 50
	},
	Achievement {
		id: "city_explorer",
		name: "City Explorer",
		description: "Unlock all cities",
		goal: 3
	},
	Achievement {
		id: "streak_master",
		name: "Streak Master",
		description: "30-day login streak",
		goal: 30
	}
];

////////////////////////////////////////////////////////////////////////////////
//                                  Scoring.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The XP base cost of the first level.
pub const XP_PER_LEVEL: u32 = 100;

/// The per-level XP growth factor.
pub const XP_MULTIPLIER: f64 = 1.15;

/// Compute the XP threshold for reaching the next level from the given level.
///
/// # Arguments
///
/// * `level` - The level, starting at 1.
///
/// # Returns
///
/// The XP threshold.
#[must_use]
pub fn xp_for_level(level: u32) -> u32
{
	let exponent = level.saturating_sub(1) as i32;
	(f64::from(XP_PER_LEVEL) * XP_MULTIPLIER.powi(exponent)).floor() as u32
}

/// Compute the score for an accepted word. Ten points per letter, multiplied
/// by the combo bonus, plus a flat pangram bonus.
///
/// # Arguments
///
/// * `word` - The accepted word.
/// * `combo` - The combo counter, including this word.
/// * `is_pangram` - Whether the word is a pangram for the current puzzle.
///
/// # Returns
///
/// The score.
#[must_use]
pub fn word_score(word: &str, combo: u32, is_pangram: bool) -> u32
{
	let base = (word.chars().count() * 10) as f64;
	let multiplier = 1.0 + f64::from(combo) * 0.2;
	let bonus = if is_pangram { 100.0 } else { 0.0 };
	(base * multiplier + bonus).floor() as u32
}

/// Compute the XP reward for an accepted word. Five XP per letter.
///
/// # Arguments
///
/// * `word` - The accepted word.
///
/// # Returns
///
/// The XP reward.
#[inline]
#[must_use]
pub fn xp_reward(word: &str) -> u32
{
	(word.chars().count() * 5) as u32
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
