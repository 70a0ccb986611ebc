//! # Profile
//!
//! Herein is the player profile: level and XP, the coin purse, unlocked
//! cities and letter styles, the power-up inventory, lifetime statistics, and
//! earned achievements. The profile outlives any single round and round-trips
//! through a [`bincode`](bincode) save file between plays.

use std::{
	fs::File,
	io::{self, BufReader, ErrorKind, Read, Write},
	path::Path
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::content::{self, PowerUp};

////////////////////////////////////////////////////////////////////////////////
//                                Inventories.                                //
////////////////////////////////////////////////////////////////////////////////

/// The player's stock of consumable power-ups.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Inventory
{
	/// Remaining Time Freezes.
	time_freeze: u32,

	/// Remaining Letter Shuffles.
	shuffle: u32,

	/// Remaining Double Points.
	double_points: u32,

	/// Remaining Hint Bombs.
	hint_bomb: u32,

	/// Remaining Letter Magnets.
	letter_magnet: u32
}

impl Default for Inventory
{
	/// A new player starts with three shuffles and nothing else.
	fn default() -> Self
	{
		Self {
			time_freeze: 0,
			shuffle: 3,
			double_points: 0,
			hint_bomb: 0,
			letter_magnet: 0
		}
	}
}

impl Inventory
{
	/// Get the remaining count of the given power-up.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up.
	///
	/// # Returns
	///
	/// The remaining count.
	#[must_use]
	pub fn count(&self, power_up: PowerUp) -> u32
	{
		match power_up
		{
			PowerUp::TimeFreeze => self.time_freeze,
			PowerUp::Shuffle => self.shuffle,
			PowerUp::DoublePoints => self.double_points,
			PowerUp::HintBomb => self.hint_bomb,
			PowerUp::LetterMagnet => self.letter_magnet
		}
	}

	/// Get a mutable reference to the slot for the given power-up.
	fn slot_mut(&mut self, power_up: PowerUp) -> &mut u32
	{
		match power_up
		{
			PowerUp::TimeFreeze => &mut self.time_freeze,
			PowerUp::Shuffle => &mut self.shuffle,
			PowerUp::DoublePoints => &mut self.double_points,
			PowerUp::HintBomb => &mut self.hint_bomb,
			PowerUp::LetterMagnet => &mut self.letter_magnet
		}
	}

	/// Add one of the given power-up.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up.
	pub fn add(&mut self, power_up: PowerUp)
	{
		*self.slot_mut(power_up) += 1;
	}

	/// Consume one of the given power-up, if any remain.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up.
	///
	/// # Returns
	///
	/// `true` if one was consumed, `false` if the slot was empty.
	pub fn consume(&mut self, power_up: PowerUp) -> bool
	{
		let slot = self.slot_mut(power_up);
		if *slot == 0
		{
			return false
		}
		*slot -= 1;
		true
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Profiles.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The player profile.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Profile
{
	/// The player's level, starting at 1.
	level: u32,

	/// The cumulative XP earned.
	xp: u32,

	/// The XP threshold for the next level-up.
	xp_to_next_level: u32,

	/// The coin purse.
	coins: u32,

	/// The gem purse.
	gems: u32,

	/// Identifiers of unlocked cities.
	unlocked_cities: Vec<String>,

	/// The identifier of the current city.
	current_city: String,

	/// Identifiers of unlocked letter styles.
	unlocked_styles: Vec<String>,

	/// The identifier of the equipped letter style.
	equipped_style: String,

	/// Consecutive days played.
	daily_streak: u32,

	/// The power-up inventory.
	power_ups: Inventory,

	/// Lifetime words found.
	total_words_found: u32,

	/// Lifetime rounds played.
	total_games_played: u32,

	/// The best single-round score.
	best_score: u32,

	/// The best combo ever reached.
	best_combo: u32,

	/// Lifetime pangrams found.
	pangrams_found: u32,

	/// Lifetime perfect rounds, where every solution word was found.
	perfect_rounds: u32,

	/// Identifiers of earned achievements.
	achievements: Vec<String>
}

impl Default for Profile
{
	/// A new player: level 1, a thousand coins, the starter city and style,
	/// and the starter inventory.
	fn default() -> Self
	{
		Self {
			level: 1,
			xp: 0,
			xp_to_next_level: content::xp_for_level(1),
			coins: 1000,
			gems: 0,
			unlocked_cities: vec!["baltimore".to_string()],
			current_city: "baltimore".to_string(),
			unlocked_styles: vec!["neon".to_string()],
			equipped_style: "neon".to_string(),
			daily_streak: 0,
			power_ups: Inventory::default(),
			total_words_found: 0,
			total_games_played: 0,
			best_score: 0,
			best_combo: 0,
			pangrams_found: 0,
			perfect_rounds: 0,
			achievements: Vec::new()
		}
	}
}

// Progression.
impl Profile
{
	/// Construct a fresh profile. Same as [`Default::default`].
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Get the player's level.
	#[inline]
	#[must_use]
	pub fn level(&self) -> u32 { self.level }

	/// Get the cumulative XP.
	#[inline]
	#[must_use]
	pub fn xp(&self) -> u32 { self.xp }

	/// Get the XP threshold for the next level-up.
	#[inline]
	#[must_use]
	pub fn xp_to_next_level(&self) -> u32 { self.xp_to_next_level }

	/// Get the coin purse.
	#[inline]
	#[must_use]
	pub fn coins(&self) -> u32 { self.coins }

	/// Get the gem purse.
	#[inline]
	#[must_use]
	pub fn gems(&self) -> u32 { self.gems }

	/// Get the power-up inventory.
	#[inline]
	#[must_use]
	pub fn power_ups(&self) -> &Inventory { &self.power_ups }

	/// Get the identifier of the current city.
	#[inline]
	#[must_use]
	pub fn current_city(&self) -> &str { &self.current_city }

	/// Get the identifier of the equipped letter style.
	#[inline]
	#[must_use]
	pub fn equipped_style(&self) -> &str { &self.equipped_style }

	/// Get the identifiers of earned achievements.
	#[inline]
	#[must_use]
	pub fn achievements(&self) -> &[String] { &self.achievements }

	/// Get the lifetime words found.
	#[inline]
	#[must_use]
	pub fn total_words_found(&self) -> u32 { self.total_words_found }

	/// Get the lifetime rounds played.
	#[inline]
	#[must_use]
	pub fn total_games_played(&self) -> u32 { self.total_games_played }

	/// Get the best single-round score.
	#[inline]
	#[must_use]
	pub fn best_score(&self) -> u32 { self.best_score }

	/// Get the best combo ever reached.
	#[inline]
	#[must_use]
	pub fn best_combo(&self) -> u32 { self.best_combo }

	/// Add coins to the purse.
	///
	/// # Arguments
	///
	/// * `amount` - The number of coins to add.
	pub fn add_coins(&mut self, amount: u32)
	{
		self.coins += amount;
	}

	/// Grant XP, leveling up when the threshold is crossed. One grant levels
	/// up at most once, so a big grant cannot skip the celebration.
	///
	/// # Arguments
	///
	/// * `amount` - The XP to grant.
	///
	/// # Returns
	///
	/// `true` if the player leveled up, `false` otherwise.
	pub fn add_xp(&mut self, amount: u32) -> bool
	{
		self.xp += amount;
		if self.xp >= self.xp_to_next_level
		{
			self.level += 1;
			self.xp_to_next_level = content::xp_for_level(self.level);
			debug!("leveled up to {}", self.level);
			return true
		}
		false
	}

	/// Buy one of the given power-up, if the purse allows.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up to buy.
	///
	/// # Returns
	///
	/// `true` on purchase, `false` if the purse is short.
	pub fn buy_power_up(&mut self, power_up: PowerUp) -> bool
	{
		let cost = power_up.cost();
		if self.coins < cost
		{
			return false
		}
		self.coins -= cost;
		self.power_ups.add(power_up);
		true
	}

	/// Consume one of the given power-up from the inventory, if any remain.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up to consume.
	///
	/// # Returns
	///
	/// `true` if one was consumed, `false` otherwise.
	pub fn consume_power_up(&mut self, power_up: PowerUp) -> bool
	{
		self.power_ups.consume(power_up)
	}

	/// Check whether the given city is unlocked.
	///
	/// # Arguments
	///
	/// * `id` - The identifier of the city.
	///
	/// # Returns
	///
	/// `true` if the city is unlocked, `false` otherwise.
	#[must_use]
	pub fn has_unlocked_city(&self, id: &str) -> bool
	{
		self.unlocked_cities.iter().any(|city| city == id)
	}

	/// Unlock the given city, spending its cost. Unknown, already unlocked,
	/// and unaffordable cities are all refused.
	///
	/// # Arguments
	///
	/// * `id` - The identifier of the city.
	///
	/// # Returns
	///
	/// `true` if the city was unlocked, `false` otherwise.
	pub fn unlock_city(&mut self, id: &str) -> bool
	{
		if self.has_unlocked_city(id)
		{
			return false
		}
		let Some(city) = content::city(id) else { return false };
		if self.coins < city.cost
		{
			return false
		}
		self.coins -= city.cost;
		self.unlocked_cities.push(id.to_string());
		self.refresh_achievements();
		true
	}

	/// Travel to an unlocked city.
	///
	/// # Arguments
	///
	/// * `id` - The identifier of the city.
	///
	/// # Returns
	///
	/// `true` if the city became current, `false` otherwise.
	pub fn travel(&mut self, id: &str) -> bool
	{
		if !self.has_unlocked_city(id)
		{
			return false
		}
		self.current_city = id.to_string();
		true
	}

	/// Check whether the given letter style is unlocked.
	///
	/// # Arguments
	///
	/// * `id` - The identifier of the style.
	///
	/// # Returns
	///
	/// `true` if the style is unlocked, `false` otherwise.
	#[must_use]
	pub fn has_unlocked_style(&self, id: &str) -> bool
	{
		self.unlocked_styles.iter().any(|style| style == id)
	}

	/// Unlock the given letter style, spending its cost.
	///
	/// # Arguments
	///
	/// * `id` - The identifier of the style.
	///
	/// # Returns
	///
	/// `true` if the style was unlocked, `false` otherwise.
	pub fn unlock_style(&mut self, id: &str) -> bool
	{
		if self.has_unlocked_style(id)
		{
			return false
		}
		let Some(style) = content::letter_style(id) else { return false };
		if self.coins < style.cost
		{
			return false
		}
		self.coins -= style.cost;
		self.unlocked_styles.push(id.to_string());
		true
	}

	/// Equip an unlocked letter style.
	///
	/// # Arguments
	///
	/// * `id` - The identifier of the style.
	///
	/// # Returns
	///
	/// `true` if the style was equipped, `false` otherwise.
	pub fn equip_style(&mut self, id: &str) -> bool
	{
		if !self.has_unlocked_style(id)
		{
			return false
		}
		self.equipped_style = id.to_string();
		true
	}

	/// Record a daily login.
	///
	/// # Arguments
	///
	/// * `consecutive` - Whether the login continues yesterday's streak.
	pub fn record_login(&mut self, consecutive: bool)
	{
		self.daily_streak = if consecutive { self.daily_streak + 1 } else { 1 };
		self.refresh_achievements();
	}

	/// Record the outcome of a finished round into the lifetime statistics
	/// and award any achievements that became due.
	///
	/// # Arguments
	///
	/// * `score` - The round's final score.
	/// * `words_found` - The number of words found.
	/// * `max_combo` - The highest combo reached.
	/// * `pangrams` - The number of pangrams found.
	/// * `perfect` - Whether every solution word was found.
	pub fn record_round(
		&mut self,
		score: u32,
		words_found: u32,
		max_combo: u32,
		pangrams: u32,
		perfect: bool
	) {
		self.total_games_played += 1;
		self.total_words_found += words_found;
		self.best_score = self.best_score.max(score);
		self.best_combo = self.best_combo.max(max_combo);
		self.pangrams_found += pangrams;
		if perfect
		{
			self.perfect_rounds += 1;
		}
		self.refresh_achievements();
	}

	/// Award every achievement whose tracked counter has reached its goal.
	/// Awards are permanent; counters regressing later cannot revoke them.
	fn refresh_achievements(&mut self)
	{
		let counters = [
			("first_word", self.total_words_found),
			("word_master", self.total_words_found),
			("combo_king", self.best_combo),
			("pangram_hunter", self.pangrams_found),
			("perfectionist", self.perfect_rounds),
			("city_explorer", self.unlocked_cities.len() as u32),
			("streak_master", self.daily_streak)
		];
		for (id, value) in counters
		{
			let achievement =
				content::ACHIEVEMENTS.iter().find(|a| a.id == id);
			if let Some(achievement) = achievement
			{
				if value >= achievement.goal
					&& !self.achievements.iter().any(|earned| earned == id)
				{
					debug!("achievement earned: {}", id);
					self.achievements.push(id.to_string());
				}
			}
		}
	}
}

// Persistence.
impl Profile
{
	/// Load a profile from the given file, falling back to a fresh profile
	/// on any failure. Mirrors the lenient load of the save slot: a missing
	/// or corrupt save never blocks play.
	///
	/// # Arguments
	///
	/// * `path` - The save file.
	///
	/// # Returns
	///
	/// The loaded profile, or the default.
	pub fn load_or_default<T: AsRef<Path>>(path: T) -> Self
	{
		match Self::load_from_file(path.as_ref())
		{
			Ok(profile) => profile,
			Err(e) =>
			{
				warn!(
					"Failed to load profile {}: {}; starting fresh",
					path.as_ref().display(),
					e
				);
				Self::default()
			}
		}
	}

	/// Deserialize a profile from the given file. The file must contain a
	/// profile serialized in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// The deserialized profile.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn load_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		let profile = bincode::deserialize(&content)
			.map_err(|_e| ErrorKind::InvalidData)?;
		Ok(profile)
	}

	/// Serialize the profile to the given file, in [`bincode`](bincode)
	/// format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// If the file cannot be opened or written, an error is returned.
	pub fn save_to_file<T: AsRef<Path>>(
		&self,
		path: T
	) -> Result<(), io::Error>
	{
		let mut file = File::create(path)?;
		let content =
			bincode::serialize(self).map_err(|_e| ErrorKind::InvalidData)?;
		file.write_all(&content)?;
		Ok(())
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use tempfile::NamedTempFile;

	use crate::{
		content::{self, PowerUp},
		profile::Profile
	};

	/// A fresh profile matches the starter kit.
	#[test]
	fn test_default_profile()
	{
		let profile = Profile::new();
		assert_eq!(profile.level(), 1);
		assert_eq!(profile.xp(), 0);
		assert_eq!(profile.xp_to_next_level(), 100);
		assert_eq!(profile.coins(), 1000);
		assert_eq!(profile.power_ups().count(PowerUp::Shuffle), 3);
		assert_eq!(profile.power_ups().count(PowerUp::HintBomb), 0);
		assert!(profile.has_unlocked_city("baltimore"));
		assert!(!profile.has_unlocked_city("paris"));
		assert_eq!(profile.current_city(), "baltimore");
		assert_eq!(profile.equipped_style(), "neon");
	}

	/// XP accumulates and crosses the level threshold exactly once per
	/// grant.
	#[test]
	fn test_add_xp()
	{
		let mut profile = Profile::new();
		assert!(!profile.add_xp(60));
		assert_eq!(profile.level(), 1);
		assert!(profile.add_xp(40));
		assert_eq!(profile.level(), 2);
		assert_eq!(profile.xp(), 100);
		assert_eq!(profile.xp_to_next_level(), content::xp_for_level(2));
	}

	/// Purchases are cost-gated and restock the inventory.
	#[test]
	fn test_buy_power_up()
	{
		let mut profile = Profile::new();
		assert!(profile.buy_power_up(PowerUp::HintBomb));
		assert_eq!(profile.coins(), 750);
		assert_eq!(profile.power_ups().count(PowerUp::HintBomb), 1);
		assert!(profile.buy_power_up(PowerUp::HintBomb));
		assert!(profile.buy_power_up(PowerUp::HintBomb));
		assert!(profile.buy_power_up(PowerUp::HintBomb));
		assert_eq!(profile.coins(), 0);
		// The purse is empty now.
		assert!(!profile.buy_power_up(PowerUp::HintBomb));
		assert_eq!(profile.power_ups().count(PowerUp::HintBomb), 4);
	}

	/// Consumption drains the inventory and refuses an empty slot.
	#[test]
	fn test_consume_power_up()
	{
		let mut profile = Profile::new();
		assert!(profile.consume_power_up(PowerUp::Shuffle));
		assert!(profile.consume_power_up(PowerUp::Shuffle));
		assert!(profile.consume_power_up(PowerUp::Shuffle));
		assert!(!profile.consume_power_up(PowerUp::Shuffle));
		assert!(!profile.consume_power_up(PowerUp::TimeFreeze));
	}

	/// City unlocks spend coins, refuse the unaffordable, and never unlock
	/// twice.
	#[test]
	fn test_unlock_city()
	{
		let mut profile = Profile::new();
		assert!(!profile.unlock_city("tokyo"));
		assert!(profile.unlock_city("paris"));
		assert_eq!(profile.coins(), 0);
		assert!(!profile.unlock_city("paris"));
		assert!(!profile.unlock_city("atlantis"));
		assert!(profile.travel("paris"));
		assert_eq!(profile.current_city(), "paris");
		assert!(!profile.travel("tokyo"));
	}

	/// Styles must be unlocked before they can be equipped.
	#[test]
	fn test_styles()
	{
		let mut profile = Profile::new();
		assert!(!profile.equip_style("cyber"));
		assert!(profile.unlock_style("cyber"));
		assert_eq!(profile.coins(), 500);
		assert!(profile.equip_style("cyber"));
		assert_eq!(profile.equipped_style(), "cyber");
		assert!(!profile.unlock_style("rainbow"));
	}

	/// Round recording feeds the lifetime statistics and awards achievements
	/// as counters cross their goals.
	#[test]
	fn test_record_round_and_achievements()
	{
		let mut profile = Profile::new();
		assert!(profile.achievements().is_empty());
		profile.record_round(384, 4, 10, 1, false);
		assert_eq!(profile.total_games_played(), 1);
		assert_eq!(profile.total_words_found(), 4);
		assert_eq!(profile.best_score(), 384);
		assert_eq!(profile.best_combo(), 10);
		assert!(profile
			.achievements()
			.contains(&"first_word".to_string()));
		assert!(profile
			.achievements()
			.contains(&"combo_king".to_string()));
		// A worse round later cannot regress the bests.
		profile.record_round(10, 1, 1, 0, false);
		assert_eq!(profile.best_score(), 384);
		assert_eq!(profile.best_combo(), 10);
	}

	/// Login streaks grow while consecutive and reset otherwise.
	#[test]
	fn test_daily_streak()
	{
		let mut profile = Profile::new();
		profile.record_login(false);
		profile.record_login(true);
		profile.record_login(true);
		assert_eq!(profile.daily_streak, 3);
		profile.record_login(false);
		assert_eq!(profile.daily_streak, 1);
	}

	/// The profile round-trips through its save file.
	#[test]
	fn test_save_and_load()
	{
		let mut profile = Profile::new();
		profile.add_coins(123);
		let _ = profile.add_xp(55);
		let _ = profile.buy_power_up(PowerUp::LetterMagnet);
		profile.record_round(100, 3, 2, 0, false);
		let file = NamedTempFile::new().unwrap();
		profile.save_to_file(file.path()).unwrap();
		let loaded = Profile::load_from_file(file.path()).unwrap();
		assert_eq!(profile, loaded);
	}

	/// A missing or corrupt save falls back to a fresh profile.
	#[test]
	fn test_load_or_default()
	{
		let profile = Profile::load_or_default("/nonexistent/profile.save");
		assert_eq!(profile, Profile::default());
	}
}
