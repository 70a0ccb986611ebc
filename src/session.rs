//! # Session
//!
//! Herein is the round session: the live state of a single round of play.
//! The session owns the tile order, the current guess, the found-word set,
//! the score, and the combo and surge machinery. Submissions are judged
//! against the word store (is this a real word?) and against the puzzle's
//! precomputed solution set (can it actually be formed from these tiles?); a
//! real word that cannot be formed is a normal rejected guess, not an error.
//!
//! Time is advanced by [`tick`](Session::tick), one second per call, by
//! whoever drives the session. Combos expire five seconds after the last
//! accepted word; timed modes end when the clock reaches zero.

use std::{
	collections::BTreeSet,
	fmt::{self, Display, Formatter},
	rc::Rc
};

use clap::ValueEnum;
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
	content::{self, PowerUp},
	dictionary::WordStore,
	puzzle::Puzzle
};

////////////////////////////////////////////////////////////////////////////////
//                                Game modes.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The seconds a combo survives without a new accepted word.
pub const COMBO_WINDOW_SECS: u32 = 5;

/// The combo at which surge mode activates.
pub const SURGE_COMBO: u32 = 3;

/// The combo at which the surge multiplier escalates.
pub const SURGE_ESCALATION_COMBO: u32 = 5;

/// The seconds added to the clock by a Time Freeze.
pub const TIME_FREEZE_BONUS_SECS: u32 = 10;

/// The complete enumeration of game modes.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
#[must_use]
pub enum GameMode
{
	/// A fifteen-second sprint.
	Blitz,

	/// A sixty-second run.
	#[default]
	Marathon,

	/// Untimed, pressure-free play.
	Zen,

	/// The untimed daily puzzle.
	Daily
}

impl GameMode
{
	/// All game modes, in menu order.
	pub const ALL: [Self; 4] =
		[Self::Blitz, Self::Marathon, Self::Zen, Self::Daily];

	/// Get the starting clock for the mode, or `None` for untimed modes.
	///
	/// # Returns
	///
	/// The starting time, in seconds, if the mode is timed.
	#[must_use]
	pub const fn starting_time(self) -> Option<u32>
	{
		match self
		{
			Self::Blitz => Some(15),
			Self::Marathon => Some(60),
			Self::Zen | Self::Daily => None
		}
	}

	/// Get the display name of the mode.
	///
	/// # Returns
	///
	/// The display name.
	#[must_use]
	pub const fn name(self) -> &'static str
	{
		match self
		{
			Self::Blitz => "Blitz",
			Self::Marathon => "Marathon",
			Self::Zen => "Zen",
			Self::Daily => "Daily"
		}
	}
}

impl Display for GameMode
{
	fn fmt(&self, f: &mut Formatter) -> fmt::Result
	{
		match self
		{
			Self::Blitz => write!(f, "blitz"),
			Self::Marathon => write!(f, "marathon"),
			Self::Zen => write!(f, "zen"),
			Self::Daily => write!(f, "daily")
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Verdicts.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The judgement of a submitted word.
#[derive(Clone, Debug, Eq, PartialEq)]
#[must_use]
pub enum Verdict
{
	/// The submission is not in any dictionary.
	NotAWord,

	/// The submission is a real word, but cannot be formed from the puzzle's
	/// tiles. A normal rejected guess, distinct from [`NotAWord`].
	///
	/// [`NotAWord`]: Self::NotAWord
	Unreachable,

	/// The submission was already found this round.
	AlreadyFound,

	/// The submission was accepted and scored.
	Accepted
	{
		/// The accepted word, uppercase.
		word: String,

		/// The points awarded, after all multipliers.
		score: u32,

		/// Whether the word is a pangram for this puzzle.
		is_pangram: bool
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                 Sessions.                                  //
////////////////////////////////////////////////////////////////////////////////

/// The live state of a single round.
#[must_use]
pub struct Session
{
	/// The word store, for live validation of typed words.
	dictionary: Rc<WordStore>,

	/// The puzzle under play. Immutable for the round's lifetime.
	puzzle: Puzzle,

	/// The game mode of the round.
	mode: GameMode,

	/// The tiles in presentation order. Shuffling reorders this copy; the
	/// puzzle itself is never touched.
	tiles: Vec<char>,

	/// The current guess, as indices into `tiles`. Each physical tile is
	/// usable once per word.
	guess: Vec<usize>,

	/// The words found so far this round.
	found: BTreeSet<String>,

	/// The running score.
	score: u32,

	/// The current combo counter.
	combo: u32,

	/// The highest combo reached this round.
	max_combo: u32,

	/// Whether surge mode is active.
	surge: bool,

	/// The surge score multiplier; 1.0 while surge mode is inactive.
	surge_multiplier: f64,

	/// Whether the next accepted word scores double.
	double_points: bool,

	/// The remaining time, in seconds, or `None` for untimed modes.
	time_remaining: Option<u32>,

	/// Seconds since the last accepted word, for combo expiry.
	combo_clock: u32
}

impl Session
{
	/// Start a round over the given puzzle.
	///
	/// # Arguments
	///
	/// * `dictionary` - The word store, for live validation.
	/// * `puzzle` - The puzzle to play.
	/// * `mode` - The game mode.
	///
	/// # Returns
	///
	/// A fresh session.
	pub fn new(dictionary: Rc<WordStore>, puzzle: Puzzle, mode: GameMode)
		-> Self
	{
		let tiles = puzzle.letters().to_vec();
		Self {
			dictionary,
			puzzle,
			mode,
			tiles,
			guess: Vec::new(),
			found: BTreeSet::new(),
			score: 0,
			combo: 0,
			max_combo: 0,
			surge: false,
			surge_multiplier: 1.0,
			double_points: false,
			time_remaining: mode.starting_time(),
			combo_clock: 0
		}
	}

	/// Get the game mode of the round.
	#[inline]
	#[must_use]
	pub fn mode(&self) -> GameMode { self.mode }

	/// Get the puzzle under play.
	#[inline]
	#[must_use]
	pub fn puzzle(&self) -> &Puzzle { &self.puzzle }

	/// Get the tiles in presentation order.
	#[inline]
	#[must_use]
	pub fn tiles(&self) -> &[char] { &self.tiles }

	/// Get the current guess, as indices into the tiles.
	#[inline]
	#[must_use]
	pub fn guess(&self) -> &[usize] { &self.guess }

	/// Get the words found so far this round.
	#[inline]
	#[must_use]
	pub fn found_words(&self) -> &BTreeSet<String> { &self.found }

	/// Get the running score.
	#[inline]
	#[must_use]
	pub fn score(&self) -> u32 { self.score }

	/// Get the current combo counter.
	#[inline]
	#[must_use]
	pub fn combo(&self) -> u32 { self.combo }

	/// Get the highest combo reached this round.
	#[inline]
	#[must_use]
	pub fn max_combo(&self) -> u32 { self.max_combo }

	/// Check whether surge mode is active.
	#[inline]
	#[must_use]
	pub fn is_surging(&self) -> bool { self.surge }

	/// Get the remaining time, in seconds, or `None` for untimed modes.
	#[inline]
	#[must_use]
	pub fn time_remaining(&self) -> Option<u32> { self.time_remaining }

	/// Get the word of the current guess.
	///
	/// # Returns
	///
	/// The guessed word so far, uppercase.
	#[must_use]
	pub fn current_word(&self) -> String
	{
		self.guess.iter().map(|&index| self.tiles[index]).collect()
	}

	/// Iterate the solution words not yet found.
	///
	/// # Returns
	///
	/// The unfound words, in lexicographic order.
	pub fn unfound_words(&self) -> impl Iterator<Item = &String>
	{
		self.puzzle
			.solution()
			.words()
			.iter()
			.filter(|word| !self.found.contains(*word))
	}

	/// Check whether every solution word has been found. An empty solution
	/// set never counts as complete.
	///
	/// # Returns
	///
	/// `true` if the round is complete, `false` otherwise.
	#[must_use]
	pub fn is_complete(&self) -> bool
	{
		!self.puzzle.solution().is_empty()
			&& self.found.len() == self.puzzle.solution().len()
	}

	/// Check whether the round is over, either by completion or by the clock.
	///
	/// # Returns
	///
	/// `true` if the round is over, `false` otherwise.
	#[must_use]
	pub fn is_over(&self) -> bool
	{
		self.is_complete() || matches!(self.time_remaining, Some(0))
	}

	/// Add the tile at the given index to the current guess. Each tile may
	/// appear at most once per guess; a tile already in use is refused.
	///
	/// # Arguments
	///
	/// * `index` - The index of the tile.
	///
	/// # Returns
	///
	/// `true` if the tile was added, `false` otherwise.
	pub fn select_tile(&mut self, index: usize) -> bool
	{
		if index >= self.tiles.len() || self.guess.contains(&index)
		{
			return false
		}
		self.guess.push(index);
		true
	}

	/// Select the first unused tile bearing the given letter, if any.
	/// Case-insensitive. This is how typed input maps onto tiles.
	///
	/// # Arguments
	///
	/// * `letter` - The letter to select.
	///
	/// # Returns
	///
	/// `true` if a tile was selected, `false` otherwise.
	pub fn select_letter(&mut self, letter: char) -> bool
	{
		let letter = letter.to_ascii_uppercase();
		let index = self.tiles.iter().enumerate().position(|(index, &tile)| {
			tile == letter && !self.guess.contains(&index)
		});
		match index
		{
			Some(index) =>
			{
				self.guess.push(index);
				true
			},
			None => false
		}
	}

	/// Remove the most recently selected tile from the guess, if any.
	pub fn undo_selection(&mut self)
	{
		self.guess.pop();
	}

	/// Clear the current guess.
	pub fn clear_guess(&mut self)
	{
		self.guess.clear();
	}

	/// Submit the current guess and clear it, whatever the outcome.
	///
	/// # Returns
	///
	/// The judgement of the guess.
	pub fn submit_current(&mut self) -> Verdict
	{
		let word = self.current_word();
		self.guess.clear();
		self.submit_word(&word)
	}

	/// Submit a word for judgement. Case-insensitive. The word must be a
	/// real word, must belong to the puzzle's solution set, and must not
	/// already have been found. An accepted word advances the combo, may
	/// activate or escalate surge mode, and scores with all applicable
	/// multipliers. The surge multiplier applies to words accepted while
	/// surge is already running, not to the word that activates it.
	///
	/// # Arguments
	///
	/// * `word` - The word to judge.
	///
	/// # Returns
	///
	/// The judgement of the word.
	pub fn submit_word(&mut self, word: &str) -> Verdict
	{
		let word = word.to_ascii_uppercase();
		if !self.dictionary.is_valid(&word)
		{
			return Verdict::NotAWord
		}
		if !self.puzzle.solution().contains(&word)
		{
			return Verdict::Unreachable
		}
		if self.found.contains(&word)
		{
			return Verdict::AlreadyFound
		}
		self.combo_clock = 0;
		let is_pangram = self.puzzle.is_pangram(&word);
		let combo = self.combo + 1;
		let mut score = content::word_score(&word, combo, is_pangram);
		if self.double_points
		{
			score *= 2;
			self.double_points = false;
		}
		if self.surge
		{
			score = (f64::from(score) * self.surge_multiplier).floor() as u32;
		}
		if combo >= SURGE_COMBO && !self.surge
		{
			self.surge = true;
			self.surge_multiplier = 1.5;
		}
		else if combo >= SURGE_ESCALATION_COMBO
		{
			self.surge_multiplier = 2.0;
		}
		self.combo = combo;
		self.max_combo = self.max_combo.max(combo);
		self.score += score;
		self.found.insert(word.clone());
		debug!("accepted {}: +{} (combo {})", word, score, combo);
		Verdict::Accepted { word, score, is_pangram }
	}

	/// Advance the round clock by one second. Expires the combo (and surge)
	/// once the combo window lapses, and counts down the clock in timed
	/// modes.
	///
	/// # Returns
	///
	/// `true` if the clock ran out on this tick, `false` otherwise.
	pub fn tick(&mut self) -> bool
	{
		self.combo_clock = self.combo_clock.saturating_add(1);
		if self.combo_clock >= COMBO_WINDOW_SECS && self.combo > 0
		{
			debug!("combo expired at {}", self.combo);
			self.combo = 0;
			self.surge = false;
			self.surge_multiplier = 1.0;
		}
		match self.time_remaining
		{
			Some(0) | None => false,
			Some(remaining) =>
			{
				self.time_remaining = Some(remaining - 1);
				remaining == 1
			}
		}
	}

	/// Apply a consumable power-up to the round. Inventory management is the
	/// caller's concern; the session only applies the effect.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up to apply.
	/// * `rng` - The random source, used by the shuffle.
	pub fn apply_power_up<R: Rng + ?Sized>(
		&mut self,
		power_up: PowerUp,
		rng: &mut R
	) {
		match power_up
		{
			PowerUp::TimeFreeze =>
			{
				if let Some(remaining) = self.time_remaining
				{
					self.time_remaining =
						Some(remaining + TIME_FREEZE_BONUS_SECS);
				}
			},
			PowerUp::Shuffle =>
			{
				self.tiles.shuffle(rng);
				self.guess.clear();
			},
			PowerUp::DoublePoints =>
			{
				self.double_points = true;
			},
			PowerUp::HintBomb =>
			{
				// Reveal the shortest unfound word. No combo credit.
				let hint =
					self.unfound_words().min_by_key(|word| word.len()).cloned();
				if let Some(word) = hint
				{
					self.score += (word.len() * 10) as u32;
					self.found.insert(word);
				}
			},
			PowerUp::LetterMagnet =>
			{
				// Auto-complete the longest unfound word.
				let target =
					self.unfound_words().max_by_key(|word| word.len()).cloned();
				if let Some(word) = target
				{
					self.score += (word.len() * 10) as u32;
					self.found.insert(word);
					self.combo += 1;
				}
			}
		}
	}
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod test
{
	use std::rc::Rc;

	use rand::{rngs::StdRng, SeedableRng};

	use crate::{
		content::PowerUp,
		dictionary::WordStore,
		puzzle::Generator,
		session::{GameMode, Session, Verdict}
	};

	/// Build a session over the canonical C-A-T-S fixture. The solution set
	/// is {ACT, AS, AT, CAT, CATS, SAT}; DOG is a real word that the tiles
	/// cannot form.
	fn session(mode: GameMode) -> Session
	{
		let mut store = WordStore::new();
		store.populate(&["CAT", "CATS", "ACT", "SAT", "DOG"]);
		let store = Rc::new(store);
		let generator = Generator::new(Rc::clone(&store));
		let puzzle = generator.generate_from_letters(&['C', 'A', 'T', 'S']);
		Session::new(store, puzzle, mode)
	}

	/// A first accepted word scores base times the one-combo multiplier.
	#[test]
	fn test_submit_accepted()
	{
		let mut session = session(GameMode::Zen);
		let verdict = session.submit_word("cat");
		assert_eq!(
			verdict,
			Verdict::Accepted {
				word: "CAT".to_string(),
				score: 36,
				is_pangram: false
			}
		);
		assert_eq!(session.score(), 36);
		assert_eq!(session.combo(), 1);
		assert!(session.found_words().contains("CAT"));
	}

	/// Gibberish is not a word; a real word the tiles cannot form is
	/// unreachable; a word found twice is already found. Each is a distinct
	/// judgement and none of them disturbs the score.
	#[test]
	fn test_submit_rejections()
	{
		let mut session = session(GameMode::Zen);
		assert_eq!(session.submit_word("XYZZY"), Verdict::NotAWord);
		assert_eq!(session.submit_word("DOG"), Verdict::Unreachable);
		let _ = session.submit_word("CAT");
		assert_eq!(session.submit_word("CAT"), Verdict::AlreadyFound);
		assert_eq!(session.score(), 36);
		assert_eq!(session.combo(), 1);
	}

	/// A pangram earns its flat bonus on top of the combo multiplier.
	#[test]
	fn test_submit_pangram()
	{
		let mut session = session(GameMode::Zen);
		let verdict = session.submit_word("CATS");
		assert_eq!(
			verdict,
			Verdict::Accepted {
				word: "CATS".to_string(),
				score: 148,
				is_pangram: true
			}
		);
	}

	/// Surge mode activates at a three-combo and multiplies only the words
	/// accepted after activation; the multiplier escalates at five.
	#[test]
	fn test_combo_and_surge()
	{
		let mut session = session(GameMode::Zen);
		let accept = |session: &mut Session, word: &str| match session
			.submit_word(word)
		{
			Verdict::Accepted { score, .. } => score,
			verdict => panic!("unexpected verdict: {:?}", verdict)
		};
		assert_eq!(accept(&mut session, "CAT"), 36);
		assert!(!session.is_surging());
		assert_eq!(accept(&mut session, "ACT"), 42);
		assert!(!session.is_surging());
		// The activating word itself is not surge-multiplied.
		assert_eq!(accept(&mut session, "SAT"), 48);
		assert!(session.is_surging());
		// Pangram at combo four, multiplied by the active 1.5x surge.
		assert_eq!(accept(&mut session, "CATS"), 258);
		assert_eq!(session.max_combo(), 4);
		assert_eq!(session.score(), 36 + 42 + 48 + 258);
	}

	/// The combo window expires five seconds after the last accepted word,
	/// taking surge mode with it.
	#[test]
	fn test_combo_window_expires()
	{
		let mut session = session(GameMode::Zen);
		let _ = session.submit_word("CAT");
		let _ = session.submit_word("ACT");
		let _ = session.submit_word("SAT");
		assert_eq!(session.combo(), 3);
		assert!(session.is_surging());
		for _ in 0..4
		{
			let _ = session.tick();
		}
		assert_eq!(session.combo(), 3);
		let _ = session.tick();
		assert_eq!(session.combo(), 0);
		assert!(!session.is_surging());
		// Max combo survives the expiry.
		assert_eq!(session.max_combo(), 3);
	}

	/// A blitz round starts at fifteen seconds and ends when the clock runs
	/// out.
	#[test]
	fn test_blitz_clock()
	{
		let mut session = session(GameMode::Blitz);
		assert_eq!(session.time_remaining(), Some(15));
		for _ in 0..14
		{
			assert!(!session.tick());
		}
		assert!(!session.is_over());
		assert!(session.tick());
		assert!(session.is_over());
		assert_eq!(session.time_remaining(), Some(0));
	}

	/// Zen rounds have no clock and never end by time.
	#[test]
	fn test_zen_is_untimed()
	{
		let mut session = session(GameMode::Zen);
		assert_eq!(session.time_remaining(), None);
		for _ in 0..100
		{
			assert!(!session.tick());
		}
		assert!(!session.is_over());
	}

	/// Tile selection honors positional tiles: each tile is usable once per
	/// guess, and duplicate letters occupy distinct tiles.
	#[test]
	fn test_tile_selection()
	{
		let mut session = session(GameMode::Zen);
		assert!(session.select_tile(0));
		assert!(!session.select_tile(0));
		assert!(session.select_tile(1));
		assert_eq!(session.current_word(), "CA");
		session.undo_selection();
		assert_eq!(session.current_word(), "C");
		session.clear_guess();
		assert_eq!(session.current_word(), "");
		assert!(!session.select_tile(99));
	}

	/// Typed letters map to the first unused tile with that letter.
	#[test]
	fn test_select_letter()
	{
		let mut session = session(GameMode::Zen);
		assert!(session.select_letter('c'));
		assert!(session.select_letter('A'));
		assert!(session.select_letter('T'));
		assert!(!session.select_letter('T'));
		assert!(!session.select_letter('Q'));
		assert_eq!(session.current_word(), "CAT");
		assert_eq!(
			session.submit_current(),
			Verdict::Accepted {
				word: "CAT".to_string(),
				score: 36,
				is_pangram: false
			}
		);
		assert_eq!(session.current_word(), "");
	}

	/// Finding every solution word completes the round.
	#[test]
	fn test_completion()
	{
		let mut session = session(GameMode::Zen);
		for word in ["ACT", "AS", "AT", "CAT", "CATS", "SAT"]
		{
			assert!(!session.is_complete());
			assert!(matches!(
				session.submit_word(word),
				Verdict::Accepted { .. }
			));
		}
		assert!(session.is_complete());
		assert!(session.is_over());
	}

	/// Time Freeze adds ten seconds in timed modes and is a no-op in untimed
	/// modes.
	#[test]
	fn test_time_freeze()
	{
		let mut rng = StdRng::seed_from_u64(0);
		let mut session = session(GameMode::Blitz);
		session.apply_power_up(PowerUp::TimeFreeze, &mut rng);
		assert_eq!(session.time_remaining(), Some(25));
		let mut session = session_zen();
		session.apply_power_up(PowerUp::TimeFreeze, &mut rng);
		assert_eq!(session.time_remaining(), None);
	}

	/// Convenience for the power-up tests.
	fn session_zen() -> Session { session(GameMode::Zen) }

	/// The shuffle permutes the session's tile copy without touching the
	/// puzzle or the solution, and clears the guess in flight.
	#[test]
	fn test_shuffle()
	{
		let mut rng = StdRng::seed_from_u64(42);
		let mut session = session_zen();
		let before = session.puzzle().clone();
		assert!(session.select_tile(0));
		session.apply_power_up(PowerUp::Shuffle, &mut rng);
		assert!(session.guess().is_empty());
		let mut tiles = session.tiles().to_vec();
		tiles.sort_unstable();
		assert_eq!(tiles, ['A', 'C', 'S', 'T']);
		assert_eq!(session.puzzle(), &before);
	}

	/// Double Points doubles exactly one accepted word.
	#[test]
	fn test_double_points()
	{
		let mut rng = StdRng::seed_from_u64(0);
		let mut session = session_zen();
		session.apply_power_up(PowerUp::DoublePoints, &mut rng);
		match session.submit_word("CAT")
		{
			Verdict::Accepted { score, .. } => assert_eq!(score, 72),
			verdict => panic!("unexpected verdict: {:?}", verdict)
		}
		match session.submit_word("ACT")
		{
			Verdict::Accepted { score, .. } => assert_eq!(score, 42),
			verdict => panic!("unexpected verdict: {:?}", verdict)
		}
	}

	/// The Hint Bomb reveals the shortest unfound word for flat points, with
	/// no combo credit.
	#[test]
	fn test_hint_bomb()
	{
		let mut rng = StdRng::seed_from_u64(0);
		let mut session = session_zen();
		session.apply_power_up(PowerUp::HintBomb, &mut rng);
		// AS is the alphabetically first of the shortest unfound words.
		assert!(session.found_words().contains("AS"));
		assert_eq!(session.score(), 20);
		assert_eq!(session.combo(), 0);
	}

	/// The Letter Magnet auto-completes the longest unfound word and counts
	/// toward the combo.
	#[test]
	fn test_letter_magnet()
	{
		let mut rng = StdRng::seed_from_u64(0);
		let mut session = session_zen();
		session.apply_power_up(PowerUp::LetterMagnet, &mut rng);
		assert!(session.found_words().contains("CATS"));
		assert_eq!(session.score(), 40);
		assert_eq!(session.combo(), 1);
	}
}
