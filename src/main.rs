//! # Word Surge
//!
//! Word Surge is a casual word-finding game. Each round presents a handful of
//! letter tiles; the player forms as many dictionary words as possible before
//! the clock runs out, building combos for score multipliers and hunting the
//! pangram that uses every letter. Between rounds, earnings are spent on
//! consumable power-ups and cosmetic unlocks.
//!
//! This binary wires the engine to a terminal front end. Via command line
//! options, the user can point the game at a word-list directory, play in the
//! TUI, print the full solution for a letter set, or just prime the binary
//! word-list cache.

use std::{path::PathBuf, rc::Rc};

use clap::{Parser, Subcommand};
use log::{debug, trace, warn};
use rand::{rngs::StdRng, SeedableRng};

use wordsurge::{
	app::App,
	dictionary::WordStore,
	profile::Profile,
	puzzle::{Difficulty, Generator, Puzzle},
	session::GameMode,
	tui::tui
};

////////////////////////////////////////////////////////////////////////////////
//                           Command line options.                            //
////////////////////////////////////////////////////////////////////////////////

/// CLI for the Word Surge game.
#[derive(Clone, Debug, Parser)]
#[command(version = "1.0", author = "Word Surge Developers")]
struct Opts
{
	/// The path to the directory containing the word-list files.
	#[arg(short = 'd', long, default_value = "dict")]
	directory: String,

	/// The name of the word list. This is the name shared by the text and
	/// binary files, sans the extension.
	#[arg(short = 'n', long, default_value = "english")]
	dictionary: String,

	#[command(subcommand)]
	command: Command
}

/// The subcommands of the CLI.
#[derive(Clone, Debug, Subcommand)]
enum Command
{
	/// Just generate the binary word-list cache and exit.
	Generate,

	/// Print the complete solution for the given letters to standard output.
	Solve {
		/// The puzzle letters, as one word, e.g. CATS.
		letters: String
	},

	/// Play the game in the terminal.
	Play {
		/// The game mode preselected on the menu.
		#[arg(short, long, value_enum, default_value_t = GameMode::Marathon)]
		mode: GameMode,

		/// The puzzle difficulty preselected on the menu.
		#[arg(
			short = 'f',
			long,
			value_enum,
			default_value_t = Difficulty::Medium
		)]
		difficulty: Difficulty,

		/// The player-profile save file.
		#[arg(short, long, default_value = "profile.save")]
		profile: PathBuf,

		/// Seed the random source, for reproducible puzzle draws.
		#[arg(short, long)]
		seed: Option<u64>
	}
}

////////////////////////////////////////////////////////////////////////////////
//                               Main program.                                //
////////////////////////////////////////////////////////////////////////////////

/// Parse the command line options and execute the appropriate subcommand.
fn main()
{
	env_logger::init();

	// Parse the command line options.
	let opts = Opts::parse();
	debug!("Command line options: {:?}", opts);

	// Load the word store. This never fails: an unreadable word list falls
	// back to the embedded seed list.
	let mut store = WordStore::new();
	store.load(&opts.directory, &opts.dictionary);
	let store = Rc::new(store);

	// Execute the appropriate subcommand.
	match opts.command
	{
		Command::Generate =>
		{
			trace!("Exiting after generating binary word list");
		},
		Command::Solve { letters } =>
		{
			let letters = letters.chars().collect::<Vec<_>>();
			let generator = Generator::new(store);
			let puzzle = generator.generate_from_letters(&letters);
			print_solution(&puzzle);
		},
		Command::Play { mode, difficulty, profile, seed } =>
		{
			let profile_path = profile;
			let loaded = Profile::load_or_default(&profile_path);
			let rng = match seed
			{
				Some(seed) => StdRng::seed_from_u64(seed),
				None => StdRng::from_os_rng()
			};
			trace!("Opening TUI");
			let app = App::new(store, loaded, rng, mode, difficulty);
			let profile = tui(|terminal| app.run(terminal))
				.unwrap_or_else(|e| panic!("Failed to drive TUI: {}", e));
			match profile.save_to_file(&profile_path)
			{
				Ok(_) => trace!(
					"Saved profile: {}",
					profile_path.display()
				),
				Err(e) => warn!(
					"Failed to save profile: {}: {}",
					profile_path.display(),
					e
				)
			}
		}
	}
}

/// Print a puzzle's solution to standard output: every word, one per line,
/// followed by the pangram and longest word, when present.
///
/// # Arguments
///
/// * `puzzle` - The solved puzzle.
fn print_solution(puzzle: &Puzzle)
{
	for word in puzzle.solution().words()
	{
		println!("{}", word);
	}
	if let Some(pangram) = puzzle.solution().pangram()
	{
		println!("pangram: {}", pangram);
	}
	if !puzzle.solution().longest_word().is_empty()
	{
		println!("longest: {}", puzzle.solution().longest_word());
	}
}
