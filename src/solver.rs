//! # Solver
//!
//! Herein is the anagram solver. Given the letter multiset of a puzzle, the
//! solver enumerates every permutation of every non-empty sub-multiset of the
//! letters, testing each candidate against the word store, and produces the
//! puzzle's complete solution: the set of valid words, the first pangram
//! discovered, and the longest word found.
//!
//! The search space is exponential in the letter count, which is deliberate:
//! puzzles are four to eight letters by design, and exhaustive enumeration
//! guarantees that no valid word is missed. Dead branches are abandoned early
//! using prefix queries against the word store, which prunes the tree without
//! changing the result set.

use std::{collections::BTreeSet, rc::Rc};

use fixedstr::str16;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::dictionary::{WordStore, MAX_WORD_LEN, MIN_WORD_LEN};

////////////////////////////////////////////////////////////////////////////////
//                                 Solutions.                                 //
////////////////////////////////////////////////////////////////////////////////

/// The complete solution to a puzzle, computed once when the puzzle is
/// generated and immutable for the puzzle's lifetime.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct Solution
{
	/// Every valid word formable from the puzzle's letters, uppercase,
	/// deduplicated.
	words: BTreeSet<String>,

	/// The first pangram discovered, if any. A pangram uses every distinct
	/// letter of the puzzle at least once.
	pangram: Option<String>,

	/// The longest valid word found, or empty if no word was found. Ties
	/// keep the first word discovered.
	longest_word: String
}

impl Solution
{
	/// Get the full word set.
	///
	/// # Returns
	///
	/// The set of valid words.
	#[inline]
	#[must_use]
	pub fn words(&self) -> &BTreeSet<String> { &self.words }

	/// Get the pangram, if one was found.
	///
	/// # Returns
	///
	/// The pangram, if any.
	#[inline]
	#[must_use]
	pub fn pangram(&self) -> Option<&str> { self.pangram.as_deref() }

	/// Get the longest word found.
	///
	/// # Returns
	///
	/// The longest word, or the empty string if no word was found.
	#[inline]
	#[must_use]
	pub fn longest_word(&self) -> &str { &self.longest_word }

	/// Check whether the given word belongs to the solution set.
	/// Case-insensitive.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the word is in the solution set, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn contains(&self, word: &str) -> bool
	{
		self.words.contains(&word.to_ascii_uppercase())
	}

	/// Get the number of words in the solution set.
	///
	/// # Returns
	///
	/// The word count.
	#[inline]
	#[must_use]
	pub fn len(&self) -> usize { self.words.len() }

	/// Check if the solution set is empty.
	///
	/// # Returns
	///
	/// `true` if the solution set is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.words.is_empty() }
}

////////////////////////////////////////////////////////////////////////////////
//                                  Solver.                                   //
////////////////////////////////////////////////////////////////////////////////

/// The anagram solver. Holds a shared handle on the word store; solving is a
/// pure function of the letters and the store's current content, with no side
/// effects.
#[derive(Clone, Debug)]
#[must_use]
pub struct Solver
{
	/// The word store to use for validity and prefix queries.
	dictionary: Rc<WordStore>
}

impl Solver
{
	/// Construct a new solver against the given word store.
	///
	/// # Arguments
	///
	/// * `dictionary` - The word store to use for validity checks.
	///
	/// # Returns
	///
	/// A new solver.
	#[inline]
	pub fn new(dictionary: Rc<WordStore>) -> Self
	{
		Self { dictionary }
	}

	/// Solve the given letter multiset: enumerate every word formable by
	/// arranging any sub-multiset of the letters, where each letter may be
	/// used at most as many times as it occurs. Letters are normalized to
	/// uppercase; non-alphabetic input is ignored. Exploration is
	/// deterministic (ascending alphabetical order at every depth), so
	/// first-found ties for the pangram and the longest word are
	/// reproducible. An empty or degenerate input yields an empty solution,
	/// not an error.
	///
	/// # Arguments
	///
	/// * `letters` - The puzzle's letters; duplicates permitted.
	///
	/// # Returns
	///
	/// The complete solution.
	pub fn solve(&self, letters: &[char]) -> Solution
	{
		let mut counts = [0u8; 26];
		let mut distinct = 0u32;
		for letter in letters
		{
			let letter = letter.to_ascii_uppercase();
			if letter.is_ascii_uppercase()
			{
				let index = (letter as u8 - b'A') as usize;
				counts[index] += 1;
				distinct |= 1 << index;
			}
		}
		let mut solution = Solution::default();
		let mut prefix = str16::new();
		self.explore(&mut counts, &mut prefix, distinct, &mut solution);
		trace!(
			"solved {:?}: {} words, pangram: {:?}",
			letters,
			solution.words.len(),
			solution.pangram
		);
		solution
	}

	/// Recursively explore every arrangement of the remaining letters. At
	/// each depth, each letter with a nonzero count is tried in ascending
	/// alphabetical order: decrement, append, recurse, restore. The candidate
	/// is bounded by [`MAX_WORD_LEN`], and a branch is descended only while
	/// the word store knows an extension of the candidate. Branches shorter
	/// than [`MIN_WORD_LEN`] are always descended, which keeps allowlisted
	/// two-letter words reachable even when the loaded set does not contain
	/// them.
	///
	/// # Arguments
	///
	/// * `counts` - The remaining count of each letter, indexed A to Z.
	/// * `prefix` - The candidate built so far.
	/// * `distinct` - The bit mask of the puzzle's distinct letters.
	/// * `solution` - The solution under construction.
	fn explore(
		&self,
		counts: &mut [u8; 26],
		prefix: &mut str16,
		distinct: u32,
		solution: &mut Solution
	) {
		for index in 0..26
		{
			if counts[index] == 0
			{
				continue
			}
			counts[index] -= 1;
			prefix.push_char((b'A' + index as u8) as char);
			self.consider(prefix.as_str(), distinct, solution);
			if prefix.len() < MAX_WORD_LEN
				&& (prefix.len() < MIN_WORD_LEN
					|| self.dictionary.has_extension(prefix.as_str()))
			{
				self.explore(counts, prefix, distinct, solution);
			}
			let len = prefix.len();
			prefix.truncate(len - 1);
			counts[index] += 1;
		}
	}

	/// Test a candidate and record it in the solution if it is valid. The
	/// longest word is replaced only by a strictly longer word, and the
	/// pangram is set at most once, so both keep the first word discovered.
	/// A pangram must be at least as long as the distinct-letter count and
	/// contain every distinct letter; a word with repeated letters that
	/// covers all distinct letters qualifies.
	///
	/// # Arguments
	///
	/// * `candidate` - The candidate word, uppercase.
	/// * `distinct` - The bit mask of the puzzle's distinct letters.
	/// * `solution` - The solution under construction.
	fn consider(&self, candidate: &str, distinct: u32, solution: &mut Solution)
	{
		if !self.dictionary.is_valid(candidate)
		{
			return
		}
		if candidate.len() > solution.longest_word.len()
		{
			solution.longest_word = candidate.to_string();
		}
		if solution.pangram.is_none()
			&& candidate.len() >= distinct.count_ones() as usize
			&& letter_mask(candidate) == distinct
		{
			solution.pangram = Some(candidate.to_string());
		}
		solution.words.insert(candidate.to_string());
	}
}

/// Compute the distinct-letter bit mask of an uppercase word.
///
/// # Arguments
///
/// * `word` - The word, uppercase A to Z only.
///
/// # Returns
///
/// The bit mask, bit 0 for A through bit 25 for Z.
#[inline]
#[must_use]
fn letter_mask(word: &str) -> u32
{
	word.bytes().fold(0, |mask, b| mask | 1 << (b - b'A'))
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
