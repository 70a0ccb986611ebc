//! # Dictionary
//!
//! Herein is the word store that backs every validity check in the game. The
//! store is a prefix tree of uppercase words, populated once per process from
//! a bundled word-list resource. Two-letter words are special: common word
//! lists are full of abbreviations and ambiguous short tokens, so words of
//! length exactly two are judged solely by the curated allowlist in
//! [`content`](crate::content), never by the loaded list.

use std::{
	fs::File,
	io::{self, BufRead, BufReader, ErrorKind, Read, Write},
	path::Path
};

use log::{trace, warn};
use pfx::PrefixTreeSet;
use serde::{Deserialize, Serialize};

use crate::content::{is_allowed_two_letter_word, FALLBACK_WORDS,
	TWO_LETTER_WORDS};

////////////////////////////////////////////////////////////////////////////////
//                                Definitions.                                //
////////////////////////////////////////////////////////////////////////////////

/// The shortest word the game accepts.
pub const MIN_WORD_LEN: usize = 2;

/// The longest word the solver will ever consider.
pub const MAX_WORD_LEN: usize = 15;

/// A word store is a [`PrefixTreeSet`] of uppercase words plus a loaded flag.
/// The word set is written exactly once, by [`load`](WordStore::load) or by
/// the fallback path, and is read-only thereafter.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[must_use]
pub struct WordStore
{
	/// The prefix tree of dictionary words, all uppercase.
	words: PrefixTreeSet<String>,

	/// Whether a load attempt has completed, successfully or not.
	loaded: bool
}

impl WordStore
{
	/// Construct an empty, unloaded word store. Same as [`Default::default`].
	/// Queries against an unloaded store succeed only for allowlisted
	/// two-letter words.
	///
	/// # Returns
	///
	/// An empty word store.
	#[inline]
	pub fn new() -> Self { Self::default() }

	/// Check if the word set is empty.
	///
	/// # Returns
	///
	/// `true` if the word set is empty, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_empty(&self) -> bool { self.words.is_empty() }

	/// Check if a load attempt has completed.
	///
	/// # Returns
	///
	/// `true` if the store is loaded, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_loaded(&self) -> bool { self.loaded }

	/// Check whether the given word is valid for play. Case-insensitive.
	/// Words shorter than [`MIN_WORD_LEN`] are never valid. Words of length
	/// exactly two are valid iff they appear on the two-letter allowlist; the
	/// loaded word set is not consulted for them. Longer words are valid iff
	/// they appear in the loaded word set.
	///
	/// # Arguments
	///
	/// * `word` - The word to check.
	///
	/// # Returns
	///
	/// `true` if the word is valid, `false` otherwise.
	#[must_use]
	pub fn is_valid(&self, word: &str) -> bool
	{
		let word = word.to_ascii_uppercase();
		match word.len()
		{
			0 | 1 => false,
			2 => is_allowed_two_letter_word(&word),
			_ => self.words.contains(word.as_str())
		}
	}

	/// Check whether some word in the loaded set extends the given prefix.
	/// The prefix must already be uppercase. Used by the solver to abandon
	/// dead branches of its search.
	///
	/// # Arguments
	///
	/// * `prefix` - The prefix to check.
	///
	/// # Returns
	///
	/// `true` if some word extends the prefix, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn has_extension(&self, prefix: &str) -> bool
	{
		self.words.contains_prefix(prefix)
	}

	/// Populate the store with the given words, normalizing each to uppercase.
	/// The source makes no casing or dedup guarantees; the set semantics of
	/// the prefix tree deduplicate. Words shorter than [`MIN_WORD_LEN`] are
	/// dropped, as nothing can ever validate them.
	///
	/// # Arguments
	///
	/// * `words` - The intended content of the store.
	pub fn populate<T: AsRef<str>>(&mut self, words: &[T])
	{
		for word in words
		{
			let word = word.as_ref().trim();
			if word.len() >= MIN_WORD_LEN
			{
				self.words.insert(word.to_ascii_uppercase());
			}
		}
	}

	/// Load the word list from `<dir>/<name>.txt`, or its binary cache
	/// `<dir>/<name>.dict` when that is newer. Idempotent: a second call
	/// while already loaded is a no-op. On any failure the embedded fallback
	/// list, unioned with the two-letter allowlist, is installed instead and
	/// the store still counts as loaded; the game is never left without a
	/// usable dictionary.
	///
	/// # Arguments
	///
	/// * `dir` - The directory containing the word-list files.
	/// * `name` - The name of the word list, sans extension.
	pub fn load<T: AsRef<Path>>(&mut self, dir: T, name: &str)
	{
		if self.loaded
		{
			trace!("Word store already loaded; ignoring");
			return
		}
		match Self::open(dir.as_ref(), name)
		{
			Ok(store) =>
			{
				self.words = store.words;
				trace!("Word store loaded");
			},
			Err(e) =>
			{
				warn!(
					"Failed to load word list {}/{}: {}; using fallback",
					dir.as_ref().display(),
					name,
					e
				);
				self.install_fallback();
			}
		}
		self.loaded = true;
	}

	/// Install the embedded fallback word list, unioned with the two-letter
	/// allowlist.
	fn install_fallback(&mut self)
	{
		self.populate(&FALLBACK_WORDS);
		self.populate(&TWO_LETTER_WORDS);
	}

	/// Open a word store with the given name. Only the specified directory
	/// will be searched. `name` denotes the word-list file, sans the
	/// extension. If a binary cache (`<name>.dict`) exists _and_ is newer
	/// than the text file (`<name>.txt`), it will be read; otherwise, the
	/// text file will be read and a binary cache will be created (to optimize
	/// future reads).
	///
	/// # Arguments
	///
	/// * `dir` - The directory to search.
	/// * `name` - The name of the word-list file.
	///
	/// # Returns
	///
	/// A word store containing the words from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the cache contains invalid data, [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn open<T: AsRef<Path>>(dir: T, name: &str) -> Result<Self, io::Error>
	{
		let dict_path = dir.as_ref().join(format!("{}.dict", name));
		let txt_path = dir.as_ref().join(format!("{}.txt", name));
		// Compare the modification times of the binary and text files, in
		// pursuit of using the binary cache only if it's newer than the text
		// file. If anything goes wrong, fall back to reading the text file.
		// There is no need to check for the existence of the cache
		// explicitly, as the `metadata` call fails if it doesn't exist.
		if dict_path
			.metadata()
			.and_then(|m| m.modified())
			.and_then(|dict_time| {
				txt_path
					.metadata()
					.and_then(|n| n.modified())
					.map(|txt_time| dict_time > txt_time)
			})
			.unwrap_or(false)
		{
			let store = Self::deserialize_from_file(&dict_path);
			trace!("Read binary word list: {}", dict_path.display());
			store
		}
		else
		{
			let store = Self::read_from_file(&txt_path)?;
			trace!("Read text word list: {}", txt_path.display());
			match store.serialize_to_file(&dict_path)
			{
				Ok(_) =>
				{
					trace!("Wrote binary word list: {}", dict_path.display())
				},
				Err(e) => warn!(
					"Failed to write binary word list: {}: {}",
					dict_path.display(),
					e
				)
			}
			Ok(store)
		}
	}

	/// Construct a word store from the contents of the given file. Each line
	/// in the file is considered a single word.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A word store containing the words from the file.
	///
	/// # Errors
	///
	/// If the file cannot be opened or read, an error is returned.
	pub fn read_from_file<T: AsRef<Path>>(path: T) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let reader = BufReader::new(file);
		let words = reader.lines().collect::<Result<Vec<_>, _>>()?;
		let mut store = Self::new();
		store.populate(&words);
		Ok(store)
	}

	/// Deserialize a word store from the given file. The file must contain a
	/// store serialized in [`bincode`](bincode) format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Returns
	///
	/// A word store deserialized from the file.
	///
	/// # Errors
	///
	/// * If the file cannot be opened or read, an error is returned.
	/// * If the file contains invalid data, [`ErrorKind::InvalidData`] is
	///   returned.
	pub fn deserialize_from_file<T: AsRef<Path>>(
		path: T
	) -> Result<Self, io::Error>
	{
		let file = File::open(path)?;
		let mut reader = BufReader::new(file);
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;
		let store = bincode::deserialize(&content)
			.map_err(|_e| ErrorKind::InvalidData)?;
		Ok(store)
	}

	/// Serialize the word store to the given file, in [`bincode`](bincode)
	/// format.
	///
	/// # Arguments
	///
	/// * `path` - The target file.
	///
	/// # Errors
	///
	/// If the file cannot be opened or written, an error is returned.
	pub fn serialize_to_file<T: AsRef<Path>>(
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
	use std::{fs, io::Write};

	use tempfile::{tempdir, NamedTempFile};

	use crate::dictionary::WordStore;

	/// Test basic functionality of [`WordStore`]:
	///
	/// * [`WordStore::new`]
	/// * [`WordStore::is_empty`]
	/// * [`WordStore::populate`]
	/// * [`WordStore::is_valid`]
	#[test]
	fn test_populate()
	{
		let mut store = WordStore::new();
		assert!(store.is_empty());
		assert!(!store.is_valid("HELLO"));
		assert!(!store.is_valid("WORLD"));
		store.populate(&["hello", "world"]);
		assert!(!store.is_empty());
		assert!(store.is_valid("HELLO"));
		assert!(store.is_valid("WORLD"));
	}

	/// Validity is case-insensitive from the caller's perspective, for every
	/// word length.
	#[test]
	fn test_case_insensitive()
	{
		let mut store = WordStore::new();
		store.populate(&["Stare", "TEARS"]);
		for word in ["stare", "Stare", "STARE", "tears", "of", "OF", "oF"]
		{
			assert_eq!(
				store.is_valid(word),
				store.is_valid(&word.to_ascii_uppercase())
			);
			assert!(store.is_valid(word), "{}", word);
		}
	}

	/// Words shorter than two characters are never valid.
	#[test]
	fn test_short_words_invalid()
	{
		let mut store = WordStore::new();
		store.populate(&["CAT"]);
		assert!(!store.is_valid(""));
		assert!(!store.is_valid("A"));
		assert!(!store.is_valid("c"));
	}

	/// Two-letter validity depends only on the allowlist: an allowlisted word
	/// is valid even when the loaded set excludes it, and a two-letter word
	/// that made it into the loaded set is rejected when not allowlisted.
	#[test]
	fn test_two_letter_words_use_allowlist_only()
	{
		let mut store = WordStore::new();
		// "TA" is a real crossword staple, but it is not on the allowlist;
		// "OF" is allowlisted but deliberately absent from the loaded set.
		store.populate(&["TA", "CAT"]);
		assert!(store.is_valid("OF"));
		assert!(store.is_valid("of"));
		assert!(!store.is_valid("TA"));
	}

	/// An unloaded store validates allowlisted two-letter words and nothing
	/// else.
	#[test]
	fn test_unloaded_store()
	{
		let store = WordStore::new();
		assert!(!store.is_loaded());
		assert!(store.is_valid("OF"));
		assert!(store.is_valid("IT"));
		assert!(!store.is_valid("CAT"));
		assert!(!store.is_valid("THE"));
	}

	/// A failed load installs the embedded fallback and still marks the store
	/// loaded.
	#[test]
	fn test_load_fallback()
	{
		let mut store = WordStore::new();
		store.load("/nonexistent/word/lists", "english");
		assert!(store.is_loaded());
		// In the fallback list.
		assert!(store.is_valid("CAT"));
		assert!(store.is_valid("SURGE"));
		// Allowlist-backed regardless.
		assert!(store.is_valid("OF"));
		// Not in the fallback list.
		assert!(!store.is_valid("QUIXOTIC"));
	}

	/// A second load attempt is a no-op, even when pointed at different
	/// content.
	#[test]
	fn test_load_idempotent()
	{
		let dir = tempdir().unwrap();
		fs::write(dir.path().join("first.txt"), "alpha\nbravo\n").unwrap();
		fs::write(dir.path().join("second.txt"), "charlie\n").unwrap();
		let mut store = WordStore::new();
		store.load(dir.path(), "first");
		assert!(store.is_loaded());
		assert!(store.is_valid("ALPHA"));
		store.load(dir.path(), "second");
		assert!(store.is_valid("ALPHA"));
		assert!(!store.is_valid("CHARLIE"));
	}

	/// Test reading a word store from a file:
	///
	/// * [`WordStore::read_from_file`]
	#[test]
	fn test_read_from_file()
	{
		let mut file = NamedTempFile::new().unwrap();
		writeln!(file, "hello\nWorld\nhello\n\ncat").unwrap();
		let store = WordStore::read_from_file(file.path()).unwrap();
		assert!(!store.is_empty());
		assert!(store.is_valid("HELLO"));
		assert!(store.is_valid("world"));
		assert!(store.is_valid("CAT"));
	}

	/// Test serializing and deserializing a word store:
	///
	/// * [`WordStore::serialize_to_file`]
	/// * [`WordStore::deserialize_from_file`]
	#[test]
	fn test_serialize_to_file()
	{
		let mut store = WordStore::new();
		store.populate(&["cat", "cats", "stare"]);
		let file = NamedTempFile::new().unwrap();
		store.serialize_to_file(file.path()).unwrap();
		let deserialized =
			WordStore::deserialize_from_file(file.path()).unwrap();
		assert_eq!(store, deserialized);
	}

	/// Opening a text word list writes the binary cache alongside it, and a
	/// subsequent open round-trips through the cache.
	#[test]
	fn test_open_creates_cache()
	{
		let dir = tempdir().unwrap();
		fs::write(dir.path().join("english.txt"), "cat\ncats\nact\nsat\n")
			.unwrap();
		let store = WordStore::open(dir.path(), "english").unwrap();
		assert!(store.is_valid("CAT"));
		assert!(dir.path().join("english.dict").exists());
		let again = WordStore::open(dir.path(), "english").unwrap();
		assert_eq!(store, again);
	}

	/// Prefix queries report extensibility, not membership.
	#[test]
	fn test_has_extension()
	{
		let mut store = WordStore::new();
		store.populate(&["CATS"]);
		assert!(store.has_extension("C"));
		assert!(store.has_extension("CAT"));
		assert!(store.has_extension("CATS"));
		assert!(!store.has_extension("CATSX"));
		assert!(!store.has_extension("X"));
	}
}
