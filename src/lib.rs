//! # Word Surge
//!
//! Word Surge is a casual word-finding game: players form words from a small
//! set of letter tiles, scoring points with combo and surge multipliers,
//! progressing through levels, unlocking cosmetic letter styles and cities,
//! and spending coins on consumable power-ups.
//!
//! The heart of the crate is the puzzle engine: a prefix-tree word store
//! ([`dictionary`]), an exhaustive anagram solver ([`solver`]), and a puzzle
//! generator ([`puzzle`]) that draws from curated letter pools. A round of
//! play is tracked by [`session`], progression by [`profile`], and the
//! terminal front end lives in [`app`] and [`tui`].

pub mod app;
pub mod content;
pub mod dictionary;
pub mod profile;
pub mod puzzle;
pub mod session;
pub mod solver;
pub mod tui;
