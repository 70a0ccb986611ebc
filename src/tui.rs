//! # Text-based user interface (TUI)
//!
//! Herein is the terminal plumbing for the game: entering and leaving the
//! alternate screen, toggling raw mode, and keeping a crashed process from
//! stranding the user's terminal in raw mode. Every Ratatui application needs
//! this same bracket; until the library grows one, it lives here.

use std::{
	io::{self, stdout, Stdout},
	panic,
	sync::Arc
};

use crossterm::{
	execute,
	terminal::{
		disable_raw_mode, enable_raw_mode,
		EnterAlternateScreen, LeaveAlternateScreen
	}
};
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};

////////////////////////////////////////////////////////////////////////////////
//                         Text-based user interface.                         //
////////////////////////////////////////////////////////////////////////////////

/// The text-based user interface (TUI) type.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Open the text-based user interface (TUI), apply the given function to it,
/// and restore the terminal afterward. While the function runs, a replacement
/// panic hook restores the terminal before delegating to the previous hook,
/// so a panicking application still leaves the terminal usable. The game is
/// single-threaded, so the hook does not need to discriminate threads.
///
/// # Arguments
///
/// * `f` - The function to apply to the TUI.
///
/// # Returns
///
/// The result of applying `f` to the TUI.
///
/// # Errors
///
/// Any error that occurs while driving the TUI.
pub fn tui<F, T>(f: F) -> io::Result<T>
	where F: FnOnce(&mut Tui) -> io::Result<T>
{
	// The previous hook has to be shared with the replacement hook, which
	// must be 'static; park it in an Arc so it can be recovered afterward.
	let original = Arc::new(panic::take_hook());
	let shared = Arc::clone(&original);
	panic::set_hook(Box::new(move |info| {
		// Nothing useful can be done about a restore failure while already
		// panicking.
		let _ = tui_restore();
		shared.as_ref()(info);
	}));
	// `tui_init` is non-atomic, so the terminal must be restored even on
	// partial success.
	let result = match tui_init()
	{
		Ok(mut terminal) => f(&mut terminal),
		Err(e) => Err(e)
	};
	// Drop the replacement hook first; that releases its Arc reference, so
	// the previous hook can be unwrapped and reinstated.
	let _ = panic::take_hook();
	if let Ok(original) = Arc::try_unwrap(original)
	{
		panic::set_hook(original);
	}
	tui_restore()?;
	result
}

/// Initialize the text-based user interface (TUI).
///
/// # Returns
///
/// The initialized TUI.
///
/// # Errors
///
/// Any error that occurs while initializing the TUI.
fn tui_init() -> io::Result<Tui>
{
	let mut stdout = stdout();
	execute!(stdout, EnterAlternateScreen)?;
	enable_raw_mode()?;
	Terminal::new(CrosstermBackend::new(stdout))
}

/// Restore the terminal to its original state.
///
/// # Errors
///
/// Any error that occurs while restoring the terminal.
fn tui_restore() -> io::Result<()>
{
	let mut stdout = stdout();
	execute!(stdout, LeaveAlternateScreen)?;
	disable_raw_mode()?;
	// Take care to restore the cursor.
	CrosstermBackend::new(stdout).show_cursor()
}
