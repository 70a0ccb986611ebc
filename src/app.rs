//! # Application
//!
//! The application state and logic for the playable game: the menu, the live
//! round, and the results screen, driven as a state machine over a Ratatui
//! terminal. One-second game ticks are derived from wall-clock time between
//! frames, so the round clock and the combo window advance even while the
//! player sits on their hands.

use std::{
	io,
	mem::swap,
	rc::Rc,
	time::{Duration, Instant}
};

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyEventKind};
use rand::rngs::StdRng;
use ratatui::{
	buffer::Buffer,
	layout::{Alignment, Constraint, Direction, Layout, Rect},
	style::{Color, Style, Stylize},
	text::{Line, Span},
	widgets::{
		block::{Position, Title},
		Block, BorderType, Borders, List, Paragraph, Widget
	},
	Frame
};

use crate::{
	content::{self, PowerUp, POWER_UPS},
	dictionary::WordStore,
	profile::Profile,
	puzzle::{Difficulty, Generator},
	session::{GameMode, Session, Verdict},
	tui::Tui
};

////////////////////////////////////////////////////////////////////////////////
//                                Application.                                //
////////////////////////////////////////////////////////////////////////////////

/// The cadence of game-time ticks.
const TICK: Duration = Duration::from_secs(1);

/// The application state.
#[must_use]
pub struct App
{
	/// The execution state of the application.
	state: ExecutionState,

	/// The word store shared by the generator and every session.
	dictionary: Rc<WordStore>,

	/// The puzzle generator.
	generator: Generator,

	/// The player profile. Updated as rounds finish; returned to the caller
	/// for saving when the application exits.
	profile: Profile,

	/// The random source for puzzle draws and shuffles.
	rng: StdRng,

	/// The selected index into [`GameMode::ALL`] on the menu.
	mode_index: usize,

	/// The selected difficulty on the menu.
	difficulty: Difficulty,

	/// The transient status line shown during play.
	status: String,

	/// When the last game-time tick was applied.
	last_tick: Instant
}

// Public interface.
impl App
{
	/// Create a new application state, resting on the menu.
	///
	/// # Arguments
	///
	/// * `dictionary` - The word store.
	/// * `profile` - The player profile.
	/// * `rng` - The random source for puzzle draws and shuffles.
	/// * `mode` - The game mode preselected on the menu.
	/// * `difficulty` - The difficulty preselected on the menu.
	///
	/// # Returns
	///
	/// The new application state.
	pub fn new(
		dictionary: Rc<WordStore>,
		profile: Profile,
		rng: StdRng,
		mode: GameMode,
		difficulty: Difficulty
	) -> Self
	{
		let generator = Generator::new(Rc::clone(&dictionary));
		let mode_index = GameMode::ALL
			.iter()
			.position(|&candidate| candidate == mode)
			.unwrap_or(0);
		Self {
			state: ExecutionState::Menu,
			dictionary,
			generator,
			profile,
			rng,
			mode_index,
			difficulty,
			status: String::new(),
			last_tick: Instant::now()
		}
	}

	/// Run the application. This amounts to:
	///
	/// * Advancing game time for the live round, if any.
	/// * Rendering the application frame.
	/// * Processing events.
	///
	/// # Arguments
	///
	/// * `tui` - The text-based user interface (TUI).
	///
	/// # Returns
	///
	/// The player profile, as updated by the rounds played.
	///
	/// # Errors
	///
	/// Any error that occurs while running the application.
	pub fn run(mut self, tui: &mut Tui) -> io::Result<Profile>
	{
		while self.is_running()
		{
			self.process_systems();
			tui.draw(|frame| self.render_frame(frame))?;
			self.process_event()?;
		}
		Ok(self.profile)
	}

	/// Check if the application is running.
	///
	/// # Returns
	///
	/// `true` if the application is running, `false` otherwise.
	#[inline]
	#[must_use]
	pub fn is_running(&self) -> bool
	{
		!matches!(self.state, ExecutionState::Exiting)
	}
}

// Private implementation details.
impl App
{
	/// Advance game time while a round is live. Wall-clock seconds are folded
	/// into the session one tick at a time, and the round is finished when
	/// the session reports itself over.
	fn process_systems(&mut self)
	{
		if !matches!(self.state, ExecutionState::Playing { .. })
		{
			return
		}
		if self.last_tick.elapsed() < TICK
		{
			return
		}
		self.last_tick = Instant::now();
		let over =
			if let ExecutionState::Playing { ref mut session } = self.state
			{
				let _ = session.tick();
				session.is_over()
			}
			else
			{
				false
			};
		if over
		{
			self.finish_round();
		}
	}

	/// Start a round: draw a puzzle at the selected difficulty and enter the
	/// playing state with the selected mode.
	fn start_round(&mut self)
	{
		let mode = GameMode::ALL[self.mode_index];
		let puzzle = self.generator.generate(self.difficulty, &mut self.rng);
		let session =
			Session::new(Rc::clone(&self.dictionary), puzzle, mode);
		self.status.clear();
		self.last_tick = Instant::now();
		self.state = ExecutionState::Playing { session };
	}

	/// Finish the live round: award coins, fold the round into the profile,
	/// and present the results. Must only be called from the playing state.
	fn finish_round(&mut self)
	{
		// Evacuate the application state to take ownership of the session.
		let mut state = ExecutionState::Swapping;
		swap(&mut self.state, &mut state);
		if let ExecutionState::Playing { session } = state
		{
			let words_found = session.found_words().len() as u32;
			let words_total = session.puzzle().solution().len() as u32;
			let completion_percent =
				if words_total > 0 { words_found * 100 / words_total }
				else { 0 };
			let pangrams = session
				.found_words()
				.iter()
				.filter(|word| session.puzzle().is_pangram(word))
				.count() as u32;
			let longest_found = session
				.found_words()
				.iter()
				.max_by_key(|word| word.len())
				.cloned()
				.unwrap_or_default();
			let coins_awarded = session.score() / 10;
			self.profile.add_coins(coins_awarded);
			self.profile.record_round(
				session.score(),
				words_found,
				session.max_combo(),
				pangrams,
				session.is_complete()
			);
			let summary = RoundSummary {
				mode: session.mode(),
				score: session.score(),
				words_found,
				words_total,
				max_combo: session.max_combo(),
				completion_percent,
				longest_found,
				coins_awarded
			};
			self.state = ExecutionState::Results { summary };
		}
		else
		{
			unreachable!()
		}
	}

	/// Submit the current guess and narrate the verdict on the status line.
	/// A round completed by this submission proceeds to the results.
	fn submit_guess(&mut self)
	{
		let verdict = match self.state
		{
			ExecutionState::Playing { ref mut session } =>
				session.submit_current(),
			_ => return
		};
		match verdict
		{
			Verdict::Accepted { word, score, is_pangram } =>
			{
				let leveled_up =
					self.profile.add_xp(content::xp_reward(&word));
				let mut status = format!("{} +{}", word, score);
				if is_pangram
				{
					status.push_str("  PANGRAM!");
				}
				if leveled_up
				{
					status.push_str("  LEVEL UP!");
				}
				self.status = status;
				let complete = matches!(
					&self.state,
					ExecutionState::Playing { session }
						if session.is_complete()
				);
				if complete
				{
					self.finish_round();
				}
			},
			Verdict::NotAWord => self.status = "Not a word".to_string(),
			Verdict::Unreachable =>
				self.status = "Not in this puzzle".to_string(),
			Verdict::AlreadyFound => self.status = "Already found".to_string()
		}
	}

	/// Spend one power-up from the profile and apply it to the live round.
	/// An empty inventory slot is narrated rather than applied.
	///
	/// # Arguments
	///
	/// * `power_up` - The power-up to use.
	fn use_power_up(&mut self, power_up: PowerUp)
	{
		if !matches!(self.state, ExecutionState::Playing { .. })
		{
			return
		}
		if !self.profile.consume_power_up(power_up)
		{
			self.status = format!("No {} left", power_up.name());
			return
		}
		if let ExecutionState::Playing { ref mut session } = self.state
		{
			session.apply_power_up(power_up, &mut self.rng);
		}
		self.status = format!("{}!", power_up.name());
	}

	/// Select the first free tile bearing the given letter.
	///
	/// # Arguments
	///
	/// * `letter` - The typed letter.
	fn select_letter(&mut self, letter: char)
	{
		if let ExecutionState::Playing { ref mut session } = self.state
		{
			if !session.select_letter(letter)
			{
				self.status = format!(
					"No {} tile free",
					letter.to_ascii_uppercase()
				);
			}
		}
	}

	/// Render the application frame.
	///
	/// # Arguments
	///
	/// * `frame` - The target frame.
	fn render_frame(&self, frame: &mut Frame)
	{
		frame.render_widget(self, frame.size());
	}

	/// Render the [menu](ExecutionState::Menu) UI.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_menu(&self, area: Rect, buf: &mut Buffer)
	{
		let outer = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title(
				Title::default()
					.content("⎋ – exit".yellow().bold())
					.position(Position::Top)
					.alignment(Alignment::Left)
			)
			.title(
				Title::default()
					.content("↵ – play".green().bold())
					.position(Position::Top)
					.alignment(Alignment::Right)
			)
			.title(
				Title::default()
					.content("↑↓ – mode  ←→ – difficulty".cyan())
					.position(Position::Bottom)
					.alignment(Alignment::Center)
			);
		let inner = outer.inner(area);
		outer.render(area, buf);
		let mut lines = vec![
			Line::from(""),
			Line::from(
				Span::styled(
					"W O R D   S U R G E",
					Style::default().fg(Color::Cyan).bold()
				)
			),
			Line::from(""),
			Line::from(format!(
				"Level {}   XP {}/{}   Coins {}   Best {}",
				self.profile.level(),
				self.profile.xp(),
				self.profile.xp_to_next_level(),
				self.profile.coins(),
				self.profile.best_score()
			)),
			Line::from("")
		];
		for (index, mode) in GameMode::ALL.iter().enumerate()
		{
			let clock = match mode.starting_time()
			{
				Some(seconds) => format!("{} seconds", seconds),
				None => "untimed".to_string()
			};
			let label = format!("{:<10}{}", mode.name(), clock);
			if index == self.mode_index
			{
				lines.push(Line::from(
					Span::styled(
						format!("▸ {}", label),
						Style::default().fg(Color::Yellow).bold()
					)
				));
			}
			else
			{
				lines.push(Line::from(format!("  {}", label)));
			}
		}
		lines.push(Line::from(""));
		lines.push(Line::from(format!(
			"Difficulty: {}",
			self.difficulty.name()
		)));
		Paragraph::new(lines)
			.alignment(Alignment::Center)
			.render(inner, buf);
	}

	/// Render the [playing](ExecutionState::Playing) UI.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `session` - The live session.
	fn render_playing(&self, area: Rect, buf: &mut Buffer, session: &Session)
	{
		// Split the screen into the table and the found-word list.
		let outer = Layout::default()
			.direction(Direction::Horizontal)
			.margin(1)
			.constraints([Constraint::Percentage(100), Constraint::Min(26)])
			.split(area);
		let table = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title(
				Title::default()
					.content(format!("{} round", session.mode().name()))
					.position(Position::Top)
					.alignment(Alignment::Center)
			)
			.title(
				Title::default()
					.content("⎋ – end round".yellow().bold())
					.position(Position::Top)
					.alignment(Alignment::Left)
			)
			.title(
				Title::default()
					.content(
						"\
							A-Z – tiles \
							↵ – submit \
							⌫ – undo \
							⌦ – clear \
							⇥ – shuffle \
							1-5 – power-ups\
						".cyan()
					)
					.position(Position::Bottom)
					.alignment(Alignment::Center)
			);
		let inner = table.inner(outer[0]);
		table.render(outer[0], buf);
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.margin(1)
			.constraints([
				Constraint::Length(2),
				Constraint::Length(3),
				Constraint::Length(3),
				Constraint::Length(2),
				Constraint::Min(0)
			])
			.split(inner);
		self.render_scoreboard(rows[0], buf, session);
		self.render_tiles(rows[1], buf, session);
		let guess = Paragraph::new(format!("▸ {}", session.current_word()))
			.block(Block::default().borders(Borders::ALL).title("Guess"));
		guess.render(rows[2], buf);
		Paragraph::new(self.status.as_str())
			.style(Style::default().fg(Color::Yellow))
			.render(rows[3], buf);
		self.render_power_ups(rows[4], buf);
		// The found words live in a sidebar list.
		let found = List::new(
			session.found_words().iter().map(String::as_str)
		)
			.block(
				Block::default()
					.title(format!(
						"Found {}/{}",
						session.found_words().len(),
						session.puzzle().solution().len()
					))
					.title_alignment(Alignment::Center)
					.borders(Borders::ALL)
			)
			.style(Style::default().fg(Color::White));
		Widget::render(&found, outer[1], buf);
	}

	/// Render the score, combo, surge, and clock line.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `session` - The live session.
	fn render_scoreboard(
		&self,
		area: Rect,
		buf: &mut Buffer,
		session: &Session
	) {
		let clock = match session.time_remaining()
		{
			Some(seconds) => format!("{}s", seconds),
			None => "--".to_string()
		};
		let mut spans = vec![
			Span::raw(format!("Score {}", session.score())),
			Span::raw("   "),
			Span::raw(format!("Combo x{}", session.combo())),
			Span::raw("   ")
		];
		if session.is_surging()
		{
			spans.push("SURGE".yellow().bold());
			spans.push(Span::raw("   "));
		}
		spans.push(Span::raw(format!("Time {}", clock)));
		let lines = vec![
			Line::from(spans),
			Line::from(format!("Level {}", self.profile.level()))
		];
		Paragraph::new(lines).render(area, buf);
	}

	/// Render the letter tiles. Tiles consumed by the current guess are
	/// highlighted in guess order.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `session` - The live session.
	fn render_tiles(&self, area: Rect, buf: &mut Buffer, session: &Session)
	{
		let constraints = session
			.tiles()
			.iter()
			.map(|_| Constraint::Length(7))
			.collect::<Vec<_>>();
		let row = Layout::default()
			.direction(Direction::Horizontal)
			.constraints(constraints)
			.split(area);
		for (index, &tile) in session.tiles().iter().enumerate()
		{
			let in_guess = session.guess().contains(&index);
			let style =
				if in_guess
				{
					Style::default().fg(Color::Black).bg(Color::Cyan)
				}
				else
				{
					Style::default()
				};
			let block = Block::new()
				.border_type(BorderType::Rounded)
				.borders(Borders::ALL)
				.border_style(Style::default().fg(Color::White));
			Paragraph::new(tile.to_string())
				.block(block)
				.alignment(Alignment::Center)
				.style(style)
				.render(row[index], buf);
		}
	}

	/// Render the power-up bar with inventory counts.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	fn render_power_ups(&self, area: Rect, buf: &mut Buffer)
	{
		let lines = POWER_UPS
			.iter()
			.enumerate()
			.map(|(index, &power_up)| {
				Line::from(format!(
					"{} {:<14} x{}",
					index + 1,
					power_up.name(),
					self.profile.power_ups().count(power_up)
				))
			})
			.collect::<Vec<_>>();
		Paragraph::new(lines)
			.style(Style::default().fg(Color::DarkGray))
			.render(area, buf);
	}

	/// Render the [results](ExecutionState::Results) UI.
	///
	/// # Arguments
	///
	/// * `area` - The target area.
	/// * `buf` - The target buffer.
	/// * `summary` - The finished round's summary.
	fn render_results(
		&self,
		area: Rect,
		buf: &mut Buffer,
		summary: &RoundSummary
	) {
		let outer = Block::default()
			.borders(Borders::ALL)
			.border_style(Style::default().fg(Color::White))
			.title(
				Title::default()
					.content("⎋ – exit".yellow().bold())
					.position(Position::Top)
					.alignment(Alignment::Left)
			)
			.title(
				Title::default()
					.content("↵ – menu".green().bold())
					.position(Position::Top)
					.alignment(Alignment::Right)
			);
		let inner = outer.inner(area);
		outer.render(area, buf);
		let headline =
			if summary.completion_percent == 100 { "PERFECT!" }
			else if summary.completion_percent >= 75 { "AMAZING!" }
			else { "GOOD GAME!" };
		let lines = vec![
			Line::from(""),
			Line::from(
				Span::styled(
					headline,
					Style::default().fg(Color::Cyan).bold()
				)
			),
			Line::from(""),
			Line::from(format!("{} round", summary.mode.name())),
			Line::from(""),
			Line::from(format!("Score        {}", summary.score)),
			Line::from(format!(
				"Words        {}/{}",
				summary.words_found, summary.words_total
			)),
			Line::from(format!("Max combo    x{}", summary.max_combo)),
			Line::from(format!(
				"Completion   {}%",
				summary.completion_percent
			)),
			Line::from(format!("Longest      {}", summary.longest_found)),
			Line::from(format!("Coins        +{}", summary.coins_awarded))
		];
		Paragraph::new(lines)
			.alignment(Alignment::Center)
			.render(inner, buf);
	}

	/// Process events. Block for only half a millisecond, so as not to stall
	/// the game clock.
	///
	/// # Errors
	///
	/// Any error that occurs while processing events.
	fn process_event(&mut self) -> io::Result<()>
	{
		if poll(Duration::from_micros(500))?
		{
			match read()?
			{
				Event::Key(event) if event.kind == KeyEventKind::Press =>
					self.process_key_event(event),
				_ => {}
			}
		}
		Ok(())
	}

	/// Process a key event, dispatching on the execution state.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event(&mut self, event: KeyEvent)
	{
		match self.state
		{
			ExecutionState::Swapping => unreachable!(),
			ExecutionState::Menu => self.process_key_event_menu(event),
			ExecutionState::Playing { .. } =>
				self.process_key_event_playing(event),
			ExecutionState::Results { .. } =>
				self.process_key_event_results(event),
			ExecutionState::Exiting => {}
		}
	}

	/// Process a key event on the [menu](ExecutionState::Menu):
	///
	/// * Escape - Exit the application.
	/// * Up/Down - Select the game mode.
	/// * Left/Right - Cycle the difficulty.
	/// * Enter - Start a round.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_menu(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.state = ExecutionState::Exiting,
			KeyCode::Up => self.mode_index = self.mode_index.saturating_sub(1),
			KeyCode::Down =>
				self.mode_index =
					(self.mode_index + 1).min(GameMode::ALL.len() - 1),
			KeyCode::Left =>
				self.difficulty = self.difficulty.next().next(),
			KeyCode::Right => self.difficulty = self.difficulty.next(),
			KeyCode::Enter => self.start_round(),
			_ => {}
		}
	}

	/// Process a key event while [playing](ExecutionState::Playing):
	///
	/// * Escape - End the round and show the results.
	/// * Enter - Submit the current guess.
	/// * Backspace - Remove the last selected tile.
	/// * Delete - Clear the guess.
	/// * Tab - Spend a Letter Shuffle.
	/// * 1-5 - Spend the numbered power-up.
	/// * A-Z - Select the first free tile with that letter.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_playing(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.finish_round(),
			KeyCode::Enter => self.submit_guess(),
			KeyCode::Backspace =>
			{
				if let ExecutionState::Playing { ref mut session } =
					self.state
				{
					session.undo_selection();
				}
			},
			KeyCode::Delete =>
			{
				if let ExecutionState::Playing { ref mut session } =
					self.state
				{
					session.clear_guess();
				}
			},
			KeyCode::Tab => self.use_power_up(PowerUp::Shuffle),
			KeyCode::Char(c) if c.is_ascii_digit() =>
			{
				let index = c.to_digit(10).unwrap_or(0) as usize;
				if (1..=POWER_UPS.len()).contains(&index)
				{
					self.use_power_up(POWER_UPS[index - 1]);
				}
			},
			KeyCode::Char(c) if c.is_alphabetic() => self.select_letter(c),
			_ => {}
		}
	}

	/// Process a key event on the [results](ExecutionState::Results) screen:
	///
	/// * Escape - Exit the application.
	/// * Enter - Return to the menu.
	///
	/// # Arguments
	///
	/// * `event` - The key event to process.
	fn process_key_event_results(&mut self, event: KeyEvent)
	{
		match event.code
		{
			KeyCode::Esc => self.state = ExecutionState::Exiting,
			KeyCode::Enter =>
			{
				self.status.clear();
				self.state = ExecutionState::Menu;
			},
			_ => {}
		}
	}
}

impl Widget for &App
{
	fn render(self, area: Rect, buf: &mut Buffer)
	{
		match self.state
		{
			ExecutionState::Swapping => unreachable!(),
			ExecutionState::Menu => self.render_menu(area, buf),
			ExecutionState::Playing { ref session } =>
				self.render_playing(area, buf, session),
			ExecutionState::Results { ref summary } =>
				self.render_results(area, buf, summary),
			ExecutionState::Exiting => {}
		}
	}
}

/// The execution state of the application.
enum ExecutionState
{
	/// The application state is transitioning to the next state. This is a
	/// transient state that should not be rendered.
	Swapping,

	/// The player is choosing a mode and difficulty.
	Menu,

	/// A round is live.
	Playing
	{
		/// The live session.
		session: Session
	},

	/// The player is reviewing a finished round.
	Results
	{
		/// The finished round's summary.
		summary: RoundSummary
	},

	/// The application is exiting.
	Exiting
}

/// The distilled outcome of a finished round, for the results screen.
#[derive(Clone, Debug)]
struct RoundSummary
{
	/// The round's game mode.
	mode: GameMode,

	/// The final score.
	score: u32,

	/// The number of words found.
	words_found: u32,

	/// The size of the solution set.
	words_total: u32,

	/// The highest combo reached.
	max_combo: u32,

	/// Words found over words total, as a percentage.
	completion_percent: u32,

	/// The longest word the player found.
	longest_found: String,

	/// The coins awarded for the round.
	coins_awarded: u32
}

////////////////////////////////////////////////////////////////////////////////
//                                   Tests.                                   //
////////////////////////////////////////////////////////////////////////////////
