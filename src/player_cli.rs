#![cfg(feature = "std")]

use std::fmt;
use std::io::{self, BufRead, Write};

use rand::rngs::SmallRng;

use crate::{
    ai,
    board::Board,
    common::{Event, Outcome, ShotError, ShotResult},
    game::{GameEngine, GameStatus, ReplayDecision},
    player::{Action, Player, TargetView},
};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliInput {
    Shot(usize, usize),
    /// Empty line: take the advisor's suggestion.
    Suggest,
    New,
    Quit,
    Help,
}

/// Reasons a line of input could not be understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    WrongArity(usize),
    NotANumber(String),
    Negative(i64),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::WrongArity(n) => {
                write!(f, "expected two numbers `row col`, got {} value(s)", n)
            }
            InputError::NotANumber(s) => write!(f, "'{}' is not a number", s),
            InputError::Negative(v) => write!(f, "coordinates cannot be negative ({})", v),
        }
    }
}

impl std::error::Error for InputError {}

/// Parse `row col`, a command word, or an empty line.
pub fn parse_input(line: &str) -> Result<CliInput, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(CliInput::Suggest);
    }
    match line.to_ascii_lowercase().as_str() {
        "new" | "n" => return Ok(CliInput::New),
        "quit" | "q" | "exit" => return Ok(CliInput::Quit),
        "help" | "h" | "?" => return Ok(CliInput::Help),
        _ => {}
    }
    let parts: Vec<&str> = line
        .split(|ch: char| ch.is_whitespace() || ch == ',')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 2 {
        return Err(InputError::WrongArity(parts.len()));
    }
    let mut coords = [0usize; 2];
    for (slot, part) in coords.iter_mut().zip(&parts) {
        let value: i64 = part
            .parse()
            .map_err(|_| InputError::NotANumber((*part).to_string()))?;
        *slot = usize::try_from(value).map_err(|_| InputError::Negative(value))?;
    }
    Ok(CliInput::Shot(coords[0], coords[1]))
}

fn column_header(size: usize) -> String {
    let mut out = String::from("   ");
    for c in 0..size {
        out.push_str(&format!(" {:>2}", c));
    }
    out.push('\n');
    out
}

/// Render the board. Ships are only drawn when `reveal` is set.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let size = board.size();
    let mut out = column_header(size);
    for r in 0..size {
        out.push_str(&format!("{:2} ", r));
        for c in 0..size {
            let ch = match board.cell(r, c) {
                Ok(cell) => match (cell.occupied, cell.fired) {
                    (true, true) => 'X',
                    (false, true) => 'o',
                    (true, false) if reveal => 'S',
                    _ => '.',
                },
                Err(_) => '?',
            };
            out.push_str(&format!("  {}", ch));
        }
        out.push('\n');
    }
    out
}

/// Render what the player knows: hits and misses only.
pub fn render_view(view: &TargetView) -> String {
    let size = view.size();
    let mut out = column_header(size);
    for r in 0..size {
        out.push_str(&format!("{:2} ", r));
        for c in 0..size {
            let ch = if view.hits.get(r, c).unwrap_or(false) {
                'X'
            } else if view.misses.get(r, c).unwrap_or(false) {
                'o'
            } else {
                '.'
            };
            out.push_str(&format!("  {}", ch));
        }
        out.push('\n');
    }
    out
}

/// Status panel with the round counters.
pub fn render_status(engine: &GameEngine) -> String {
    let counters = engine.counters();
    let config = engine.config();
    let max_misses = config.board_size * config.board_size - config.total_ship_cells();
    format!(
        "MISS counter [1-{}]: {}\nSTRIKE counter [1-{}]: {}\nTOTAL MISS counter [1-{}]: {}\nTOTAL HIT counter [1-{}]: {}\nSHIPS SUNK: {}/{}",
        config.misses_per_strike,
        counters.consecutive_misses,
        config.strikes_to_lose,
        counters.strikes,
        max_misses,
        counters.total_misses,
        config.total_ship_cells(),
        counters.total_hits,
        counters.ships_sunk,
        config.fleet.len(),
    )
}

/// Display the board and status panel for the current round.
pub fn print_player_view(engine: &GameEngine) {
    let reveal = engine.status() == GameStatus::Lost;
    println!("\nRound {}", engine.round());
    print!("{}", render_board(engine.board(), reveal));
    println!("{}", render_status(engine));
}

/// Announce the end of a round, revealing the fleet after a loss.
pub fn print_round_over(engine: &GameEngine) {
    match engine.status() {
        GameStatus::Won => {
            println!("\nCongratulations! You sunk all the battleships!");
        }
        GameStatus::Lost => {
            println!(
                "\nGame over! You reached {} strikes.",
                engine.config().strikes_to_lose
            );
        }
        GameStatus::InProgress => return,
    }
    print_player_view(engine);
}

fn print_help(size: usize) {
    println!("Enter a target as `row col` with both in 0..{}.", size);
    println!("  <ENTER>  fire at the suggested cell");
    println!("  new      abandon this round and start a new one");
    println!("  quit     leave the game");
    println!("Board: X = hit, o = miss, . = unknown");
}

/// Human player reading commands from any buffered reader.
pub struct CliPlayer<R: BufRead> {
    input: R,
}

impl CliPlayer<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> CliPlayer<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        io::stdout().flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Ask a yes/no question. End of input counts as "no".
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        loop {
            print!("{} [y/n]: ", question);
            let Some(line) = self.read_line()? else {
                return Ok(false);
            };
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => println!("Please answer y or n."),
            }
        }
    }

    /// Ask whether to play another round.
    pub fn ask_replay(&mut self) -> io::Result<ReplayDecision> {
        if self.confirm("Do you want to play again?")? {
            Ok(ReplayDecision::PlayAgain)
        } else {
            Ok(ReplayDecision::Quit)
        }
    }

    fn prompt(&mut self, rng: &mut SmallRng, view: &TargetView) -> io::Result<Action> {
        let suggestion = ai::calc_pdf_and_guess(&view.hits, &view.misses, &view.remaining, rng);
        print!("\n{}", render_view(view));
        println!("Ships left: {:?}", view.remaining);
        loop {
            match suggestion {
                Some((r, c)) => print!("\nTarget `row col` [suggested: {} {}] (or 'help'): ", r, c),
                None => print!("\nTarget `row col` (or 'help'): "),
            }
            let Some(line) = self.read_line()? else {
                return Ok(Action::Quit);
            };
            match parse_input(&line) {
                Ok(CliInput::Shot(r, c)) => return Ok(Action::Fire(r, c)),
                Ok(CliInput::Suggest) => match suggestion {
                    Some((r, c)) => {
                        println!("Using suggestion: {} {}", r, c);
                        return Ok(Action::Fire(r, c));
                    }
                    None => println!("No suggestion available."),
                },
                Ok(CliInput::Help) => print_help(view.size()),
                Ok(CliInput::New) => {
                    if self.confirm("Are you sure you want to start a new game?")? {
                        return Ok(Action::NewRound);
                    }
                }
                Ok(CliInput::Quit) => {
                    if self.confirm("Are you sure you want to quit?")? {
                        return Ok(Action::Quit);
                    }
                }
                Err(e) => println!("✗ {}", e),
            }
        }
    }
}

impl<R: BufRead> Player for CliPlayer<R> {
    fn select_action(&mut self, rng: &mut SmallRng, view: &TargetView) -> Action {
        match self.prompt(rng, view) {
            Ok(action) => action,
            Err(e) => {
                log::error!("failed to read input: {}", e);
                Action::Quit
            }
        }
    }

    fn handle_shot_result(&mut self, result: &ShotResult) {
        match result.outcome {
            Outcome::Hit => println!("HIT at ({}, {})!", result.row, result.col),
            Outcome::Miss => println!("Miss at ({}, {}).", result.row, result.col),
        }
        for event in &result.events {
            match event {
                Event::ShipSunk { length } => {
                    println!("You sunk a battleship (size {})!", length)
                }
                Event::StrikeRecorded => println!(
                    "Strike {}! Too many misses in a row.",
                    result.counters.strikes
                ),
                Event::GameWon | Event::GameLost => {}
            }
        }
        println!(
            "misses in a row: {}  strikes: {}  hits: {}  misses: {}  sunk: {}",
            result.counters.consecutive_misses,
            result.counters.strikes,
            result.counters.total_hits,
            result.counters.total_misses,
            result.counters.ships_sunk,
        );
    }

    fn handle_rejected_shot(&mut self, error: &ShotError) -> bool {
        println!("✗ {}", error);
        !matches!(error, ShotError::InvalidTerminalOperation(_))
    }
}
