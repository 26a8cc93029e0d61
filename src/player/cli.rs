use std::io::{self, BufRead, Write};
use std::string::String;

use rand::rngs::SmallRng;

use crate::core::{GameConfig, GameError, GuessReport, HintResponse, SessionProgress};
use crate::ui;

use super::{Move, Player};

/// Interactive player reading moves from stdin.
pub struct CliPlayer {
    config: Option<GameConfig>,
}

impl CliPlayer {
    pub fn new() -> Self {
        Self { config: None }
    }
}

impl Default for CliPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse one line of player input: a number, `h`/`hint`, `p`/`progress`
/// or `q`/`quit`.
pub fn parse_command(input: &str) -> Result<Move, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input - enter a number, 'h' for a hint, 'p' for progress or 'q' to quit".to_string());
    }
    if input.eq_ignore_ascii_case("h") || input.eq_ignore_ascii_case("hint") {
        return Ok(Move::Hint);
    }
    if input.eq_ignore_ascii_case("p") || input.eq_ignore_ascii_case("progress") {
        return Ok(Move::Progress);
    }
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Ok(Move::Quit);
    }
    input
        .parse::<i64>()
        .map(Move::Guess)
        .map_err(|_| format!("'{}' is not a number", input))
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line),
    }
}

/// Ask a yes/no question on stdout; end of input counts as "no".
pub fn prompt_yes_no(question: &str) -> bool {
    loop {
        print!("{} (y/n): ", question);
        let _ = io::stdout().flush();
        let Some(line) = read_line() else {
            return false;
        };
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => println!("Please answer 'y' or 'n'."),
        }
    }
}

impl Player for CliPlayer {
    fn begin(&mut self, config: &GameConfig) {
        println!(
            "\nI'm thinking of a number between {} and {}.",
            config.min_range(),
            config.max_range()
        );
        println!(
            "Difficulty: {} | Attempts: {} | 'h' hint, 'p' progress, 'q' quit.",
            config.difficulty(),
            config.max_attempts()
        );
        self.config = Some(*config);
    }

    fn next_move(&mut self, _rng: &mut SmallRng) -> Move {
        loop {
            print!("Your guess: ");
            let _ = io::stdout().flush();
            let Some(line) = read_line() else {
                return Move::Quit;
            };
            match parse_command(&line) {
                Ok(mv) => return mv,
                Err(msg) => println!("{}", msg),
            }
        }
    }

    fn observe_guess(&mut self, _value: i64, report: &GuessReport) {
        ui::print_report(report);
    }

    fn observe_hint(&mut self, response: &HintResponse) {
        ui::print_hint(response);
    }

    fn observe_progress(&mut self, progress: &SessionProgress) {
        ui::print_progress(progress);
    }

    fn observe_error(&mut self, error: &GameError) {
        println!("{}", error);
        if let (GameError::InvalidInput { .. }, Some(config)) = (error, &self.config) {
            println!(
                "Guesses must lie between {} and {}.",
                config.min_range(),
                config.max_range()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_commands() {
        assert_eq!(parse_command("42"), Ok(Move::Guess(42)));
        assert_eq!(parse_command("  -7 \n"), Ok(Move::Guess(-7)));
        assert_eq!(parse_command("H"), Ok(Move::Hint));
        assert_eq!(parse_command("hint"), Ok(Move::Hint));
        assert_eq!(parse_command("Quit"), Ok(Move::Quit));
        assert_eq!(parse_command("p"), Ok(Move::Progress));
        assert_eq!(parse_command(" PROGRESS "), Ok(Move::Progress));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("abc").is_err());
        assert!(parse_command("4.5").is_err());
    }
}
