#![cfg(feature = "std")]

//! Plain-text rendering of reports, progress, history and statistics.

use crate::core::{
    AttemptBand, GameStatus, GuessReport, GuessResult, HintResponse, HistoryEntry, SessionProgress,
    Stats,
};

pub fn print_welcome() {
    println!("════════════════════════════════════════════════════════════");
    println!("                      NUMBER MASTER");
    println!("════════════════════════════════════════════════════════════");
    println!("Guess the secret number in as few attempts as you can.");
    println!("Faster games score more; every hint costs points.");
}

pub fn print_report(report: &GuessReport) {
    match report.status {
        GameStatus::Active => {
            let direction = match report.result {
                GuessResult::TooLow => "Too low!",
                GuessResult::TooHigh => "Too high!",
                GuessResult::Correct => "Correct!",
            };
            match report.attempts_remaining {
                Some(left) => println!("{} ({} attempts left)", direction, left),
                None => println!("{}", direction),
            }
        }
        GameStatus::Won => {
            println!(
                "Correct! You found it in {} attempts and {:.1}s.",
                report.attempts_used,
                report.elapsed_seconds.unwrap_or(0.0)
            );
            println!("Score: {}", report.score.unwrap_or(0));
            if report.new_high_score {
                println!("New high score!");
            }
        }
        GameStatus::Lost => {
            println!("Out of attempts! The number was {}.", display_target(report.target));
        }
    }
}

fn display_target(target: Option<i64>) -> String {
    target.map_or_else(|| "?".to_string(), |t| t.to_string())
}

pub fn print_hint(response: &HintResponse) {
    println!("{}", response);
}

pub fn print_progress(progress: &SessionProgress) {
    let band = match progress.band {
        Some(AttemptBand::Plenty) => " [plenty left]",
        Some(AttemptBand::Some) => " [getting low]",
        Some(AttemptBand::Few) => " [almost out]",
        None => "",
    };
    let remaining = progress
        .attempts_remaining
        .map_or_else(|| "unlimited".to_string(), |r| r.to_string());
    println!(
        "Range {}..={} | attempts {} (remaining {}){} | hints left {} | {:.0}s",
        progress.min_range,
        progress.max_range,
        progress.attempts,
        remaining,
        band,
        progress.hints_remaining,
        progress.elapsed_seconds
    );
}

pub fn print_history<'a, I>(entries: I)
where
    I: IntoIterator<Item = &'a HistoryEntry>,
{
    println!("{:<12} {:<10} {:>8} {:>6} {:>8} {:>5}", "Range", "Difficulty", "Attempts", "Score", "Time", "Hints");
    for e in entries {
        println!(
            "{:<12} {:<10} {:>8} {:>6} {:>7.1}s {:>5}",
            format!("{}-{}", e.min_range, e.max_range),
            e.difficulty,
            e.attempts,
            e.score,
            e.elapsed_seconds,
            e.hints_used
        );
    }
}

pub fn print_stats(stats: &Stats) {
    println!("\n──────────────────────── Statistics ────────────────────────");
    println!("Games played:     {}", stats.total_games);
    println!("Wins:             {} ({:.1}%)", stats.wins, stats.win_rate);
    println!(
        "Attempts:         avg {:.1}, best {}, worst {}",
        stats.avg_attempts, stats.min_attempts, stats.max_attempts
    );
    println!("High score:       {}", stats.high_score);
    println!("Average score:    {:.1}", stats.avg_score);
    println!("Recent average:   {:.1}", stats.recent_average);
    for summary in &stats.by_difficulty {
        println!(
            "  {:<10} {} games, {} wins, mean score {:.1}",
            summary.difficulty, summary.games, summary.wins, summary.mean_score
        );
    }
    if !stats.achievements.is_empty() {
        println!("Achievements:");
        for a in &stats.achievements {
            println!("  * {}", a);
        }
    }
}
