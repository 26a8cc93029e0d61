#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use number_master::{
    init_logging, player::cli::prompt_yes_no, seeded_rng, serve_player, ui, BotPlayer, CliPlayer,
    Difficulty, GameService, HistoryFilter, HistoryOrder, HistoryStore, Player, PlayerNode,
    PlayerRegistry, Strategy, Stub, TcpTransport,
};

#[cfg(feature = "std")]
use clap::Parser;
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play on the local machine.
    Play {
        #[arg(long, default_value_t = 1)]
        min: i64,
        #[arg(long, default_value_t = 100)]
        max: i64,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "Let a bisecting bot play instead of you")]
        bot: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Host games for any number of named players.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Play against a game server.
    Connect {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, default_value = "player")]
        name: String,
        #[arg(long, default_value_t = 1)]
        min: i64,
        #[arg(long, default_value_t = 100)]
        max: i64,
        #[arg(long, default_value_t = Difficulty::Medium)]
        difficulty: Difficulty,
        #[arg(long, help = "Let a bisecting bot play instead of you")]
        bot: bool,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[cfg(feature = "std")]
fn make_player(bot: bool) -> Box<dyn Player> {
    if bot {
        Box::new(BotPlayer::new(Strategy::Bisect))
    } else {
        Box::new(CliPlayer::new())
    }
}

/// Play games until the player declines another, then show history and stats.
#[cfg(feature = "std")]
async fn run_games(
    mut node: PlayerNode,
    seed: Option<u64>,
    min: i64,
    max: i64,
    difficulty: Difficulty,
    bot: bool,
) -> anyhow::Result<()> {
    let mut rng = seeded_rng(seed.map(|s| s.wrapping_add(1)));
    let config = node.api_mut().resolve_config(min, max, difficulty).await?;
    loop {
        let outcome = node.play(&mut rng, config).await?;
        if outcome.is_none() {
            println!("Game abandoned.");
        }
        if bot || !prompt_yes_no("Play again?") {
            break;
        }
    }

    let api = node.api_mut();
    let history = api.history().await?;
    if history.is_empty() {
        println!("No games played.");
        return Ok(());
    }
    println!("\nYour games:");
    let store = history.into_iter().collect::<HistoryStore>();
    ui::print_history(store.view(HistoryFilter::All, HistoryOrder::MostRecent));
    ui::print_stats(&api.stats().await?);
    Ok(())
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            min,
            max,
            difficulty,
            bot,
            seed,
        } => {
            ui::print_welcome();
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let service = GameService::new(seeded_rng(seed));
            let node = PlayerNode::new(make_player(bot), Box::new(service));
            run_games(node, seed, min, max, difficulty, bot).await?;
        }
        Commands::Serve { bind, seed } => {
            println!("Starting game server at {}...", bind);
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let listener = TcpListener::bind(&bind).await?;
            let registry = Arc::new(PlayerRegistry::new(seed));
            loop {
                let (stream, addr) = listener.accept().await?;
                println!("Client connected from {}", addr);
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    if let Err(e) = serve_player(&*registry, TcpTransport::new(stream)).await {
                        eprintln!("Connection from {} ended with an error: {}", addr, e);
                    }
                });
            }
        }
        Commands::Connect {
            connect,
            name,
            min,
            max,
            difficulty,
            bot,
            seed,
        } => {
            ui::print_welcome();
            println!("Connecting to {} as '{}'...", connect, name);
            let transport = TcpTransport::connect(&connect).await?;
            let node = PlayerNode::new(make_player(bot), Box::new(Stub::new(transport, name)));
            run_games(node, seed, min, max, difficulty, bot).await?;
        }
    }

    Ok(())
}
