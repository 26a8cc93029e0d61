use number_master::{
    resolve_config, seeded_rng, serve_player, transport::in_memory::InMemoryTransport, BotPlayer,
    Difficulty, GameStatus, ManualClock, PlayerNode, PlayerRegistry, Strategy, Stub,
};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 && args.len() != 4 {
        eprintln!(
            "Usage: {} <seed> <games> [difficulty]",
            args.first().map_or("sim", String::as_str)
        );
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;
    let games: usize = args[2].parse()?;
    if games == 0 {
        eprintln!("<games> must be at least 1");
        std::process::exit(1);
    }
    let difficulty: Difficulty = match args.get(3) {
        Some(d) => d.parse()?,
        None => Difficulty::Medium,
    };
    let config = resolve_config(1, 100, difficulty)?;

    let registry = PlayerRegistry::with_clock(Some(seed), ManualClock::ticking(0.0, 2.0));
    let (server_transport, client_transport) = InMemoryTransport::pair();

    let server = serve_player(&registry, server_transport);

    let client = async move {
        let stub = Stub::new(client_transport, "sim");
        let mut node = PlayerNode::new(Box::new(BotPlayer::new(Strategy::Bisect)), Box::new(stub));
        let mut rng = seeded_rng(Some(seed.wrapping_add(1)));
        let mut wins = 0usize;
        for _ in 0..games {
            if let Some(report) = node.play(&mut rng, config).await? {
                if report.status == GameStatus::Won {
                    wins += 1;
                }
            }
        }
        let stats = node.api_mut().stats().await?;
        Ok::<_, anyhow::Error>((wins, stats))
    };

    let ((), (wins, stats)) = tokio::try_join!(server, client)?;

    let result = json!({
        "difficulty": difficulty.label(),
        "games": stats.total_games,
        "wins": wins,
        "win_rate": stats.win_rate,
        "high_score": stats.high_score,
        "avg_attempts": stats.avg_attempts,
        "achievements": stats.achievements.iter().map(|a| a.to_string()).collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
