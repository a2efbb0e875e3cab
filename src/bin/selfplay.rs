use backrank::{Board, DefenderMovement, RulesConfig, Transcript};
use clap::{Parser, ValueEnum};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Defender {
    Step,
    Slide,
}

/// Play random legal moves for both sides and report the result.
#[derive(Parser, Debug)]
struct Args {
    /// RNG seed; the same seed replays the same game.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    #[arg(long, default_value_t = 200)]
    max_plies: usize,

    #[arg(long, value_enum, default_value_t = Defender::Step)]
    defender: Defender,

    /// Print the transcript JSON instead of the final board.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let rules = RulesConfig::new(match args.defender {
        Defender::Step => DefenderMovement::Step,
        Defender::Slide => DefenderMovement::Slide,
    });
    let mut rng = StdRng::seed_from_u64(args.seed);
    let mut board = Board::with_rules(rules);

    while !board.is_win() && board.history().len() < args.max_plies {
        let moves = board.all_legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            info!(side = %board.current_turn(), "no legal moves, stopping");
            break;
        };
        let outcome = board.apply_move(mv.from, mv.to)?;
        info!(ply = board.history().len(), mv = %mv, action = %outcome.action, "played");
    }

    match board.winner() {
        Some(side) => eprintln!("{side} wins after {} plies", board.history().len()),
        None => eprintln!("No winner after {} plies", board.history().len()),
    }

    if args.json {
        println!("{}", Transcript::from_board(&board).to_json()?);
    } else {
        print!("{board}");
    }
    Ok(())
}
