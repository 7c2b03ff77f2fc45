mod autopilot;
mod config;
mod game_loop;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::games::snake::Board;
use common::{log, logger};
use config::{DEFAULT_CONFIG_FILE_NAME, get_config_manager};
use game_loop::run_game_loop;

#[derive(Parser)]
#[command(name = "snake_arena")]
struct Args {
    /// YAML config; a missing file means built-in defaults
    #[arg(long, default_value = DEFAULT_CONFIG_FILE_NAME)]
    config: String,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    max_ticks: Option<u64>,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Arena".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, args.verbose);

    let mut config = get_config_manager(&args.config).get_config()?;
    if let Some(max_ticks) = args.max_ticks {
        config.max_ticks = Some(max_ticks);
        config.validate()?;
    }

    let mut rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Using config {} with seed {}", args.config, rng.seed());

    let mut board = Board::from_settings(&config.game)?;
    board.start_round(&mut rng)?;
    for wall in &config.walls {
        if !board.set_walls(*wall) {
            log!("Skipping wall at ({}, {}): cell is taken", wall.x, wall.y);
        }
    }

    let summary = run_game_loop(&mut board, &mut rng, &config).await?;

    log!(
        "Round finished after {} tick(s): {} food eaten, lengths {:?}, reason {}",
        summary.ticks,
        summary.eat_count,
        summary.snake_lengths,
        match summary.death_reason {
            Some(reason) => format!("{:?}", reason),
            None if summary.interrupted => "interrupted".to_string(),
            None => "tick limit".to_string(),
        }
    );

    Ok(())
}
