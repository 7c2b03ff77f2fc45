use std::time::Duration;
use tokio::time::interval;

use common::games::SessionRng;
use common::games::snake::{Board, BoardError, DeathReason, GameEvent, RoundState};
use common::{debug_log, log};

use crate::autopilot::Autopilot;
use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundSummary {
    pub ticks: u64,
    pub eat_count: u32,
    pub death_reason: Option<DeathReason>,
    pub interrupted: bool,
    pub snake_lengths: Vec<usize>,
}

impl RoundSummary {
    fn from_board(board: &Board, ticks: u64, interrupted: bool) -> Self {
        Self {
            ticks,
            eat_count: board.eat_count(),
            death_reason: board.death_reason(),
            interrupted,
            snake_lengths: board.snakes().iter().map(|snake| snake.len()).collect(),
        }
    }
}

/// Drives an active round until game over, the tick limit or Ctrl+C.
pub async fn run_game_loop(
    board: &mut Board,
    rng: &mut SessionRng,
    config: &Config,
) -> Result<RoundSummary, BoardError> {
    let mut tick_interval_timer = interval(Duration::from_millis(config.tick_interval_ms));
    let mut ticks: u64 = 0;
    let mut interrupted = false;

    loop {
        tokio::select! {
            _ = tick_interval_timer.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                log!("Ctrl+C received, stopping the round");
                interrupted = true;
                break;
            }
        }

        if config.autopilot {
            Autopilot::steer_all(board, rng);
        }

        if !board.can_proceed() {
            report_events(board.take_events());
            break;
        }

        board.tick(rng)?;
        ticks += 1;
        report_events(board.take_events());

        if board.state() == RoundState::Over {
            break;
        }
        if config.max_ticks.is_some_and(|max_ticks| ticks >= max_ticks) {
            log!("Tick limit of {} reached", ticks);
            break;
        }
    }

    Ok(RoundSummary::from_board(board, ticks, interrupted))
}

fn report_events(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::Fed { snake, red } => {
                debug_log!("Snake {} ate {} food", snake + 1, if red { "red" } else { "ordinary" })
            }
            GameEvent::EnemyFed => debug_log!("Enemy ate food"),
            GameEvent::RedFoodSpawned(point) => {
                log!("Red food appeared at ({}, {})", point.x, point.y)
            }
            GameEvent::EnemyStopped => log!("Enemy stopped"),
            GameEvent::UnifiedControlStarted => log!("All snakes now follow the selected one"),
            GameEvent::UnifiedControlEnded => log!("Snakes are steered separately again"),
            GameEvent::Hit(reason) => log!("Collision: {:?}", reason),
            GameEvent::GameOver(reason) => log!("Game over: {:?}", reason),
        }
    }
}
