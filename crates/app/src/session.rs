//! One round of play: the driver loop that owns the `GameState` and wires
//! the engine to the renderer, narrator, and stats store.

use anyhow::{Context, Result, bail};
use game_core::{
    DefeatCause, Difficulty, GameState, GeneratedBoard, MapGenError, MapGenerator, RunOutcome,
    TensionLevel, TurnOutcome, classify, step,
};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};

use crate::input::{self, Command};
use crate::narrator::{NarrationContext, NarrationEvent, Narrator};
use crate::render::{Message, Screen};
use crate::stats_file::{RunResult, StatsStore};

const MESSAGE_CAP: usize = 5;
/// Fresh placement streams to try when a seed keeps producing walled-off
/// exits; the generator already retries internally per call.
const GENERATION_RETRIES: u32 = 3;

pub fn play_round(
    difficulty: Difficulty,
    seed: u64,
    narrator: &mut Narrator,
    screen: &Screen,
    stats: &mut StatsStore,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let generated = generate_with_retries(difficulty, &mut rng)?;
    let mut state = GameState::new(difficulty, generated);
    narrator.reset_round_state();

    let mut messages: Vec<Message> = Vec::new();
    let start_ctx = context_for(&state, classify(&state, None).tension);
    if let Some(line) = narrator.describe(NarrationEvent::Start, &start_ctx) {
        push_message(&mut messages, Message::narration(line));
    }

    let result = loop {
        screen.draw(&state, &messages)?;

        let direction = match input::read_command()? {
            Command::Quit => {
                push_message(&mut messages, Message::info("You abandon the run."));
                let ctx = context_for(&state, classify(&state, None).tension);
                if let Some(line) = narrator.describe(NarrationEvent::Quit, &ctx) {
                    push_message(&mut messages, Message::narration(line));
                }
                screen.draw(&state, &messages)?;
                break RunResult::Quit;
            }
            Command::Move(direction) => direction,
        };

        let outcome = step(&mut state, direction, &mut rng);
        let mood = classify(&state, Some(outcome));
        narrate_turn(&mut messages, narrator, &state, outcome, mood.tension);

        if let Some(run_outcome) = state.outcome {
            screen.draw(&state, &messages)?;
            break match run_outcome {
                RunOutcome::Victory => RunResult::Victory,
                RunOutcome::Defeat(_) => RunResult::Defeat,
            };
        }
    };

    let record = stats.record_run(difficulty.key, state.turns_taken, result);
    println!("Stats [{}]: {}", difficulty.name, stats.summary_line(difficulty.key));
    if result == RunResult::Victory {
        let mut ctx = context_for(&state, TensionLevel::Low);
        ctx.streak = record.streak;
        if record.new_best
            && let Some(line) = narrator.describe(NarrationEvent::Record, &ctx)
        {
            println!("{line}");
        }
        if record.streak >= 3
            && let Some(line) = narrator.describe(NarrationEvent::Streak, &ctx)
        {
            println!("{line}");
        }
    }
    Ok(())
}

fn generate_with_retries(
    difficulty: Difficulty,
    rng: &mut ChaCha8Rng,
) -> Result<GeneratedBoard> {
    let generator = MapGenerator::new(difficulty);
    for _ in 0..GENERATION_RETRIES {
        match generator.generate(rng) {
            Ok(generated) => return Ok(generated),
            Err(error @ MapGenError::InvalidConfiguration { .. }) => {
                return Err(error).context("difficulty configuration rejected");
            }
            // The stream has advanced; the next call reshuffles everything.
            Err(MapGenError::UnsolvableLayout { .. }) => continue,
        }
    }
    bail!("could not generate a solvable {} board", difficulty.name)
}

fn narrate_turn(
    messages: &mut Vec<Message>,
    narrator: &mut Narrator,
    state: &GameState,
    outcome: TurnOutcome,
    tension: TensionLevel,
) {
    let ctx = context_for(state, tension);

    match outcome {
        TurnOutcome::Bump => {
            push_message(messages, Message::info("That way is sealed."));
        }
        TurnOutcome::Moved => {}
        TurnOutcome::Trapped => {
            push_message(messages, Message::alert("A hidden spike nicks you. (-1 hp)"));
        }
        TurnOutcome::Healed => {
            push_message(messages, Message::good("You patch yourself up. (+1 hp)"));
        }
        TurnOutcome::Helped => {
            push_message(
                messages,
                Message::good("A friendly runner patches you up and jams the drones."),
            );
        }
        TurnOutcome::Victory => {
            push_message(
                messages,
                Message::good("You jack the vault core and slip away. Victory!"),
            );
        }
        TurnOutcome::Defeat(DefeatCause::DroneContact) => {
            push_message(messages, Message::alert("A drone slams into you!"));
        }
        TurnOutcome::Defeat(DefeatCause::TrapDamage) => {
            push_message(
                messages,
                Message::alert("You collapse before reaching the exit. Game over."),
            );
        }
    }

    if let Some(event) = NarrationEvent::from_outcome(outcome)
        && let Some(line) = narrator.describe(event, &ctx)
    {
        push_message(messages, Message::narration(line));
    }

    let low_threshold = (state.difficulty.max_health / 2).max(1);
    if state.outcome.is_none()
        && state.player.health <= low_threshold
        && !narrator.low_health_noted()
        && let Some(line) = narrator.describe(NarrationEvent::LowHealth, &ctx)
    {
        narrator.mark_low_health();
        push_message(messages, Message::narration(line));
    }

    if state.outcome.is_none() {
        if state.nearest_drone_distance().is_some_and(|distance| distance <= 1)
            && let Some(line) = narrator.describe(NarrationEvent::NearMiss, &ctx)
        {
            push_message(messages, Message::narration(line));
        }
        if let Some(line) = narrator.ambient_status(&ctx, state.turns_taken) {
            push_message(messages, Message::narration(line));
        }
    }
}

fn context_for(state: &GameState, tension: TensionLevel) -> NarrationContext {
    NarrationContext {
        health: state.player.health,
        max_health: state.difficulty.max_health,
        proximity: state.nearest_drone_distance(),
        tension,
        turns: state.turns_taken,
        streak: 0,
    }
}

fn push_message(messages: &mut Vec<Message>, message: Message) {
    messages.push(message);
    if messages.len() > MESSAGE_CAP {
        let overflow = messages.len() - MESSAGE_CAP;
        messages.drain(..overflow);
    }
}
