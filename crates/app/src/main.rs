use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Result, bail};
use clap::Parser;
use game_core::config::{Difficulty, NORMAL, PRESETS};

use app::narrator::{Narrator, PERSONAS, Persona, persona_by_key};
use app::render::Screen;
use app::session;
use app::stats_file::StatsStore;

#[derive(Parser)]
#[command(author, version, about = "Slip through a drone-patrolled vault to the far corner", long_about = None)]
struct Args {
    /// Seed for board generation and drone motion; clock-derived when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Difficulty key (easy, normal, hard) instead of the interactive picker.
    #[arg(long)]
    difficulty: Option<String>,
    /// Narrator persona key instead of the interactive picker.
    #[arg(long)]
    narrator: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("=== SIGNAL VAULT ===");
    println!("Slip through the vault, dodge the drones, grab medkits, reach the far corner.");
    println!("Controls: WASD or arrows to move, Q to quit. Walls block movement.");

    let mut stats = StatsStore::open_default();

    let difficulty = match &args.difficulty {
        Some(key) => match Difficulty::by_key(key) {
            Some(difficulty) => difficulty,
            None => bail!("unknown difficulty '{key}' (use easy, normal, or hard)"),
        },
        None => choose_difficulty()?,
    };
    println!("Stats [{}]: {}", difficulty.name, stats.summary_line(difficulty.key));

    let persona = match &args.narrator {
        Some(key) => match persona_by_key(key) {
            Some(persona) => persona,
            None => bail!("unknown narrator '{key}' (try dramatic, mentor, humorous, cyberpunk)"),
        },
        None => choose_persona()?,
    };

    let base_seed = args.seed.unwrap_or_else(runtime_seed);
    let mut narrator = Narrator::new(persona, base_seed.rotate_left(17) ^ 0x5EED);
    let screen = Screen::new();

    let mut round = 0_u64;
    loop {
        session::play_round(
            difficulty,
            base_seed.wrapping_add(round),
            &mut narrator,
            &screen,
            &mut stats,
        )?;
        round += 1;
        if !ask_yes_no("Play again? (y/n): ")? {
            println!("Thanks for running the vault.");
            break;
        }
        println!("Stats [{}]: {}", difficulty.name, stats.summary_line(difficulty.key));
    }
    Ok(())
}

fn choose_difficulty() -> Result<Difficulty> {
    println!("Choose difficulty:");
    for preset in PRESETS {
        println!("  [{}] {}: {}", &preset.key[..1], preset.name, preset.blurb);
    }
    loop {
        let raw = prompt_line("Select difficulty (e/n/h, Enter for normal): ")?;
        let raw = raw.trim().to_ascii_lowercase();
        if raw.is_empty() {
            println!("Defaulting to {}.", NORMAL.name);
            return Ok(NORMAL);
        }
        let resolved =
            PRESETS.iter().copied().find(|preset| preset.key.starts_with(raw.as_str()));
        match resolved {
            Some(difficulty) => return Ok(difficulty),
            None => println!("Invalid choice. Use e/n/h or type the name."),
        }
    }
}

fn choose_persona() -> Result<Persona> {
    println!("Choose narrator style:");
    for (index, persona) in PERSONAS.iter().enumerate() {
        println!("  [{}] {} ({}) - {}", index + 1, persona.label, persona.key, persona.style);
    }
    loop {
        let raw = prompt_line("Select narrator (number/key, Enter for default): ")?;
        let raw = raw.trim().to_ascii_lowercase();
        if raw.is_empty() {
            return Ok(PERSONAS[0]);
        }
        if let Ok(index) = raw.parse::<usize>()
            && (1..=PERSONAS.len()).contains(&index)
        {
            return Ok(PERSONAS[index - 1]);
        }
        if let Some(persona) = persona_by_key(&raw) {
            return Ok(persona);
        }
        println!("Invalid choice. Use the number or persona key.");
    }
}

fn ask_yes_no(message: &str) -> Result<bool> {
    loop {
        let raw = prompt_line(message)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

fn prompt_line(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("input stream closed");
    }
    Ok(line)
}

/// Clock and pid folded through a 64-bit finalizer; varies runs when no
/// `--seed` is given.
fn runtime_seed() -> u64 {
    let now_nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0_u128, |duration| duration.as_nanos());
    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ u64::from(std::process::id()).rotate_left(17);
    mix_seed(entropy)
}

fn mix_seed(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
