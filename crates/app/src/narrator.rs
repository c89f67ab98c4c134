//! Offline persona narration.
//!
//! Each persona carries a table of short lines per discrete event plus a
//! table of ambient lines per tension level. The narrator never touches the
//! game state; it consumes `(TurnOutcome, MoodReading)` and a small context
//! struct, and picks lines from its own seeded stream so a fixed `--seed`
//! reproduces a whole session transcript.

use game_core::{DefeatCause, TensionLevel, TurnOutcome};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

/// Turns between ambient status lines, unless the tension shifts first.
const STATUS_COOLDOWN_TURNS: i64 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NarrationEvent {
    Start,
    Status,
    LowHealth,
    Trap,
    Medkit,
    Helper,
    NearMiss,
    Wall,
    DroneHit,
    Quit,
    Victory,
    Defeat,
    Record,
    Streak,
}

impl NarrationEvent {
    /// The narration hook for a turn outcome; plain moves narrate nothing.
    pub fn from_outcome(outcome: TurnOutcome) -> Option<NarrationEvent> {
        match outcome {
            TurnOutcome::Bump => Some(NarrationEvent::Wall),
            TurnOutcome::Moved => None,
            TurnOutcome::Trapped => Some(NarrationEvent::Trap),
            TurnOutcome::Healed => Some(NarrationEvent::Medkit),
            TurnOutcome::Helped => Some(NarrationEvent::Helper),
            TurnOutcome::Victory => Some(NarrationEvent::Victory),
            TurnOutcome::Defeat(DefeatCause::DroneContact) => Some(NarrationEvent::DroneHit),
            TurnOutcome::Defeat(DefeatCause::TrapDamage) => Some(NarrationEvent::Defeat),
        }
    }
}

/// Everything a line template may interpolate.
#[derive(Clone, Copy, Debug)]
pub struct NarrationContext {
    pub health: i32,
    pub max_health: i32,
    pub proximity: Option<u32>,
    pub tension: TensionLevel,
    pub turns: u32,
    pub streak: u32,
}

struct PersonaLines {
    start: &'static [&'static str],
    status: &'static [&'static str],
    low_health: &'static [&'static str],
    trap: &'static [&'static str],
    medkit: &'static [&'static str],
    helper: &'static [&'static str],
    near_miss: &'static [&'static str],
    wall: &'static [&'static str],
    drone_hit: &'static [&'static str],
    quit: &'static [&'static str],
    victory: &'static [&'static str],
    defeat: &'static [&'static str],
    record: &'static [&'static str],
    streak: &'static [&'static str],
    tension_low: &'static [&'static str],
    tension_mid: &'static [&'static str],
    tension_high: &'static [&'static str],
}

#[derive(Clone, Copy)]
pub struct Persona {
    pub key: &'static str,
    pub label: &'static str,
    pub style: &'static str,
    lines: &'static PersonaLines,
}

impl Persona {
    fn event_lines(&self, event: NarrationEvent) -> &'static [&'static str] {
        match event {
            NarrationEvent::Start => self.lines.start,
            NarrationEvent::Status => self.lines.status,
            NarrationEvent::LowHealth => self.lines.low_health,
            NarrationEvent::Trap => self.lines.trap,
            NarrationEvent::Medkit => self.lines.medkit,
            NarrationEvent::Helper => self.lines.helper,
            NarrationEvent::NearMiss => self.lines.near_miss,
            NarrationEvent::Wall => self.lines.wall,
            NarrationEvent::DroneHit => self.lines.drone_hit,
            NarrationEvent::Quit => self.lines.quit,
            NarrationEvent::Victory => self.lines.victory,
            NarrationEvent::Defeat => self.lines.defeat,
            NarrationEvent::Record => self.lines.record,
            NarrationEvent::Streak => self.lines.streak,
        }
    }

    fn tension_lines(&self, tension: TensionLevel) -> &'static [&'static str] {
        match tension {
            TensionLevel::Low => self.lines.tension_low,
            TensionLevel::Mid => self.lines.tension_mid,
            TensionLevel::High => self.lines.tension_high,
        }
    }
}

static DRAMATIC_LINES: PersonaLines = PersonaLines {
    start: &[
        "Curtains up on a chrome labyrinth. The vault is listening.",
        "Spotlights snap on: one intruder against a humming maze.",
    ],
    status: &[
        "You thread the corridors; the nearest drone hunts {proximity} tiles out.",
        "Cameras lean in. Vitals {health}/{max_health}, and the maze holds its breath.",
    ],
    low_health: &[
        "Your vitals flicker; the audience goes quiet.",
        "Blood on the chrome now. Every step is a headline.",
    ],
    trap: &[
        "Steel teeth snap shut. The vault draws first blood.",
        "A spike bites through. The maze grins in the dark.",
    ],
    medkit: &[
        "A quick patch, and the show stays on the air.",
        "Gauze and grit. The performance continues.",
    ],
    helper: &[
        "An ally bursts in, patches you up, and drowns the drones in static.",
        "A courier slips you stolen frequencies. The swarm stumbles mid-scene.",
    ],
    near_miss: &[
        "A rotor's shadow brushes your shoulder and passes on.",
        "The drone sweeps past close enough to read your pulse.",
    ],
    wall: &[
        "The corridor slams shut in your face. Find another cue.",
        "Cold steel refuses you. The script demands a detour.",
    ],
    drone_hit: &[
        "Rotors bloom red. The broadcast cuts to black.",
        "The drone takes its due. Curtain.",
    ],
    quit: &[
        "You walk off stage before the finale. The lights wait.",
        "Feed cut mid-act. The vault keeps your ending.",
    ],
    victory: &[
        "You lift the core and vanish into applause only you can hear.",
        "Final blackout: you exit with the prize, alarms for an encore.",
    ],
    defeat: &[
        "The maze keeps its secrets and your silhouette.",
        "Static swallows the last frame. The vault wins tonight.",
    ],
    record: &[
        "A record run: {turns} turns, and the house is on its feet.",
        "Fastest finish yet. The spotlight bends toward you.",
    ],
    streak: &[
        "{streak} wins running. The legend writes itself.",
        "The streak climbs to {streak}. The crowd chants your alias.",
    ],
    tension_low: &[
        "Heartbeat steady ({health}/{max_health}). You own this rhythm.",
        "The maze hums along, patient and tame.",
    ],
    tension_mid: &[
        "Nerves tighten. You move like a whispered rumor.",
        "The vault is watching now, curious and cold.",
    ],
    tension_high: &[
        "Every step is borrowed time; sirens scream behind your eyes.",
        "Red halos the edges of your vision. Move or be kept.",
    ],
};

static MENTOR_LINES: PersonaLines = PersonaLines {
    start: &[
        "I'm on comms. Breathe slow, step light, read the room.",
        "Channel is clear. Take the corners wide and stay patient.",
    ],
    status: &[
        "Vitals {health}/{max_health}. Nearest drone {proximity} tiles; pick your window.",
        "You're stable. Keep your spacing and plan two moves ahead.",
    ],
    low_health: &[
        "You're scraped up. Smaller steps, tighter angles.",
        "Pain is information. Let it sharpen you, not stall you.",
    ],
    trap: &[
        "Trap caught you. Note the spot and keep breathing.",
        "That one cost you. File it away for the route back.",
    ],
    medkit: &[
        "Good grab. Let the heart rate settle before you move.",
        "Patched. Use the calm to plan your next three tiles.",
    ],
    helper: &[
        "Friendly on site; drones are jammed. Use the quiet.",
        "Contact patched you and scrambled their comms. Capitalize.",
    ],
    near_miss: &[
        "That pass was close. Proof you can read its rhythm.",
        "Tight margin. Bank the timing for the next sweep.",
    ],
    wall: &[
        "Wall ahead. Slide along it and find the seam.",
        "Dead end. Rotate and pick a cleaner lane.",
    ],
    drone_hit: &[
        "Contact. The channel goes quiet with you.",
        "Impact registered. Nothing more to coach tonight.",
    ],
    quit: &[
        "Stepping out early. We debrief and reset later.",
        "Run aborted. Take the lesson, leave the sting.",
    ],
    victory: &[
        "Core secured, exfil clean. Good work.",
        "Done, and done quietly. That's the standard.",
    ],
    defeat: &[
        "Run failed. We adjust the angles and go again.",
        "Shutdown this time. Debrief when you're clear.",
    ],
    record: &[
        "Fastest clear yet: {turns} turns. The reps are paying off.",
        "New personal best. Growth you can measure.",
    ],
    streak: &[
        "{streak} straight. Discipline is holding.",
        "Streak at {streak}. Keep the edges sharp.",
    ],
    tension_low: &[
        "Composed at {health}/{max_health}. Hold that.",
        "No alarms in your breathing. Good.",
    ],
    tension_mid: &[
        "Tempo's rising. Anchor your focus.",
        "Pressure ticked up. Trust the routes you know.",
    ],
    tension_high: &[
        "Adrenaline is spiking. Breathe, then choose.",
        "It's loud in there. Deliberate moves only.",
    ],
};

static HUMOROUS_LINES: PersonaLines = PersonaLines {
    start: &[
        "Welcome to the vault. Try not to redecorate it with your blood.",
        "Another illegal stroll. Let's make some questionable choices.",
    ],
    status: &[
        "Vitals {health}/{max_health}, drone gap {proximity}. Keep the swagger small.",
        "Map check: {proximity} tiles to the nearest metal hugger. No pressure.",
    ],
    low_health: &[
        "You look terrible. Compliment intended; it means you're alive.",
        "Health bar's wheezing. Maybe hug fewer traps?",
    ],
    trap: &[
        "Ouch. Free tetanus screening, on the house.",
        "Trap found you. Technically you found it first.",
    ],
    medkit: &[
        "Bandage time. Duct tape for the soul.",
        "Health restored-ish. Please don't lick the medkit.",
    ],
    helper: &[
        "Random ally appears, slaps on a patch, tells the drones to chill.",
        "Free heal, free drone jam. Tip not included.",
    ],
    near_miss: &[
        "Drone almost hugged you. Boundaries, please.",
        "Nice dodge. Logging it as 'graceful panic'.",
    ],
    wall: &[
        "Bonk. Stealth via forehead remains a choice.",
        "The wall says no. Consider corridors next time.",
    ],
    drone_hit: &[
        "Drone hug achieved. It hurts. A lot.",
        "Metal friend delivers the final high-five.",
    ],
    quit: &[
        "Ghosting the heist? Fine. I'll narrate someone punctual.",
        "Bailing mid-run. Bold strategy.",
    ],
    victory: &[
        "Core acquired. Add 'vault heister' to the resume.",
        "You win! I believed in you the whole time. Mostly.",
    ],
    defeat: &[
        "And that's a wrap. The vault thanks you for the donation.",
        "You fell over. Again. I saw nothing.",
    ],
    record: &[
        "Speed run! {turns} turns and a new personal brag.",
        "Personal best unlocked. Shall we frame it?",
    ],
    streak: &[
        "{streak} wins in a row. Are you okay? You seem competent.",
        "Look at you, stacking {streak} victories. Fancy.",
    ],
    tension_low: &[
        "Vitals fine ({health}/{max_health}). Maybe dance a little.",
        "We're good. Probably.",
    ],
    tension_mid: &[
        "Okay, breathing is a tiny bit spicy now.",
        "Sweat level: politely concerning.",
    ],
    tension_high: &[
        "Alarms screaming. Consider fewer mistakes.",
        "Panic? Never heard of it. Also, you're nearly toast.",
    ],
};

static CYBERPUNK_LINES: PersonaLines = PersonaLines {
    start: &[
        "Freqs crackle. You slip into the grid, a ghost with a heartbeat.",
        "Neon bleeds over chrome tiles. You jack in and cut the feed.",
    ],
    status: &[
        "Telemetry: integrity {health}/{max_health}, heat signature at {proximity}.",
        "Gutterlight flickers. Drone ping at {proximity}; the rhythm stays yours.",
    ],
    low_health: &[
        "Vitals flicker like bad neon. One more surge kills the feed.",
        "Blood in the coolant line. Keep moving or flatline.",
    ],
    trap: &[
        "Pain floods the channel; the vault samples your code.",
        "Crimson spike on the HUD. The system reminds you who hosts whom.",
    ],
    medkit: &[
        "Black-market stim. Vitals climb through the static.",
        "Patch applied. Systems hold, for now.",
    ],
    helper: &[
        "A ghost contact floods the grid; the swarm stutters in the static.",
        "Alley runner syncs your feed and jams the swarm while you breathe.",
    ],
    near_miss: &[
        "Rotor wash whispers past your ear. You leave only a shadow.",
        "Proximity alert flares, then dies. The gap was enough.",
    ],
    wall: &[
        "Dead channel; chrome blocks the packet. Reroute.",
        "Static wall in the grid. Slide to a cleaner lane.",
    ],
    drone_hit: &[
        "Rotors find flesh; the feed floods red.",
        "The swarm tags your signature. Channel collapses to black.",
    ],
    quit: &[
        "You yank the jack early; the transmission fades to gray.",
        "Link cut mid-run. The city hums on without you.",
    ],
    victory: &[
        "Core liberated. You fade into night bandwidth.",
        "Signal severed, payload secured. The city keeps spinning.",
    ],
    defeat: &[
        "The feed cuts out. Vault static drowns your signal.",
        "Your channel goes dark. The grid forgets you.",
    ],
    record: &[
        "Fastest jack-in yet: {turns} turns before the sirens synced.",
        "Record pace etched into the grid. {turns} steps of clean signal.",
    ],
    streak: &[
        "{streak} straight wins. Your frequency stays untraceable.",
        "Streak of {streak}. You're a rumor the drones can't net.",
    ],
    tension_low: &[
        "Pulse smooth ({health}/{max_health}). City noise hums in tune.",
        "Ghost-silent. The sensors purr, content.",
    ],
    tension_mid: &[
        "Circuits prickle; someone is tuning in.",
        "Heat rising in the channel. Stay slick.",
    ],
    tension_high: &[
        "Redline. Rotor drums in your skull.",
        "Static blooms; the vault hunts with teeth of light.",
    ],
};

pub static PERSONAS: [Persona; 4] = [
    Persona {
        key: "dramatic",
        label: "Dramatic heist-show host",
        style: "cinematic, breathless commentary",
        lines: &DRAMATIC_LINES,
    },
    Persona {
        key: "mentor",
        label: "Calm mentor in your earpiece",
        style: "steady, encouraging coaching",
        lines: &MENTOR_LINES,
    },
    Persona {
        key: "humorous",
        label: "Sarcastic sidekick",
        style: "dry, quick quips",
        lines: &HUMOROUS_LINES,
    },
    Persona {
        key: "cyberpunk",
        label: "Gravel cyberpunk DJ",
        style: "neon noir with radio static",
        lines: &CYBERPUNK_LINES,
    },
];

pub fn persona_by_key(key: &str) -> Option<Persona> {
    PERSONAS.iter().copied().find(|persona| persona.key == key)
}

pub struct Narrator {
    persona: Persona,
    rng: ChaCha8Rng,
    low_health_noted: bool,
    last_status_turn: i64,
    last_tension: TensionLevel,
}

impl Narrator {
    pub fn new(persona: Persona, seed: u64) -> Self {
        Self {
            persona,
            rng: ChaCha8Rng::seed_from_u64(seed),
            low_health_noted: false,
            last_status_turn: -STATUS_COOLDOWN_TURNS,
            last_tension: TensionLevel::Low,
        }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn reset_round_state(&mut self) {
        self.low_health_noted = false;
        self.last_status_turn = -STATUS_COOLDOWN_TURNS;
        self.last_tension = TensionLevel::Low;
    }

    pub fn low_health_noted(&self) -> bool {
        self.low_health_noted
    }

    pub fn mark_low_health(&mut self) {
        self.low_health_noted = true;
    }

    /// One narration line for a discrete event: an event line with an
    /// ambient tension line appended.
    pub fn describe(&mut self, event: NarrationEvent, ctx: &NarrationContext) -> Option<String> {
        let base_lines = self.persona.event_lines(event);
        if base_lines.is_empty() {
            return None;
        }
        let base = self.pick(base_lines);
        let tension_lines = self.persona.tension_lines(ctx.tension);
        let line = if tension_lines.is_empty() {
            fill(base, ctx)
        } else {
            let extra = self.pick(tension_lines);
            format!("{} {}", fill(base, ctx), fill(extra, ctx))
        };
        Some(line)
    }

    /// Occasional atmospheric line: fires when the tension shifts upward, or
    /// after a short cooldown, never more often.
    pub fn ambient_status(&mut self, ctx: &NarrationContext, turn: u32) -> Option<String> {
        let turn = turn as i64;
        let cooldown_ready = turn - self.last_status_turn >= STATUS_COOLDOWN_TURNS;
        let tension_shifted = ctx.tension != self.last_tension
            && matches!(ctx.tension, TensionLevel::Mid | TensionLevel::High);
        if !(cooldown_ready || tension_shifted) {
            self.last_tension = ctx.tension;
            return None;
        }

        self.last_status_turn = turn;
        self.last_tension = ctx.tension;
        self.describe(NarrationEvent::Status, ctx)
    }

    fn pick(&mut self, lines: &'static [&'static str]) -> &'static str {
        lines[(self.rng.next_u64() as usize) % lines.len()]
    }
}

fn fill(template: &str, ctx: &NarrationContext) -> String {
    let proximity =
        ctx.proximity.map_or_else(|| "n/a".to_string(), |distance| distance.to_string());
    template
        .replace("{health}", &ctx.health.to_string())
        .replace("{max_health}", &ctx.max_health.to_string())
        .replace("{proximity}", &proximity)
        .replace("{turns}", &ctx.turns.to_string())
        .replace("{streak}", &ctx.streak.to_string())
}
