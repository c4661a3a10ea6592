//! Example Duel - Two sample characters trade magical attacks
//!
//! This program shows:
//! - Loading character sheets and rules (stress_core::config)
//! - Rolling 4dF on the caller's side and feeding the totals in
//! - Resolving attacks, misfires and consequences through a Roster
//! - Tending between exchanges until someone is Taken Out
//!
//! Usage: `example_duel [seed] [rules.toml]`. Set `RUST_LOG=warn` to see
//! only misfires and terminal events.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use stress_core::prelude::*;
use tracing_subscriber::EnvFilter;

/// Exchanges before the duel is called a draw
const MAX_ROUNDS: u32 = 20;

/// Aether each duellist commits to a spell
const AETHER_PER_SPELL: i32 = 2;

/// Roll four Fate dice and sum them
fn roll_4df(rng: &mut impl Rng) -> i32 {
    (0..4).map(|_| rng.gen_range(-1i32..=1)).sum()
}

/// Physical skill a character rolls to land a spell: their best of the three
fn best_physical_skill(character: &Character) -> String {
    ["Martial Arts", "Marksmanship", "Physique"]
        .iter()
        .max_by_key(|skill| character.skills.get(**skill).copied().unwrap_or(i32::MIN))
        .map(|skill| skill.to_string())
        .unwrap_or_default()
}

fn print_state(character: &Character) {
    let c = &character.combat;
    println!(
        "  {:<12} Endurance {:?}/{:?}  Resolve {:?}/{:?}  Consequences {}",
        character.name,
        c.endurance.filled_capacities(),
        c.endurance.capacities(),
        c.resolve.filled_capacities(),
        c.resolve.capacities(),
        c.consequences.occupied(),
    );
}

fn load_rules(path: Option<&String>) -> RulesConfig {
    match path {
        Some(path) => RulesConfig::load(Path::new(path)).unwrap_or_else(|e| {
            tracing::warn!("falling back to default rules: {}", e);
            RulesConfig::default()
        }),
        None => RulesConfig::default(),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(7);
    let rules = load_rules(args.get(2));

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut roster = Roster::from_characters(default_characters(), rules);
    let ids: Vec<CharacterId> = roster.ids().cloned().collect();

    if ids.len() < 2 {
        eprintln!("need at least two characters to duel");
        return;
    }

    println!("Duel (seed {}) between {} and {}", seed, ids[0], ids[1]);

    for round in 1..=MAX_ROUNDS {
        println!("\n=== Round {} ===", round);

        for (attacker, target) in [(&ids[0], &ids[1]), (&ids[1], &ids[0])] {
            let physical_skill = match roster.get(attacker) {
                Some(c) => best_physical_skill(c),
                None => continue,
            };

            let attack = MagicalAttack {
                attacker: attacker.clone(),
                target: target.clone(),
                physical_skill,
                aether_spent: AETHER_PER_SPELL,
                hit_roll: roll_4df(&mut rng),
                damage_roll: roll_4df(&mut rng),
            };

            let mut log = CombatLog::new();
            let report = match roster.magical_attack(&attack, &mut log) {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("attack failed: {}", e);
                    return;
                }
            };

            println!(
                "{} -> {}: {} for {} damage",
                attacker, target, report.hit, report.damage
            );

            let taken_out = match (&report.hit, report.target_outcome) {
                (HitResult::Misfire { outcome, .. }, _) if outcome.is_taken_out() => Some(attacker),
                (_, Some(outcome)) if outcome.is_taken_out() => Some(target),
                _ => None,
            };
            if let Some(loser) = taken_out {
                println!("\n{} is Taken Out!", loser);
                for id in &ids {
                    if let Some(c) = roster.get(id) {
                        print_state(c);
                    }
                }
                return;
            }
        }

        // Each side catches their breath and tends one shift of Resolve
        let mut log = CombatLog::new();
        for id in &ids {
            if let Err(e) = roster.tend(id, StressKind::Resolve, 1, &mut log) {
                eprintln!("tend failed: {}", e);
            }
        }

        for id in &ids {
            if let Some(c) = roster.get(id) {
                print_state(c);
            }
        }
    }

    let mut log = CombatLog::new();
    roster.end_scene(&mut log);
    println!("\nNo one fell after {} rounds. The duel is a draw.", MAX_ROUNDS);
}
