//! Battle outcome randomizer.
//!
//! A fighter's power is `hp + 1.2 * attack + 0.8 * defense`, scaled by an
//! independent random factor in `[0.8, 1.6)`. The attacker wins only on a strictly
//! higher score.

use rand::RngExt;

/// Stat used when a fighter omits one or sends zero.
pub const DEFAULT_STAT: f64 = 50.0;

const MIN_FACTOR: f64 = 0.8;
const MAX_FACTOR: f64 = 1.6;

/// Stats as supplied by the client; any of them may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BattleStats {
    pub hp: Option<f64>,
    pub attack: Option<f64>,
    pub defense: Option<f64>,
}

impl BattleStats {
    pub fn power(&self) -> f64 {
        stat(self.hp) + 1.2 * stat(self.attack) + 0.8 * stat(self.defense)
    }
}

/// Zero and NaN count as unset, so every fighter ends up with positive power.
fn stat(value: Option<f64>) -> f64 {
    value
        .filter(|v| *v != 0.0 && !v.is_nan())
        .unwrap_or(DEFAULT_STAT)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleOutcome {
    pub attacker_score: f64,
    pub defender_score: f64,
}

impl BattleOutcome {
    /// Ties go to the defender.
    pub fn attacker_wins(&self) -> bool {
        self.attacker_score > self.defender_score
    }
}

pub fn simulate<R: RngExt>(
    attacker: &BattleStats,
    defender: &BattleStats,
    rng: &mut R,
) -> BattleOutcome {
    let attacker_score = attacker.power() * rng.random_range(MIN_FACTOR..MAX_FACTOR);
    let defender_score = defender.power() * rng.random_range(MIN_FACTOR..MAX_FACTOR);
    BattleOutcome {
        attacker_score,
        defender_score,
    }
}
