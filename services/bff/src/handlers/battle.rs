use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use pokedex_auth_types::bearer::BearerIdentity;

use crate::domain::battle::{BattleStats, simulate};
use crate::error::BffError;

#[derive(Debug, Default, Deserialize)]
pub struct StatsBody {
    pub hp: Option<f64>,
    pub attack: Option<f64>,
    pub defense: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct Combatant {
    /// Echoed back as the winner; never inspected.
    #[serde(default)]
    pub pokemon: Value,
    pub stats: Option<StatsBody>,
}

impl Combatant {
    fn stats(&self) -> BattleStats {
        let stats = self.stats.as_ref();
        BattleStats {
            hp: stats.and_then(|s| s.hp),
            attack: stats.and_then(|s| s.attack),
            defense: stats.and_then(|s| s.defense),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BattleRequest {
    pub attacker: Option<Combatant>,
    pub defender: Option<Combatant>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResponse {
    pub winner: Value,
    pub a_score: f64,
    pub d_score: f64,
}

// ── POST /api/battle/simulate ────────────────────────────────────────────────

pub async fn simulate_battle(
    _identity: BearerIdentity,
    Json(body): Json<BattleRequest>,
) -> Result<Json<BattleResponse>, BffError> {
    let (Some(attacker), Some(defender)) = (body.attacker, body.defender) else {
        return Err(BffError::MissingData("attacker and defender"));
    };
    let outcome = simulate(&attacker.stats(), &defender.stats(), &mut rand::rng());
    let winner = if outcome.attacker_wins() {
        attacker.pokemon
    } else {
        defender.pokemon
    };
    Ok(Json(BattleResponse {
        winner,
        a_score: outcome.attacker_score,
        d_score: outcome.defender_score,
    }))
}
