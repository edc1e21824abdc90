use axum::Json;
use axum::extract::{Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::{Team, TeamInput, TeamMember};
use crate::error::BffError;
use crate::handlers::caller::Caller;
use crate::state::AppState;
use crate::usecase::team::{
    CreateTeamUseCase, DeleteTeamUseCase, ListTeamsUseCase, TeamRef, UpdateTeamUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct TeamBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub pokemons: Vec<TeamMember>,
}

#[derive(Deserialize)]
pub struct TeamRequest {
    pub team: Option<TeamBody>,
}

impl TeamRequest {
    fn into_input(self) -> Result<TeamInput, BffError> {
        let team = self.team.ok_or(BffError::MissingData("team"))?;
        Ok(TeamInput {
            name: team.name,
            pokemons: team.pokemons,
        })
    }
}

#[derive(Serialize)]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub pokemons: Vec<TeamMember>,
    #[serde(serialize_with = "pokedex_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct TeamsResponse {
    pub teams: Vec<TeamResponse>,
}

impl From<Vec<Team>> for TeamsResponse {
    fn from(teams: Vec<Team>) -> Self {
        Self {
            teams: teams
                .into_iter()
                .map(|t| TeamResponse {
                    id: t.id,
                    name: t.name,
                    pokemons: t.pokemons,
                    created_at: t.created_at,
                })
                .collect(),
        }
    }
}

fn parse_index(raw: &str) -> Result<TeamRef, BffError> {
    raw.parse::<u64>()
        .map(TeamRef::Index)
        .map_err(|_| BffError::InvalidTeamIndex)
}

// ── GET /api/teams ───────────────────────────────────────────────────────────

pub async fn get_teams(
    Caller(user): Caller,
    State(state): State<AppState>,
) -> Result<Json<TeamsResponse>, BffError> {
    let uc = ListTeamsUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(uc.execute(user.id).await?.into()))
}

// ── POST /api/teams ──────────────────────────────────────────────────────────

pub async fn create_team(
    Caller(user): Caller,
    State(state): State<AppState>,
    Json(body): Json<TeamRequest>,
) -> Result<Json<TeamsResponse>, BffError> {
    let input = body.into_input()?;
    let uc = CreateTeamUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(uc.execute(user.id, input).await?.into()))
}

// ── PUT /api/teams/{idx} ─────────────────────────────────────────────────────

pub async fn update_team_at(
    Caller(user): Caller,
    State(state): State<AppState>,
    Path(idx): Path<String>,
    Json(body): Json<TeamRequest>,
) -> Result<Json<TeamsResponse>, BffError> {
    let target = parse_index(&idx)?;
    update_team(user.id, &state, target, body).await
}

// ── PUT /api/teams/id/{team_id} ──────────────────────────────────────────────

pub async fn update_team_by_id(
    Caller(user): Caller,
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
    Json(body): Json<TeamRequest>,
) -> Result<Json<TeamsResponse>, BffError> {
    update_team(user.id, &state, TeamRef::Id(team_id), body).await
}

async fn update_team(
    user_id: Uuid,
    state: &AppState,
    target: TeamRef,
    body: TeamRequest,
) -> Result<Json<TeamsResponse>, BffError> {
    let input = body.into_input()?;
    let uc = UpdateTeamUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(uc.execute(user_id, target, input).await?.into()))
}

// ── DELETE /api/teams/{idx} ──────────────────────────────────────────────────

pub async fn delete_team_at(
    Caller(user): Caller,
    State(state): State<AppState>,
    Path(idx): Path<String>,
) -> Result<Json<TeamsResponse>, BffError> {
    let target = parse_index(&idx)?;
    let uc = DeleteTeamUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(uc.execute(user.id, target).await?.into()))
}

// ── DELETE /api/teams/id/{team_id} ───────────────────────────────────────────

pub async fn delete_team_by_id(
    Caller(user): Caller,
    State(state): State<AppState>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<TeamsResponse>, BffError> {
    let uc = DeleteTeamUseCase {
        repo: state.team_repo(),
    };
    Ok(Json(uc.execute(user.id, TeamRef::Id(team_id)).await?.into()))
}
