//! Every team mutation answers with the caller's full, freshly ordered list.

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::TeamRepository;
use crate::domain::types::{Team, TeamInput};
use crate::error::BffError;

// ── ListTeams ────────────────────────────────────────────────────────────────

pub struct ListTeamsUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> ListTeamsUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<Team>, BffError> {
        self.repo.list(user_id).await
    }
}

// ── CreateTeam ───────────────────────────────────────────────────────────────

pub struct CreateTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> CreateTeamUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, input: TeamInput) -> Result<Vec<Team>, BffError> {
        let team = Team {
            id: Uuid::now_v7(),
            user_id,
            name: input.name,
            pokemons: input.pokemons,
            created_at: Utc::now(),
        };
        self.repo.create(&team).await?;
        self.repo.list(user_id).await
    }
}

// ── UpdateTeam ───────────────────────────────────────────────────────────────

/// How a request points at one of the caller's teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamRef {
    /// Position in the listing order.
    Index(u64),
    Id(Uuid),
}

pub struct UpdateTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> UpdateTeamUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        target: TeamRef,
        input: TeamInput,
    ) -> Result<Vec<Team>, BffError> {
        let updated = match target {
            TeamRef::Index(index) => self.repo.update_at(user_id, index, &input).await?,
            TeamRef::Id(team_id) => self.repo.update(user_id, team_id, &input).await?,
        };
        if updated.is_none() {
            return Err(BffError::TeamNotFound);
        }
        self.repo.list(user_id).await
    }
}

// ── DeleteTeam ───────────────────────────────────────────────────────────────

pub struct DeleteTeamUseCase<R: TeamRepository> {
    pub repo: R,
}

impl<R: TeamRepository> DeleteTeamUseCase<R> {
    pub async fn execute(&self, user_id: Uuid, target: TeamRef) -> Result<Vec<Team>, BffError> {
        let deleted = match target {
            TeamRef::Index(index) => self.repo.delete_at(user_id, index).await?,
            TeamRef::Id(team_id) => self.repo.delete(user_id, team_id).await?,
        };
        if !deleted {
            return Err(BffError::TeamNotFound);
        }
        self.repo.list(user_id).await
    }
}
