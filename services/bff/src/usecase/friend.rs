use crate::domain::repository::{FriendRepository, UserRepository};
use crate::domain::types::{Friend, User};
use crate::error::BffError;

// ── ListFriends ──────────────────────────────────────────────────────────────

pub struct ListFriendsUseCase<F: FriendRepository> {
    pub friends: F,
}

impl<F: FriendRepository> ListFriendsUseCase<F> {
    pub async fn execute(&self, caller: &User) -> Result<Vec<Friend>, BffError> {
        self.friends.list(caller.id).await
    }
}

// ── AddFriend ────────────────────────────────────────────────────────────────

/// Befriend the owner of `code`. The link is mutual and adding twice is harmless.
pub struct AddFriendUseCase<U: UserRepository, F: FriendRepository> {
    pub users: U,
    pub friends: F,
}

impl<U: UserRepository, F: FriendRepository> AddFriendUseCase<U, F> {
    pub async fn execute(&self, caller: &User, code: &str) -> Result<Vec<Friend>, BffError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(BffError::MissingData("code"));
        }
        let friend = self
            .users
            .find_by_code(code)
            .await?
            .ok_or(BffError::FriendNotFound)?;
        if friend.id == caller.id {
            return Err(BffError::CannotAddSelf);
        }
        self.friends.add(caller.id, friend.id).await?;
        self.friends.list(caller.id).await
    }
}
