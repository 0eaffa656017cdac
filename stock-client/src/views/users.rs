//! Users view (admin only)

use std::sync::Arc;

use shared::analytics::{UserField, filter_by_text_query};
use shared::models::{User, UserCreate, UserUpdate};
use validator::Validate;

use super::{Outcome, ViewSlot, reload_after_write, settle};
use crate::ClientResult;
use crate::api::Api;
use crate::session::{Action, SessionStore, View};

#[derive(Debug)]
pub struct UsersView {
    api: Api,
    session: Arc<SessionStore>,
    slot: ViewSlot<Vec<User>>,
}

impl UsersView {
    pub fn new(api: Api, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            slot: ViewSlot::new(),
        }
    }

    pub fn snapshot(&self) -> Option<Vec<User>> {
        self.slot.snapshot()
    }

    /// Matches username, full name or email
    pub fn search(&self, query: &str) -> Vec<User> {
        self.snapshot()
            .map(|users| filter_by_text_query(&users, query, &UserField::LIST))
            .unwrap_or_default()
    }

    pub async fn refresh(&self) -> ClientResult<Outcome> {
        self.session.require_view(View::Users)?;
        let seq = self.slot.begin();
        let result = self.api.users.all().await;
        settle(&self.slot, seq, "users", result)
    }

    pub async fn create(&self, payload: &UserCreate) -> ClientResult<User> {
        self.session.require(Action::ManageUsers)?;
        payload.validate()?;

        let user = self.api.users.create(payload).await?;
        tracing::info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        reload_after_write("users", self.refresh().await);
        Ok(user)
    }

    pub async fn update(&self, id: i64, payload: &UserUpdate) -> ClientResult<User> {
        self.session.require(Action::ManageUsers)?;
        payload.validate()?;

        let user = self.api.users.update(id, payload).await?;
        reload_after_write("users", self.refresh().await);
        Ok(user)
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.session.require(Action::ManageUsers)?;

        self.api.users.delete(id).await?;
        tracing::info!(user_id = id, "User deleted");
        reload_after_write("users", self.refresh().await);
        Ok(())
    }
}
