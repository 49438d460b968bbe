//! Process-local credential store.
//!
//! Implements both store ports over a single mutex-guarded state. Phone
//! numbers are unique among live users, the same guarantee a relational
//! adapter gets from a unique index.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{UserPersistenceError, UserReader, UserWriter};
use crate::domain::{AttendanceSummary, LoginAttendance, NewUser, User, UserId};

#[derive(Debug, Default)]
struct StoreState {
    last_id: i64,
    users: BTreeMap<UserId, User>,
    attendance: Vec<LoginAttendance>,
    summaries: HashMap<UserId, u64>,
}

impl StoreState {
    fn live_owner_of(&self, phone: &str) -> Option<&User> {
        self.users
            .values()
            .find(|user| user.deleted_at.is_none() && user.phone == phone)
    }
}

/// In-memory [`UserReader`] and [`UserWriter`].
///
/// Ids are assigned sequentially from 1.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    state: Mutex<StoreState>,
}

impl InMemoryUserStore {
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // No invariant spans a panic point; a poisoned guard is still usable.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stored record for `id`, including soft-deleted ones.
    pub fn user(&self, id: UserId) -> Option<User> {
        self.lock().users.get(&id).cloned()
    }

    /// Every attendance fact in insertion order.
    pub fn attendance_log(&self) -> Vec<LoginAttendance> {
        self.lock().attendance.clone()
    }

    /// Login counter for `user_id`, if any login has been recorded.
    pub fn attendance_summary(&self, user_id: UserId) -> Option<AttendanceSummary> {
        self.lock()
            .summaries
            .get(&user_id)
            .map(|total| AttendanceSummary {
                user_id,
                total_logged_in: *total,
            })
    }

    /// Mark `id` as deleted. Returns `false` if no such user exists.
    pub fn soft_delete(&self, id: UserId, at: DateTime<Utc>) -> bool {
        match self.lock().users.get_mut(&id) {
            Some(user) => {
                user.deleted_at = Some(at);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserReader for InMemoryUserStore {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock().live_owner_of(phone).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .lock()
            .users
            .get(&id)
            .filter(|user| user.deleted_at.is_none())
            .cloned())
    }
}

#[async_trait]
impl UserWriter for InMemoryUserStore {
    async fn create_user(&self, user: &NewUser) -> Result<UserId, UserPersistenceError> {
        let mut state = self.lock();
        if state.live_owner_of(&user.phone).is_some() {
            return Err(UserPersistenceError::duplicate_phone(user.phone.as_str()));
        }
        state.last_id += 1;
        let id = UserId::new(state.last_id);
        state.users.insert(id, user.clone().into_user(id));
        Ok(id)
    }

    async fn update_user(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.lock();
        if state
            .live_owner_of(&user.phone)
            .is_some_and(|owner| owner.id != user.id)
        {
            return Err(UserPersistenceError::duplicate_phone(user.phone.as_str()));
        }
        match state.users.get_mut(&user.id) {
            Some(stored) => {
                *stored = user.clone();
                Ok(())
            }
            None => Err(UserPersistenceError::query(format!(
                "user {} does not exist",
                user.id
            ))),
        }
    }

    async fn create_attendance(
        &self,
        attendance: &LoginAttendance,
    ) -> Result<(), UserPersistenceError> {
        self.lock().attendance.push(*attendance);
        Ok(())
    }

    async fn save_attendance_summary(&self, user_id: UserId) -> Result<(), UserPersistenceError> {
        *self.lock().summaries.entry(user_id).or_insert(0) += 1;
        Ok(())
    }
}
