//! In-memory collaborators for the cheer pipeline tests

use cheer_common::{BoxFuture, PushRequest, PushService};
use cheer_db::{
    Cheer, CheerRepository, CounterRepository, DbError, Feedback, FeedbackRepository,
    Installation, InstallationRef, InstallationRefRepository, InstallationRepository, NewCheer,
    NewFeedback, SavedInstallation,
};
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::random::RandomSource;

#[derive(Debug, Default)]
struct StoreState {
    installations: Vec<Installation>,
    refs: Vec<InstallationRef>,
    count: Option<i64>,
    cheers: Vec<Cheer>,
    feedback: Vec<Feedback>,
    fail_ref_writes: bool,
    fail_cheer_writes: bool,
    fail_mark_responded: bool,
    next_id: u64,
}

impl StoreState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// Store keeping every record in memory, in insertion order
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    /// Empty store with a counter at zero
    pub fn new() -> Self {
        let store = Self::without_counter();
        store.set_count(0);
        store
    }

    pub fn without_counter() -> Self {
        Self {
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    /// Register `installation_id` the way the registry hook would
    pub async fn register_ref(&self, installation_id: &str) {
        self.create_ref(installation_id, Some("Christmas Cheer"))
            .await
            .unwrap();
        self.increment_count().await.unwrap();
    }

    pub fn set_count(&self, count: i64) {
        self.lock().count = Some(count);
    }

    pub fn count(&self) -> Option<i64> {
        self.lock().count
    }

    pub fn fail_ref_writes(&self) {
        self.lock().fail_ref_writes = true;
    }

    pub fn fail_cheer_writes(&self) {
        self.lock().fail_cheer_writes = true;
    }

    pub fn fail_mark_responded(&self) {
        self.lock().fail_mark_responded = true;
    }

    pub fn ref_installation_ids(&self) -> Vec<String> {
        self.lock()
            .refs
            .iter()
            .map(|r| r.installation_id.clone())
            .collect()
    }

    pub fn cheers(&self) -> Vec<Cheer> {
        self.lock().cheers.clone()
    }

    pub fn feedback(&self) -> Vec<Feedback> {
        self.lock().feedback.clone()
    }
}

impl InstallationRepository for InMemoryStore {
    async fn save_installation(
        &self,
        installation: Installation,
    ) -> Result<SavedInstallation, DbError> {
        let mut state = self.lock();
        let now = Utc::now();
        let existing = state
            .installations
            .iter_mut()
            .find(|i| i.installation_id == installation.installation_id);

        match existing {
            Some(existing) => {
                let updated = Installation {
                    created_at: existing.created_at,
                    updated_at: Some(now),
                    ..installation
                };
                *existing = updated.clone();
                Ok(SavedInstallation {
                    installation: updated,
                    is_new_record: false,
                })
            }
            None => {
                let created = Installation {
                    created_at: Some(now),
                    updated_at: Some(now),
                    ..installation
                };
                state.installations.push(created.clone());
                Ok(SavedInstallation {
                    installation: created,
                    is_new_record: true,
                })
            }
        }
    }

    async fn find_installation(
        &self,
        installation_id: &str,
    ) -> Result<Option<Installation>, DbError> {
        Ok(self
            .lock()
            .installations
            .iter()
            .find(|i| i.installation_id == installation_id)
            .cloned())
    }
}

impl InstallationRefRepository for InMemoryStore {
    async fn find_ref_by_installation(
        &self,
        installation_id: &str,
    ) -> Result<Option<InstallationRef>, DbError> {
        Ok(self
            .lock()
            .refs
            .iter()
            .find(|r| r.installation_id == installation_id)
            .cloned())
    }

    async fn create_ref(
        &self,
        installation_id: &str,
        app_name: Option<&str>,
    ) -> Result<InstallationRef, DbError> {
        let mut state = self.lock();
        if state.fail_ref_writes {
            return Err(DbError::QueryError("ref writes disabled".to_string()));
        }
        let created = InstallationRef {
            id: state.next_id("ref"),
            installation_id: installation_id.to_string(),
            app_name: app_name.map(str::to_string),
            created_at: Utc::now(),
        };
        state.refs.push(created.clone());
        Ok(created)
    }

    async fn nth_ref_excluding(
        &self,
        excluding_installation_id: &str,
        skip: u64,
    ) -> Result<Option<InstallationRef>, DbError> {
        Ok(self
            .lock()
            .refs
            .iter()
            .filter(|r| r.installation_id != excluding_installation_id)
            .nth(skip as usize)
            .cloned())
    }
}

impl CounterRepository for InMemoryStore {
    async fn get_count(&self) -> Result<Option<i64>, DbError> {
        Ok(self.lock().count)
    }

    async fn increment_count(&self) -> Result<Option<i64>, DbError> {
        let mut state = self.lock();
        state.count = state.count.map(|c| c + 1);
        Ok(state.count)
    }
}

impl CheerRepository for InMemoryStore {
    async fn create_cheer(&self, cheer: NewCheer) -> Result<Cheer, DbError> {
        let mut state = self.lock();
        if state.fail_cheer_writes {
            return Err(DbError::QueryError("cheer writes disabled".to_string()));
        }
        let created = Cheer {
            id: state.next_id("cheer"),
            from_user_id: cheer.from_user_id,
            from_name: cheer.from_name,
            from_installation_id: cheer.from_installation_id,
            from_location: cheer.from_location,
            to_installation_id: cheer.to_installation_id,
            message: cheer.message,
            has_been_responded_to: cheer.has_been_responded_to,
            initiation_note_id: cheer.initiation_note_id,
            created_at: Utc::now(),
        };
        state.cheers.push(created.clone());
        Ok(created)
    }

    async fn find_cheer(&self, id: &str) -> Result<Option<Cheer>, DbError> {
        Ok(self.lock().cheers.iter().find(|c| c.id == id).cloned())
    }

    async fn mark_responded(&self, id: &str) -> Result<bool, DbError> {
        let mut state = self.lock();
        if state.fail_mark_responded {
            return Err(DbError::QueryError("cheer updates disabled".to_string()));
        }
        match state.cheers.iter_mut().find(|c| c.id == id) {
            Some(cheer) => {
                cheer.has_been_responded_to = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_cheers_to(
        &self,
        installation_id: &str,
        limit: u32,
    ) -> Result<Vec<Cheer>, DbError> {
        Ok(self
            .lock()
            .cheers
            .iter()
            .rev()
            .filter(|c| c.to_installation_id == installation_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

impl FeedbackRepository for InMemoryStore {
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<Feedback, DbError> {
        let mut state = self.lock();
        let created = Feedback {
            id: state.next_id("feedback"),
            user_id: feedback.user_id,
            installation_id: feedback.installation_id,
            name: feedback.name,
            location_description: feedback.location_description,
            text: feedback.text,
            created_at: Utc::now(),
        };
        state.feedback.push(created.clone());
        Ok(created)
    }
}

/// Replays scripted draws (0 once exhausted) and records every bound asked for
#[derive(Debug, Default)]
pub struct FixedRandom {
    draws: Mutex<VecDeque<u64>>,
    bounds: Mutex<Vec<u64>>,
}

impl FixedRandom {
    pub fn new(draws: &[u64]) -> Self {
        Self {
            draws: Mutex::new(draws.iter().copied().collect()),
            bounds: Mutex::new(Vec::new()),
        }
    }

    pub fn draw_count(&self) -> usize {
        self.bounds.lock().unwrap().len()
    }

    pub fn bounds(&self) -> Vec<u64> {
        self.bounds.lock().unwrap().clone()
    }
}

impl RandomSource for FixedRandom {
    fn below(&self, upper: u64) -> u64 {
        self.bounds.lock().unwrap().push(upper);
        let draw = self.draws.lock().unwrap().pop_front().unwrap_or(0);
        draw % upper.max(1)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("push rejected")]
pub struct MockPushError;

/// Push service that records requests and can be told to fail
#[derive(Debug, Clone, Default)]
pub struct RecordingPush {
    sent: Arc<Mutex<Vec<PushRequest>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingPush {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let push = Self::default();
        push.fail.store(true, Ordering::SeqCst);
        push
    }

    pub fn sent(&self) -> Vec<PushRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl PushService for RecordingPush {
    type Error = MockPushError;

    fn send(&self, request: PushRequest) -> BoxFuture<'_, String, Self::Error> {
        Box::pin(async move {
            if self.fail.load(Ordering::SeqCst) {
                return Err(MockPushError);
            }
            let mut sent = self.sent.lock().unwrap();
            sent.push(request);
            Ok(format!("push-{}", sent.len()))
        })
    }
}
