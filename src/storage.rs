//! In-Memory Storage
//!
//! Backing store for the planner, site lists, blocking schedules and nudges.
//! Every user gets an independent copy of the demo fixtures on first access;
//! nothing here survives a restart.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::models::nudge::{CreateNudgeRequest, Nudge, NudgeKind};
use crate::models::schedule::{
    BlockingMode, BlockingSchedule, CreateScheduleRequest, ScheduleError, UpdateScheduleRequest,
};
use crate::models::site::{CreateSiteRequest, SiteEntry, SiteError};
use crate::models::task::{CreateTaskRequest, Priority, Task, UpdateTaskRequest};
use crate::services::time_provider::TimeProvider;

/// Everything one user keeps besides their pomodoro state
#[derive(Debug)]
struct UserData {
    tasks: Vec<Task>,
    blocked_sites: Vec<SiteEntry>,
    whitelist_sites: Vec<SiteEntry>,
    schedules: Vec<BlockingSchedule>,
    nudges: Vec<Nudge>,
}

/// Per-user in-memory store
///
/// One outer lock is enough here; none of these records participate in
/// cross-call invariants the way sessions do.
pub struct MemoryStorage {
    users: RwLock<HashMap<String, UserData>>,
    next_id: AtomicU64,
    time_provider: Arc<dyn TimeProvider>,
}

impl MemoryStorage {
    /// Create an empty store; users are seeded as they first appear
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            // Seeded records use small fixed ids, stay clear of them
            next_id: AtomicU64::new(1000),
            time_provider,
        }
    }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Run `f` against the user's records, seeding the demo fixtures first
    /// if this user has never been seen
    async fn with_user<R>(&self, user_id: &str, f: impl FnOnce(&mut UserData) -> R) -> R {
        let mut users = self.users.write().await;
        let data = users
            .entry(user_id.to_string())
            .or_insert_with(|| self.seed_user());
        f(data)
    }

    /// The demo fixtures every new user starts with
    fn seed_user(&self) -> UserData {
        let now = self.time_provider.now_utc();

        let site = |id: u64, url: &str, category: &str| SiteEntry {
            id,
            url: url.to_string(),
            category: Some(category.to_string()),
            is_active: true,
            created_at: now,
        };

        UserData {
            tasks: vec![
                Task {
                    id: 1,
                    title: "Review project proposal".to_string(),
                    description: Some(
                        "Go through the quarterly project proposal document".to_string(),
                    ),
                    time_slot: Some("09:00-10:00".to_string()),
                    priority: Priority::High,
                    completed: false,
                    is_active: true,
                    created_at: now,
                },
                Task {
                    id: 2,
                    title: "Team standup meeting".to_string(),
                    description: Some("Daily team synchronization".to_string()),
                    time_slot: Some("10:30-11:00".to_string()),
                    priority: Priority::Medium,
                    completed: false,
                    is_active: true,
                    created_at: now,
                },
            ],
            blocked_sites: vec![
                site(1, "facebook.com", "social_media"),
                site(2, "twitter.com", "social_media"),
                site(3, "youtube.com", "entertainment"),
                site(4, "reddit.com", "social_media"),
            ],
            whitelist_sites: vec![
                site(1, "github.com", "work"),
                site(2, "stackoverflow.com", "work"),
                site(3, "docs.google.com", "work"),
            ],
            schedules: vec![
                BlockingSchedule {
                    id: 1,
                    name: "Deep Work Morning".to_string(),
                    day_of_week: 1,
                    start_time: "09:00".to_string(),
                    end_time: "12:00".to_string(),
                    blocking_mode: BlockingMode::Blacklist,
                    is_active: true,
                    created_at: now,
                },
                BlockingSchedule {
                    id: 2,
                    name: "Focus Afternoon".to_string(),
                    day_of_week: 2,
                    start_time: "14:00".to_string(),
                    end_time: "17:00".to_string(),
                    blocking_mode: BlockingMode::Whitelist,
                    is_active: true,
                    created_at: now,
                },
            ],
            nudges: vec![
                Nudge {
                    id: 1,
                    kind: NudgeKind::FocusReminder,
                    message: "Time for a focused work session!".to_string(),
                    is_read: false,
                    created_at: now,
                },
                Nudge {
                    id: 2,
                    kind: NudgeKind::BreakReminder,
                    message: "Take a 5-minute break to recharge.".to_string(),
                    is_read: false,
                    created_at: now,
                },
            ],
        }
    }

    // Tasks

    /// Active tasks for a user
    pub async fn tasks(&self, user_id: &str) -> Vec<Task> {
        self.with_user(user_id, |data| {
            data.tasks.iter().filter(|t| t.is_active).cloned().collect()
        })
        .await
    }

    /// Add a task
    pub async fn add_task(&self, user_id: &str, request: CreateTaskRequest) -> Task {
        let id = self.allocate_id();
        let now = self.time_provider.now_utc();
        let task = self
            .with_user(user_id, |data| {
                let task = request.into_task(id, now);
                data.tasks.push(task.clone());
                task
            })
            .await;

        debug!(user_id = %user_id, task_id = task.id, "task added");
        task
    }

    /// Partially update a task, returning `None` when the id is unknown
    pub async fn update_task(
        &self,
        user_id: &str,
        id: u64,
        request: UpdateTaskRequest,
    ) -> Option<Task> {
        self.with_user(user_id, |data| {
            let task = data.tasks.iter_mut().find(|t| t.id == id)?;
            request.apply_to(task);
            Some(task.clone())
        })
        .await
    }

    /// Soft-delete a task, returning whether the id was known
    pub async fn remove_task(&self, user_id: &str, id: u64) -> bool {
        let removed = self
            .with_user(user_id, |data| {
                match data.tasks.iter_mut().find(|t| t.id == id) {
                    Some(task) => {
                        task.is_active = false;
                        true
                    }
                    None => false,
                }
            })
            .await;

        if removed {
            debug!(user_id = %user_id, task_id = id, "task removed");
        }
        removed
    }

    // Site lists

    /// Active entries on the blocked list
    pub async fn blocked_sites(&self, user_id: &str) -> Vec<SiteEntry> {
        self.with_user(user_id, |data| {
            data.blocked_sites
                .iter()
                .filter(|s| s.is_active)
                .cloned()
                .collect()
        })
        .await
    }

    /// Add a site to the blocked list
    pub async fn add_blocked_site(
        &self,
        user_id: &str,
        request: CreateSiteRequest,
    ) -> Result<SiteEntry, SiteError> {
        let id = self.allocate_id();
        let now = self.time_provider.now_utc();
        let entry = self
            .with_user(user_id, |data| {
                let entry = request.into_entry(id, now)?;
                data.blocked_sites.push(entry.clone());
                Ok::<_, SiteError>(entry)
            })
            .await?;

        debug!(user_id = %user_id, url = %entry.url, "blocked site added");
        Ok(entry)
    }

    /// Drop a site from the blocked list, returning whether the id was known
    pub async fn remove_blocked_site(&self, user_id: &str, id: u64) -> bool {
        self.with_user(user_id, |data| {
            let before = data.blocked_sites.len();
            data.blocked_sites.retain(|s| s.id != id);
            data.blocked_sites.len() < before
        })
        .await
    }

    /// Active entries on the whitelist
    pub async fn whitelist_sites(&self, user_id: &str) -> Vec<SiteEntry> {
        self.with_user(user_id, |data| {
            data.whitelist_sites
                .iter()
                .filter(|s| s.is_active)
                .cloned()
                .collect()
        })
        .await
    }

    /// Add a site to the whitelist
    pub async fn add_whitelist_site(
        &self,
        user_id: &str,
        request: CreateSiteRequest,
    ) -> Result<SiteEntry, SiteError> {
        let id = self.allocate_id();
        let now = self.time_provider.now_utc();
        let entry = self
            .with_user(user_id, |data| {
                let entry = request.into_entry(id, now)?;
                data.whitelist_sites.push(entry.clone());
                Ok::<_, SiteError>(entry)
            })
            .await?;

        debug!(user_id = %user_id, url = %entry.url, "whitelist site added");
        Ok(entry)
    }

    /// Drop a site from the whitelist, returning whether the id was known
    pub async fn remove_whitelist_site(&self, user_id: &str, id: u64) -> bool {
        self.with_user(user_id, |data| {
            let before = data.whitelist_sites.len();
            data.whitelist_sites.retain(|s| s.id != id);
            data.whitelist_sites.len() < before
        })
        .await
    }

    // Blocking schedules

    /// All schedules for a user, including deactivated ones
    pub async fn blocking_schedules(&self, user_id: &str) -> Vec<BlockingSchedule> {
        self.with_user(user_id, |data| data.schedules.clone()).await
    }

    /// Add a schedule
    pub async fn add_schedule(
        &self,
        user_id: &str,
        request: CreateScheduleRequest,
    ) -> Result<BlockingSchedule, ScheduleError> {
        let id = self.allocate_id();
        let now = self.time_provider.now_utc();
        let schedule = self
            .with_user(user_id, |data| {
                let schedule = request.into_schedule(id, now)?;
                data.schedules.push(schedule.clone());
                Ok::<_, ScheduleError>(schedule)
            })
            .await?;

        debug!(user_id = %user_id, schedule_id = schedule.id, "schedule added");
        Ok(schedule)
    }

    /// Partially update a schedule
    ///
    /// `Ok(None)` when the id is unknown; validation failures leave the
    /// stored record untouched.
    pub async fn update_schedule(
        &self,
        user_id: &str,
        id: u64,
        request: UpdateScheduleRequest,
    ) -> Result<Option<BlockingSchedule>, ScheduleError> {
        self.with_user(user_id, |data| {
            let schedule = match data.schedules.iter_mut().find(|s| s.id == id) {
                Some(schedule) => schedule,
                None => return Ok(None),
            };
            let mut updated = schedule.clone();
            request.apply_to(&mut updated)?;
            *schedule = updated.clone();
            Ok(Some(updated))
        })
        .await
    }

    /// Drop a schedule, returning whether the id was known
    pub async fn remove_schedule(&self, user_id: &str, id: u64) -> bool {
        self.with_user(user_id, |data| {
            let before = data.schedules.len();
            data.schedules.retain(|s| s.id != id);
            data.schedules.len() < before
        })
        .await
    }

    // Nudges

    /// Nudges for a user, newest first
    pub async fn nudges(&self, user_id: &str) -> Vec<Nudge> {
        self.with_user(user_id, |data| {
            data.nudges.iter().rev().cloned().collect()
        })
        .await
    }

    /// Add a nudge
    pub async fn add_nudge(&self, user_id: &str, request: CreateNudgeRequest) -> Nudge {
        let id = self.allocate_id();
        let now = self.time_provider.now_utc();
        let nudge = self
            .with_user(user_id, |data| {
                let nudge = request.into_nudge(id, now);
                data.nudges.push(nudge.clone());
                nudge
            })
            .await;

        debug!(user_id = %user_id, nudge_id = nudge.id, "nudge added");
        nudge
    }

    /// Mark a nudge read, returning `None` when the id is unknown
    pub async fn mark_nudge_read(&self, user_id: &str, id: u64) -> Option<Nudge> {
        self.with_user(user_id, |data| {
            let nudge = data.nudges.iter_mut().find(|n| n.id == id)?;
            nudge.is_read = true;
            Some(nudge.clone())
        })
        .await
    }
}
