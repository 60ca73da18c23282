//! Workout screen
//!
//! State of the workout screen independent of any UI framework. The screen owns the session of
//! the current visit, the display timer and the open dialog, and turns the outcome of every user
//! action into notifications.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use stride_domain::{
    AppState, BackfillEntry, BackgroundReconciler, Catalog, Classification, ElapsedTimer,
    ExerciseName, KeyValueRepository, PendingSet, SetInput, StopOutcome, UserProfile,
    WorkoutService, WorkoutSession,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    SetInput {
        pending: PendingSet,
        input: SetInput,
    },
    Backfill {
        exercise: ExerciseName,
        entry: BackfillEntry,
    },
    ConfirmLeave,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Info(String),
    Error(String),
}

pub struct WorkoutScreen {
    catalog: Catalog,
    profile: UserProfile,
    session: WorkoutSession,
    timer: ElapsedTimer,
    reconciler: BackgroundReconciler,
    dialog: Option<Dialog>,
    notifications: Vec<Notification>,
}

impl WorkoutScreen {
    #[must_use]
    pub fn new(catalog: Catalog, profile: UserProfile) -> Self {
        Self {
            catalog,
            profile,
            session: WorkoutSession::new(),
            timer: ElapsedTimer::new(),
            reconciler: BackgroundReconciler::new(),
            dialog: None,
            notifications: vec![],
        }
    }

    #[must_use]
    pub fn session(&self) -> &WorkoutSession {
        &self.session
    }

    #[must_use]
    pub fn timer(&self) -> ElapsedTimer {
        self.timer
    }

    #[must_use]
    pub fn dialog(&self) -> Option<&Dialog> {
        self.dialog.as_ref()
    }

    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Start buttons are disabled while any exercise is active or a stopped set waits for input.
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.session.active_exercise().is_none() && !self.input_pending()
    }

    pub fn start_exercise(&mut self, name: &ExerciseName, now: DateTime<Utc>) -> bool {
        if self.input_pending() {
            return false;
        }
        let started = self.session.start_exercise(name, now);
        if started {
            self.timer.reset();
        }
        started
    }

    pub fn stop_exercise(&mut self, name: &ExerciseName, now: DateTime<Utc>) {
        let classification = self.classification(name);
        match self
            .session
            .stop_exercise(name, classification, &self.profile, now)
        {
            Ok(StopOutcome::Recorded(set)) => {
                self.timer.reset();
                self.notifications.push(Notification::Info(format!(
                    "{name}: set {} recorded ({} kcal)",
                    set.set_number, set.calories
                )));
            }
            Ok(StopOutcome::InputRequired(pending)) => {
                self.timer.reset();
                self.dialog = Some(Dialog::SetInput {
                    pending,
                    input: SetInput::default(),
                });
            }
            Err(err) => self.notifications.push(Notification::Error(err.to_string())),
        }
    }

    pub fn set_input_mut(&mut self) -> Option<&mut SetInput> {
        match &mut self.dialog {
            Some(Dialog::SetInput { input, .. }) => Some(input),
            _ => None,
        }
    }

    /// Completes the pending set. The dialog stays open if the input is invalid.
    pub fn submit_set_input(&mut self, now: DateTime<Utc>) -> bool {
        let Some(Dialog::SetInput { pending, input }) = &self.dialog else {
            return false;
        };
        match self
            .session
            .complete_set(pending, input, &self.profile, now)
        {
            Ok(set) => {
                debug!("recorded set {} of {}", set.set_number, pending.exercise);
                self.dialog = None;
                true
            }
            Err(err) => {
                self.notifications.push(Notification::Error(err.to_string()));
                false
            }
        }
    }

    /// Closes the open dialog. A pending set is discarded.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    pub fn open_backfill(&mut self, name: &ExerciseName, date: DateTime<Utc>) -> bool {
        if self.input_pending() {
            return false;
        }
        self.dialog = Some(Dialog::Backfill {
            exercise: name.clone(),
            entry: BackfillEntry::new(date),
        });
        true
    }

    pub fn backfill_mut(&mut self) -> Option<&mut BackfillEntry> {
        match &mut self.dialog {
            Some(Dialog::Backfill { entry, .. }) => Some(entry),
            _ => None,
        }
    }

    pub fn submit_backfill(&mut self) -> bool {
        let Some(Dialog::Backfill { exercise, entry }) = &self.dialog else {
            return false;
        };
        let classification = self.classification(exercise);
        match entry.submit(&mut self.session, exercise, classification, &self.profile) {
            Ok(sets) => {
                self.notifications.push(Notification::Info(format!(
                    "{exercise}: {} sets recorded",
                    sets.len()
                )));
                self.dialog = None;
                true
            }
            Err(err) => {
                self.notifications.push(Notification::Error(err.to_string()));
                false
            }
        }
    }

    pub fn delete_set(&mut self, name: &ExerciseName, index: usize) {
        if let Err(err) = self.session.delete_set(name, index) {
            self.notifications.push(Notification::Error(err.to_string()));
        }
    }

    /// Advances the display timer by one second while an exercise is active.
    pub fn tick(&mut self) {
        if self.session.active_exercise().is_some() {
            self.timer.tick();
        }
    }

    pub fn change_app_state(
        &mut self,
        next: AppState,
        repository: &impl KeyValueRepository,
        now: DateTime<Utc>,
    ) {
        let active = self.session.active_exercise().is_some();
        if let Some(seconds) =
            self.reconciler
                .on_app_state_change(next, repository, &mut self.timer, active, now)
        {
            debug!("added {seconds} s spent in background to timer");
        }
    }

    /// Returns true if the screen can be left without losing sets. Otherwise a confirmation
    /// dialog is opened, unless a stopped set still waits for input.
    pub fn request_leave(&mut self) -> bool {
        if self.input_pending() {
            return false;
        }
        if self.session.has_unsaved_work() {
            self.dialog = Some(Dialog::ConfirmLeave);
            false
        } else {
            true
        }
    }

    pub fn confirm_discard(&mut self) {
        self.session.reset();
        self.timer.reset();
        self.dialog = None;
    }

    pub async fn save(
        &mut self,
        service: &impl WorkoutService,
        date: NaiveDate,
        live: bool,
    ) -> bool {
        if self.input_pending() {
            return false;
        }
        match service
            .save_workout(&mut self.session, &self.catalog, &self.profile, date, live)
            .await
        {
            Ok(receipt) => {
                self.timer.reset();
                self.notifications
                    .push(Notification::Info(match receipt.reward_points {
                        Some(points) => format!("Workout saved, {points} reward points earned"),
                        None => "Workout saved".to_string(),
                    }));
                true
            }
            Err(err) => {
                self.notifications.push(Notification::Error(format!(
                    "Failed to save workout: {err}"
                )));
                false
            }
        }
    }

    fn classification(&self, name: &ExerciseName) -> Classification {
        self.catalog.classification(name).unwrap_or_else(|| {
            debug!("{name} is not part of the catalog");
            Classification::STRENGTH
        })
    }

    fn input_pending(&self) -> bool {
        matches!(self.dialog, Some(Dialog::SetInput { .. }))
    }
}
