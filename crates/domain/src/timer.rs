use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::KeyValueRepository;

pub const KEY_BACKGROUND_TIME: &str = "background_time";

/// Elapsed time of the active exercise as shown to the user.
///
/// The timer advances by ticks and may lag behind the wall clock while the app is suspended.
/// Durations of sets are always measured from timestamps instead.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTimer {
    seconds: u64,
}

impl ElapsedTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self) {
        self.advance(1);
    }

    pub fn advance(&mut self, seconds: u64) {
        self.seconds = self.seconds.saturating_add(seconds);
    }

    pub fn reset(&mut self) {
        self.seconds = 0;
    }

    #[must_use]
    pub fn seconds(&self) -> u64 {
        self.seconds
    }
}

impl std::fmt::Display for ElapsedTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = self.seconds % 3600 / 60;
        let seconds = self.seconds % 60;
        if hours > 0 {
            write!(f, "{hours}:{minutes:02}:{seconds:02}")
        } else {
            write!(f, "{minutes:02}:{seconds:02}")
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    #[default]
    Active,
    Inactive,
    Background,
}

/// Compensates the display timer for time spent in the background.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackgroundReconciler {
    state: AppState,
}

impl BackgroundReconciler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Handles a transition of the app state.
    ///
    /// Returns the number of seconds added to the timer when the app came back to the
    /// foreground.
    pub fn on_app_state_change(
        &mut self,
        next: AppState,
        repository: &impl KeyValueRepository,
        timer: &mut ElapsedTimer,
        exercise_active: bool,
        now: DateTime<Utc>,
    ) -> Option<u64> {
        let previous = std::mem::replace(&mut self.state, next);

        match (previous, next) {
            (AppState::Active, AppState::Inactive | AppState::Background) => {
                if exercise_active {
                    if let Err(err) = repository
                        .write_value(KEY_BACKGROUND_TIME, &now.timestamp_millis().to_string())
                    {
                        warn!("failed to store background time: {err}");
                    }
                }
                None
            }
            (AppState::Inactive | AppState::Background, AppState::Active) => {
                let stored = match repository.read_value(KEY_BACKGROUND_TIME) {
                    Ok(value) => value,
                    Err(err) => {
                        warn!("failed to read background time: {err}");
                        return None;
                    }
                };
                if stored.is_some() {
                    if let Err(err) = repository.delete_value(KEY_BACKGROUND_TIME) {
                        warn!("failed to delete background time: {err}");
                    }
                }
                if !exercise_active {
                    return None;
                }
                let Some(millis) = stored.and_then(|v| v.trim().parse::<i64>().ok()) else {
                    debug!("no valid background time stored");
                    return None;
                };
                let elapsed = u64::try_from((now.timestamp_millis() - millis).max(0) / 1000)
                    .unwrap_or_default();
                timer.advance(elapsed);
                Some(elapsed)
            }
            _ => None,
        }
    }
}
