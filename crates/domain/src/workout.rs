use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::{
    Catalog, ClientID, ExerciseName, ExerciseSet, GymID, SubmitError, UserProfile, WorkoutSession,
};

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn submit_workout(
        &self,
        submission: WorkoutSubmission,
    ) -> Result<SubmissionResponse, SubmitError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    /// Submits all sets of the session and resets the session on success.
    async fn save_workout(
        &self,
        session: &mut WorkoutSession,
        catalog: &Catalog,
        profile: &UserProfile,
        date: NaiveDate,
        live: bool,
    ) -> Result<SubmissionReceipt, SubmitError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSubmission {
    pub client_id: ClientID,
    pub date: NaiveDate,
    pub groups: Vec<GroupDetails>,
    pub live: bool,
    pub gym_id: Option<GymID>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupDetails {
    pub group: String,
    pub exercises: Vec<ExerciseDetails>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseDetails {
    pub name: ExerciseName,
    pub sets: Vec<ExerciseSet>,
}

impl WorkoutSubmission {
    /// Groups the exercises of the session by their catalog group.
    ///
    /// Exercises without sets are left out. An active exercise must be stopped first.
    pub fn new(
        session: &WorkoutSession,
        catalog: &Catalog,
        profile: &UserProfile,
        date: NaiveDate,
        live: bool,
    ) -> Result<Self, SubmitError> {
        if let Some((name, _)) = session.active_exercise() {
            return Err(SubmitError::ExerciseActive(name.clone()));
        }

        let mut groups: BTreeMap<&str, Vec<ExerciseDetails>> = BTreeMap::new();

        for (name, entry) in session.entries() {
            if entry.sets().is_empty() {
                continue;
            }
            groups
                .entry(catalog.group(name))
                .or_default()
                .push(ExerciseDetails {
                    name: name.clone(),
                    sets: entry.sets().to_vec(),
                });
        }

        if groups.is_empty() {
            return Err(SubmitError::EmptyWorkout);
        }

        Ok(Self {
            client_id: profile.client_id,
            date,
            groups: groups
                .into_iter()
                .map(|(group, exercises)| GroupDetails {
                    group: group.to_string(),
                    exercises,
                })
                .collect(),
            live,
            gym_id: profile.gym_id,
        })
    }

    #[must_use]
    pub fn set_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|g| &g.exercises)
            .map(|e| e.sets.len())
            .sum()
    }
}

/// Reply of the backend to a workout submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub status: u16,
    pub reward_points: Option<u32>,
}

impl SubmissionResponse {
    pub const OK: u16 = 200;

    pub fn into_receipt(self) -> Result<SubmissionReceipt, SubmitError> {
        if self.status == Self::OK {
            Ok(SubmissionReceipt {
                reward_points: self.reward_points,
            })
        } else {
            Err(SubmitError::Rejected(self.status))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub reward_points: Option<u32>,
}
