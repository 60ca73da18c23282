use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    Calories, Classification, ExerciseName, ExerciseSet, Met, NewSet, Reps, Seconds, SetInput,
    UserProfile, ValidationError, Weight, validate_set,
};

/// Exercises and completed sets of one visit of the workout screen.
///
/// The session is kept in memory only. At most one exercise is active at a time.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct WorkoutSession {
    entries: BTreeMap<ExerciseName, ExerciseEntry>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ExerciseEntry {
    start_time: Option<DateTime<Utc>>,
    sets: Vec<ExerciseSet>,
}

impl ExerciseEntry {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.start_time.is_some()
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    #[must_use]
    pub fn sets(&self) -> &[ExerciseSet] {
        &self.sets
    }
}

/// Result of stopping an exercise.
#[derive(Debug, Clone, PartialEq)]
pub enum StopOutcome {
    /// The set was complete without further input and has been appended.
    Recorded(ExerciseSet),
    /// The set must be completed by [`WorkoutSession::complete_set`].
    InputRequired(PendingSet),
}

/// A stopped exercise waiting for reps, weight and intensity.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSet {
    pub exercise: ExerciseName,
    pub classification: Classification,
    pub start_time: DateTime<Utc>,
    pub duration: Seconds,
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SessionError {
    #[error("{0} is not active")]
    NotActive(ExerciseName),
    #[error("{0} has no set {1}")]
    SetNotFound(ExerciseName, usize),
}

impl WorkoutSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the exercise as active. Has no effect if any exercise is already active.
    pub fn start_exercise(&mut self, name: &ExerciseName, now: DateTime<Utc>) -> bool {
        if self.active_exercise().is_some() {
            return false;
        }
        self.entries.entry(name.clone()).or_default().start_time = Some(now);
        true
    }

    /// Deactivates the exercise and measures its duration.
    ///
    /// Cardio exercises are recorded right away at [`Met::CARDIO`]. All other exercises need
    /// additional input.
    pub fn stop_exercise(
        &mut self,
        name: &ExerciseName,
        classification: Classification,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<StopOutcome, SessionError> {
        let start_time = self
            .entries
            .get_mut(name)
            .and_then(|entry| entry.start_time.take())
            .ok_or_else(|| SessionError::NotActive(name.clone()))?;
        let duration = Seconds::from_time_delta(now - start_time);

        if classification.is_cardio {
            let set = self.append(
                name,
                vec![NewSet {
                    start_time,
                    end_time: now,
                    reps: Reps::default(),
                    weight: Weight::default(),
                    duration,
                    met: Met::CARDIO,
                    body_weight_kg: profile.body_weight_kg,
                }],
            );
            return Ok(StopOutcome::Recorded(set[0].clone()));
        }

        Ok(StopOutcome::InputRequired(PendingSet {
            exercise: name.clone(),
            classification,
            start_time,
            duration,
        }))
    }

    /// Validates the input for a stopped exercise and appends the resulting set.
    ///
    /// The session is left unchanged if the input is invalid.
    pub fn complete_set(
        &mut self,
        pending: &PendingSet,
        input: &SetInput,
        profile: &UserProfile,
        now: DateTime<Utc>,
    ) -> Result<ExerciseSet, ValidationError> {
        let valid = validate_set(input, pending.classification)?;
        let met = input
            .intensity
            .map_or(Met::FALLBACK, |i| i.met(pending.classification));
        let sets = self.append(
            &pending.exercise,
            vec![NewSet {
                start_time: pending.start_time,
                end_time: now,
                reps: valid.reps,
                weight: valid.weight,
                duration: valid.duration.unwrap_or(pending.duration),
                met,
                body_weight_kg: profile.body_weight_kg,
            }],
        );
        Ok(sets[0].clone())
    }

    /// Removes a set. The numbers of the remaining sets are kept.
    pub fn delete_set(
        &mut self,
        name: &ExerciseName,
        index: usize,
    ) -> Result<ExerciseSet, SessionError> {
        match self.entries.get_mut(name) {
            Some(entry) if index < entry.sets.len() => Ok(entry.sets.remove(index)),
            _ => Err(SessionError::SetNotFound(name.clone(), index)),
        }
    }

    #[must_use]
    pub fn has_unsaved_work(&self) -> bool {
        self.entries.values().any(|entry| !entry.sets.is_empty())
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn active_exercise(&self) -> Option<(&ExerciseName, DateTime<Utc>)> {
        self.entries
            .iter()
            .find_map(|(name, entry)| entry.start_time.map(|start_time| (name, start_time)))
    }

    #[must_use]
    pub fn is_active(&self, name: &ExerciseName) -> bool {
        self.entries.get(name).is_some_and(ExerciseEntry::is_active)
    }

    #[must_use]
    pub fn sets(&self, name: &ExerciseName) -> &[ExerciseSet] {
        self.entries
            .get(name)
            .map(|entry| entry.sets.as_slice())
            .unwrap_or_default()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&ExerciseName, &ExerciseEntry)> {
        self.entries.iter()
    }

    #[must_use]
    pub fn total_calories(&self) -> Calories {
        self.entries
            .values()
            .flat_map(|entry| entry.sets.iter().map(|set| set.calories))
            .sum()
    }

    pub(crate) fn append(&mut self, name: &ExerciseName, sets: Vec<NewSet>) -> &[ExerciseSet] {
        let entry = self.entries.entry(name.clone()).or_default();
        let first = entry.sets.len();
        for set in sets {
            let set_number = u32::try_from(entry.sets.len() + 1).unwrap_or(u32::MAX);
            entry.sets.push(set.into_set(set_number));
        }
        &entry.sets[first..]
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::Intensity;

    const CARDIO: Classification = Classification {
        is_cardio: true,
        is_muscle_group: false,
        is_body_weight: false,
    };

    const WEIGHTED: Classification = Classification {
        is_cardio: false,
        is_muscle_group: true,
        is_body_weight: false,
    };

    fn name(value: &str) -> ExerciseName {
        ExerciseName::new(value).unwrap()
    }

    fn time(seconds: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + seconds, 0).unwrap()
    }

    fn weighted_input(reps: &str, weight: &str) -> SetInput {
        SetInput {
            reps: reps.to_string(),
            weight: weight.to_string(),
            ..SetInput::default()
        }
    }

    fn session_with_sets(exercise: &ExerciseName, count: u32) -> WorkoutSession {
        let mut session = WorkoutSession::new();
        let profile = UserProfile::default();
        for i in 0..count {
            let start = i64::from(i) * 100;
            session.start_exercise(exercise, time(start));
            let StopOutcome::InputRequired(pending) = session
                .stop_exercise(exercise, WEIGHTED, &profile, time(start + 30))
                .unwrap()
            else {
                panic!("input expected");
            };
            session
                .complete_set(
                    &pending,
                    &weighted_input(&(i + 1).to_string(), "50"),
                    &profile,
                    time(start + 40),
                )
                .unwrap();
        }
        session
    }

    #[test]
    fn test_complete_set_of_catalog_name_rejects_zero_reps() {
        let catalog = crate::Catalog::from(crate::CatalogSource::Names(vec!["Plank".to_string()]));
        let classification = catalog.classification(&name("Plank")).unwrap();
        let profile = UserProfile::default();
        let mut session = WorkoutSession::new();
        session.start_exercise(&name("Plank"), time(0));
        let StopOutcome::InputRequired(pending) = session
            .stop_exercise(&name("Plank"), classification, &profile, time(45))
            .unwrap()
        else {
            panic!("input expected");
        };

        for reps in ["0", ""] {
            let err = session
                .complete_set(&pending, &weighted_input(reps, "10"), &profile, time(50))
                .unwrap_err();
            assert!(!err.messages().is_empty());
        }
        assert!(session.sets(&name("Plank")).is_empty());
    }

    #[test]
    fn test_start_exercise() {
        let mut session = WorkoutSession::new();

        assert!(session.start_exercise(&name("Squat"), time(0)));
        assert!(session.is_active(&name("Squat")));
        assert_eq!(session.active_exercise(), Some((&name("Squat"), time(0))));
    }

    #[test]
    fn test_start_exercise_while_other_active() {
        let mut session = WorkoutSession::new();

        assert!(session.start_exercise(&name("Squat"), time(0)));
        assert!(!session.start_exercise(&name("Row"), time(5)));
        assert!(!session.start_exercise(&name("Squat"), time(10)));

        assert!(!session.is_active(&name("Row")));
        assert_eq!(session.active_exercise(), Some((&name("Squat"), time(0))));
    }

    #[test]
    fn test_at_most_one_active_exercise() {
        let mut session = WorkoutSession::new();
        let names = ["A", "B", "C", "A", "D", "B"].map(name);

        for (i, n) in names.iter().enumerate() {
            session.start_exercise(n, time(i64::try_from(i).unwrap()));
            assert_eq!(
                session.entries().filter(|(_, e)| e.is_active()).count(),
                1
            );
            if i % 2 == 1 {
                let (active, _) = session.active_exercise().unwrap();
                let active = active.clone();
                session
                    .stop_exercise(&active, CARDIO, &UserProfile::default(), time(10))
                    .unwrap();
                assert_eq!(session.active_exercise(), None);
            }
        }
    }

    #[test]
    fn test_stop_cardio_exercise() {
        let mut session = WorkoutSession::new();
        let profile = UserProfile::default();

        session.start_exercise(&name("Running"), time(0));
        let outcome = session
            .stop_exercise(&name("Running"), CARDIO, &profile, time(300))
            .unwrap();

        let StopOutcome::Recorded(set) = outcome else {
            panic!("set expected");
        };
        assert_eq!(set.set_number, 1);
        assert_eq!(set.met, Met::CARDIO);
        assert_eq!(set.reps, Reps::default());
        assert_eq!(set.weight, Weight::default());
        assert_eq!(set.duration, Seconds::new(300));
        assert_eq!(set.start_time, time(0));
        assert_eq!(set.end_time, time(300));
        assert_approx_eq!(f32::from(set.calories), 46.67, 0.001);
        assert_eq!(session.sets(&name("Running")), &[set]);
        assert!(!session.is_active(&name("Running")));
    }

    #[test]
    fn test_stop_exercise_requires_input() {
        let mut session = WorkoutSession::new();

        session.start_exercise(&name("Squat"), time(0));
        let outcome = session
            .stop_exercise(&name("Squat"), WEIGHTED, &UserProfile::default(), time(45))
            .unwrap();

        assert_eq!(
            outcome,
            StopOutcome::InputRequired(PendingSet {
                exercise: name("Squat"),
                classification: WEIGHTED,
                start_time: time(0),
                duration: Seconds::new(45),
            })
        );
        assert!(session.sets(&name("Squat")).is_empty());
        assert_eq!(session.active_exercise(), None);
    }

    #[test]
    fn test_stop_inactive_exercise() {
        let mut session = WorkoutSession::new();

        assert_eq!(
            session.stop_exercise(&name("Squat"), WEIGHTED, &UserProfile::default(), time(0)),
            Err(SessionError::NotActive(name("Squat")))
        );
    }

    #[test]
    fn test_complete_set() {
        let mut session = WorkoutSession::new();
        let profile = UserProfile {
            body_weight_kg: 80.0,
            ..UserProfile::default()
        };

        session.start_exercise(&name("Squat"), time(0));
        let StopOutcome::InputRequired(pending) = session
            .stop_exercise(&name("Squat"), WEIGHTED, &profile, time(90))
            .unwrap()
        else {
            panic!("input expected");
        };
        let input = SetInput {
            intensity: Some(Intensity::Low),
            ..weighted_input("8", "100")
        };
        let set = session
            .complete_set(&pending, &input, &profile, time(120))
            .unwrap();

        assert_eq!(set.set_number, 1);
        assert_eq!(set.reps, Reps::new(8).unwrap());
        assert_eq!(set.weight, Weight::new(100.0).unwrap());
        assert_eq!(set.duration, Seconds::new(90));
        assert_eq!(set.start_time, time(0));
        assert_eq!(set.end_time, time(120));
        assert_eq!(set.met, Intensity::Low.met(WEIGHTED));
        assert_approx_eq!(f32::from(set.calories), 8.0, 0.001);
    }

    #[test]
    fn test_complete_set_fallback_met() {
        let mut session = WorkoutSession::new();
        let profile = UserProfile::default();

        session.start_exercise(&name("Squat"), time(0));
        let StopOutcome::InputRequired(pending) = session
            .stop_exercise(&name("Squat"), WEIGHTED, &profile, time(60))
            .unwrap()
        else {
            panic!("input expected");
        };
        let set = session
            .complete_set(&pending, &weighted_input("5", "40"), &profile, time(60))
            .unwrap();

        assert_eq!(set.met, Met::FALLBACK);
        assert_approx_eq!(f32::from(set.calories), 7.0, 0.001);
    }

    #[test]
    fn test_complete_set_invalid_input() {
        let mut session = session_with_sets(&name("Squat"), 1);
        let profile = UserProfile::default();

        session.start_exercise(&name("Squat"), time(1000));
        let StopOutcome::InputRequired(pending) = session
            .stop_exercise(&name("Squat"), WEIGHTED, &profile, time(1030))
            .unwrap()
        else {
            panic!("input expected");
        };

        for input in [weighted_input("0", "50"), weighted_input("", "50")] {
            let result = session.complete_set(&pending, &input, &profile, time(1040));
            assert!(!result.unwrap_err().messages().is_empty());
            assert_eq!(session.sets(&name("Squat")).len(), 1);
        }
    }

    #[test]
    fn test_set_numbers() {
        let session = session_with_sets(&name("Squat"), 3);

        assert_eq!(
            session
                .sets(&name("Squat"))
                .iter()
                .map(|s| s.set_number)
                .collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_delete_set_keeps_set_numbers() {
        let mut session = session_with_sets(&name("Squat"), 3);
        let original = session.sets(&name("Squat")).to_vec();

        let deleted = session.delete_set(&name("Squat"), 1).unwrap();

        assert_eq!(deleted, original[1]);
        assert_eq!(
            session.sets(&name("Squat")),
            &[original[0].clone(), original[2].clone()]
        );
        assert_eq!(
            session
                .sets(&name("Squat"))
                .iter()
                .map(|s| s.set_number)
                .collect::<Vec<_>>(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_set_number_after_delete() {
        let mut session = session_with_sets(&name("Squat"), 3);
        session.delete_set(&name("Squat"), 0).unwrap();
        let profile = UserProfile::default();

        session.start_exercise(&name("Squat"), time(1000));
        let StopOutcome::InputRequired(pending) = session
            .stop_exercise(&name("Squat"), WEIGHTED, &profile, time(1010))
            .unwrap()
        else {
            panic!("input expected");
        };
        let set = session
            .complete_set(&pending, &weighted_input("5", "40"), &profile, time(1020))
            .unwrap();

        assert_eq!(set.set_number, 3);
    }

    #[test]
    fn test_delete_set_out_of_range() {
        let mut session = session_with_sets(&name("Squat"), 2);

        assert_eq!(
            session.delete_set(&name("Squat"), 2),
            Err(SessionError::SetNotFound(name("Squat"), 2))
        );
        assert_eq!(
            session.delete_set(&name("Row"), 0),
            Err(SessionError::SetNotFound(name("Row"), 0))
        );
        assert_eq!(session.sets(&name("Squat")).len(), 2);
    }

    #[test]
    fn test_has_unsaved_work() {
        let mut session = WorkoutSession::new();
        assert!(!session.has_unsaved_work());

        session.start_exercise(&name("Running"), time(0));
        assert!(!session.has_unsaved_work());

        session
            .stop_exercise(&name("Running"), CARDIO, &UserProfile::default(), time(60))
            .unwrap();
        assert!(session.has_unsaved_work());

        session.delete_set(&name("Running"), 0).unwrap();
        assert!(!session.has_unsaved_work());
    }

    #[test]
    fn test_reset() {
        let mut session = session_with_sets(&name("Squat"), 2);
        session.start_exercise(&name("Row"), time(5000));

        session.reset();

        assert_eq!(session, WorkoutSession::new());
        assert_eq!(session.active_exercise(), None);
    }

    #[test]
    fn test_total_calories() {
        let mut session = WorkoutSession::new();
        let profile = UserProfile::default();

        session.start_exercise(&name("Running"), time(0));
        session
            .stop_exercise(&name("Running"), CARDIO, &profile, time(300))
            .unwrap();
        session.start_exercise(&name("Cycling"), time(400));
        session
            .stop_exercise(&name("Cycling"), CARDIO, &profile, time(400) + TimeDelta::hours(1))
            .unwrap();

        assert_approx_eq!(f32::from(session.total_calories()), 606.67, 0.01);
    }
}
