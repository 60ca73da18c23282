use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    Classification, DurationUnit, ExerciseName, ExerciseSet, Intensity, Met, NewSet, SetInput,
    UserProfile, ValidationError, WorkoutSession, validate_set,
};

/// One row of the backfill form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DraftSet {
    pub reps: String,
    pub weight: String,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Reps,
    Weight,
    Duration,
}

/// Sets of an exercise performed at a past date and time.
#[derive(Debug, Clone, PartialEq)]
pub struct BackfillEntry {
    date: DateTime<Utc>,
    drafts: Vec<DraftSet>,
    units: BTreeMap<usize, DurationUnit>,
    intensity: Option<Intensity>,
}

impl BackfillEntry {
    #[must_use]
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            date,
            drafts: vec![DraftSet::default()],
            units: BTreeMap::new(),
            intensity: None,
        }
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
    }

    #[must_use]
    pub fn intensity(&self) -> Option<Intensity> {
        self.intensity
    }

    pub fn set_intensity(&mut self, intensity: Option<Intensity>) {
        self.intensity = intensity;
    }

    #[must_use]
    pub fn drafts(&self) -> &[DraftSet] {
        &self.drafts
    }

    #[must_use]
    pub fn duration_unit(&self, index: usize) -> DurationUnit {
        self.units.get(&index).copied().unwrap_or_default()
    }

    pub fn add_draft_set(&mut self) {
        self.drafts.push(DraftSet::default());
    }

    /// Removes a row and shifts the unit preferences of all following rows.
    pub fn delete_draft_set(&mut self, index: usize) -> Option<DraftSet> {
        if index >= self.drafts.len() {
            return None;
        }
        let draft = self.drafts.remove(index);
        self.units = std::mem::take(&mut self.units)
            .into_iter()
            .filter(|(i, _)| *i != index)
            .map(|(i, unit)| if i > index { (i - 1, unit) } else { (i, unit) })
            .collect();
        Some(draft)
    }

    pub fn update_draft_field(&mut self, index: usize, field: DraftField, value: &str) -> bool {
        let Some(draft) = self.drafts.get_mut(index) else {
            return false;
        };
        let target = match field {
            DraftField::Reps => &mut draft.reps,
            DraftField::Weight => &mut draft.weight,
            DraftField::Duration => &mut draft.duration,
        };
        *target = value.to_string();
        true
    }

    pub fn set_duration_unit(&mut self, index: usize, unit: DurationUnit) -> bool {
        if index >= self.drafts.len() {
            return false;
        }
        self.units.insert(index, unit);
        true
    }

    /// Validates all rows and appends them to the session in one batch.
    ///
    /// Nothing is appended if any row is invalid. The returned error contains the messages of
    /// all invalid rows.
    pub fn submit(
        &self,
        session: &mut WorkoutSession,
        name: &ExerciseName,
        classification: Classification,
        profile: &UserProfile,
    ) -> Result<Vec<ExerciseSet>, ValidationError> {
        if self.drafts.is_empty() {
            return Err(ValidationError::new(vec![
                "At least one set is required".to_string(),
            ]));
        }

        let met = self
            .intensity
            .map_or(Met::default_for(classification), |i| i.met(classification));
        let mut messages = vec![];
        let mut sets = vec![];

        for (index, draft) in self.drafts.iter().enumerate() {
            let input = SetInput {
                reps: draft.reps.clone(),
                weight: draft.weight.clone(),
                duration: Some(draft.duration.clone()),
                duration_unit: self.duration_unit(index),
                intensity: self.intensity,
            };
            match validate_set(&input, classification) {
                Ok(valid) => {
                    let duration = valid.duration.unwrap_or_default();
                    sets.push(NewSet {
                        start_time: self.date,
                        end_time: self.date + duration.to_time_delta(),
                        reps: valid.reps,
                        weight: valid.weight,
                        duration,
                        met,
                        body_weight_kg: profile.body_weight_kg,
                    });
                }
                Err(err) => messages.extend(
                    err.messages()
                        .iter()
                        .map(|message| format!("Set {}: {message}", index + 1)),
                ),
            }
        }

        if !messages.is_empty() {
            return Err(ValidationError::new(messages));
        }

        Ok(session.append(name, sets).to_vec())
    }
}
