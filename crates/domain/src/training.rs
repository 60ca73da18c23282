use chrono::{DateTime, TimeDelta, Utc};
use derive_more::{Display, Into};

use crate::Classification;

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Weight in kilograms.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(f32);

impl Weight {
    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.replace(',', ".").trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9 kg")]
    OutOfRange,
    #[error("Weight must be a decimal number")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seconds(u32);

impl Seconds {
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Whole seconds of a time span. Negative spans count as zero.
    #[must_use]
    pub fn from_time_delta(delta: TimeDelta) -> Self {
        Self(u32::try_from(delta.num_seconds().max(0)).unwrap_or(u32::MAX))
    }

    /// Parses a positive duration given in `unit` and normalizes it to seconds.
    pub fn parse(value: &str, unit: DurationUnit) -> Result<Self, DurationError> {
        let parsed_value = value
            .replace(',', ".")
            .trim()
            .parse::<f64>()
            .map_err(|_| DurationError::ParseError)?;

        if !parsed_value.is_finite() || parsed_value <= 0.0 {
            return Err(DurationError::NotPositive);
        }

        let seconds = (parsed_value * f64::from(unit.factor())).round();

        if seconds > f64::from(u32::MAX) {
            return Err(DurationError::OutOfRange);
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(seconds as u32))
    }

    #[must_use]
    pub fn to_time_delta(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.0))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum DurationError {
    #[error("Duration must be a positive number")]
    NotPositive,
    #[error("Duration is too long")]
    OutOfRange,
    #[error("Duration must be a number")]
    ParseError,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    #[default]
    Seconds,
    Minutes,
}

impl DurationUnit {
    #[must_use]
    pub fn factor(self) -> u32 {
        match self {
            DurationUnit::Seconds => 1,
            DurationUnit::Minutes => 60,
        }
    }
}

/// Metabolic equivalent of task.
#[derive(Debug, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Met(f32);

impl Met {
    /// Applied to cardio exercises stopped without further input.
    pub const CARDIO: Met = Met(8.0);
    /// Applied to other exercises if no intensity was chosen.
    pub const FALLBACK: Met = Met(6.0);

    pub fn new(value: f32) -> Result<Self, MetError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(MetError::NotPositive);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn default_for(classification: Classification) -> Self {
        if classification.is_cardio {
            Met::CARDIO
        } else {
            Met::FALLBACK
        }
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MetError {
    #[error("MET must be a positive number")]
    NotPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter, strum::AsRefStr)]
pub enum Intensity {
    Low,
    Moderate,
    High,
}

impl Intensity {
    /// MET offered by the intensity picker, which depends on whether the exercise targets a
    /// muscle group.
    #[must_use]
    pub fn met(self, classification: Classification) -> Met {
        let (low, moderate, high) = if classification.is_muscle_group {
            (4.0, 6.0, 8.0)
        } else {
            (8.0, 10.0, 12.0)
        };
        Met(match self {
            Intensity::Low => low,
            Intensity::Moderate => moderate,
            Intensity::High => high,
        })
    }
}

/// Energy expenditure in kcal, rounded to two decimal places.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Calories(f32);

impl Calories {
    #[must_use]
    pub fn burned(met: Met, duration: Seconds, body_weight_kg: f32) -> Self {
        let value = f64::from(met.0)
            * f64::from(body_weight_kg)
            * (f64::from(duration.0) / 3600.0);
        #[allow(clippy::cast_possible_truncation)]
        Self(((value * 100.0).round() / 100.0) as f32)
    }
}

impl std::iter::Sum for Calories {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Calories(0.0), |acc, c| Calories(acc.0 + c.0))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSet {
    pub set_number: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reps: Reps,
    pub weight: Weight,
    pub duration: Seconds,
    pub met: Met,
    pub calories: Calories,
}

/// A set whose number is assigned when it is appended to a session.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NewSet {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reps: Reps,
    pub weight: Weight,
    pub duration: Seconds,
    pub met: Met,
    pub body_weight_kg: f32,
}

impl NewSet {
    pub(crate) fn into_set(self, set_number: u32) -> ExerciseSet {
        ExerciseSet {
            set_number,
            start_time: self.start_time,
            end_time: self.end_time,
            reps: self.reps,
            weight: self.weight,
            duration: self.duration,
            met: self.met,
            calories: Calories::burned(self.met, self.duration, self.body_weight_kg),
        }
    }
}
