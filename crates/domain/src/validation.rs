use crate::{Classification, DurationUnit, Intensity, Reps, Seconds, Weight};

/// Raw values of the set input form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SetInput {
    pub reps: String,
    pub weight: String,
    /// Only present where the form asks for a duration.
    pub duration: Option<String>,
    pub duration_unit: DurationUnit,
    pub intensity: Option<Intensity>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidSet {
    pub reps: Reps,
    pub weight: Weight,
    pub duration: Option<Seconds>,
}

/// All problems found in the input of one or more sets.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{}", .0.join("\n"))]
pub struct ValidationError(Vec<String>);

impl ValidationError {
    #[must_use]
    pub fn new(messages: Vec<String>) -> Self {
        Self(messages)
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

pub fn validate_set(
    input: &SetInput,
    classification: Classification,
) -> Result<ValidSet, ValidationError> {
    let mut messages = vec![];

    let reps = if classification.requires_reps() {
        match required(&input.reps, "Reps").and_then(|reps| {
            Reps::try_from(reps)
                .map_err(|err| err.to_string())
                .and_then(|reps| {
                    if u32::from(reps) > 0 {
                        Ok(reps)
                    } else {
                        Err("Reps must be greater than 0".to_string())
                    }
                })
        }) {
            Ok(reps) => Some(reps),
            Err(message) => {
                messages.push(message);
                None
            }
        }
    } else {
        optional(&input.reps, |reps| Reps::try_from(reps), &mut messages)
    };

    let weight = if classification.requires_weight() {
        match required(&input.weight, "Weight").and_then(|weight| {
            Weight::try_from(weight)
                .map_err(|err| err.to_string())
                .and_then(|weight| {
                    if f32::from(weight) > 0.0 {
                        Ok(weight)
                    } else {
                        Err("Weight must be greater than 0".to_string())
                    }
                })
        }) {
            Ok(weight) => Some(weight),
            Err(message) => {
                messages.push(message);
                None
            }
        }
    } else {
        optional(&input.weight, |weight| Weight::try_from(weight), &mut messages)
    };

    let duration = match &input.duration {
        Some(duration) => match required(duration, "Duration")
            .and_then(|d| Seconds::parse(d, input.duration_unit).map_err(|err| err.to_string()))
        {
            Ok(duration) => Some(duration),
            Err(message) => {
                messages.push(message);
                None
            }
        },
        None => None,
    };

    if !messages.is_empty() {
        return Err(ValidationError(messages));
    }

    Ok(ValidSet {
        reps: reps.unwrap_or_default(),
        weight: weight.unwrap_or_default(),
        duration,
    })
}

fn required<'a>(value: &'a str, field: &str) -> Result<&'a str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{field} is required"))
    } else {
        Ok(trimmed)
    }
}

fn optional<'a, T, E: std::fmt::Display>(
    value: &'a str,
    parse: impl FnOnce(&'a str) -> Result<T, E>,
    messages: &mut Vec<String>,
) -> Option<T> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match parse(trimmed) {
        Ok(value) => Some(value),
        Err(err) => {
            messages.push(err.to_string());
            None
        }
    }
}
