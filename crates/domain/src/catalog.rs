//! Exercise catalog
//!
//! The catalog is delivered either as a flat list of exercise names or as a list of groups whose
//! exercises carry classification flags. Both shapes are normalized into a [`Catalog`] once, so
//! that the session logic can look up an exercise by name in constant time.

use std::collections::{HashMap, hash_map::Entry};

use log::warn;

use crate::{ExerciseName, ReadError};

pub const DEFAULT_GROUP: &str = "Other";

#[allow(async_fn_in_trait)]
pub trait CatalogRepository {
    async fn read_catalog(&self) -> Result<CatalogSource, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait CatalogService {
    async fn get_catalog(&self) -> Result<Catalog, ReadError>;
}

/// Flags that decide which inputs a set requires and which MET applies.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Classification {
    pub is_cardio: bool,
    pub is_muscle_group: bool,
    pub is_body_weight: bool,
}

impl Classification {
    /// Flags of exercises known only by name. Anything that is not cardio is a muscle-group
    /// exercise.
    pub const STRENGTH: Self = Self {
        is_cardio: false,
        is_muscle_group: true,
        is_body_weight: false,
    };

    #[must_use]
    pub fn requires_reps(self) -> bool {
        !self.is_cardio
    }

    #[must_use]
    pub fn requires_weight(self) -> bool {
        !self.is_cardio && !self.is_body_weight
    }
}

/// Catalog data as received from the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Names(Vec<String>),
    Groups(Vec<CatalogGroup>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGroup {
    pub name: String,
    pub exercises: Vec<CatalogGroupExercise>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGroupExercise {
    pub name: String,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogExercise {
    pub name: ExerciseName,
    pub group: String,
    pub classification: Classification,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Catalog {
    exercises: HashMap<ExerciseName, CatalogExercise>,
}

impl Catalog {
    #[must_use]
    pub fn get(&self, name: &ExerciseName) -> Option<&CatalogExercise> {
        self.exercises.get(name)
    }

    #[must_use]
    pub fn classification(&self, name: &ExerciseName) -> Option<Classification> {
        self.get(name).map(|e| e.classification)
    }

    /// The group of an exercise, or the default group for unknown exercises.
    #[must_use]
    pub fn group(&self, name: &ExerciseName) -> &str {
        self.get(name).map_or(DEFAULT_GROUP, |e| e.group.as_str())
    }

    pub fn exercises(&self) -> impl Iterator<Item = &CatalogExercise> {
        self.exercises.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    fn insert(&mut self, name: &str, group: &str, classification: Classification) {
        let name = match ExerciseName::new(name) {
            Ok(name) => name,
            Err(err) => {
                warn!("ignoring catalog exercise {name:?}: {err}");
                return;
            }
        };
        match self.exercises.entry(name) {
            Entry::Occupied(entry) => {
                warn!("ignoring duplicate catalog exercise {}", entry.key());
            }
            Entry::Vacant(entry) => {
                let name = entry.key().clone();
                entry.insert(CatalogExercise {
                    name,
                    group: group.to_string(),
                    classification,
                });
            }
        }
    }
}

impl From<CatalogSource> for Catalog {
    fn from(value: CatalogSource) -> Self {
        let mut catalog = Catalog::default();
        match value {
            CatalogSource::Names(names) => {
                for name in names {
                    catalog.insert(&name, DEFAULT_GROUP, Classification::STRENGTH);
                }
            }
            CatalogSource::Groups(groups) => {
                for group in groups {
                    let group_name = if group.name.trim().is_empty() {
                        DEFAULT_GROUP
                    } else {
                        group.name.trim()
                    };
                    for exercise in group.exercises {
                        catalog.insert(&exercise.name, group_name, exercise.classification);
                    }
                }
            }
        }
        catalog
    }
}
