use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use gloo_net::http::{Request, Response};
use log::debug;
use serde::{Deserialize, Serialize};
use stride_domain as domain;

#[allow(async_fn_in_trait)]
pub trait SendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error>;
}

#[derive(Clone)]
pub struct GlooNetSendRequest;

impl SendRequest for GlooNetSendRequest {
    async fn send_request(&self, request: Request) -> Result<Response, gloo_net::Error> {
        request.send().await
    }
}

#[derive(Clone)]
pub struct REST<S: SendRequest> {
    pub sender: S,
}

impl REST<GlooNetSendRequest> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sender: GlooNetSendRequest,
        }
    }
}

impl Default for REST<GlooNetSendRequest> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SendRequest> REST<S> {
    async fn send(&self, request: Request) -> Result<Response, domain::StorageError> {
        self.sender.send_request(request).await.map_err(|err| {
            debug!("failed to send request: {err}");
            domain::StorageError::NoConnection
        })
    }
}

async fn json<T>(response: Response) -> Result<T, domain::ReadError>
where
    T: for<'de> Deserialize<'de>,
{
    response
        .json::<T>()
        .await
        .map_err(|err| domain::ReadError::Other(format!("deserialization failed: {err}").into()))
}

impl<S: SendRequest> domain::CatalogRepository for REST<S> {
    async fn read_catalog(&self) -> Result<domain::CatalogSource, domain::ReadError> {
        let request = Request::get("api/exercises")
            .build()
            .map_err(|err| domain::ReadError::Other(err.into()))?;
        let response = self.send(request).await?;
        if !response.ok() {
            return Err(domain::ReadError::Other(
                format!("{} {}", response.status(), response.status_text()).into(),
            ));
        }
        Ok(json::<Catalog>(response).await?.into())
    }
}

impl<S: SendRequest> domain::WorkoutRepository for REST<S> {
    async fn submit_workout(
        &self,
        submission: domain::WorkoutSubmission,
    ) -> Result<domain::SubmissionResponse, domain::SubmitError> {
        let request = Request::post("api/workouts")
            .json(&WorkoutSubmission::from(submission))
            .map_err(|err| domain::SubmitError::Other(err.into()))?;
        let response = self.send(request).await?;
        if !response.ok() {
            return Err(domain::SubmitError::Rejected(response.status()));
        }
        Ok(json::<SubmissionResponse>(response).await?.into())
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum Catalog {
    Names(Vec<String>),
    Groups(Vec<CatalogGroup>),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogGroup {
    #[serde(alias = "group", alias = "muscle_group")]
    pub name: String,
    pub exercises: Vec<CatalogExercise>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct CatalogExercise {
    pub name: String,
    #[serde(default)]
    pub is_cardio: bool,
    #[serde(default)]
    pub is_muscle_group: bool,
    #[serde(default)]
    pub is_body_weight: bool,
}

impl From<Catalog> for domain::CatalogSource {
    fn from(value: Catalog) -> Self {
        match value {
            Catalog::Names(names) => domain::CatalogSource::Names(names),
            Catalog::Groups(groups) => domain::CatalogSource::Groups(
                groups
                    .into_iter()
                    .map(|group| domain::CatalogGroup {
                        name: group.name,
                        exercises: group
                            .exercises
                            .into_iter()
                            .map(|exercise| domain::CatalogGroupExercise {
                                name: exercise.name,
                                classification: domain::Classification {
                                    is_cardio: exercise.is_cardio,
                                    is_muscle_group: exercise.is_muscle_group,
                                    is_body_weight: exercise.is_body_weight,
                                },
                            })
                            .collect(),
                    })
                    .collect(),
            ),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WorkoutSubmission {
    pub client_id: u32,
    pub date: NaiveDate,
    pub workout_details: Vec<BTreeMap<String, Vec<ExerciseDetails>>>,
    pub live_status: bool,
    pub gym_id: Option<u32>,
}

impl From<domain::WorkoutSubmission> for WorkoutSubmission {
    fn from(value: domain::WorkoutSubmission) -> Self {
        Self {
            client_id: *value.client_id,
            date: value.date,
            workout_details: value
                .groups
                .into_iter()
                .map(|group| {
                    BTreeMap::from([(
                        group.group,
                        group
                            .exercises
                            .into_iter()
                            .map(ExerciseDetails::from)
                            .collect(),
                    )])
                })
                .collect(),
            live_status: value.live,
            gym_id: value.gym_id.map(|id| *id),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ExerciseDetails {
    pub name: String,
    pub sets: Vec<Set>,
}

impl From<domain::ExerciseDetails> for ExerciseDetails {
    fn from(value: domain::ExerciseDetails) -> Self {
        Self {
            name: value.name.to_string(),
            sets: value.sets.into_iter().map(Set::from).collect(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Set {
    pub set_number: u32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub reps: u32,
    pub weight: f32,
    pub duration: u32,
    #[serde(rename = "MET")]
    pub met: f32,
    pub calories: f32,
}

impl From<domain::ExerciseSet> for Set {
    fn from(value: domain::ExerciseSet) -> Self {
        Self {
            set_number: value.set_number,
            start_time: value.start_time,
            end_time: value.end_time,
            reps: value.reps.into(),
            weight: value.weight.into(),
            duration: value.duration.into(),
            met: value.met.into(),
            calories: value.calories.into(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionResponse {
    pub status: u16,
    #[serde(default)]
    pub reward_point: Option<u32>,
}

impl From<SubmissionResponse> for domain::SubmissionResponse {
    fn from(value: SubmissionResponse) -> Self {
        Self {
            status: value.status,
            reward_points: value.reward_point,
        }
    }
}
