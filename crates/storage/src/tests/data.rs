use chrono::{DateTime, NaiveDate, Utc};
use serde_json::json;
use stride_domain as domain;
use stride_web_app::log;

pub static SUBMISSION: std::sync::LazyLock<domain::WorkoutSubmission> =
    std::sync::LazyLock::new(|| domain::WorkoutSubmission {
        client_id: 17.into(),
        date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        groups: vec![
            domain::GroupDetails {
                group: "Cardio".to_string(),
                exercises: vec![domain::ExerciseDetails {
                    name: domain::ExerciseName::new("Running").unwrap(),
                    sets: vec![set(1, 0, 450, 0, 0.0, domain::Met::CARDIO)],
                }],
            },
            domain::GroupDetails {
                group: "Legs".to_string(),
                exercises: vec![domain::ExerciseDetails {
                    name: domain::ExerciseName::new("Squat").unwrap(),
                    sets: vec![
                        set(1, 600, 60, 10, 60.0, domain::Met::FALLBACK),
                        set(3, 900, 60, 8, 62.5, domain::Met::FALLBACK),
                    ],
                }],
            },
        ],
        live: true,
        gym_id: Some(4.into()),
    });

pub static SUBMISSION_JSON: std::sync::LazyLock<serde_json::Value> =
    std::sync::LazyLock::new(|| {
        json!({
            "client_id": 17,
            "date": "2024-03-01",
            "workout_details": [
                {
                    "Cardio": [
                        {
                            "name": "Running",
                            "sets": [
                                {
                                    "setNumber": 1,
                                    "startTime": "2024-03-01T08:00:00Z",
                                    "endTime": "2024-03-01T08:07:30Z",
                                    "reps": 0,
                                    "weight": 0.0,
                                    "duration": 450,
                                    "MET": 8.0,
                                    "calories": 70.0
                                }
                            ]
                        }
                    ]
                },
                {
                    "Legs": [
                        {
                            "name": "Squat",
                            "sets": [
                                {
                                    "setNumber": 1,
                                    "startTime": "2024-03-01T08:10:00Z",
                                    "endTime": "2024-03-01T08:11:00Z",
                                    "reps": 10,
                                    "weight": 60.0,
                                    "duration": 60,
                                    "MET": 6.0,
                                    "calories": 7.0
                                },
                                {
                                    "setNumber": 3,
                                    "startTime": "2024-03-01T08:15:00Z",
                                    "endTime": "2024-03-01T08:16:00Z",
                                    "reps": 8,
                                    "weight": 62.5,
                                    "duration": 60,
                                    "MET": 6.0,
                                    "calories": 7.0
                                }
                            ]
                        }
                    ]
                }
            ],
            "live_status": true,
            "gym_id": 4
        })
    });

pub static LOG_ENTRY: std::sync::LazyLock<log::Entry> = std::sync::LazyLock::new(|| log::Entry {
    time: "Mar 01 08:00:00".to_string(),
    level: ::log::Level::Warn,
    message: "failed to store background time".to_string(),
});

fn set(
    set_number: u32,
    offset: i64,
    duration: u32,
    reps: u32,
    weight: f32,
    met: domain::Met,
) -> domain::ExerciseSet {
    let start_time = start() + chrono::TimeDelta::seconds(offset);
    let duration = domain::Seconds::new(duration);
    domain::ExerciseSet {
        set_number,
        start_time,
        end_time: start_time + duration.to_time_delta(),
        reps: domain::Reps::new(reps).unwrap(),
        weight: domain::Weight::new(weight).unwrap(),
        duration,
        met,
        calories: domain::Calories::burned(met, duration, 70.0),
    }
}

fn start() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
        .and_utc()
}
