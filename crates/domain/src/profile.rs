use derive_more::{Deref, Display};
use log::warn;

use crate::KeyValueRepository;

pub const DEFAULT_BODY_WEIGHT_KG: f32 = 70.0;

pub const KEY_CLIENT_ID: &str = "client_id";
pub const KEY_BODY_WEIGHT: &str = "weight";
pub const KEY_HEIGHT: &str = "height";
pub const KEY_GYM_ID: &str = "gym_id";
pub const KEY_IN_GYM: &str = "in_gym";

pub trait ProfileService {
    fn get_profile(&self) -> UserProfile;
}

#[derive(Deref, Debug, Default, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClientID(u32);

impl From<u32> for ClientID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

#[derive(Deref, Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct GymID(u32);

impl From<u32> for GymID {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

/// Cached attributes of the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub client_id: ClientID,
    pub body_weight_kg: f32,
    pub height_cm: Option<f32>,
    pub gym_id: Option<GymID>,
    pub in_gym: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            client_id: ClientID::default(),
            body_weight_kg: DEFAULT_BODY_WEIGHT_KG,
            height_cm: None,
            gym_id: None,
            in_gym: false,
        }
    }
}

impl UserProfile {
    /// Loads the profile from the device storage.
    ///
    /// Missing or invalid values are replaced by their defaults.
    pub fn load(repository: &impl KeyValueRepository) -> Self {
        let read = |key: &str| match repository.read_value(key) {
            Ok(value) => value.map(|v| v.trim().to_string()),
            Err(err) => {
                warn!("failed to read {key}: {err}");
                None
            }
        };

        Self {
            client_id: read(KEY_CLIENT_ID)
                .and_then(|v| v.parse::<u32>().ok())
                .map(ClientID)
                .unwrap_or_default(),
            body_weight_kg: read(KEY_BODY_WEIGHT)
                .and_then(|v| parse_positive(&v))
                .unwrap_or(DEFAULT_BODY_WEIGHT_KG),
            height_cm: read(KEY_HEIGHT).and_then(|v| parse_positive(&v)),
            gym_id: read(KEY_GYM_ID)
                .and_then(|v| v.parse::<u32>().ok())
                .map(GymID),
            in_gym: read(KEY_IN_GYM).is_some_and(|v| v == "true"),
        }
    }

    /// Body mass index rounded to one decimal place.
    #[must_use]
    pub fn body_mass_index(&self) -> Option<f32> {
        let height_m = self.height_cm? / 100.0;
        if height_m <= 0.0 {
            return None;
        }
        Some((self.body_weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
    }

    #[must_use]
    pub fn bmi_category(&self) -> Option<BmiCategory> {
        self.body_mass_index().map(BmiCategory::from)
    }
}

fn parse_positive(value: &str) -> Option<f32> {
    value
        .replace(',', ".")
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl From<f32> for BmiCategory {
    fn from(value: f32) -> Self {
        if value < 18.5 {
            BmiCategory::Underweight
        } else if value < 25.0 {
            BmiCategory::Normal
        } else if value < 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }
}
