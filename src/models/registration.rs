//! Registration input
//!
//! Validates a sign-up form and turns it into a profile with derived goals.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::health::{self, BodyMeasurements, HealthMetrics};

use super::UserProfileCreate;

/// A single rejected registration field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("full name is required")]
    EmptyName,

    #[error("email is required")]
    EmptyEmail,

    #[error("email address is not valid")]
    InvalidEmail,

    #[error("age must be between 1 and 120")]
    InvalidAge,

    #[error("weight must be between 20 and 500 kg")]
    InvalidWeight,

    #[error("height must be between 50 and 300 cm")]
    InvalidHeight,

    #[error("select a gender")]
    MissingSex,

    #[error("select an activity level")]
    MissingActivityLevel,
}

/// Sign-up form contents. Passwords never reach this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationInput {
    pub full_name: String,
    pub email: String,
    pub age: i32,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub sex: String,
    pub activity_level: String,
}

impl RegistrationInput {
    /// Check every field, reporting all failures at once
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.full_name.trim().is_empty() {
            errors.push(ValidationError::EmptyName);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ValidationError::EmptyEmail);
        } else if !is_valid_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }

        if !health::is_valid_age(self.age) {
            errors.push(ValidationError::InvalidAge);
        }
        if !health::is_valid_weight(self.weight_kg) {
            errors.push(ValidationError::InvalidWeight);
        }
        if !health::is_valid_height(self.height_cm) {
            errors.push(ValidationError::InvalidHeight);
        }

        if self.sex.trim().is_empty() {
            errors.push(ValidationError::MissingSex);
        }
        if self.activity_level.trim().is_empty() {
            errors.push(ValidationError::MissingActivityLevel);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn measurements(&self) -> BodyMeasurements {
        BodyMeasurements {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            sex: self.sex.clone(),
            activity_level: self.activity_level.clone(),
        }
    }

    /// Derive goals and build the profile to store under `uid`.
    ///
    /// Does not validate; call [`RegistrationInput::validate`] first.
    pub fn into_profile(self, uid: &str) -> UserProfileCreate {
        let metrics = HealthMetrics::compute(&self.measurements());
        UserProfileCreate {
            uid: uid.to_string(),
            full_name: self.full_name.trim().to_string(),
            email: self.email.trim().to_string(),
            age: self.age,
            weight: self.weight_kg,
            height: self.height_cm,
            gender: self.sex,
            activity_level: self.activity_level,
            daily_water_goal: metrics.water_goal_ml,
            daily_calorie_goal: metrics.calorie_goal,
            bmi: metrics.bmi,
        }
    }
}

/// Loose `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|label| !label.is_empty())
}
