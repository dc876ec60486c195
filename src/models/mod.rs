//! Data models
//!
//! Rust structs representing stored user profiles and registration input.

mod registration;
mod user_profile;

pub use registration::{is_valid_email, RegistrationInput, ValidationError};
pub use user_profile::{IntakeKind, UserProfile, UserProfileCreate};
