//! Partner Onboarding — login, signup with OTP, five-step partner
//! registration, and write-through local persistence.

pub mod config;
pub mod error;
pub mod login;
pub mod onboarding;
pub mod portal;
pub mod screen;
pub mod shell;
pub mod signup;
pub mod store;
