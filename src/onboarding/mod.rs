//! Onboarding form — the five-step partner registration.
//!
//! Owner details, business details, business identity, bank details and the
//! partnership agreement are collected into one `FormRecord`. Every edit is
//! mirrored to the store so a restart picks up where the partner left off.

pub mod form;
pub mod location;
pub mod model;
pub mod step;
pub mod visibility;

pub use form::{NoViewport, OnboardingForm, Viewport};
pub use location::{Location, resolve_location};
pub use model::{FileField, FormRecord, TextField, options};
pub use step::Step;
pub use visibility::{VisibleField, fssai_fields_visible, gst_fields_visible, visible_fields};
