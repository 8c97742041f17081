//! Screen controller — which top-level screen is active, and where it may go.

use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::FlowError;
use crate::store::{PersistenceStore, keys};

/// The four top-level views of the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Login,
    Signup,
    Onboarding,
    Success,
}

impl Screen {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Screen) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            (Login, Signup)
                | (Login, Onboarding)
                | (Signup, Onboarding)
                | (Signup, Login)
                | (Onboarding, Login)
                | (Onboarding, Success)
                | (Success, Login)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
            Self::Onboarding => "onboarding",
            Self::Success => "success",
        }
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "signup" => Ok(Self::Signup),
            "onboarding" => Ok(Self::Onboarding),
            "success" => Ok(Self::Success),
            other => Err(format!("unknown screen {other:?}")),
        }
    }
}

/// Tracks the active screen and mirrors it to the store.
pub struct ScreenController {
    store: Arc<dyn PersistenceStore>,
    current: Screen,
}

impl ScreenController {
    /// Restore the last persisted screen, defaulting to `Login`.
    ///
    /// A persisted `Onboarding` is honored as-is; there is no re-authentication.
    pub async fn restore(store: Arc<dyn PersistenceStore>) -> Self {
        let current = match store.get(keys::SCREEN).await {
            Ok(Some(raw)) => raw.parse::<Screen>().unwrap_or_else(|e| {
                warn!("Ignoring persisted screen: {}", e);
                Screen::default()
            }),
            Ok(None) => Screen::default(),
            Err(e) => {
                warn!("Failed to read persisted screen: {}", e);
                Screen::default()
            }
        };
        info!(screen = %current, "Screen restored");
        Self { store, current }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Move to `target`, persisting the new screen.
    pub async fn transition_to(&mut self, target: Screen) -> Result<Screen, FlowError> {
        if !self.current.can_transition_to(target) {
            return Err(FlowError::InvalidTransition {
                from: self.current,
                to: target,
            });
        }
        info!(from = %self.current, to = %target, "Screen transition");
        self.current = target;
        self.persist().await;
        Ok(target)
    }

    /// Remove every persisted portal key.
    pub async fn clear_persisted(&self) {
        for key in keys::ALL {
            if let Err(e) = self.store.remove(key).await {
                warn!(key, "Failed to clear persisted key: {}", e);
            }
        }
    }

    async fn persist(&self) {
        if let Err(e) = self.store.set(keys::SCREEN, self.current.as_str()).await {
            warn!("Failed to persist screen: {}", e);
        }
    }
}
