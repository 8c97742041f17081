//! SignupFlow — the shared OTP session plus the timer that counts it down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, broadcast};
use tracing::info;

use super::otp::OtpSession;
use super::timer::{CountdownEvent, CountdownTimer};
use crate::error::FlowError;

/// Signup screen state.
pub struct SignupFlow {
    session: Arc<RwLock<OtpSession>>,
    timer: CountdownTimer,
}

impl SignupFlow {
    pub fn new(countdown_secs: u32, tick_interval: Duration) -> Self {
        Self {
            session: Arc::new(RwLock::new(OtpSession::new(countdown_secs))),
            timer: CountdownTimer::new(tick_interval),
        }
    }

    /// Copy of the current session state.
    pub async fn snapshot(&self) -> OtpSession {
        self.session.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CountdownEvent> {
        self.timer.subscribe()
    }

    pub async fn set_mobile(&self, raw: &str) -> String {
        self.session.write().await.set_mobile(raw).to_string()
    }

    pub async fn set_otp(&self, raw: &str) -> String {
        self.session.write().await.set_otp(raw).to_string()
    }

    /// Send (or resend) the OTP and start the countdown.
    pub async fn send_otp(&mut self) -> Result<(), FlowError> {
        let counting = {
            let mut session = self.session.write().await;
            session.send_otp()?;
            info!(
                seconds = session.seconds_remaining(),
                resend = session.has_sent_once(),
                "OTP requested"
            );
            session.timer_running()
        };
        if counting {
            self.timer.start(Arc::clone(&self.session));
        }
        Ok(())
    }

    pub async fn check_submit(&self) -> Result<(), FlowError> {
        self.session.read().await.check_submit()
    }

    /// Leave the signup screen: no tick may touch the session afterwards.
    pub async fn teardown(&mut self) {
        self.timer.cancel();
        self.session.write().await.stop_countdown();
    }

    /// Tear down and forget everything typed so far.
    pub async fn reset(&mut self) {
        self.timer.cancel();
        self.session.write().await.reset();
    }

    pub fn countdown_active(&self) -> bool {
        self.timer.is_active()
    }
}
