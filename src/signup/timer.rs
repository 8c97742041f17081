//! CountdownTimer — the cancellable once-per-interval task that ticks an
//! `OtpSession` down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{RwLock, broadcast};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

use super::otp::OtpSession;

/// Broadcast channel capacity for countdown events.
const EVENT_CAPACITY: usize = 64;

/// Emitted after every tick the timer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { seconds_remaining: u32 },
    Finished,
}

/// Owns at most one running countdown task.
///
/// Starting again replaces the running task; cancelling or dropping the
/// timer aborts it, so no tick lands after teardown.
pub struct CountdownTimer {
    period: Duration,
    handle: Option<JoinHandle<()>>,
    tx: broadcast::Sender<CountdownEvent>,
}

impl CountdownTimer {
    pub fn new(period: Duration) -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self {
            period,
            handle: None,
            tx,
        }
    }

    /// Subscribe to tick notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CountdownEvent> {
        self.tx.subscribe()
    }

    /// Whether a countdown task is still alive.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Spawn a task ticking `session` once per period until it runs out.
    pub fn start(&mut self, session: Arc<RwLock<OtpSession>>) {
        self.cancel();

        let period = self.period;
        let tx = self.tx.clone();
        self.handle = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                let (running, seconds_remaining) = {
                    let mut session = session.write().await;
                    let running = session.tick();
                    (running, session.seconds_remaining())
                };
                debug!(seconds_remaining, "OTP countdown tick");
                // Ok if nobody is listening
                let _ = tx.send(CountdownEvent::Tick { seconds_remaining });
                if !running {
                    let _ = tx.send(CountdownEvent::Finished);
                    break;
                }
            }
        }));
    }

    /// Abort the running task, if any. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                let was_running = !handle.is_finished();
                handle.abort();
                if was_running {
                    debug!("OTP countdown cancelled");
                }
                was_running
            }
            None => false,
        }
    }
}

impl Drop for CountdownTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn counting_session() -> Arc<RwLock<OtpSession>> {
        let mut session = OtpSession::default();
        session.set_mobile("9876543210");
        session.send_otp().unwrap();
        Arc::new(RwLock::new(session))
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let session = counting_session();
        let mut timer = CountdownTimer::new(SECOND);
        timer.start(session.clone());

        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(session.read().await.seconds_remaining(), 49);
        assert!(session.read().await.timer_running());
        assert!(timer.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn runs_out_and_stops() {
        let session = counting_session();
        let mut timer = CountdownTimer::new(SECOND);
        let mut events = timer.subscribe();
        timer.start(session.clone());

        tokio::time::sleep(Duration::from_millis(59_500)).await;
        {
            let session = session.read().await;
            assert_eq!(session.seconds_remaining(), 0);
            assert!(!session.timer_running());
            assert!(session.can_send_otp());
        }
        assert!(!timer.is_active());

        let mut ticks = 0;
        let mut finished = false;
        while let Ok(event) = events.try_recv() {
            match event {
                CountdownEvent::Tick { .. } => ticks += 1,
                CountdownEvent::Finished => finished = true,
            }
        }
        assert_eq!(ticks, 59);
        assert!(finished);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_stops_further_ticks() {
        let session = counting_session();
        let mut timer = CountdownTimer::new(SECOND);
        timer.start(session.clone());

        tokio::time::sleep(Duration::from_millis(5_500)).await;
        assert!(timer.cancel());
        assert!(!timer.is_active());

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.read().await.seconds_remaining(), 54);

        // Nothing left to cancel
        assert!(!timer.cancel());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_task() {
        let session = counting_session();
        {
            let mut timer = CountdownTimer::new(SECOND);
            timer.start(session.clone());
            tokio::time::sleep(Duration::from_millis(2_500)).await;
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(session.read().await.seconds_remaining(), 57);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_replaces_running_task() {
        let session = counting_session();
        let mut timer = CountdownTimer::new(SECOND);
        timer.start(session.clone());
        tokio::time::sleep(Duration::from_millis(3_500)).await;

        // A second start must not double the tick rate.
        timer.start(session.clone());
        tokio::time::sleep(Duration::from_millis(3_800)).await;
        assert_eq!(session.read().await.seconds_remaining(), 53);
    }
}
