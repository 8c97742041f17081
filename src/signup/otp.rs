//! OtpSession — mobile/OTP inputs and the resend countdown state.
//!
//! No OTP is ever dispatched or checked; any six digits unlock signup.

use crate::error::FlowError;

/// Digits in a mobile number.
pub const MOBILE_LEN: usize = 10;
/// Digits in an OTP.
pub const OTP_LEN: usize = 6;
/// Default resend countdown, in seconds.
pub const DEFAULT_COUNTDOWN_SECS: u32 = 59;

/// Keep only ASCII digits, at most `max` of them.
fn digits(raw: &str, max: usize) -> String {
    raw.chars().filter(char::is_ascii_digit).take(max).collect()
}

/// Signup inputs plus the countdown that gates resending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpSession {
    mobile: String,
    otp: String,
    seconds_remaining: u32,
    timer_running: bool,
    has_sent_once: bool,
    countdown_secs: u32,
}

impl Default for OtpSession {
    fn default() -> Self {
        Self::new(DEFAULT_COUNTDOWN_SECS)
    }
}

impl OtpSession {
    pub fn new(countdown_secs: u32) -> Self {
        Self {
            mobile: String::new(),
            otp: String::new(),
            seconds_remaining: 0,
            timer_running: false,
            has_sent_once: false,
            countdown_secs,
        }
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn otp(&self) -> &str {
        &self.otp
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn has_sent_once(&self) -> bool {
        self.has_sent_once
    }

    /// Strip non-digits, then keep the first ten.
    pub fn set_mobile(&mut self, raw: &str) -> &str {
        self.mobile = digits(raw, MOBILE_LEN);
        &self.mobile
    }

    /// Strip non-digits, then keep the first six.
    pub fn set_otp(&mut self, raw: &str) -> &str {
        self.otp = digits(raw, OTP_LEN);
        &self.otp
    }

    /// The send/resend button is enabled.
    pub fn can_send_otp(&self) -> bool {
        self.mobile.len() == MOBILE_LEN && !self.timer_running
    }

    /// Start the resend countdown. Blocked while counting or without a full
    /// mobile number.
    pub fn send_otp(&mut self) -> Result<(), FlowError> {
        if !self.can_send_otp() {
            return Err(FlowError::OtpSendBlocked);
        }
        self.seconds_remaining = self.countdown_secs;
        self.timer_running = self.countdown_secs > 0;
        self.has_sent_once = true;
        Ok(())
    }

    /// One second of countdown. Returns whether the countdown is still running.
    pub fn tick(&mut self) -> bool {
        if !self.timer_running {
            return false;
        }
        self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
        if self.seconds_remaining == 0 {
            self.timer_running = false;
        }
        self.timer_running
    }

    /// Halt the countdown without waiting for it to run out.
    pub fn stop_countdown(&mut self) {
        self.timer_running = false;
        self.seconds_remaining = 0;
    }

    /// Text of the send button: the countdown while counting, then "Resend"
    /// once an OTP has gone out.
    pub fn otp_button_label(&self) -> String {
        if self.timer_running {
            let secs = self.seconds_remaining;
            format!("{}:{:02}", secs / 60, secs % 60)
        } else if self.has_sent_once {
            "Resend".to_string()
        } else {
            "Send".to_string()
        }
    }

    /// The "Create Account" button is enabled.
    pub fn can_submit(&self) -> bool {
        self.mobile.len() == MOBILE_LEN && self.otp.len() == OTP_LEN
    }

    pub fn check_submit(&self) -> Result<(), FlowError> {
        if self.can_submit() {
            Ok(())
        } else {
            Err(FlowError::SignupIncomplete)
        }
    }

    /// Back to a blank session, keeping the configured countdown length.
    pub fn reset(&mut self) {
        *self = Self::new(self.countdown_secs);
    }
}
