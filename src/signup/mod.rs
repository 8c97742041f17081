//! Signup — mobile number, mock OTP, and the resend countdown.

pub mod flow;
pub mod otp;
pub mod timer;

pub use flow::SignupFlow;
pub use otp::{DEFAULT_COUNTDOWN_SECS, MOBILE_LEN, OTP_LEN, OtpSession};
pub use timer::{CountdownEvent, CountdownTimer};
