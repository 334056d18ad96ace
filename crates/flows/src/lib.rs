//! `planboard-flows` — form submission state machines.
//!
//! One canonical machine per form: `Idle → Submitting → {Success, Failed}`.
//! The machines are pure (decide/apply); async drivers in the app crate
//! interpret `SubmissionStarted` events into provider calls and feed
//! completions back as commands.

pub mod signin;
pub mod signup;

pub use signin::{SignInCommand, SignInEvent, SignInFlow, SignInPhase};
pub use signup::{SignUpCommand, SignUpEvent, SignUpFlow, SignUpPhase};
