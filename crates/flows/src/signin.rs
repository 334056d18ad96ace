//! Sign-in form state machine.

use planboard_auth::{AuthError, EmailAddress, Password, Session};
use planboard_core::{DomainError, StateMachine};

/// Where the sign-in form currently is.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SignInPhase {
    #[default]
    Idle,
    /// A submission is in flight; the submit control is disabled and
    /// further submits are no-ops.
    Submitting,
    Success(Session),
    Failed(AuthError),
}

/// Sign-in form state.
///
/// # Invariants
/// - At most one submission in flight; a second `Submit` while
///   `Submitting` emits nothing (no queued retry).
/// - Validation failures never start a submission — the provider is not
///   called for input the client can reject itself.
/// - No automatic retry; a `Failed` flow accepts a fresh `Submit`.
#[derive(Debug, Clone, Default)]
pub struct SignInFlow {
    phase: SignInPhase,
}

#[derive(Debug, Clone)]
pub enum SignInCommand {
    Submit { email: String, password: String },
    /// Provider call resolved successfully.
    Complete { session: Session },
    /// Provider call failed (already normalized).
    Fail { error: AuthError },
    Reset,
}

#[derive(Debug, Clone)]
pub enum SignInEvent {
    /// Validation passed; the driver must now call the provider with
    /// exactly these credentials.
    SubmissionStarted {
        email: EmailAddress,
        password: Password,
    },
    SubmissionSucceeded { session: Session },
    SubmissionFailed { error: AuthError },
    FlowReset,
}

impl SignInFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SignInPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SignInPhase::Submitting)
    }

    /// The displayed error, when the last submission failed.
    pub fn error(&self) -> Option<&AuthError> {
        match &self.phase {
            SignInPhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            SignInPhase::Success(session) => Some(session),
            _ => None,
        }
    }

    fn handle_submit(&self, email: &str, password: &str) -> Result<Vec<SignInEvent>, DomainError> {
        match self.phase {
            // Re-entrancy guard: a second submit while one is in flight is
            // a no-op, not a queued retry.
            SignInPhase::Submitting => return Ok(vec![]),
            SignInPhase::Success(_) => {
                return Err(DomainError::invariant("flow already completed"));
            }
            SignInPhase::Idle | SignInPhase::Failed(_) => {}
        }

        if email.trim().is_empty() || password.is_empty() {
            return Ok(vec![SignInEvent::SubmissionFailed {
                error: AuthError::validation("Please enter both email and password."),
            }]);
        }

        let Ok(email) = EmailAddress::parse(email) else {
            return Ok(vec![SignInEvent::SubmissionFailed {
                error: AuthError::validation("Please enter a valid email address."),
            }]);
        };
        let Ok(password) = Password::new(password) else {
            return Ok(vec![SignInEvent::SubmissionFailed {
                error: AuthError::validation("Please enter both email and password."),
            }]);
        };

        Ok(vec![SignInEvent::SubmissionStarted { email, password }])
    }
}

impl StateMachine for SignInFlow {
    type Command = SignInCommand;
    type Event = SignInEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        self.phase = match event {
            SignInEvent::SubmissionStarted { .. } => SignInPhase::Submitting,
            SignInEvent::SubmissionSucceeded { session } => SignInPhase::Success(session.clone()),
            SignInEvent::SubmissionFailed { error } => SignInPhase::Failed(error.clone()),
            SignInEvent::FlowReset => SignInPhase::Idle,
        };
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SignInCommand::Submit { email, password } => self.handle_submit(email, password),
            SignInCommand::Complete { session } => {
                if !self.is_submitting() {
                    return Err(DomainError::invariant("no submission in flight"));
                }
                Ok(vec![SignInEvent::SubmissionSucceeded {
                    session: session.clone(),
                }])
            }
            SignInCommand::Fail { error } => {
                if !self.is_submitting() {
                    return Err(DomainError::invariant("no submission in flight"));
                }
                Ok(vec![SignInEvent::SubmissionFailed {
                    error: error.clone(),
                }])
            }
            SignInCommand::Reset => match self.phase {
                SignInPhase::Idle => Ok(vec![]),
                SignInPhase::Submitting => {
                    Err(DomainError::invariant("cannot reset while submitting"))
                }
                SignInPhase::Success(_) | SignInPhase::Failed(_) => {
                    Ok(vec![SignInEvent::FlowReset])
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_auth::{AuthErrorKind, AuthProviderKind, AuthToken, codes};
    use planboard_core::{UserId, execute};

    fn sample_session() -> Session {
        Session {
            user_id: UserId::new(),
            email: EmailAddress::parse("eve.holt@reqres.in").unwrap(),
            display_name: None,
            token: AuthToken::new("tok-1"),
            provider: AuthProviderKind::Password,
        }
    }

    fn submit(email: &str, password: &str) -> SignInCommand {
        SignInCommand::Submit {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_submit_starts_a_submission() {
        let mut flow = SignInFlow::new();
        let events = execute(&mut flow, &submit("eve.holt@reqres.in", "cityslicka")).unwrap();

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], SignInEvent::SubmissionStarted { .. }));
        assert!(flow.is_submitting());
    }

    #[test]
    fn duplicate_submit_while_submitting_is_a_noop() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("eve.holt@reqres.in", "cityslicka")).unwrap();

        let events = execute(&mut flow, &submit("eve.holt@reqres.in", "cityslicka")).unwrap();
        assert!(events.is_empty());
        assert!(flow.is_submitting());
    }

    #[test]
    fn empty_fields_fail_without_starting_a_submission() {
        let mut flow = SignInFlow::new();
        let events = execute(&mut flow, &submit("", "")).unwrap();

        assert!(matches!(events[0], SignInEvent::SubmissionFailed { .. }));
        let error = flow.error().unwrap();
        assert_eq!(error.kind, AuthErrorKind::Validation);
        assert_eq!(error.message, "Please enter both email and password.");
    }

    #[test]
    fn malformed_email_is_rejected_locally() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("not-an-email", "cityslicka")).unwrap();

        let error = flow.error().unwrap();
        assert!(error.is_validation());
        assert_eq!(error.message, "Please enter a valid email address.");
    }

    #[test]
    fn complete_resolves_to_success() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("eve.holt@reqres.in", "cityslicka")).unwrap();

        let session = sample_session();
        execute(&mut flow, &SignInCommand::Complete { session: session.clone() }).unwrap();

        assert_eq!(flow.session(), Some(&session));
    }

    #[test]
    fn fail_surfaces_the_normalized_error() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("eve.holt@reqres.in", "wrong")).unwrap();

        let error = AuthError::from_provider_code(codes::INVALID_CREDENTIAL, "raw");
        execute(&mut flow, &SignInCommand::Fail { error: error.clone() }).unwrap();

        assert_eq!(flow.error(), Some(&error));
        assert_eq!(flow.error().unwrap().message, "Invalid email or password.");
    }

    #[test]
    fn a_failed_flow_accepts_a_fresh_submit() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("", "")).unwrap();
        assert!(flow.error().is_some());

        let events = execute(&mut flow, &submit("eve.holt@reqres.in", "cityslicka")).unwrap();
        assert!(matches!(events[0], SignInEvent::SubmissionStarted { .. }));
    }

    #[test]
    fn completion_without_a_submission_violates_an_invariant() {
        let mut flow = SignInFlow::new();
        let err = flow
            .handle(&SignInCommand::Complete { session: sample_session() })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn reset_returns_a_settled_flow_to_idle() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("", "")).unwrap();
        execute(&mut flow, &SignInCommand::Reset).unwrap();
        assert_eq!(flow.phase(), &SignInPhase::Idle);

        // Reset on an idle flow is harmless.
        let events = execute(&mut flow, &SignInCommand::Reset).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn reset_while_submitting_is_rejected() {
        let mut flow = SignInFlow::new();
        execute(&mut flow, &submit("eve.holt@reqres.in", "cityslicka")).unwrap();
        assert!(flow.handle(&SignInCommand::Reset).is_err());
    }
}
