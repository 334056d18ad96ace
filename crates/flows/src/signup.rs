//! Sign-up form state machine.

use planboard_auth::{AuthError, EmailAddress, Password, Session};
use planboard_core::{DomainError, StateMachine};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SignUpPhase {
    #[default]
    Idle,
    Submitting,
    Success(Session),
    Failed(AuthError),
}

/// Sign-up form state. Same machine shape as sign-in, with the account
/// creation validation policy (name required, email shape, minimum
/// password length) enforced before any provider interaction.
#[derive(Debug, Clone, Default)]
pub struct SignUpFlow {
    phase: SignUpPhase,
}

#[derive(Debug, Clone)]
pub enum SignUpCommand {
    Submit {
        name: String,
        email: String,
        password: String,
    },
    Complete { session: Session },
    Fail { error: AuthError },
    Reset,
}

#[derive(Debug, Clone)]
pub enum SignUpEvent {
    SubmissionStarted {
        display_name: String,
        email: EmailAddress,
        password: Password,
    },
    SubmissionSucceeded { session: Session },
    SubmissionFailed { error: AuthError },
    FlowReset,
}

impl SignUpFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SignUpPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, SignUpPhase::Submitting)
    }

    pub fn error(&self) -> Option<&AuthError> {
        match &self.phase {
            SignUpPhase::Failed(error) => Some(error),
            _ => None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.phase {
            SignUpPhase::Success(session) => Some(session),
            _ => None,
        }
    }

    fn handle_submit(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Vec<SignUpEvent>, DomainError> {
        match self.phase {
            SignUpPhase::Submitting => return Ok(vec![]),
            SignUpPhase::Success(_) => {
                return Err(DomainError::invariant("flow already completed"));
            }
            SignUpPhase::Idle | SignUpPhase::Failed(_) => {}
        }

        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Ok(vec![SignUpEvent::SubmissionFailed {
                error: AuthError::validation("Please fill in all fields."),
            }]);
        }

        let Ok(email) = EmailAddress::parse(email) else {
            return Ok(vec![SignUpEvent::SubmissionFailed {
                error: AuthError::validation("Please enter a valid email address."),
            }]);
        };
        let Ok(password) = Password::new_for_signup(password) else {
            return Ok(vec![SignUpEvent::SubmissionFailed {
                error: AuthError::validation("Password must be at least 6 characters."),
            }]);
        };

        Ok(vec![SignUpEvent::SubmissionStarted {
            display_name: name.trim().to_string(),
            email,
            password,
        }])
    }
}

impl StateMachine for SignUpFlow {
    type Command = SignUpCommand;
    type Event = SignUpEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        self.phase = match event {
            SignUpEvent::SubmissionStarted { .. } => SignUpPhase::Submitting,
            SignUpEvent::SubmissionSucceeded { session } => SignUpPhase::Success(session.clone()),
            SignUpEvent::SubmissionFailed { error } => SignUpPhase::Failed(error.clone()),
            SignUpEvent::FlowReset => SignUpPhase::Idle,
        };
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            SignUpCommand::Submit { name, email, password } => {
                self.handle_submit(name, email, password)
            }
            SignUpCommand::Complete { session } => {
                if !self.is_submitting() {
                    return Err(DomainError::invariant("no submission in flight"));
                }
                Ok(vec![SignUpEvent::SubmissionSucceeded {
                    session: session.clone(),
                }])
            }
            SignUpCommand::Fail { error } => {
                if !self.is_submitting() {
                    return Err(DomainError::invariant("no submission in flight"));
                }
                Ok(vec![SignUpEvent::SubmissionFailed {
                    error: error.clone(),
                }])
            }
            SignUpCommand::Reset => match self.phase {
                SignUpPhase::Idle => Ok(vec![]),
                SignUpPhase::Submitting => {
                    Err(DomainError::invariant("cannot reset while submitting"))
                }
                SignUpPhase::Success(_) | SignUpPhase::Failed(_) => {
                    Ok(vec![SignUpEvent::FlowReset])
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planboard_auth::{AuthErrorKind, codes};
    use planboard_core::execute;

    fn submit(name: &str, email: &str, password: &str) -> SignUpCommand {
        SignUpCommand::Submit {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_submit_carries_the_trimmed_display_name() {
        let mut flow = SignUpFlow::new();
        let events = execute(&mut flow, &submit("  Eve Holt ", "eve.holt@reqres.in", "cityslicka")).unwrap();

        let SignUpEvent::SubmissionStarted { display_name, .. } = &events[0] else {
            panic!("expected SubmissionStarted");
        };
        assert_eq!(display_name, "Eve Holt");
        assert!(flow.is_submitting());
    }

    #[test]
    fn five_character_password_is_rejected_before_the_provider() {
        let mut flow = SignUpFlow::new();
        let events = execute(&mut flow, &submit("Eve", "eve.holt@reqres.in", "12345")).unwrap();

        assert!(matches!(events[0], SignUpEvent::SubmissionFailed { .. }));
        let error = flow.error().unwrap();
        assert_eq!(error.kind, AuthErrorKind::Validation);
        assert_eq!(error.message, "Password must be at least 6 characters.");
    }

    #[test]
    fn missing_name_fails_the_fill_all_fields_check() {
        let mut flow = SignUpFlow::new();
        execute(&mut flow, &submit("  ", "eve.holt@reqres.in", "cityslicka")).unwrap();
        assert_eq!(flow.error().unwrap().message, "Please fill in all fields.");
    }

    #[test]
    fn malformed_email_is_rejected_locally() {
        let mut flow = SignUpFlow::new();
        execute(&mut flow, &submit("Eve", "eve.holt@", "cityslicka")).unwrap();
        assert_eq!(
            flow.error().unwrap().message,
            "Please enter a valid email address."
        );
    }

    #[test]
    fn duplicate_submit_while_submitting_is_a_noop() {
        let mut flow = SignUpFlow::new();
        execute(&mut flow, &submit("Eve", "eve.holt@reqres.in", "cityslicka")).unwrap();
        let events = execute(&mut flow, &submit("Eve", "eve.holt@reqres.in", "cityslicka")).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn provider_duplicate_email_failure_is_displayed() {
        let mut flow = SignUpFlow::new();
        execute(&mut flow, &submit("Eve", "eve.holt@reqres.in", "cityslicka")).unwrap();

        let error = AuthError::from_provider_code(codes::EMAIL_ALREADY_IN_USE, "EMAIL_EXISTS");
        execute(&mut flow, &SignUpCommand::Fail { error }).unwrap();

        assert_eq!(flow.error().unwrap().message, "This email is already registered.");
    }
}
