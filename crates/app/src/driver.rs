//! Async drivers for the form state machines.
//!
//! A driver interprets a machine's `SubmissionStarted` event into the
//! provider call, then feeds the completion back in — unless the owning
//! view detached its [`FlowHandle`] in the meantime (stale-update guard).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use planboard_auth::{AuthError, IdentityProvider, OAuthProviderId, Session};
use planboard_core::{StateMachine, execute};
use planboard_flows::{
    SignInCommand, SignInEvent, SignInFlow, SignUpCommand, SignUpEvent, SignUpFlow,
};
use planboard_routing::NavigationTarget;

use crate::context::AppContext;

/// Liveness guard for a view that owns an in-flight submission.
///
/// Detach it on unmount: completions landing afterwards are discarded
/// instead of mutating state that no longer has an owner. Detaching does
/// not cancel the provider call itself — a sign-in that succeeds after the
/// form is gone still reaches the observer through the provider's
/// session-change notification.
#[derive(Debug, Clone, Default)]
pub struct FlowHandle {
    attached: Arc<AtomicBool>,
}

impl FlowHandle {
    pub fn new() -> Self {
        Self {
            attached: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn detach(&self) {
        self.attached.store(false, Ordering::SeqCst);
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }
}

/// Apply a completion command, logging the (unreachable in a correctly
/// driven flow) invariant violation instead of panicking.
fn settle<M: StateMachine>(machine: &mut M, command: &M::Command) {
    if let Err(err) = execute(machine, command) {
        tracing::error!(?err, "flow refused completion command");
    }
}

impl AppContext {
    /// Submit the sign-in form.
    ///
    /// Returns the post-login navigation target on success; `None` when the
    /// submission did not complete (validation failure, provider failure,
    /// duplicate submit, detached view) — the flow itself carries the
    /// displayed error.
    pub async fn submit_sign_in(
        &self,
        flow: &mut SignInFlow,
        handle: &FlowHandle,
        email: &str,
        password: &str,
        return_to: Option<&str>,
    ) -> Option<NavigationTarget> {
        let command = SignInCommand::Submit {
            email: email.to_string(),
            password: password.to_string(),
        };
        let events = match execute(flow, &command) {
            Ok(events) => events,
            Err(err) => {
                tracing::error!(?err, "sign-in submit rejected");
                return None;
            }
        };

        // Only an accepted submission reaches the provider; validation
        // failures and duplicate submits stop here.
        let started = events.into_iter().find_map(|event| match event {
            SignInEvent::SubmissionStarted { email, password } => Some((email, password)),
            _ => None,
        })?;

        let result = self
            .provider()
            .sign_in_with_password(&started.0, &started.1)
            .await;

        if !handle.is_attached() {
            tracing::debug!("discarding sign-in completion for a detached view");
            return None;
        }

        self.finish_sign_in(flow, result, return_to)
    }

    fn finish_sign_in(
        &self,
        flow: &mut SignInFlow,
        result: Result<Session, AuthError>,
        return_to: Option<&str>,
    ) -> Option<NavigationTarget> {
        match result {
            Ok(session) => {
                settle(flow, &SignInCommand::Complete { session });
                // Settle the store write before navigating away.
                self.manager().reconcile_pending();
                Some(NavigationTarget::post_login(return_to))
            }
            Err(error) => {
                settle(flow, &SignInCommand::Fail { error });
                None
            }
        }
    }

    /// Submit the sign-up form. Same contract as [`submit_sign_in`](Self::submit_sign_in).
    pub async fn submit_sign_up(
        &self,
        flow: &mut SignUpFlow,
        handle: &FlowHandle,
        name: &str,
        email: &str,
        password: &str,
        return_to: Option<&str>,
    ) -> Option<NavigationTarget> {
        let command = SignUpCommand::Submit {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        let events = match execute(flow, &command) {
            Ok(events) => events,
            Err(err) => {
                tracing::error!(?err, "sign-up submit rejected");
                return None;
            }
        };

        let started = events.into_iter().find_map(|event| match event {
            SignUpEvent::SubmissionStarted {
                display_name,
                email,
                password,
            } => Some((display_name, email, password)),
            _ => None,
        })?;

        let result = self
            .provider()
            .sign_up_with_password(&started.1, &started.2, Some(&started.0))
            .await;

        if !handle.is_attached() {
            tracing::debug!("discarding sign-up completion for a detached view");
            return None;
        }

        match result {
            Ok(session) => {
                settle(flow, &SignUpCommand::Complete { session });
                self.manager().reconcile_pending();
                Some(NavigationTarget::post_login(return_to))
            }
            Err(error) => {
                settle(flow, &SignUpCommand::Fail { error });
                None
            }
        }
    }

    /// Run the OAuth popup flow.
    ///
    /// No form machine is involved; the popup is the provider's own UI.
    /// `Ok(None)` means the completion was discarded for a detached view.
    pub async fn oauth_sign_in(
        &self,
        handle: &FlowHandle,
        provider_id: &OAuthProviderId,
        return_to: Option<&str>,
    ) -> Result<Option<NavigationTarget>, AuthError> {
        let result = self.provider().sign_in_with_oauth_popup(provider_id).await;

        if !handle.is_attached() {
            tracing::debug!("discarding oauth completion for a detached view");
            return Ok(None);
        }

        let _session = result?;
        self.manager().reconcile_pending();
        Ok(Some(NavigationTarget::post_login(return_to)))
    }
}
