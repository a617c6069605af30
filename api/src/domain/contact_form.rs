use crate::domain::contact_message::{ContactRequest, FormErrors};
use crate::domain::contact_submission::{ContactSubmission, SubmissionResult};
use tokio::sync::watch;

/// Where a form currently is in its submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Validating,
    Sanitizing,
    Sending,
    Submitted,
}

impl Phase {
    pub fn is_submitting(self) -> bool {
        matches!(self, Phase::Validating | Phase::Sanitizing | Phase::Sending)
    }
}

/// Caller-side state of one contact form: the lifecycle phase, the errors
/// to display and whether the message went out.
///
/// `submit` takes `&mut self`, so a single form can only run one submission
/// at a time. Observers subscribe to phase changes to disable their submit
/// control while `is_submitting` holds.
#[derive(Debug)]
pub struct ContactForm {
    phase: watch::Sender<Phase>,
    errors: FormErrors,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        let (phase, _) = watch::channel(Phase::Idle);
        Self {
            phase,
            errors: FormErrors::default(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Phase> {
        self.phase.subscribe()
    }

    pub fn phase(&self) -> Phase {
        *self.phase.borrow()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase().is_submitting()
    }

    pub fn is_submitted(&self) -> bool {
        self.phase() == Phase::Submitted
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub async fn submit(
        &mut self,
        submission: &ContactSubmission,
        request: ContactRequest,
    ) -> SubmissionResult {
        self.errors = FormErrors::default();
        let mut guard = PhaseGuard::enter(&self.phase);

        let result = submission
            .submit_tracking(request, |phase| guard.advance(phase))
            .await;

        match result {
            Ok(()) => {
                guard.settle(Phase::Submitted);
                Ok(())
            }
            Err(e) => {
                self.errors = e.visitor_errors();
                guard.settle(Phase::Idle);
                Err(e)
            }
        }
    }
}

/// Drops the form back to `Idle` if a submission is abandoned mid-flight,
/// so the submitting flag cannot stay raised.
struct PhaseGuard<'a> {
    phase: &'a watch::Sender<Phase>,
    settled: bool,
}

impl<'a> PhaseGuard<'a> {
    fn enter(phase: &'a watch::Sender<Phase>) -> Self {
        phase.send_replace(Phase::Validating);
        Self {
            phase,
            settled: false,
        }
    }

    fn advance(&self, next: Phase) {
        self.phase.send_replace(next);
    }

    fn settle(&mut self, last: Phase) {
        self.phase.send_replace(last);
        self.settled = true;
    }
}

impl Drop for PhaseGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            self.phase.send_replace(Phase::Idle);
        }
    }
}
