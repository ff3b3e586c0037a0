//! Applicant actors and the post office that routes their mail.

use crate::messages::{Outcome, RegistrationForm, StudentMail, SupplementaryInfo};
use crate::office::Office;
use admission_env::{AdmissionContext, ApplicantId, EnvError, QueueReceiver, QueueSender};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;
use tracing::{debug, warn};

/// One task per applicant: register, wait for mail, react, terminate.
pub struct StudentActor<Ctx: AdmissionContext> {
    id: ApplicantId,
    office: Office<Ctx>,
    registrations: QueueSender<RegistrationForm>,
    supplements: QueueSender<SupplementaryInfo>,
    inbox: QueueReceiver<StudentMail>,
    /// Upper bound (exclusive) of the random pre-submission delay
    submission_delay: Duration,
    rng: ChaCha8Rng,
}

impl<Ctx: AdmissionContext> StudentActor<Ctx> {
    pub fn new(
        id: ApplicantId,
        office: Office<Ctx>,
        registrations: QueueSender<RegistrationForm>,
        supplements: QueueSender<SupplementaryInfo>,
        inbox: QueueReceiver<StudentMail>,
        submission_delay: Duration,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            id,
            office,
            registrations,
            supplements,
            inbox,
            submission_delay,
            rng,
        }
    }

    pub async fn run(mut self) {
        if let Err(e) = self.register().await {
            debug!(applicant = %self.id, "applicant stopping: {}", e);
            return;
        }

        while let Some(mail) = self.inbox.recv().await {
            let step = match mail.outcome {
                Outcome::EligibilityRefused => break,
                Outcome::RegisterAgain => self.register().await,
                Outcome::MoreInfoRequested => {
                    // Nothing else is mailed after the supplement
                    if let Err(e) = self.submit_more_info().await {
                        debug!(applicant = %self.id, "applicant stopping: {}", e);
                    }
                    break;
                }
            };
            if let Err(e) = step {
                debug!(applicant = %self.id, "applicant stopping: {}", e);
                break;
            }
        }
    }

    async fn pause(&mut self) {
        let delay = submission_pause(&mut self.rng, self.submission_delay);
        self.office.context.sleep(delay).await;
    }

    /// Submits a registration form after a random delay.
    async fn register(&mut self) -> Result<(), EnvError> {
        self.pause().await;
        match self.office.registry.snapshot(self.id) {
            Ok(applicant) => self.registrations.send(RegistrationForm { applicant }).await,
            Err(e) => {
                warn!("cannot register: {}", e);
                Ok(())
            }
        }
    }

    /// Sends transcript and motivation letter after a random delay.
    async fn submit_more_info(&mut self) -> Result<(), EnvError> {
        self.pause().await;
        match self.office.registry.snapshot(self.id) {
            Ok(applicant) => self.supplements.send(SupplementaryInfo { applicant }).await,
            Err(e) => {
                warn!("cannot submit supplementary information: {}", e);
                Ok(())
            }
        }
    }
}

/// Uniform delay in `[0, bound)`, or zero for an empty window.
fn submission_pause<R: Rng>(rng: &mut R, bound: Duration) -> Duration {
    if bound.is_zero() {
        Duration::ZERO
    } else {
        rng.gen_range(Duration::ZERO..bound)
    }
}

/// Routes the shared student-mail queue to per-applicant inboxes.
pub struct PostOffice {
    mail: QueueReceiver<StudentMail>,
    inboxes: Vec<QueueSender<StudentMail>>,
}

impl PostOffice {
    /// `inboxes[i]` must belong to applicant `i`.
    pub fn new(mail: QueueReceiver<StudentMail>, inboxes: Vec<QueueSender<StudentMail>>) -> Self {
        Self { mail, inboxes }
    }

    pub async fn run(mut self) {
        while let Some(letter) = self.mail.recv().await {
            let to = letter.recipient();
            let Some(inbox) = self.inboxes.get(to.index()) else {
                warn!(applicant = %to, "mail for unknown applicant dropped");
                continue;
            };
            // A finished applicant no longer reads mail
            if inbox.send(letter).await.is_err() {
                debug!(applicant = %to, "mail to departed applicant dropped");
            }
        }
    }
}
