//! Administration actor: eligibility evaluation and outcome mail.

use crate::messages::{AdministrationTask, StudentMail};
use crate::office::Office;
use admission_core::{Event, EventKind, Transition, Verdict};
use admission_env::{AdmissionContext, QueueReceiver, QueueSender};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

/// Single long-lived task consuming the administration queue.
pub struct Administration<Ctx: AdmissionContext> {
    office: Office<Ctx>,
    tasks: QueueReceiver<AdministrationTask>,
    mail: QueueSender<StudentMail>,
    rng: ChaCha8Rng,
}

impl<Ctx: AdmissionContext> Administration<Ctx> {
    pub fn new(
        office: Office<Ctx>,
        tasks: QueueReceiver<AdministrationTask>,
        mail: QueueSender<StudentMail>,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            office,
            tasks,
            mail,
            rng,
        }
    }

    pub async fn run(mut self) {
        while let Some(task) = self.tasks.recv().await {
            match task {
                AdministrationTask::Evaluate(received) => {
                    let Some(mail) = self.evaluate(&received).await else {
                        continue;
                    };
                    if let Err(e) = self.mail.send(mail).await {
                        debug!("administration stopping: {}", e);
                        break;
                    }
                }
                AdministrationTask::File(event) => {
                    debug!(
                        applicant = %event.applicant,
                        "filed {} from {}", event.title, event.role
                    );
                }
            }
        }
    }

    /// Evaluates a received registration and records exactly one outcome.
    ///
    /// Order: age, origin, then the resubmission roll. A refusal moves the
    /// applicant to `Refused` before the mail leaves. Applicants that already
    /// reached a terminal state are not evaluated.
    async fn evaluate(&mut self, received: &Event) -> Option<StudentMail> {
        let office = &self.office;
        let rng = &mut self.rng;
        office.context.sleep(office.latency.administration).await;

        let id = received.applicant;
        let recorded = office.record(id, |applicant, now| {
            if applicant.state.is_terminal() {
                debug!(applicant = %id, state = %applicant.state, "evaluation skipped");
                return None;
            }
            match office.policy.assess(applicant, rng) {
                Verdict::Ineligible(reason) => match applicant.apply(Transition::RefuseEligibility) {
                    Ok(_) => Some(Event::new(EventKind::RefuseEligibility, reason.letter(), applicant, now)),
                    Err(e) => {
                        debug!(applicant = %id, "eligibility refusal not applied: {}", e);
                        None
                    }
                },
                Verdict::RegisterAgain => Some(Event::standard(EventKind::AskRegisterAgain, applicant, now)),
                Verdict::MoreInfo => Some(Event::standard(EventKind::AskMoreInfo, applicant, now)),
            }
        });

        match recorded {
            Ok(event) => event.and_then(StudentMail::announcing),
            Err(e) => {
                warn!("evaluation rejected: {}", e);
                None
            }
        }
    }
}
