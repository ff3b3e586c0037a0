//! Registrar actor: registration desk and teacher review.

use crate::messages::{AdministrationTask, RegistrationForm, SupplementaryInfo};
use crate::office::Office;
use admission_core::{Event, EventKind, Transition};
use admission_env::{AdmissionContext, QueueReceiver, QueueSender};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, warn};

enum Inbound {
    Registration(RegistrationForm),
    Supplement(SupplementaryInfo),
}

/// Single long-lived task consuming the registration and
/// supplementary-information queues.
pub struct Registrar<Ctx: AdmissionContext> {
    office: Office<Ctx>,
    registrations: QueueReceiver<RegistrationForm>,
    supplements: QueueReceiver<SupplementaryInfo>,
    administration: QueueSender<AdministrationTask>,
    rng: ChaCha8Rng,
}

impl<Ctx: AdmissionContext> Registrar<Ctx> {
    pub fn new(
        office: Office<Ctx>,
        registrations: QueueReceiver<RegistrationForm>,
        supplements: QueueReceiver<SupplementaryInfo>,
        administration: QueueSender<AdministrationTask>,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            office,
            registrations,
            supplements,
            administration,
            rng,
        }
    }

    /// Serves both queues until they are closed or administration is gone.
    ///
    /// Whichever queue has a message ready is served; there is no priority
    /// between them.
    pub async fn run(mut self) {
        let mut registrations_open = true;
        let mut supplements_open = true;

        loop {
            let inbound = tokio::select! {
                form = self.registrations.recv(), if registrations_open => match form {
                    Some(form) => Inbound::Registration(form),
                    None => {
                        debug!(queue = self.registrations.name(), "queue closed");
                        registrations_open = false;
                        continue;
                    }
                },
                info = self.supplements.recv(), if supplements_open => match info {
                    Some(info) => Inbound::Supplement(info),
                    None => {
                        debug!(queue = self.supplements.name(), "queue closed");
                        supplements_open = false;
                        continue;
                    }
                },
                else => break,
            };

            if !self.registrations.is_empty() {
                debug!(
                    queue = self.registrations.name(),
                    "backlog {}/{}",
                    self.registrations.len(),
                    self.registrations.capacity()
                );
            }

            let task = match inbound {
                Inbound::Registration(form) => self.process_registration(form).await,
                Inbound::Supplement(info) => self.process_supplement(info).await,
            };

            if let Some(task) = task {
                if let Err(e) = self.administration.send(task).await {
                    debug!("registrar stopping: {}", e);
                    break;
                }
            }
        }
    }

    /// Records `Received` and returns the evaluation task, unless the
    /// deadline has passed, in which case the form is dropped silently.
    async fn process_registration(&mut self, form: RegistrationForm) -> Option<AdministrationTask> {
        let office = &self.office;
        office.context.sleep(office.latency.registrar).await;

        let id = form.applicant.id;
        let recorded = office.record(id, |_, now| {
            office
                .deadline
                .is_open(now)
                .then(|| Event::received(&form.applicant, now))
        });

        match recorded {
            Ok(Some(event)) => Some(AdministrationTask::Evaluate(event)),
            Ok(None) => {
                debug!(applicant = %id, "registration after deadline dropped");
                None
            }
            Err(e) => {
                warn!("registration rejected: {}", e);
                None
            }
        }
    }

    /// Teacher review: refuse on the motivation letter or rank.
    async fn process_supplement(&mut self, info: SupplementaryInfo) -> Option<AdministrationTask> {
        let office = &self.office;
        office.context.sleep(office.latency.teacher).await;

        let (transition, kind) = if office.policy.refuses_motivation(&mut self.rng) {
            (Transition::RefuseMotivationLetter, EventKind::RefuseMotivationLetter)
        } else {
            (Transition::Rank, EventKind::Rank)
        };

        let id = info.applicant.id;
        let recorded = office.record(id, |applicant, now| match applicant.apply(transition) {
            Ok(_) => Some(Event::standard(kind, applicant, now)),
            Err(e) => {
                debug!(applicant = %id, "supplementary information ignored: {}", e);
                None
            }
        });

        match recorded {
            Ok(event) => event.map(AdministrationTask::File),
            Err(e) => {
                warn!("supplementary information rejected: {}", e);
                None
            }
        }
    }
}
