use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use super::{LookupOutcome, ResolutionMachine};
use crate::api::{decode, ApiClient};
use crate::domain::Person;

const LOOKUP_FAILED: &str = "Could not look up the document. Try again.";

/// Debounced person lookup by document number.
///
/// Each change to the (document number, document type) tuple restarts the
/// delay window; only the last stable value triggers a request. Timer
/// cancellation is a generation check (a stale timer wakes, sees a newer
/// generation, and exits without issuing a request). A request already on
/// the wire is never cancelled: every issued lookup takes a monotonically
/// increasing ticket and a response is applied only while its ticket is
/// still the latest, so an older response can never overwrite a newer one.
pub struct DocumentLookup<C: ?Sized> {
    client: Arc<C>,
    delay: Duration,
    machine: Arc<Mutex<ResolutionMachine>>,
    generation: Arc<AtomicU64>,
    issued: Arc<AtomicU64>,
    tasks: Vec<JoinHandle<()>>,
}

impl<C> DocumentLookup<C>
where
    C: ApiClient + ?Sized + 'static,
{
    pub fn new(client: Arc<C>, delay: Duration) -> Self {
        Self {
            client,
            delay,
            machine: Arc::new(Mutex::new(ResolutionMachine::new())),
            generation: Arc::new(AtomicU64::new(0)),
            issued: Arc::new(AtomicU64::new(0)),
            tasks: Vec::new(),
        }
    }

    /// The watched tuple changed. Cancels the pending timer; starts a new
    /// one only when both components are present.
    pub fn input_changed(&mut self, document_number: &str, document_type: Option<i64>) {
        self.tasks.retain(|task| !task.is_finished());
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if document_number.is_empty() || document_type.is_none() {
            // No timer will fire, so a pending "searching" state must not
            // outlive the input that scheduled it.
            lock(&self.machine).cancel_lookup();
            return;
        }

        lock(&self.machine).begin_lookup();

        let client = Arc::clone(&self.client);
        let machine = Arc::clone(&self.machine);
        let generations = Arc::clone(&self.generation);
        let issued = Arc::clone(&self.issued);
        let delay = self.delay;
        let number = document_number.to_string();

        self.tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if generations.load(Ordering::SeqCst) != generation {
                return;
            }

            let ticket = issued.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(%number, ticket, "issuing document lookup");
            let outcome = lookup_person(client.as_ref(), &number).await;

            if issued.load(Ordering::SeqCst) == ticket {
                lock(&machine).settle(outcome);
            } else {
                debug!(%number, ticket, "discarding stale lookup response");
            }
        }));
    }

    /// Read the resolution state.
    pub fn read<T>(&self, with: impl FnOnce(&ResolutionMachine) -> T) -> T {
        with(&lock(&self.machine))
    }

    /// Mutate the resolution state (e.g. fill editable person fields).
    pub fn modify<T>(&self, with: impl FnOnce(&mut ResolutionMachine) -> T) -> T {
        with(&mut lock(&self.machine))
    }

    /// Await every outstanding timer and lookup task.
    pub async fn settled(&mut self) {
        for task in self.tasks.drain(..) {
            let _ = task.await;
        }
    }
}

fn lock(machine: &Mutex<ResolutionMachine>) -> MutexGuard<'_, ResolutionMachine> {
    machine.lock().unwrap_or_else(|err| err.into_inner())
}

async fn lookup_person<C: ApiClient + ?Sized>(client: &C, number: &str) -> LookupOutcome {
    match client.fetch(&format!("/person/by-document/{number}")).await {
        Ok(value) => match decode::<Person>(value) {
            Ok(person) => LookupOutcome::Found(person),
            Err(_) => LookupOutcome::TransientError(LOOKUP_FAILED.to_string()),
        },
        Err(err) if err.is_not_found() => LookupOutcome::NotFound,
        Err(err) => {
            debug!(%err, "document lookup failed");
            LookupOutcome::TransientError(LOOKUP_FAILED.to_string())
        }
    }
}
