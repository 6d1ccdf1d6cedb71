//! The async fetch boundary.
//!
//! Encounter generation blocks on the network, so it runs on a dedicated
//! worker task. The app loop sends requests over one channel and receives
//! completed records (or errors) on the other; ledger and grid mutation
//! stays on the app side of the channel.

use dex_core::{EncounterError, EncounterGenerator, EncounterRecord};
use tokio::sync::mpsc;
use tracing::debug;

/// Request sent from the app loop to the fetch worker.
#[derive(Debug)]
pub enum WorkerRequest {
    /// Generate one encounter.
    Encounter,
    /// Shut the worker down.
    Shutdown,
}

/// Response sent from the fetch worker to the app loop.
#[derive(Debug)]
pub enum WorkerResponse {
    /// A generation attempt completed.
    Encounter(Result<EncounterRecord, EncounterError>),
}

/// Spawn the fetch worker and return the channel endpoints.
///
/// Requests are handled one at a time; a trigger that fires while a fetch is
/// still in flight queues behind it rather than overlapping it.
pub fn spawn_worker(
    generator: EncounterGenerator<pokeapi::Client>,
) -> (mpsc::Sender<WorkerRequest>, mpsc::Receiver<WorkerResponse>) {
    let (request_tx, mut request_rx) = mpsc::channel::<WorkerRequest>(8);
    let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>(8);

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            match request {
                WorkerRequest::Encounter => {
                    let result = generator.generate().await;
                    if response_tx
                        .send(WorkerResponse::Encounter(result))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                WorkerRequest::Shutdown => break,
            }
        }
        debug!("fetch worker stopped");
    });

    (request_tx, response_rx)
}
