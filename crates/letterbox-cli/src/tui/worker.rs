//! Background jobs. Each job runs on its own thread and sends exactly one
//! [`Completion`] back to the event loop.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use letterbox_runtime::{Backend, Error, ExportReport, ExportRows, Payload, Quote, Request};

use super::effect::RequestId;

#[derive(Debug)]
pub enum Outcome {
    Fetched(Result<Payload, Error>),
    Exported(Result<ExportReport, Error>),
    Quote(Result<Quote, Error>),
}

#[derive(Debug)]
pub struct Completion {
    pub id: RequestId,
    pub outcome: Outcome,
}

/// Spawns jobs against a [`Backend`] and reports back over a channel.
pub struct Worker {
    backend: Arc<dyn Backend>,
    tx: Sender<Completion>,
}

impl Worker {
    pub fn new(backend: Arc<dyn Backend>) -> (Self, Receiver<Completion>) {
        let (tx, rx) = mpsc::channel();
        (Self { backend, tx }, rx)
    }

    pub fn fetch(&self, id: RequestId, request: Request) {
        let backend = Arc::clone(&self.backend);
        self.spawn(
            id,
            "fetch",
            move || {
                tracing::debug!(%id, executable = request.executable(), "fetch started");
                Outcome::Fetched(backend.fetch(&request))
            },
            |err| Outcome::Fetched(Err(err)),
        );
    }

    pub fn export(&self, id: RequestId, rows: ExportRows, destination: String) {
        self.spawn(
            id,
            "export",
            move || {
                tracing::debug!(%id, rows = rows.len(), %destination, "export started");
                Outcome::Exported(rows.write_to(&destination))
            },
            |err| Outcome::Exported(Err(err)),
        );
    }

    pub fn load_quote(&self, id: RequestId) {
        self.spawn(
            id,
            "quote",
            || Outcome::Quote(letterbox_runtime::load_random_quote()),
            |err| Outcome::Quote(Err(err)),
        );
    }

    fn spawn<F>(&self, id: RequestId, kind: &'static str, job: F, failed: fn(Error) -> Outcome)
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let tx = self.tx.clone();
        let spawned = thread::Builder::new()
            .name(format!("letterbox-{}", kind))
            .spawn(move || {
                let outcome = job();
                // The receiver is gone once the UI has quit.
                let _ = tx.send(Completion { id, outcome });
            });

        if let Err(err) = spawned {
            tracing::error!(%id, kind, error = %err, "failed to spawn worker thread");
            let _ = self.tx.send(Completion {
                id,
                outcome: failed(Error::Io(err)),
            });
        }
    }
}
