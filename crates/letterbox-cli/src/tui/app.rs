//! Glue between key presses, the navigator and background jobs.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Receiver;

use crossterm::event::KeyEvent;
use letterbox_runtime::{Backend, PaginationConfig};

use super::effect::Effect;
use super::navigator::Navigator;
use super::worker::{Completion, Worker};

pub struct App {
    navigator: Navigator,
    worker: Worker,
    completions: Receiver<Completion>,
    should_quit: bool,
    interrupted: Arc<AtomicBool>,
    tick: usize,
}

impl App {
    pub fn new(backend: Arc<dyn Backend>, pagination: PaginationConfig) -> Self {
        let (worker, completions) = Worker::new(backend);
        Self {
            navigator: Navigator::new(pagination),
            worker,
            completions,
            should_quit: false,
            interrupted: Arc::new(AtomicBool::new(false)),
            tick: 0,
        }
    }

    /// Kick off the jobs the menu needs before the first key press.
    pub fn start(&mut self) {
        let id = self.navigator.begin_quote_load();
        self.worker.load_quote(id);
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit || self.interrupted.load(Ordering::Relaxed)
    }

    /// Flag a signal handler can set to end the event loop on its next pass.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let effect = self.navigator.handle_key(key);
        self.dispatch(effect);
    }

    /// Apply every completion that has arrived without blocking.
    pub fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions.try_recv() {
            self.navigator.handle_completion(completion);
        }
    }

    fn dispatch(&mut self, effect: Effect) {
        match effect {
            Effect::None => {}
            Effect::Quit => {
                tracing::info!("quit requested");
                self.should_quit = true;
            }
            Effect::Fetch { id, request } => {
                tracing::info!(%id, executable = request.executable(), "fetching");
                self.worker.fetch(id, request);
            }
            Effect::Export {
                id,
                rows,
                destination,
            } => {
                tracing::info!(%id, %destination, "exporting");
                self.worker.export(id, rows, destination);
            }
            // The navigator applies screen switches itself.
            Effect::Open(_) | Effect::Menu => {}
        }
    }

    #[cfg(test)]
    fn wait_for_completion(&mut self) {
        let completion = self
            .completions
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("worker should report back");
        self.navigator.handle_completion(completion);
    }
}
