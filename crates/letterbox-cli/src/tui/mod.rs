//! Interactive terminal UI.
//!
//! The event loop draws the active screen, routes key presses through the
//! [`navigator::Navigator`] and applies background job completions as they
//! arrive. Nothing here blocks on the network or the filesystem.

mod app;
mod effect;
mod format;
mod navigator;
mod screens;
mod terminal;
mod views;
mod widgets;
mod worker;

use std::io;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use letterbox_runtime::{Backend, Config};
use ratatui::{Terminal, backend::CrosstermBackend};

use app::App;
use terminal::TerminalGuard;
use views::{RenderContext, Theme};

pub struct Tui {
    app: App,
    theme: Theme,
    tick_rate: Duration,
}

impl Tui {
    pub fn new(backend: Arc<dyn Backend>, config: &Config) -> Self {
        Self {
            app: App::new(backend, config.pagination.clone()),
            theme: Theme::default(),
            tick_rate: Duration::from_millis(config.tick_rate_ms),
        }
    }

    pub fn run(mut self) -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        // SIGINT from outside the terminal; Ctrl-C typed in raw mode arrives as a key.
        let interrupted = self.app.interrupt_handle();
        ctrlc::set_handler(move || interrupted.store(true, Ordering::Relaxed))?;

        tracing::info!("terminal ui started");
        self.event_loop(&mut terminal)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        self.app.start();
        let mut last_tick = Instant::now();

        while !self.app.should_quit() {
            let ctx = RenderContext {
                theme: &self.theme,
                now: Instant::now(),
                tick: self.app.tick(),
            };
            terminal.draw(|frame| views::draw(frame, self.app.navigator(), &ctx))?;

            let timeout = self.tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout)?
                && let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
            {
                self.app.handle_key(key);
            }

            self.app.drain_completions();

            if last_tick.elapsed() >= self.tick_rate {
                self.app.on_tick();
                last_tick = Instant::now();
            }
        }

        Ok(())
    }
}
