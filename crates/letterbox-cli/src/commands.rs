use std::sync::Arc;

use anyhow::{Context, Result, bail};
use is_terminal::IsTerminal;
use letterbox_runtime::{Config, ExecutableLocator, Gateway, resolve_data_dir};

use crate::args::Cli;
use crate::logging;
use crate::tui::Tui;

pub fn run(_cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(None).context("could not determine data directory")?;
    let config = Config::load_from(&Config::path_in(&data_dir))
        .context("failed to load configuration")?;

    if !std::io::stdout().is_terminal() {
        bail!("letterbox needs an interactive terminal (stdout is not a TTY)");
    }

    let _guard = logging::init(&data_dir, &config)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %data_dir.display(),
        "starting session"
    );

    let locator = ExecutableLocator::from_environment(config.executables_dir.as_deref());
    tracing::debug!(dirs = ?locator.dirs(), "executable search path");
    let gateway = Gateway::new(locator);

    let result = Tui::new(Arc::new(gateway), &config).run();
    match &result {
        Ok(()) => tracing::info!("session ended"),
        Err(err) => tracing::error!(error = %err, "session aborted"),
    }
    result
}
