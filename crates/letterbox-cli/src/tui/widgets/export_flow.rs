use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use letterbox_runtime::{Error, ExportReport, ExportRows};

use super::TextInput;
use crate::tui::effect::{Effect, RequestId, RequestIds};

/// How long an export result stays on screen after it arrives.
pub const STATUS_VISIBLE_FOR: Duration = Duration::from_secs(5);

const PATH_LIMIT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportStatus {
    pub message: String,
    pub success: bool,
    pub at: Instant,
}

/// Prompt, in-flight tag and status line for one screen's CSV export.
#[derive(Debug, Default)]
pub struct ExportFlow {
    prompt: Option<TextInput>,
    pending: Option<RequestId>,
    status: Option<ExportStatus>,
}

impl ExportFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the path prompt pre-filled with `default_path`. Ignored while a
    /// previous export is still running.
    pub fn open(&mut self, default_path: &str) {
        if self.pending.is_some() || self.prompt.is_some() {
            return;
        }
        self.prompt =
            Some(TextInput::new(PATH_LIMIT, "exports/file.csv").with_value(default_path));
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn prompt(&self) -> Option<&TextInput> {
        self.prompt.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a key while the prompt is open. `rows` is only called when the
    /// user confirms.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        ids: &mut RequestIds,
        rows: impl FnOnce() -> ExportRows,
    ) -> Effect {
        let Some(prompt) = self.prompt.as_mut() else {
            return Effect::None;
        };

        match key.code {
            KeyCode::Esc => {
                self.prompt = None;
                Effect::None
            }
            KeyCode::Enter => {
                let destination = prompt.value();
                self.prompt = None;
                let id = ids.next_id();
                self.pending = Some(id);
                self.status = None;
                Effect::Export {
                    id,
                    rows: rows(),
                    destination,
                }
            }
            _ => {
                prompt.handle_key(key);
                Effect::None
            }
        }
    }

    /// Record the outcome of export `id`. Returns false when `id` is not the
    /// export this flow is waiting for.
    pub fn finish(
        &mut self,
        id: RequestId,
        result: Result<ExportReport, Error>,
        now: Instant,
    ) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;

        let (message, success) = match result {
            Ok(report) if report.rows_failed > 0 => (
                format!(
                    "Exported {} rows to {} ({} skipped, see log)",
                    report.rows_written,
                    report.path.display(),
                    report.rows_failed
                ),
                true,
            ),
            Ok(report) => (
                format!(
                    "Exported {} rows to {}",
                    report.rows_written,
                    report.path.display()
                ),
                true,
            ),
            Err(err) => (format!("Export failed: {}", err), false),
        };
        self.status = Some(ExportStatus {
            message,
            success,
            at: now,
        });
        true
    }

    /// The status line, if it is still within its display window at `now`.
    pub fn visible_status(&self, now: Instant) -> Option<&ExportStatus> {
        self.status
            .as_ref()
            .filter(|s| now.saturating_duration_since(s.at) < STATUS_VISIBLE_FOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn rows() -> ExportRows {
        ExportRows::List(Vec::new())
    }

    fn report() -> ExportReport {
        ExportReport {
            path: PathBuf::from("/tmp/exports/list.csv"),
            rows_written: 3,
            rows_failed: 0,
        }
    }

    #[test]
    fn test_confirm_emits_export_with_prefilled_path() {
        let mut ids = RequestIds::new();
        let mut flow = ExportFlow::new();
        flow.open("exports/list_a_b.csv");

        let effect = flow.handle_key(key(KeyCode::Enter), &mut ids, rows);
        match effect {
            Effect::Export { destination, .. } => assert_eq!(destination, "exports/list_a_b.csv"),
            other => panic!("expected export, got {:?}", other),
        }
        assert!(flow.is_pending());
        assert!(!flow.is_prompting());
    }

    #[test]
    fn test_cancel_leaves_nothing_pending() {
        let mut ids = RequestIds::new();
        let mut flow = ExportFlow::new();
        flow.open("exports/x.csv");

        let effect = flow.handle_key(key(KeyCode::Esc), &mut ids, rows);
        assert_eq!(effect, Effect::None);
        assert!(!flow.is_prompting());
        assert!(!flow.is_pending());
    }

    #[test]
    fn test_open_is_ignored_while_pending() {
        let mut ids = RequestIds::new();
        let mut flow = ExportFlow::new();
        flow.open("a.csv");
        flow.handle_key(key(KeyCode::Enter), &mut ids, rows);

        flow.open("b.csv");
        assert!(!flow.is_prompting());
    }

    #[test]
    fn test_status_visible_for_five_seconds() {
        let mut ids = RequestIds::new();
        let mut flow = ExportFlow::new();
        flow.open("a.csv");
        let Effect::Export { id, .. } = flow.handle_key(key(KeyCode::Enter), &mut ids, rows) else {
            panic!("expected export");
        };

        let arrived = Instant::now();
        assert!(flow.finish(id, Ok(report()), arrived));

        let status = flow.visible_status(arrived + Duration::from_secs(4)).unwrap();
        assert!(status.success);
        assert!(status.message.contains("/tmp/exports/list.csv"));
        assert!(flow.visible_status(arrived + Duration::from_secs(5)).is_none());
    }

    #[test]
    fn test_failure_status_and_stale_completion() {
        let mut ids = RequestIds::new();
        let mut flow = ExportFlow::new();
        flow.open("a.csv");
        let Effect::Export { id, .. } = flow.handle_key(key(KeyCode::Enter), &mut ids, rows) else {
            panic!("expected export");
        };

        let stale = ids.next_id();
        assert!(!flow.finish(stale, Ok(report()), Instant::now()));
        assert!(flow.is_pending());

        let err = Error::PermissionDenied(PathBuf::from("/root/exports"));
        let now = Instant::now();
        assert!(flow.finish(id, Err(err), now));
        let status = flow.visible_status(now).unwrap();
        assert!(!status.success);
        assert!(status.message.starts_with("Export failed: permission denied"));
    }

    #[test]
    fn test_skipped_rows_are_mentioned_in_status() {
        let mut ids = RequestIds::new();
        let mut flow = ExportFlow::new();
        flow.open("a.csv");
        let Effect::Export { id, .. } = flow.handle_key(key(KeyCode::Enter), &mut ids, rows) else {
            panic!("expected export");
        };

        let partial = ExportReport {
            rows_written: 8,
            rows_failed: 2,
            ..report()
        };
        let now = Instant::now();
        assert!(flow.finish(id, Ok(partial), now));

        let status = flow.visible_status(now).unwrap();
        assert!(status.success);
        assert_eq!(
            status.message,
            "Exported 8 rows to /tmp/exports/list.csv (2 skipped, see log)"
        );
    }
}
