//! Stateful building blocks shared by every screen.

mod export_flow;
mod pager;
mod text_input;

pub use export_flow::ExportFlow;
pub use pager::Pager;
pub use text_input::TextInput;

/// Step a tab index forward or backward, wrapping at both ends.
pub fn cycle(index: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    }
}
