//! Window destruction and process exit status.

use std::process::ExitCode;

use crate::toolkit::EventLoop;

/// How a program ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ExitStatus {
    /// The top-level window was destroyed and the event loop stopped.
    Success,
    /// The layout resource could not be loaded or did not describe the
    /// widgets the program needs.
    LayoutFailure,
    /// The toolkit failed to start or run its event loop.
    ToolkitFailure,
}

impl ExitStatus {
    /// Returns the process exit code for this status.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::LayoutFailure | ExitStatus::ToolkitFailure => 1,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Stops the event loop when the top-level window is destroyed.
#[derive(Debug, Clone)]
pub struct ShutdownHandler<Loop> {
    event_loop: Loop,
}

impl<Loop> ShutdownHandler<Loop>
where
    Loop: EventLoop,
{
    /// Returns a handler that stops `event_loop`.
    pub const fn new(event_loop: Loop) -> Self {
        Self { event_loop }
    }

    /// Handles the destroy notification of the top-level window.
    pub fn handle_destroy(&self) -> ExitStatus {
        tracing::debug!("top-level window destroyed, stopping event loop");
        self.event_loop.quit();
        ExitStatus::Success
    }

    /// Returns the event loop this handler stops.
    pub const fn event_loop(&self) -> &Loop {
        &self.event_loop
    }
}
