use rec_indicator_core::Notification;

use tao::event_loop::EventLoopProxy;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns the overlay window (tao windows must stay on the
/// event loop thread), so every notification and the process lifecycle
/// flow through this enum.
#[derive(Debug, Clone)]
pub enum UiCommand {
    /// Apply a notification from the control service.
    Notify(Notification),
    /// Close any overlay and exit the event loop with this code.
    Shutdown {
        /// Process exit code.
        exit_code: i32,
    },
}

/// Destination for [`UiCommand`]s.
///
/// Returns `false` once the UI side is gone.
pub trait UiSink {
    /// Deliver one command, in order.
    fn send(&self, command: UiCommand) -> bool;
}

impl UiSink for EventLoopProxy<UiCommand> {
    fn send(&self, command: UiCommand) -> bool {
        self.send_event(command).is_ok()
    }
}
