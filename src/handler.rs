/// Trait for implementations that receive session-level signals from a
/// [`crate::ControlMachine`].
///
/// Responses to issued commands are not delivered here; those go through the
/// callbacks registered with [`crate::ControlMachine::enqueue`] and
/// [`crate::ControlMachine::register_default`].
///
/// All of the provided method implementations perform no action at all.
pub trait ControlHandler {
    /// Asks whether the embedder permits entering control mode.
    ///
    /// Called from [`crate::ControlMachine::request_confirmation`]. Returning
    /// `true` means the request was accepted for consideration; the embedder
    /// later calls [`crate::ControlMachine::confirm`] once the user agreed.
    #[inline(always)]
    fn enter_control_mode(&mut self) -> bool {
        // Declined by default.
        false
    }

    /// Reports that the session was reset and control mode has been left.
    #[inline(always)]
    fn exit_control_mode(&mut self) {
        // Silently ignored by default.
    }

    /// Delivers a standalone `%`-prefixed line seen outside any response block.
    ///
    /// `command` includes the leading `%`. `arguments` is everything after the
    /// first space, or empty if the line had none. Interpreting the command is
    /// entirely up to the implementation.
    #[inline(always)]
    fn notification(&mut self, command: &str, arguments: &str) {
        let _ = (command, arguments);
        // Silently ignored by default.
    }

    /// Reports that the multiplexer sent `%exit`.
    #[inline(always)]
    fn session_complete(&mut self) {
        // Silently ignored by default.
    }
}

/// Represents session signals delivered to a callback through
/// [`control_handler_fn`].
///
/// Each variant corresponds to a method of [`ControlHandler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    EnterControlMode,
    ExitControlMode,
    Notification { command: String, arguments: String },
    SessionComplete,
}

/// Returns a [`ControlHandler`] that calls the given function for each
/// signal produced by an associated [`crate::ControlMachine`].
///
/// The returned handler accepts every confirmation request. Implement
/// `ControlHandler` directly to decline, or to avoid copying the command and
/// argument strings of each notification.
pub fn control_handler_fn(f: impl FnMut(ControlEvent)) -> impl ControlHandler {
    ControlHandlerFn { f }
}

struct ControlHandlerFn<F> {
    f: F,
}

impl<F: FnMut(ControlEvent)> ControlHandler for ControlHandlerFn<F> {
    #[inline(always)]
    fn enter_control_mode(&mut self) -> bool {
        (self.f)(ControlEvent::EnterControlMode);
        true
    }

    #[inline(always)]
    fn exit_control_mode(&mut self) {
        (self.f)(ControlEvent::ExitControlMode);
    }

    #[inline(always)]
    fn notification(&mut self, command: &str, arguments: &str) {
        (self.f)(ControlEvent::Notification {
            command: command.into(),
            arguments: arguments.into(),
        });
    }

    #[inline(always)]
    fn session_complete(&mut self) {
        (self.f)(ControlEvent::SessionComplete);
    }
}

/// A handler that ignores every signal and declines confirmation.
impl ControlHandler for () {}
