use std::borrow::Cow;

use crate::callbacks::CallbackQueue;
use crate::{ControlConfig, ControlError, ControlHandler, Response, Result};

const BEGIN: &[u8] = b"%begin";
const EXIT: &[u8] = b"%exit";
// A closing line is appended onto the "%begin" still held in the command
// buffer, so these are the only spellings a block terminator can have.
const BEGIN_END: &[u8] = b"%begin%end";
const BEGIN_ERROR: &[u8] = b"%begin%error";

/// What the caller should do after a byte has been fed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// More bytes are needed.
    Continue,
    /// The multiplexer sent `%exit`; the session is over.
    Complete,
    /// The machine detected an internal inconsistency. This is a defect in the
    /// machine, not bad input, and the session cannot continue.
    Abort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Ground,
    Command,
    Arguments,
    OutputGround,
    Output,
    Ignore,
}

pub struct ControlMachine<H> {
    handler: H,
    config: ControlConfig,
    state: ParseState,
    confirmed: bool,
    pub(crate) command: Vec<u8>,
    pub(crate) arguments: Option<Vec<u8>>,
    pub(crate) output: Vec<u8>,
    pub(crate) ignored: Vec<u8>,
    callbacks: CallbackQueue,
}

impl<H> ControlMachine<H> {
    pub fn new(handler: H) -> Self {
        Self::with_config(handler, ControlConfig::default())
    }

    pub fn with_config(handler: H, config: ControlConfig) -> Self {
        Self {
            handler,
            config,
            state: ParseState::Ground,
            confirmed: false,
            command: Vec::new(),
            arguments: None,
            output: Vec::new(),
            ignored: Vec::new(),
            callbacks: CallbackQueue::new(),
        }
    }

    #[inline(always)]
    pub const fn handler(&self) -> &H {
        &self.handler
    }

    #[inline(always)]
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    #[inline(always)]
    pub fn take_handler(self) -> H {
        self.handler
    }

    #[inline(always)]
    pub const fn config(&self) -> &ControlConfig {
        &self.config
    }

    #[inline(always)]
    pub const fn state(&self) -> ParseState {
        self.state
    }

    #[inline(always)]
    pub const fn is_confirmed(&self) -> bool {
        self.confirmed
    }

    /// Number of enqueued callbacks still waiting for their response block.
    #[inline(always)]
    pub fn pending_responses(&self) -> usize {
        self.callbacks.len()
    }

    /// Replaces the callback that receives ignored chatter and any response
    /// block that resolves while no enqueued callback is waiting.
    pub fn register_default(&mut self, f: impl FnMut(Response<'_>) + 'static) {
        self.callbacks.register_default(f);
    }

    /// Registers the callback for the response to the next command written to
    /// the multiplexer.
    ///
    /// Responses are paired with callbacks purely by order, so this must be
    /// called exactly once per issued command, in issue order.
    pub fn enqueue(&mut self, f: impl FnOnce(Response<'_>) + 'static) {
        self.callbacks.enqueue(f);
    }

    /// Marks the session as confirmed. Returns `false` if it already was.
    pub fn confirm(&mut self) -> bool {
        if self.confirmed {
            return false;
        }
        self.confirmed = true;
        true
    }
}

impl<H: ControlHandler> ControlMachine<H> {
    /// Asks the handler whether control mode may be entered.
    ///
    /// Returns `false` without asking if the session is already confirmed.
    pub fn request_confirmation(&mut self) -> bool {
        if self.confirmed {
            return false;
        }
        self.handler.enter_control_mode()
    }

    /// Returns the machine to its initial state.
    ///
    /// Pending callbacks are dropped without being called, the default
    /// callback becomes a no-op and confirmation is cleared. The handler is
    /// told that control mode was left.
    pub fn reset(&mut self) {
        self.handler.exit_control_mode();
        self.confirmed = false;
        self.state = ParseState::Ground;
        self.command.clear();
        self.arguments = None;
        self.output.clear();
        self.ignored.clear();
        self.callbacks.reset();
    }

    /// Feeds bytes until `data` is exhausted or an outcome other than
    /// [`Outcome::Continue`] occurs.
    ///
    /// The returned position is just past the last byte consumed. Bytes after
    /// it belong to whatever follows the control mode session and are left to
    /// the caller.
    ///
    /// Input may end anywhere, including mid-line; the partial line stays
    /// buffered until the next call. This does not check confirmation; see
    /// [`Self::try_process`].
    pub fn process(&mut self, data: &[u8]) -> (Outcome, usize) {
        for (i, &byte) in data.iter().enumerate() {
            let outcome = self.feed(byte);
            if outcome != Outcome::Continue {
                return (outcome, i + 1);
            }
        }
        (Outcome::Continue, data.len())
    }

    /// Like [`Self::process`], but refuses input before confirmation when
    /// [`ControlConfig::require_confirmation`] is set.
    pub fn try_process(&mut self, data: &[u8]) -> Result<(Outcome, usize)> {
        if self.config.require_confirmation && !self.confirmed {
            return Err(ControlError::NotConfirmed);
        }
        Ok(self.process(data))
    }

    pub fn feed(&mut self, byte: u8) -> Outcome {
        match self.state {
            ParseState::Ground => match byte {
                b'%' => self.transition(byte, ParseState::Command),
                _ => self.transition(byte, ParseState::Ignore),
            },
            ParseState::Ignore => match byte {
                b'\n' => {
                    self.dispatch_ignored();
                    self.transition(byte, ParseState::Ground)
                }
                _ => self.consume(byte),
            },
            ParseState::Command => match byte {
                b'\n' => self.dispatch(byte),
                b' ' => self.transition(byte, ParseState::Arguments),
                _ => self.consume(byte),
            },
            ParseState::Arguments => match byte {
                b'\n' => self.dispatch(byte),
                _ => self.consume(byte),
            },
            ParseState::OutputGround => match byte {
                b'%' => self.transition(byte, ParseState::Command),
                // The byte starts a body line, so it's handled again as Output.
                _ => match self.transition(byte, ParseState::Output) {
                    Outcome::Continue => self.feed(byte),
                    outcome => outcome,
                },
            },
            ParseState::Output => match byte {
                b'\n' => self.transition(byte, ParseState::OutputGround),
                _ => self.consume(byte),
            },
        }
    }

    fn transition(&mut self, byte: u8, state: ParseState) -> Outcome {
        tracing::trace!(from = ?self.state, to = ?state, "tmux parser transition");
        let from = self.state;
        let (legal, consume) = match state {
            ParseState::Ground => (
                matches!(
                    from,
                    ParseState::Command | ParseState::Arguments | ParseState::Ignore
                ),
                false,
            ),
            ParseState::Ignore => (from == ParseState::Ground, true),
            ParseState::Command => (
                matches!(from, ParseState::Ground | ParseState::OutputGround),
                true,
            ),
            ParseState::Arguments => (from == ParseState::Command, false),
            ParseState::OutputGround => (
                matches!(
                    from,
                    ParseState::Command | ParseState::Arguments | ParseState::Output
                ),
                from == ParseState::Output,
            ),
            ParseState::Output => (from == ParseState::OutputGround, false),
        };
        if !legal {
            tracing::error!(?from, to = ?state, "illegal tmux parser transition");
            return Outcome::Abort;
        }

        self.state = state;
        if state == ParseState::Arguments {
            self.arguments.get_or_insert_with(Vec::new);
        }
        if consume {
            return self.consume(byte);
        }
        Outcome::Continue
    }

    fn consume(&mut self, byte: u8) -> Outcome {
        if byte == b'\r' {
            return Outcome::Continue;
        }

        match self.state {
            ParseState::Command => self.command.push(byte),
            ParseState::Arguments => self.arguments.get_or_insert_with(Vec::new).push(byte),
            ParseState::Output | ParseState::OutputGround => self.output.push(byte),
            ParseState::Ignore => self.ignored.push(byte),
            ParseState::Ground => {
                tracing::error!(byte, "tmux parser consumed a byte in ground state");
                return Outcome::Abort;
            }
        }
        Outcome::Continue
    }

    fn dispatch(&mut self, byte: u8) -> Outcome {
        tracing::debug!(command = %String::from_utf8_lossy(&self.command), "tmux command");

        if self.command == BEGIN {
            // The command buffer keeps "%begin" so that the closing line
            // appends onto it.
            self.arguments = None;
            return self.transition(byte, ParseState::OutputGround);
        }

        if self.command == EXIT {
            self.handler.session_complete();
            return Outcome::Complete;
        }

        if self.command == BEGIN_END || self.command == BEGIN_ERROR {
            return self.dispatch_response(byte);
        }

        self.dispatch_notification(byte)
    }

    fn dispatch_response(&mut self, byte: u8) -> Outcome {
        let arguments = self.arguments.as_deref().map(String::from_utf8_lossy);
        let output = String::from_utf8_lossy(&self.output);
        let response = Response {
            success: self.command == BEGIN_END,
            arguments: arguments.as_deref(),
            output: &output,
        };
        tracing::debug!(
            success = response.success,
            arguments = ?response.arguments,
            output = response.output,
            "tmux response"
        );
        self.callbacks.resolve(response);

        self.command.clear();
        self.arguments = None;
        self.output.clear();
        self.transition(byte, ParseState::Ground)
    }

    fn dispatch_notification(&mut self, byte: u8) -> Outcome {
        if !self.output.is_empty() {
            tracing::error!(
                command = %String::from_utf8_lossy(&self.command),
                "tmux notification dispatched inside a response block"
            );
            return Outcome::Abort;
        }

        let command = String::from_utf8_lossy(&self.command);
        let arguments = match &self.arguments {
            Some(arguments) => String::from_utf8_lossy(arguments),
            None => Cow::Borrowed(""),
        };
        tracing::debug!(%command, %arguments, "tmux notification");
        self.handler.notification(&command, &arguments);

        self.command.clear();
        self.arguments = None;
        self.transition(byte, ParseState::Ground)
    }

    fn dispatch_ignored(&mut self) {
        let ignored = String::from_utf8_lossy(&self.ignored);
        tracing::debug!(%ignored, "tmux ignored data");
        let message = format!("ignored data: \"{ignored}\"");
        self.callbacks.deliver_default(Response {
            success: false,
            arguments: None,
            output: &message,
        });
        self.ignored.clear();
    }
}
