use std::collections::VecDeque;
use std::fmt;

/// The outcome of one resolved response block, or of one ignored line when
/// routed to the default callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response<'a> {
    /// `true` for a block closed by `%end`, `false` for `%error` and for
    /// ignored chatter.
    pub success: bool,
    /// Arguments of the line that closed the block.
    ///
    /// This is `None` when that line had no space-separated remainder at all,
    /// and always `None` for ignored chatter.
    pub arguments: Option<&'a str>,
    /// The block body with its line breaks, or a message describing an
    /// ignored line.
    pub output: &'a str,
}

type Pending = Box<dyn FnOnce(Response<'_>)>;
type Fallback = Box<dyn FnMut(Response<'_>)>;

/// Pairs response blocks with the callbacks registered for them.
///
/// The protocol carries no request identifier, so the only correlation is
/// order: the Nth enqueued callback receives the Nth resolved block. A block
/// that resolves while the queue is empty goes to the default callback.
pub(crate) struct CallbackQueue {
    pending: VecDeque<Pending>,
    fallback: Fallback,
}

impl CallbackQueue {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
            fallback: Box::new(ignore_response),
        }
    }

    /// Replaces the callback used for chatter and for responses that have no
    /// queued callback.
    pub fn register_default(&mut self, f: impl FnMut(Response<'_>) + 'static) {
        self.fallback = Box::new(f);
    }

    /// Appends a callback for the next issued command.
    ///
    /// Callers must enqueue exactly one callback per command, in the order
    /// the commands are written, before the response can arrive.
    pub fn enqueue(&mut self, f: impl FnOnce(Response<'_>) + 'static) {
        self.pending.push_back(Box::new(f));
    }

    /// Drops every pending callback without calling it and restores the
    /// no-op default.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.fallback = Box::new(ignore_response);
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Delivers a resolved block to the oldest pending callback, or to the
    /// default one. Returns whether a queued callback was consumed.
    pub(crate) fn resolve(&mut self, response: Response<'_>) -> bool {
        match self.pending.pop_front() {
            Some(f) => {
                f(response);
                true
            }
            None => {
                (self.fallback)(response);
                false
            }
        }
    }

    pub(crate) fn deliver_default(&mut self, response: Response<'_>) {
        (self.fallback)(response);
    }
}

impl fmt::Debug for CallbackQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackQueue")
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

fn ignore_response(_: Response<'_>) {}
