//! Incremental parser for tmux control mode streams.
//!
//! When tmux runs with `-C` or `-CC` it stops drawing a screen and instead
//! speaks a line-oriented protocol over the same byte stream: asynchronous
//! notifications such as `%window-add @1`, and the output of each command the
//! client issued, bracketed by `%begin` and either `%end` or `%error`.
//!
//! This library recognizes those lines as bytes arrive, split at arbitrary
//! boundaries, and routes them. Notifications and session-level signals go to
//! an implementation of trait [`ControlHandler`]. Response blocks go to
//! callbacks registered with [`ControlMachine::enqueue`], paired with the
//! commands that produced them strictly in issue order, because the protocol
//! itself carries no request identifier. Lines that arrive before the first
//! `%` are surfaced once to the default callback and then dropped.
//!
//! It's up to the handler to assign meaning to a notification: the machine
//! only understands `%begin`, `%end`, `%error` and `%exit`.
//!
//! ```rust
//! # use std::{cell::RefCell, rc::Rc};
//! # use ctlmachine::{control_handler_fn, ControlEvent, ControlMachine, Outcome};
//! # let mut evts: Vec<ControlEvent> = Vec::new();
//! # let outputs = Rc::new(RefCell::new(Vec::<String>::new()));
//! let mut machine = ControlMachine::new(control_handler_fn(|event| {
//!     println!("{event:?}");
//! #   evts.push(event);
//! }));
//! # let log = Rc::clone(&outputs);
//! machine.enqueue(move |response| {
//!     println!("{}: {:?}", response.success, response.output);
//! #   log.borrow_mut().push(response.output.to_string());
//! });
//! let (outcome, pos) = machine.process(b"%window-add @1\n%begin 1 2 1\n0: bash\n%end 1 2 1\n");
//! assert_eq!(outcome, Outcome::Continue);
//! assert_eq!(pos, 47);
//! # drop(machine);
//! # assert_eq!(&evts[..], &[
//! #    ControlEvent::Notification { command: "%window-add".into(), arguments: "@1".into() },
//! # ]);
//! # assert_eq!(&outputs.borrow()[..], &["0: bash\n".to_string()]);
//! ```
//!
//! ```plaintext
//! Notification { command: "%window-add", arguments: "@1" }
//! true: "0: bash\n"
//! ```

mod callbacks;
mod config;
mod error;
mod handler;
mod machine;

pub use callbacks::Response;
pub use config::ControlConfig;
pub use error::{ControlError, Result};
pub use handler::{control_handler_fn, ControlEvent, ControlHandler};
pub use machine::{ControlMachine, Outcome, ParseState};
