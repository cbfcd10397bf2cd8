use std::io::{stdin, Read};

use ctlmachine::{control_handler_fn, ControlMachine, Outcome};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), std::io::Error> {
    // RUST_LOG=ctlmachine=trace shows every state transition.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut machine = ControlMachine::new(control_handler_fn(|event| {
        println!("{event:?}");
    }));
    machine.register_default(|response| {
        println!("{response:?}");
    });
    machine.confirm();

    let mut r = stdin();
    let mut buf = [0_u8; 64];
    loop {
        let read_len = r.read(&mut buf[..])?;
        if read_len == 0 {
            return Ok(());
        }
        let (outcome, _) = machine.process(&buf[..read_len]);
        match outcome {
            Outcome::Continue => {}
            Outcome::Complete => return Ok(()),
            Outcome::Abort => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "control mode parser aborted",
                ))
            }
        }
    }
}
