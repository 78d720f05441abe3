//! Background tasks owned by a world session.

mod clock;

pub(crate) use clock::{ClockWorker, Command};
