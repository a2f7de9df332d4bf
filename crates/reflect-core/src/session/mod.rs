pub mod controller;
pub mod event;
pub mod model;
pub mod phase;

pub use controller::{Dispatch, ViewController};
pub use event::SessionEvent;
pub use model::{Generation, PendingRequest, Session, transition};
pub use phase::Phase;
