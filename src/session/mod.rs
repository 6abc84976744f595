pub mod driver;

pub use driver::{RecordingSession, SessionDriver};
