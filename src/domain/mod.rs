pub mod outcome;

pub use outcome::{ErrorKind, FetchError, Outcome};
