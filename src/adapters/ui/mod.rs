pub mod console;

pub use console::{Marker, present_outcome, print_status};
