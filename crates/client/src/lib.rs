//! Browser-side half of the contact flow: the form controller and the HTTP
//! transport it dispatches through.

mod controller;
mod notifier;
mod transport;

pub use controller::*;
pub use notifier::*;
pub use transport::*;
