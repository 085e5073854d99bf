pub mod contact;
mod service;

pub use contact::EmailSink;
pub use service::*;
