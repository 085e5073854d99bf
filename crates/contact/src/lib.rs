mod command;
mod sink;

#[cfg(feature = "full")]
mod query;

pub use command::*;
pub use sink::*;

#[cfg(feature = "full")]
pub use query::*;
