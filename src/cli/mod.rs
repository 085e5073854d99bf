mod migrate;
mod send;
mod server;

pub use migrate::migrate;
pub use send::{SendArgs, send};
pub use server::serve;
