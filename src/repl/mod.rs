//! Interactive host surface

mod session;

pub use session::ReplSession;
