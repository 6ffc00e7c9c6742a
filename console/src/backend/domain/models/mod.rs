pub mod session;

pub use session::{AccessPolicy, Role, Session};
