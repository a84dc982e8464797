pub mod cors;
pub mod security;
pub mod session;

pub use cors::*;
pub use security::*;
pub use session::*;
