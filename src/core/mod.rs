//! Data model for tubefront

pub mod context;
pub mod query;
pub mod results;
pub mod session;

pub use context::*;
pub use query::*;
pub use results::*;
pub use session::*;
