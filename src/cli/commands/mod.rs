//! CLI command implementations

pub mod lookup;
pub mod resolve;
pub mod validate;

pub use lookup::handle_lookup;
pub use resolve::handle_resolve;
pub use validate::handle_validate;
