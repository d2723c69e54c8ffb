// Utility functions

pub mod form;
pub mod logger;
pub mod path_resolver;

pub use form::*;
pub use logger::*;
pub use path_resolver::*;
