pub mod dispatcher;
pub mod token_store;

pub use dispatcher::*;
pub use token_store::*;
