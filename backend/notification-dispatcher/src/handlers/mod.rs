/// HTTP handlers for the notification dispatcher
pub mod notifications;

pub use notifications::*;
