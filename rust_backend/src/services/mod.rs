//! Service layer between the display surface and the query engine.
//!
//! The explorer owns the session state and its subscribers. Controllers call
//! into it; subscribers are called back from it.

pub mod explorer;
pub mod notify;

#[cfg(test)]
mod explorer_tests;

pub use explorer::{ExplorerState, FlightExplorer};
pub use notify::{Subscriber, SubscriberId, SubscriberRegistry};
