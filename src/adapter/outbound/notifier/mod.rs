//! Notification adapters.
//!
//! Implements the `port::AlertNotifier` trait for delivery backends. The
//! log and null notifiers live next to the port itself.

pub mod discord;

pub use discord::DiscordNotifier;
