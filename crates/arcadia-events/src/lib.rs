//! Synchronous publish/subscribe event bus for the Arcadia workspace.
//!
//! Producers publish [`GameEvent`](arcadia_types::GameEvent)s (or any other
//! [`BusEvent`]) without knowing who listens; listeners react without
//! knowing who published. Delivery is synchronous, in registration order,
//! and fail-soft: a broken listener is reported, never fatal.
//!
//! # Modules
//!
//! - [`bus`] -- [`EventBus`], [`ListenerHandle`] and the [`Subscriptions`]
//!   view handed to listeners during dispatch
//! - [`error`] -- [`ListenerError`]
//! - [`listener`] -- The [`Listener`] and [`BusEvent`] traits, plus
//!   [`FnListener`] for closures
//! - [`report`] -- [`PublishReport`] and [`ListenerFailure`]

pub mod bus;
pub mod error;
pub mod listener;
pub mod report;

pub use bus::{EventBus, ListenerHandle, SharedListener, Subscriptions};
pub use error::ListenerError;
pub use listener::{BusEvent, FnListener, Listener};
pub use report::{ListenerFailure, PublishReport};
