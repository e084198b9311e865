//! Hexagonal ports for the project store.
//!
//! Inbound ports are what the HTTP layer calls; outbound ports are what the
//! domain needs from a storage engine.

pub mod inbound;
pub mod outbound;
