//! Adapters: concrete implementations of the ports.

pub mod rest;
pub mod session;
pub mod transport;
