//! DineSync - Real-Time Core for a Restaurant Management Dashboard
//!
//! This crate implements the event distribution and reconciliation layer
//! shared by the role-specific dashboard screens (chef, staff, manager,
//! customer): the WebSocket connection lifecycle, room-based delivery,
//! event normalization and fan-out, the bell-panel notification log, and
//! the polling fallback that keeps screens converging on authoritative
//! REST state even when the event stream is degraded.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
