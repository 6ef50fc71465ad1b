//! Flutter-facing bindings for the leave tracker core.

pub mod api;
