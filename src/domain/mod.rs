//! Domain types shared by the command handlers and the billing backends.

pub mod billing;
pub mod bundle;
pub mod item_details;
pub mod ports;
