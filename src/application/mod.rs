//! Application layer: the digital goods commands and their dispatcher.
//!
//! `DigitalGoodsRequestHandler` is the entry point. It validates an inbound
//! command, spawns it on a `tokio` runtime and lets the command report its
//! result through a callback once the billing backend answers.

pub mod acknowledge;
pub mod callback;
pub mod get_details;
pub mod handler;
pub mod listener;
