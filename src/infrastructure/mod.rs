//! Billing backends implementing `BillingWrapper`.

pub mod in_memory;
