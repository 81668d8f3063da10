//! Domain logic for the bucketlist booking backend.
//!
//! This crate has zero internal dependencies so it can be shared by the
//! repository layer, the API server and any future CLI tooling. Everything
//! here is pure: no I/O, no database access, no clocks except where a
//! caller passes `now` / `today` in explicitly.

pub mod availability;
pub mod booking;
pub mod coupon;
pub mod error;
pub mod formatting;
pub mod participant;
pub mod payment_signature;
pub mod pricing;
pub mod roles;
pub mod slug;
pub mod types;
