//! External delivery channels for customer notifications.

pub mod email;
