//! Application layer orchestrating the checkout payment step.
//!
//! `PaymentDispatcher` routes a cart to exactly one payment button. Buttons
//! talk to providers and the order service only through the domain ports, so
//! every flow can be driven by scripted adapters.

pub mod dispatcher;
pub mod handlers;
pub mod placement;
pub mod router;
pub mod submission;
