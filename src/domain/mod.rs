//! Domain model of the checkout payment step: the cart as read from the cart
//! service, provider classification, provider response types and the ports
//! through which external services are reached.

pub mod card;
pub mod cart;
pub mod charge;
pub mod ports;
pub mod provider;
pub mod view;
pub mod wallet;
