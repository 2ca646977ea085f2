//! One handler per confirmation flow. Each owns its submitting flag and
//! error message and settles through the shared [`OrderPlacer`].

pub mod card;
pub mod manual;
pub mod redirect;
pub mod wallet;

use super::placement::OrderPlacer;
use super::submission::SubmissionState;
use crate::domain::cart::Cart;
use crate::domain::view::{ButtonView, Control, PLACE_ORDER_LABEL};

pub const UNKNOWN_ERROR: &str = "An unknown error occurred, please try again.";

/// State every payment button carries.
pub struct ButtonContext {
    pub cart: Cart,
    pub not_ready: bool,
    pub test_id: String,
    pub state: SubmissionState,
    pub placer: OrderPlacer,
}

impl ButtonContext {
    pub fn new(cart: Cart, not_ready: bool, test_id: impl Into<String>, placer: OrderPlacer) -> Self {
        Self {
            cart,
            not_ready,
            test_id: test_id.into(),
            state: SubmissionState::new(),
            placer,
        }
    }

    /// The "Place order" button, disabled while not ready, while a submission
    /// is in flight, or when `blocked`.
    pub fn place_order_view(&self, error_test_id: &'static str, blocked: bool) -> ButtonView {
        let submission = self.state.snapshot();
        ButtonView {
            control: Control::Button,
            label: Some(PLACE_ORDER_LABEL),
            disabled: self.not_ready || submission.submitting || blocked,
            loading: submission.submitting,
            test_id: Some(self.test_id.clone()),
            error: submission.error,
            error_test_id: Some(error_test_id),
        }
    }
}
