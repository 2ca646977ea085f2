use serde::Serialize;

pub const PLACE_ORDER_LABEL: &str = "Place order";
pub const SELECT_METHOD_LABEL: &str = "Select a payment method";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    /// Primary "Place order" button.
    Button,
    /// The wallet SDK's own approval button.
    WalletButton,
    /// Loading indicator shown while the wallet script loads.
    Spinner,
    /// Disabled button shown when no provider applies.
    Placeholder,
    /// Nothing is rendered.
    Hidden,
}

/// What the payment area should display for the current handler state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ButtonView {
    pub control: Control,
    pub label: Option<&'static str>,
    pub disabled: bool,
    pub loading: bool,
    pub test_id: Option<String>,
    pub error: Option<String>,
    pub error_test_id: Option<&'static str>,
}

impl ButtonView {
    pub fn placeholder() -> Self {
        Self {
            control: Control::Placeholder,
            label: Some(SELECT_METHOD_LABEL),
            disabled: true,
            loading: false,
            test_id: None,
            error: None,
            error_test_id: None,
        }
    }

    pub fn spinner() -> Self {
        Self {
            control: Control::Spinner,
            label: None,
            disabled: true,
            loading: true,
            test_id: None,
            error: None,
            error_test_id: None,
        }
    }

    pub fn hidden() -> Self {
        Self {
            control: Control::Hidden,
            label: None,
            disabled: true,
            loading: false,
            test_id: None,
            error: None,
            error_test_id: None,
        }
    }
}
