use crate::error::Result;
use serde::Serialize;
use std::collections::BTreeMap;

pub const REFERENCE_NUMBER_KEY: &str = "referenceNumber";
pub const ORDER_STATUS_KEY: &str = "orderStatus";

/// Query parameters a redirect gateway appends to the return URL.
///
/// Only the reference number and order status are interpreted; every other
/// parameter is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChargeResponse {
    params: BTreeMap<String, String>,
}

impl ChargeResponse {
    /// Parses a query string, with or without its leading `?`.
    ///
    /// Returns `Ok(None)` when the query carries no reference number, or an
    /// empty one, i.e. the page was not reached through a gateway return.
    pub fn parse(query: &str) -> Result<Option<Self>> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;

        // Later duplicates win, like reading the query into a plain object.
        let params: BTreeMap<String, String> = pairs.into_iter().collect();
        let has_reference = params
            .get(REFERENCE_NUMBER_KEY)
            .is_some_and(|reference| !reference.is_empty());
        if !has_reference {
            return Ok(None);
        }
        Ok(Some(Self { params }))
    }

    pub fn reference_number(&self) -> &str {
        self.params
            .get(REFERENCE_NUMBER_KEY)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn order_status(&self) -> Option<&str> {
        self.get(ORDER_STATUS_KEY)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn is_paid(&self, paid_status: &str) -> bool {
        self.order_status() == Some(paid_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_paid_return() {
        let charge = ChargeResponse::parse("?referenceNumber=ABC&orderStatus=PAID&merchantRefNumber=m1")
            .unwrap()
            .unwrap();
        assert_eq!(charge.reference_number(), "ABC");
        assert_eq!(charge.order_status(), Some("PAID"));
        assert_eq!(charge.get("merchantRefNumber"), Some("m1"));
        assert!(charge.is_paid("PAID"));
    }

    #[test]
    fn test_parse_without_reference_is_not_a_return() {
        assert!(ChargeResponse::parse("orderStatus=PAID").unwrap().is_none());
        assert!(ChargeResponse::parse("").unwrap().is_none());
        assert!(ChargeResponse::parse("?").unwrap().is_none());
        assert!(
            ChargeResponse::parse("referenceNumber=&orderStatus=PAID")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_status_comparison_is_exact() {
        let charge = ChargeResponse::parse("referenceNumber=1&orderStatus=paid")
            .unwrap()
            .unwrap();
        assert!(!charge.is_paid("PAID"));

        let charge = ChargeResponse::parse("referenceNumber=1").unwrap().unwrap();
        assert_eq!(charge.order_status(), None);
        assert!(!charge.is_paid("PAID"));
    }

    #[test]
    fn test_percent_decoding() {
        let charge = ChargeResponse::parse("referenceNumber=A%20B&statusDescription=Paid+in+full")
            .unwrap()
            .unwrap();
        assert_eq!(charge.reference_number(), "A B");
        assert_eq!(charge.get("statusDescription"), Some("Paid in full"));
    }
}
