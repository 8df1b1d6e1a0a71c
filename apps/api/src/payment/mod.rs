//! Payment Gate — order summary plus a one-way redirect to a hosted payment page.
//!
//! Steps: `order → processing → (redirect | error)`. Starting payment yields a
//! single `Navigation` for the client to follow; the gate never learns whether
//! the payment went through.
//!
//! KNOWN LIMITATION: there is no verification channel. The orchestrator treats
//! "a fixed delay has passed since the redirect was issued" as success. Unlocking
//! the roadmap on a real confirmation needs a payment webhook or a status poll,
//! neither of which exists here.

use std::time::Duration;

use reqwest::Url;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

/// Pause on the processing screen before the browser is sent away.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(800);

pub const ORDER_ITEM: &str = "7年身份策略設計報告";
pub const ORDER_SERVICE_TYPE: &str = "AI專家審核";
pub const LIST_PRICE: &str = "¥1999";
pub const PAYMENT_METHODS: [&str; 2] = ["支付寶 Alipay", "微信支付 WeChat Pay"];

#[derive(Debug, Error, PartialEq)]
pub enum PaymentError {
    #[error("payment already started (step: {0:?})")]
    NotInOrderStep(PaymentStep),

    #[error("nothing to retry (step: {0:?})")]
    NotInErrorStep(PaymentStep),

    #[error("invalid payment link '{link}': {reason}")]
    InvalidLink { link: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStep {
    Order,
    Processing,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub item: &'static str,
    pub service_type: &'static str,
    pub list_price: &'static str,
    pub price: String,
    pub payment_methods: Vec<&'static str>,
}

/// The single navigation the client performs after `start_pay`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Navigation {
    pub url: String,
    pub delay_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentView {
    pub step: PaymentStep,
    pub order: OrderSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<Navigation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentGate {
    step: PaymentStep,
    price: String,
    link: String,
    navigation: Option<Navigation>,
}

impl PaymentGate {
    pub fn new(price: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            step: PaymentStep::Order,
            price: price.into(),
            link: link.into(),
            navigation: None,
        }
    }

    pub fn step(&self) -> PaymentStep {
        self.step
    }

    pub fn order_summary(&self) -> OrderSummary {
        OrderSummary {
            item: ORDER_ITEM,
            service_type: ORDER_SERVICE_TYPE,
            list_price: LIST_PRICE,
            price: self.price.clone(),
            payment_methods: PAYMENT_METHODS.to_vec(),
        }
    }

    /// `order → processing`, producing exactly one navigation.
    ///
    /// A link that cannot be turned into a URL leaves the gate in `error`.
    pub fn start_pay(&mut self) -> Result<Navigation, PaymentError> {
        if self.step != PaymentStep::Order {
            return Err(PaymentError::NotInOrderStep(self.step));
        }
        self.step = PaymentStep::Processing;

        match Url::parse(&self.link) {
            Ok(url) if matches!(url.scheme(), "https" | "http") => {
                let navigation = Navigation {
                    url: url.to_string(),
                    delay_ms: REDIRECT_DELAY.as_millis() as u64,
                };
                info!("Payment redirect prepared for {}", url.host_str().unwrap_or(""));
                self.navigation = Some(navigation.clone());
                Ok(navigation)
            }
            Ok(url) => self.fail(format!("unsupported scheme '{}'", url.scheme())),
            Err(e) => self.fail(e.to_string()),
        }
    }

    /// `error → order`.
    pub fn retry(&mut self) -> Result<(), PaymentError> {
        if self.step != PaymentStep::Error {
            return Err(PaymentError::NotInErrorStep(self.step));
        }
        self.step = PaymentStep::Order;
        Ok(())
    }

    pub fn view(&self) -> PaymentView {
        PaymentView {
            step: self.step,
            order: self.order_summary(),
            navigation: self.navigation.clone(),
        }
    }

    fn fail(&mut self, reason: String) -> Result<Navigation, PaymentError> {
        warn!("Payment initiation failed: {reason}");
        self.step = PaymentStep::Error;
        self.navigation = None;
        Err(PaymentError::InvalidLink {
            link: self.link.clone(),
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_PAYMENT_LINK;

    fn gate() -> PaymentGate {
        PaymentGate::new("¥999", DEFAULT_PAYMENT_LINK)
    }

    #[test]
    fn test_new_gate_shows_order() {
        let g = gate();
        assert_eq!(g.step(), PaymentStep::Order);
        let order = g.order_summary();
        assert_eq!(order.price, "¥999");
        assert_eq!(order.list_price, "¥1999");
        assert_eq!(order.item, "7年身份策略設計報告");
        assert!(g.view().navigation.is_none());
    }

    #[test]
    fn test_start_pay_moves_to_processing_with_one_navigation() {
        let mut g = gate();
        let nav = g.start_pay().unwrap();
        assert_eq!(g.step(), PaymentStep::Processing);
        assert_eq!(nav.url, DEFAULT_PAYMENT_LINK);
        assert_eq!(nav.delay_ms, 800);
        assert_eq!(g.view().navigation, Some(nav));
    }

    #[test]
    fn test_second_start_pay_is_rejected() {
        let mut g = gate();
        g.start_pay().unwrap();
        assert_eq!(
            g.start_pay().unwrap_err(),
            PaymentError::NotInOrderStep(PaymentStep::Processing)
        );
        assert_eq!(g.step(), PaymentStep::Processing);
    }

    #[test]
    fn test_bad_link_lands_in_error_then_retry_returns_to_order() {
        let mut g = PaymentGate::new("¥999", "not a url");
        let err = g.start_pay().unwrap_err();
        assert!(matches!(err, PaymentError::InvalidLink { .. }));
        assert_eq!(g.step(), PaymentStep::Error);

        g.retry().unwrap();
        assert_eq!(g.step(), PaymentStep::Order);
    }

    #[test]
    fn test_non_web_scheme_is_rejected() {
        let mut g = PaymentGate::new("¥999", "javascript:alert(1)");
        assert!(g.start_pay().is_err());
        assert_eq!(g.step(), PaymentStep::Error);
    }

    #[test]
    fn test_retry_outside_error_is_rejected() {
        let mut g = gate();
        assert_eq!(
            g.retry().unwrap_err(),
            PaymentError::NotInErrorStep(PaymentStep::Order)
        );
    }
}
