//! Bridge services
//!
//! - [`offer_sync`]: catalog to offer reconciliation loop
//! - [`orders`]: order creation (persist, then forward)
//! - [`order_forward`]: canonicalization and submission to the order system
//! - [`webhook`]: idempotent ingestion of channel order events

pub mod offer_sync;
pub mod order_forward;
pub mod orders;
pub mod webhook;

#[cfg(test)]
pub(crate) mod test_support;

// Re-exports
pub use offer_sync::OfferSyncService;
pub use order_forward::OrderForwardService;
pub use orders::OrdersService;
pub use webhook::WebhookService;
