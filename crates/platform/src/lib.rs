//! Platform composition: sessions, commerce, payouts, and administration
//! wired over one store.

pub mod admission;
pub mod error;
pub mod payment;
pub mod platform;
pub mod session;

pub use admission::LedgerAdmissions;
pub use error::PlatformError;
pub use payment::{
    ChargeRequest, MobileMoneyGateway, PaymentDeclined, PaymentGateway, PaymentOutcome,
    PendingPayment,
};
pub use platform::{Platform, BOOK_PRICE_MWK, VIDEO_PRICE_MWK};
pub use session::Session;
