//! Page Components

mod checkout;

pub use checkout::{GiftPage, SubscriptionPage};
