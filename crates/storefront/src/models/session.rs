//! Session-related types.
//!
//! The whole shopper state machine is stored in the session under one key.

/// Session keys for shopper data.
pub mod keys {
    /// Key for the shopper's `ShopState` (page, cart, favorites).
    pub const SHOP_STATE: &str = "shop_state";
}
