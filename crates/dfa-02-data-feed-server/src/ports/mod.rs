//! # Ports Layer
//!
//! - **Driving Ports (Inbound)**: `DataFeedServerApi`
//! - **Driven Ports (Outbound)**: `OevProxyRegistry`, `AccessControlRegistry`,
//!   `ValueTransfer`, `Clock`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
