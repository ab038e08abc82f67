//! # Auction Settlement
//!
//! Bid amounts accrue per proxy and are drained in one withdrawal to the
//! proxy's beneficiary.

use super::state::FeedState;
use crate::errors::{DataFeedError, DataFeedResult};
use crate::events::FeedEvent;
use shared_types::{Address, U256};

/// A balance taken out of state, pending transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Withdrawal {
    pub oev_proxy: Address,
    pub oev_beneficiary: Address,
    pub amount: U256,
}

impl Withdrawal {
    /// Event recorded once the transfer went through.
    #[must_use]
    pub fn event(&self) -> FeedEvent {
        FeedEvent::Withdrew {
            oev_proxy: self.oev_proxy,
            oev_beneficiary: self.oev_beneficiary,
            amount: self.amount,
        }
    }
}

/// Zero the balance of `oev_proxy` and return what was taken.
///
/// `beneficiary` is what the proxy reports; `None` and the zero address are
/// both rejected.
pub fn claim_oev_proxy_balance(
    state: &mut FeedState,
    oev_proxy: Address,
    beneficiary: Option<Address>,
) -> DataFeedResult<Withdrawal> {
    let oev_beneficiary = beneficiary
        .filter(|b| !b.is_zero())
        .ok_or(DataFeedError::BeneficiaryZero)?;

    let amount = state.oev_proxy_balance(&oev_proxy);
    if amount.is_zero() {
        return Err(DataFeedError::BalanceZero);
    }
    state.set_oev_proxy_balance(oev_proxy, U256::zero());

    Ok(Withdrawal {
        oev_proxy,
        oev_beneficiary,
        amount,
    })
}

/// Put a claimed balance back after a refused transfer.
pub fn restore_claim(state: &mut FeedState, withdrawal: &Withdrawal) {
    let balance = state.oev_proxy_balance(&withdrawal.oev_proxy);
    // Nothing can credit the proxy between claim and restore
    state.set_oev_proxy_balance(
        withdrawal.oev_proxy,
        balance.saturating_add(withdrawal.amount),
    );
}
