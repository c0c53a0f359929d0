// 9.x gateway.rs: trading venue boundary. the gateway borrows a registered
// participant's vault authority from the ledger, converts the order to the
// venue's precision, and delegates. it performs no accounting and the ledger
// tracks no order state.

use serde::{Deserialize, Serialize};

use crate::fixed::{FixedPoint, FixedPointError};
use crate::ledger::{Ledger, LedgerError};
use crate::types::{OrderSide, ParticipantId, VaultId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VenueOrderId(pub u64);

/// A limit order as the venue sees it: placed by a vault identity, not by
/// the participant's master credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitOrder {
    pub vault: VaultId,
    pub side: OrderSide,
    pub price: FixedPoint,
    pub quantity: FixedPoint,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VenueError {
    #[error("venue rejected the order: {reason}")]
    Rejected { reason: String },
}

/// External trading venue. Implement this for a real exchange adapter.
pub trait TradingVenue {
    fn place_limit_order(&mut self, order: LimitOrder) -> Result<VenueOrderId, VenueError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("venue error: {0}")]
    Venue(#[from] VenueError),

    #[error("conversion error: {0}")]
    Conversion(#[from] FixedPointError),
}

pub struct TradingGateway<V: TradingVenue> {
    venue: V,
    // precision the venue quotes prices and sizes at
    venue_decimals: u32,
}

impl<V: TradingVenue> TradingGateway<V> {
    pub fn new(venue: V, venue_decimals: u32) -> Self {
        Self {
            venue,
            venue_decimals,
        }
    }

    pub fn venue(&self) -> &V {
        &self.venue
    }

    /// Place a limit order on the participant's behalf using their vault's
    /// delegated authority.
    pub fn trade(
        &mut self,
        ledger: &Ledger,
        participant: ParticipantId,
        side: OrderSide,
        price_raw: u128,
        quantity_raw: u128,
    ) -> Result<VenueOrderId, GatewayError> {
        let authority = ledger.delegated_authority(participant)?;
        let price = FixedPoint::from_raw(price_raw, self.venue_decimals)?;
        let quantity = FixedPoint::from_raw(quantity_raw, self.venue_decimals)?;

        let order = LimitOrder {
            vault: authority.vault(),
            side,
            price,
            quantity,
        };
        Ok(self.venue.place_limit_order(order)?)
    }
}

/// Mock venue for testing and simulation.
#[derive(Debug, Default)]
pub struct MockVenue {
    orders: Vec<LimitOrder>,
    next_id: u64,
}

impl MockVenue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn orders(&self) -> &[LimitOrder] {
        &self.orders
    }
}

impl TradingVenue for MockVenue {
    fn place_limit_order(&mut self, order: LimitOrder) -> Result<VenueOrderId, VenueError> {
        self.next_id += 1;
        self.orders.push(order);
        Ok(VenueOrderId(self.next_id))
    }
}
