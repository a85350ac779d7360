use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::{BoundingArea, Origin};

/// the normalized result of one successful area request. built once per
/// reconciliation and never mutated; a newer result replaces it wholesale.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct AreaResult {
    area: BoundingArea,
    label: String,
    origin: Origin,
    /// fields beyond the required geometry and label, passed through as received.
    extra: IndexMap<String, Value>,
}

impl AreaResult {
    pub const NFT_SQUARE: &'static str = "nft_square";
    pub const CREATED: &'static str = "created";
    pub const BITCOIN_BALANCE: &'static str = "bitcoin_balance";
    pub const ETHEREUM_BALANCE: &'static str = "ethereum_balance";
    pub const REAL_TIME_METRICS: &'static str = "real_time_metrics";

    pub(crate) fn new(
        area: BoundingArea,
        label: String,
        origin: Origin,
        extra: IndexMap<String, Value>,
    ) -> Self {
        Self {
            area,
            label,
            origin,
            extra,
        }
    }

    pub fn area(&self) -> &BoundingArea {
        &self.area
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }

    pub fn extra(&self) -> &IndexMap<String, Value> {
        &self.extra
    }

    pub fn extra_field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key).filter(|v| !v.is_null())
    }

    pub fn nft_square(&self) -> Option<&Value> {
        self.extra_field(Self::NFT_SQUARE)
    }

    /// whether the remote service minted a new record for this square.
    /// non-boolean values are treated as absent.
    pub fn created(&self) -> Option<bool> {
        self.extra_field(Self::CREATED).and_then(Value::as_bool)
    }

    pub fn bitcoin_balance(&self) -> Option<&Value> {
        self.extra_field(Self::BITCOIN_BALANCE)
    }

    pub fn ethereum_balance(&self) -> Option<&Value> {
        self.extra_field(Self::ETHEREUM_BALANCE)
    }

    pub fn real_time_metrics(&self) -> Option<&Value> {
        self.extra_field(Self::REAL_TIME_METRICS)
    }
}
