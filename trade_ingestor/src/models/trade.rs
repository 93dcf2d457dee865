//! One trade row as it arrives from the archive CSV.
//!
//! Numeric and date fields stay as text at this layer; parsing them is
//! explicit and fallible, and only happens for rows that survive the
//! aggregation filter. Columns the pipeline does not consume are ignored by
//! serde when decoding against the archive header.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::errors::DecodeError;

/// `offer_type` value for a buy order, the only kind that feeds the index.
pub const OFFER_TYPE_BUY: &str = "0";

/// `accepted` value for a trade whose offer was actually accepted.
pub const ACCEPTED: &str = "1";

/// The consumed subset of an archive trade row, all fields verbatim text.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrade {
    pub offer_type: String,
    pub resource: String,
    pub quantity: String,
    pub price: String,
    pub accepted: String,
    pub date_accepted: String,
}

impl RawTrade {
    pub fn is_buy_order(&self) -> bool {
        self.offer_type == OFFER_TYPE_BUY
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted == ACCEPTED
    }

    /// The UTC calendar day on which this trade was accepted.
    ///
    /// The archive spells the timestamp as space-separated date-time text,
    /// e.g. `2024-03-04 17:22:09`.
    pub fn accepted_day(&self) -> Result<NaiveDate, DecodeError> {
        NaiveDateTime::parse_from_str(&self.date_accepted, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .map_err(|_| DecodeError::Field {
                field: "date_accepted",
                value: self.date_accepted.clone(),
            })
    }

    pub fn quantity(&self) -> Result<f64, DecodeError> {
        parse_decimal("quantity", &self.quantity)
    }

    pub fn price(&self) -> Result<f64, DecodeError> {
        parse_decimal("price", &self.price)
    }
}

fn parse_decimal(field: &'static str, value: &str) -> Result<f64, DecodeError> {
    value.trim().parse::<f64>().map_err(|_| DecodeError::Field {
        field,
        value: value.to_string(),
    })
}
