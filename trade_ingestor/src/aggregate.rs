//! Volume-weighted daily average prices.
//!
//! [`DayAggregator`] folds a single pass over one day's trade stream: filter,
//! then accumulate `(price × quantity, quantity)` per resource, then divide.
//! It never buffers trades; [`consume`](DayAggregator::consume) is called once
//! per decoded row as the archive streams through.
//!
//! Filter rule (all three must hold):
//! - `offer_type` is the buy-order kind,
//! - the trade was actually accepted,
//! - the acceptance timestamp's UTC calendar day equals the target day.
//!
//! Rows that fail the filter are skipped before any numeric parsing, so a
//! malformed field only fails the day when it sits inside a qualifying trade.

use chrono::NaiveDate;

use crate::errors::DecodeError;
use crate::models::day_row::{DayRow, Price};
use crate::models::resource::Resource;
use crate::models::trade::RawTrade;

/// Accumulates one target day's qualifying trades into per-resource sums.
pub struct DayAggregator {
    target_day: NaiveDate,
    /// Per resource: (price×quantity running sum, quantity running sum),
    /// indexed by `Resource::index`.
    sums: [(f64, f64); Resource::ALL.len()],
}

impl DayAggregator {
    pub fn new(target_day: NaiveDate) -> Self {
        Self {
            target_day,
            sums: [(0.0, 0.0); Resource::ALL.len()],
        }
    }

    /// Folds one trade row in. Non-qualifying rows are a no-op; qualifying
    /// rows with malformed fields fail the whole day.
    pub fn consume(&mut self, trade: &RawTrade) -> Result<(), DecodeError> {
        if !trade.is_buy_order() || !trade.is_accepted() {
            return Ok(());
        }
        if trade.accepted_day()? != self.target_day {
            return Ok(());
        }

        let resource: Resource = trade.resource.parse().map_err(DecodeError::from)?;
        let quantity = trade.quantity()?;
        let price = trade.price()?;

        let cell = &mut self.sums[resource.index()];
        cell.0 += price * quantity;
        cell.1 += quantity;
        Ok(())
    }

    /// Produces the day's aggregate row. A resource with zero accumulated
    /// quantity yields an empty cell rather than zero or NaN.
    pub fn finish(self) -> DayRow {
        let mut row = DayRow::new(self.target_day);
        for resource in Resource::ALL {
            let (weighted, quantity) = self.sums[resource.index()];
            if quantity > 0.0 {
                row.set(resource, Some(Price::round2(weighted / quantity)));
            }
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn trade(resource: &str, price: &str, quantity: &str) -> RawTrade {
        RawTrade {
            offer_type: "0".to_string(),
            resource: resource.to_string(),
            quantity: quantity.to_string(),
            price: price.to_string(),
            accepted: "1".to_string(),
            date_accepted: "2024-03-04 12:00:00".to_string(),
        }
    }

    #[test]
    fn weighted_average_matches_hand_computation() {
        let mut agg = DayAggregator::new(target());
        agg.consume(&trade("oil", "10", "2")).unwrap();
        agg.consume(&trade("oil", "20", "1")).unwrap();
        let row = agg.finish();
        // (10*2 + 20*1) / (2+1) = 13.333... -> 13.33
        assert_eq!(row.oil, Some(Price(13.33)));
    }

    #[test]
    fn resources_without_qualifying_trades_stay_empty() {
        let mut agg = DayAggregator::new(target());
        agg.consume(&trade("coal", "55", "10")).unwrap();
        let row = agg.finish();
        assert_eq!(row.coal, Some(Price(55.0)));
        assert_eq!(row.oil, None);
        assert_eq!(row.credits, None);
    }

    #[test]
    fn rejected_offers_do_not_touch_the_accumulator() {
        let mut agg = DayAggregator::new(target());
        let mut t = trade("oil", "10", "2");
        t.accepted = "0".to_string();
        agg.consume(&t).unwrap();
        assert_eq!(agg.finish().oil, None);
    }

    #[test]
    fn non_buy_offer_kinds_do_not_touch_the_accumulator() {
        let mut agg = DayAggregator::new(target());
        for kind in ["1", "2"] {
            let mut t = trade("oil", "10", "2");
            t.offer_type = kind.to_string();
            agg.consume(&t).unwrap();
        }
        assert_eq!(agg.finish().oil, None);
    }

    #[test]
    fn trades_accepted_on_other_days_do_not_touch_the_accumulator() {
        let mut agg = DayAggregator::new(target());
        let mut t = trade("oil", "10", "2");
        t.date_accepted = "2024-03-05 00:00:01".to_string();
        agg.consume(&t).unwrap();
        assert_eq!(agg.finish().oil, None);
    }

    #[test]
    fn malformed_quantity_in_a_qualifying_trade_fails_the_day() {
        let mut agg = DayAggregator::new(target());
        let mut t = trade("oil", "10", "2");
        t.quantity = "a lot".to_string();
        assert!(agg.consume(&t).is_err());
    }

    #[test]
    fn malformed_fields_in_filtered_out_trades_are_harmless() {
        let mut agg = DayAggregator::new(target());
        let mut t = trade("oil", "not a price", "nope");
        t.accepted = "0".to_string();
        assert!(agg.consume(&t).is_ok());
    }

    #[test]
    fn unknown_resource_in_a_qualifying_trade_fails_the_day() {
        let mut agg = DayAggregator::new(target());
        let t = trade("spice", "10", "2");
        assert!(matches!(
            agg.consume(&t),
            Err(DecodeError::UnknownResource(_))
        ));
    }

    #[test]
    fn average_rounds_half_up() {
        let mut agg = DayAggregator::new(target());
        // 10.125 is exactly representable, so the midpoint is a real midpoint.
        agg.consume(&trade("steel", "10.125", "1")).unwrap();
        assert_eq!(agg.finish().steel, Some(Price(10.13)));
    }
}
