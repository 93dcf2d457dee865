//! The per-day aggregate: one average price per resource, or an empty cell.
//!
//! Field order on [`DayRow`] is load-bearing: it defines the cache-file column
//! order (`date` first, then the twelve resources in [`Resource::ALL`] order),
//! since the CSV layer derives the header from the struct.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::models::resource::Resource;

/// A price rounded to two decimals, serialized as exactly two decimal places.
///
/// Round-trip fidelity matters more than numeric convenience here: the cache
/// file must reproduce byte-identically across runs, so the wrapper owns both
/// the rounding rule and the text format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Price(pub f64);

impl Price {
    /// Rounds half-up to two decimals. Prices are non-negative, so rounding
    /// half away from zero is rounding half-up.
    pub fn round2(value: f64) -> Self {
        Price((value * 100.0).round() / 100.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.trim()
            .parse::<f64>()
            .map(Price)
            .map_err(|_| de::Error::custom(format!("invalid price text: {text:?}")))
    }
}

/// One persisted row of the price index: a date plus twelve average prices.
///
/// `None` means the resource had no qualifying trades that day and is written
/// as an empty cell, never as zero or NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub oil: Option<Price>,
    pub coal: Option<Price>,
    pub iron: Option<Price>,
    pub bauxite: Option<Price>,
    pub lead: Option<Price>,
    pub uranium: Option<Price>,
    pub food: Option<Price>,
    pub gasoline: Option<Price>,
    pub steel: Option<Price>,
    pub aluminum: Option<Price>,
    pub munitions: Option<Price>,
    pub credits: Option<Price>,
}

impl DayRow {
    /// A row for `date` with every cell empty.
    pub fn new(date: NaiveDate) -> Self {
        DayRow {
            date,
            oil: None,
            coal: None,
            iron: None,
            bauxite: None,
            lead: None,
            uranium: None,
            food: None,
            gasoline: None,
            steel: None,
            aluminum: None,
            munitions: None,
            credits: None,
        }
    }

    pub fn get(&self, resource: Resource) -> Option<Price> {
        match resource {
            Resource::Oil => self.oil,
            Resource::Coal => self.coal,
            Resource::Iron => self.iron,
            Resource::Bauxite => self.bauxite,
            Resource::Lead => self.lead,
            Resource::Uranium => self.uranium,
            Resource::Food => self.food,
            Resource::Gasoline => self.gasoline,
            Resource::Steel => self.steel,
            Resource::Aluminum => self.aluminum,
            Resource::Munitions => self.munitions,
            Resource::Credits => self.credits,
        }
    }

    pub fn set(&mut self, resource: Resource, price: Option<Price>) {
        match resource {
            Resource::Oil => self.oil = price,
            Resource::Coal => self.coal = price,
            Resource::Iron => self.iron = price,
            Resource::Bauxite => self.bauxite = price,
            Resource::Lead => self.lead = price,
            Resource::Uranium => self.uranium = price,
            Resource::Food => self.food = price,
            Resource::Gasoline => self.gasoline = price,
            Resource::Steel => self.steel = price,
            Resource::Aluminum => self.aluminum = price,
            Resource::Munitions => self.munitions = price,
            Resource::Credits => self.credits = price,
        }
    }
}
