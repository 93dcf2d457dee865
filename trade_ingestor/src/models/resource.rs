//! The closed set of tradeable resources.
//!
//! Every daily aggregate row carries one average-price column per variant, in
//! the order of [`Resource::ALL`]. The archive CSV spells these in lowercase,
//! which is also how they appear as cache-file column names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A resource name that is not one of the twelve known variants.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown resource: {0}")]
pub struct UnknownResource(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Oil,
    Coal,
    Iron,
    Bauxite,
    Lead,
    Uranium,
    Food,
    Gasoline,
    Steel,
    Aluminum,
    Munitions,
    Credits,
}

impl Resource {
    /// All variants, in cache-file column order.
    pub const ALL: [Resource; 12] = [
        Resource::Oil,
        Resource::Coal,
        Resource::Iron,
        Resource::Bauxite,
        Resource::Lead,
        Resource::Uranium,
        Resource::Food,
        Resource::Gasoline,
        Resource::Steel,
        Resource::Aluminum,
        Resource::Munitions,
        Resource::Credits,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Oil => "oil",
            Resource::Coal => "coal",
            Resource::Iron => "iron",
            Resource::Bauxite => "bauxite",
            Resource::Lead => "lead",
            Resource::Uranium => "uranium",
            Resource::Food => "food",
            Resource::Gasoline => "gasoline",
            Resource::Steel => "steel",
            Resource::Aluminum => "aluminum",
            Resource::Munitions => "munitions",
            Resource::Credits => "credits",
        }
    }

    /// Position of this variant within [`Resource::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for Resource {
    type Err = UnknownResource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oil" => Ok(Resource::Oil),
            "coal" => Ok(Resource::Coal),
            "iron" => Ok(Resource::Iron),
            "bauxite" => Ok(Resource::Bauxite),
            "lead" => Ok(Resource::Lead),
            "uranium" => Ok(Resource::Uranium),
            "food" => Ok(Resource::Food),
            "gasoline" => Ok(Resource::Gasoline),
            "steel" => Ok(Resource::Steel),
            "aluminum" => Ok(Resource::Aluminum),
            "munitions" => Ok(Resource::Munitions),
            "credits" => Ok(Resource::Credits),
            other => Err(UnknownResource(other.to_string())),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_round_trips_through_its_name() {
        for resource in Resource::ALL {
            assert_eq!(resource.as_str().parse::<Resource>(), Ok(resource));
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        assert_eq!(
            "plutonium".parse::<Resource>(),
            Err(UnknownResource("plutonium".to_string()))
        );
        // Archive spelling is lowercase; anything else is unknown.
        assert!("Oil".parse::<Resource>().is_err());
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, resource) in Resource::ALL.iter().enumerate() {
            assert_eq!(resource.index(), i);
        }
    }
}
