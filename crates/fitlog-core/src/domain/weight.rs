//! Body weight record.

use crate::{UserId, WeightId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on a recorded body weight.
pub const MAX_BODY_WEIGHT: u32 = 1000;

/// Measurement system of a weight entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    /// Metric (kilograms).
    Met,
    /// Imperial (pounds).
    Imp,
}

impl WeightUnit {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "met" => Some(Self::Met),
            "imp" => Some(Self::Imp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Met => "met",
            Self::Imp => "imp",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A body weight measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Weight {
    pub id: WeightId,
    pub user_id: UserId,
    pub date: DateTime<Utc>,
    pub unit: WeightUnit,
    pub weight: u32,
    pub created_at: DateTime<Utc>,
}

impl Weight {
    #[must_use]
    pub fn new(user_id: UserId, date: DateTime<Utc>, unit: WeightUnit, weight: u32) -> Self {
        Self {
            id: WeightId::new(),
            user_id,
            date,
            unit,
            weight,
            created_at: Utc::now(),
        }
    }

    /// Checks whether `user_id` created this entry.
    #[must_use]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// Fields of a weight entry that may be changed after creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeightUpdate {
    pub date: Option<DateTime<Utc>>,
    pub unit: Option<WeightUnit>,
    pub weight: Option<u32>,
}

impl WeightUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.date.is_none() && self.unit.is_none() && self.weight.is_none()
    }

    /// Applies the present fields to `entry`.
    pub fn apply(&self, entry: &mut Weight) {
        if let Some(date) = self.date {
            entry.date = date;
        }
        if let Some(unit) = self.unit {
            entry.unit = unit;
        }
        if let Some(weight) = self.weight {
            entry.weight = weight;
        }
    }
}
