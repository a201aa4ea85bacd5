//! Weight entry DTOs.

use super::{floor_count, parse_date};
use chrono::{DateTime, Utc};
use fitlog_core::{FitlogError, FitlogResult, SkipLimit, UserId, Weight, WeightId, WeightUnit, WeightUpdate, MAX_BODY_WEIGHT};
use fitlog_repository::WeightQuery;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

/// Request to record a body-weight entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateWeightRequest {
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub date: String,
    /// `met` or `imp`.
    pub unit: String,
    /// 0 to 1000, floored.
    pub weight: f64,
}

impl CreateWeightRequest {
    pub fn into_weight(self, user_id: UserId, now: DateTime<Utc>) -> FitlogResult<Weight> {
        let date = parse_date(&self.date)
            .filter(|date| *date <= now)
            .ok_or_else(|| FitlogError::invalid_argument("Invalid date. Cannot use future times and dates"))?;

        let unit = WeightUnit::parse(&self.unit)
            .ok_or_else(|| FitlogError::invalid_argument("Invalid unit. Must be 'met' or 'imp'"))?;

        let weight = floor_count(self.weight)
            .filter(|weight| *weight <= MAX_BODY_WEIGHT)
            .ok_or_else(|| FitlogError::invalid_argument("Invalid weight. Must be between 0 and 1000"))?;

        Ok(Weight::new(user_id, date, unit, weight))
    }
}

/// Partial update of an entry. Fields that are missing or invalid are
/// left unchanged rather than rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateWeightRequest {
    #[schema(value_type = Option<String>)]
    pub date: Option<Value>,
    #[schema(value_type = Option<String>)]
    pub unit: Option<Value>,
    #[schema(value_type = Option<f64>)]
    pub weight: Option<Value>,
}

impl UpdateWeightRequest {
    #[must_use]
    pub fn to_update(&self, now: DateTime<Utc>) -> WeightUpdate {
        WeightUpdate {
            date: self
                .date
                .as_ref()
                .and_then(Value::as_str)
                .and_then(parse_date)
                .filter(|date| *date <= now),
            unit: self.unit.as_ref().and_then(Value::as_str).and_then(WeightUnit::parse),
            weight: self
                .weight
                .as_ref()
                .and_then(|value| match value {
                    Value::Number(n) => n.as_f64().and_then(floor_count),
                    Value::String(s) => fitlog_core::parse_count(Some(s.as_str())),
                    _ => None,
                })
                .filter(|weight| *weight <= MAX_BODY_WEIGHT),
        }
    }
}

/// Query string of the weight list.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WeightListQuery {
    /// Inclusive lower bound on the entry date. Invalid or future values are ignored.
    #[serde(alias = "dateStart")]
    pub date_start: Option<String>,
    /// Inclusive upper bound on the entry date. Invalid or future values are ignored.
    #[serde(alias = "dateEnd")]
    pub date_end: Option<String>,
    /// Rows to skip (default 0).
    pub skip: Option<String>,
    /// Rows to return (default 20, max 100).
    pub limit: Option<String>,
}

impl WeightListQuery {
    /// Builds the repository query for `user_id`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when both bounds are usable and start is after end.
    pub fn normalize(&self, user_id: UserId, now: DateTime<Utc>) -> FitlogResult<WeightQuery> {
        let bound = |raw: &Option<String>| raw.as_deref().and_then(parse_date).filter(|date| *date < now);
        let date_start = bound(&self.date_start);
        let date_end = bound(&self.date_end);

        if let (Some(start), Some(end)) = (date_start, date_end) {
            if start > end {
                return Err(FitlogError::invalid_argument("Start date must be before the end date"));
            }
        }

        Ok(WeightQuery {
            user_id,
            date_start,
            date_end,
            window: SkipLimit::from_query(self.skip.as_deref(), self.limit.as_deref(), SkipLimit::DEFAULT_LIMIT),
        })
    }
}

/// Body returned after recording an entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeightCreatedResponse {
    pub message: String,
    pub id: WeightId,
    pub data: Weight,
}

impl From<Weight> for WeightCreatedResponse {
    fn from(weight: Weight) -> Self {
        Self {
            message: "Weight data created".to_string(),
            id: weight.id,
            data: weight,
        }
    }
}

/// Body returned after editing an entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WeightUpdatedResponse {
    pub message: String,
    pub data: Weight,
}

impl From<Weight> for WeightUpdatedResponse {
    fn from(weight: Weight) -> Self {
        Self {
            message: "Weight data updated".to_string(),
            data: weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_create_weight_floors_and_validates() {
        let request = CreateWeightRequest {
            date: "2024-05-30".to_string(),
            unit: "met".to_string(),
            weight: 81.6,
        };
        let entry = request.into_weight(UserId::new(), now()).unwrap();
        assert_eq!(entry.weight, 81);
        assert_eq!(entry.unit, WeightUnit::Met);

        let future = CreateWeightRequest {
            date: "2024-07-01".to_string(),
            unit: "met".to_string(),
            weight: 80.0,
        };
        assert!(future.into_weight(UserId::new(), now()).is_err());

        let heavy = CreateWeightRequest {
            date: "2024-05-30".to_string(),
            unit: "imp".to_string(),
            weight: 1000.5,
        };
        assert_eq!(heavy.into_weight(UserId::new(), now()).unwrap().weight, 1000);

        let bad_unit = CreateWeightRequest {
            date: "2024-05-30".to_string(),
            unit: "kg".to_string(),
            weight: 80.0,
        };
        assert!(bad_unit.into_weight(UserId::new(), now()).unwrap_err().to_string().contains("unit"));
    }

    #[test]
    fn test_update_ignores_invalid_fields() {
        let request: UpdateWeightRequest = serde_json::from_value(json!({
            "date": "not a date",
            "unit": "stone",
            "weight": 79.9
        }))
        .unwrap();
        let update = request.to_update(now());
        assert_eq!(update.date, None);
        assert_eq!(update.unit, None);
        assert_eq!(update.weight, Some(79));

        let request: UpdateWeightRequest = serde_json::from_value(json!({
            "date": "2024-05-01",
            "unit": "imp",
            "weight": "abc"
        }))
        .unwrap();
        let update = request.to_update(now());
        assert_eq!(update.date, Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap()));
        assert_eq!(update.unit, Some(WeightUnit::Imp));
        assert_eq!(update.weight, None);
    }

    #[test]
    fn test_list_query_drops_unusable_dates() {
        let query = WeightListQuery {
            date_start: Some("garbage".to_string()),
            date_end: Some("2030-01-01".to_string()),
            skip: Some("2".to_string()),
            limit: None,
        };
        let normalized = query.normalize(UserId::new(), now()).unwrap();
        assert_eq!(normalized.date_start, None);
        assert_eq!(normalized.date_end, None);
        assert_eq!(normalized.window, SkipLimit::new(2, 20));
    }

    #[test]
    fn test_list_query_rejects_inverted_range() {
        let query = WeightListQuery {
            date_start: Some("2024-05-10".to_string()),
            date_end: Some("2024-05-01".to_string()),
            ..WeightListQuery::default()
        };
        let err = query.normalize(UserId::new(), now()).unwrap_err();
        assert_eq!(err.to_string(), "Start date must be before the end date");
        assert_eq!(err.status_code(), 400);
    }
}
