use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PlannerError, PlannerResult};

/// Preference categories, in form order.
pub const PREFERENCE_KEYS: [&str; 5] = ["nightlife", "adventure", "shopping", "food", "urban"];

/// Travel constraint fields, in form order.
pub const CONSTRAINT_KEYS: [&str; 2] = ["min_hotel_rating", "max_flight_legs"];

pub const MAX_PREFERENCE_WEIGHT: u32 = 5;

/// Keys `Member` serializes itself; extra fields may not reuse them.
pub const MEMBER_FIELDS: [&str; 9] = [
    "name",
    "total_budget",
    "monthly_saving_capacity",
    "preference_weights",
    "constraints",
    "notes",
    "city",
    "start_date",
    "end_date",
];

/// How much a member cares about each activity category (0-5).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceWeights {
    #[serde(deserialize_with = "lenient_weight")]
    pub nightlife: u32,
    #[serde(deserialize_with = "lenient_weight")]
    pub adventure: u32,
    #[serde(deserialize_with = "lenient_weight")]
    pub shopping: u32,
    #[serde(deserialize_with = "lenient_weight")]
    pub food: u32,
    #[serde(deserialize_with = "lenient_weight")]
    pub urban: u32,
}

impl PreferenceWeights {
    pub fn contains_key(key: &str) -> bool {
        PREFERENCE_KEYS.contains(&key)
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        match key {
            "nightlife" => Some(self.nightlife),
            "adventure" => Some(self.adventure),
            "shopping" => Some(self.shopping),
            "food" => Some(self.food),
            "urban" => Some(self.urban),
            _ => None,
        }
    }

    /// Writes one weight. Returns false if `key` is not a category.
    pub fn set(&mut self, key: &str, value: u32) -> bool {
        let slot = match key {
            "nightlife" => &mut self.nightlife,
            "adventure" => &mut self.adventure,
            "shopping" => &mut self.shopping,
            "food" => &mut self.food,
            "urban" => &mut self.urban,
            _ => return false,
        };
        *slot = value;
        true
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    #[serde(deserialize_with = "lenient_limit")]
    pub min_hotel_rating: u32,
    #[serde(deserialize_with = "lenient_limit")]
    pub max_flight_legs: u32,
}

impl Constraints {
    pub fn contains_key(key: &str) -> bool {
        CONSTRAINT_KEYS.contains(&key)
    }

    pub fn get(&self, key: &str) -> Option<u32> {
        match key {
            "min_hotel_rating" => Some(self.min_hotel_rating),
            "max_flight_legs" => Some(self.max_flight_legs),
            _ => None,
        }
    }

    /// Writes one constraint. Returns false if `key` is not a constraint.
    pub fn set(&mut self, key: &str, value: u32) -> bool {
        let slot = match key {
            "min_hotel_rating" => &mut self.min_hotel_rating,
            "max_flight_legs" => &mut self.max_flight_legs,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// One trip participant's budget and preference profile.
///
/// Records coming back from the backend may be missing fields or carry
/// nulls; those fall back to defaults. Unknown fields are kept in `extra`
/// so a record survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_budget: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub monthly_saving_capacity: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preference_weights: PreferenceWeights,
    #[serde(default, deserialize_with = "null_as_default")]
    pub constraints: Constraints,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_date")]
    pub end_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Member {
    pub fn create(name: String) -> Self {
        Self {
            name,
            total_budget: 0.0,
            monthly_saving_capacity: 0.0,
            preference_weights: PreferenceWeights::default(),
            constraints: Constraints::default(),
            notes: String::new(),
            city: None,
            start_date: None,
            end_date: None,
            extra: BTreeMap::new(),
        }
    }
}

/// One entry of the member list endpoint. Older backends return bare
/// names, newer ones return full records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemberEntry {
    Name(String),
    Record(Member),
}

impl MemberEntry {
    pub fn name(&self) -> &str {
        match self {
            MemberEntry::Name(name) => name,
            MemberEntry::Record(member) => &member.name,
        }
    }

    pub fn record(&self) -> Option<&Member> {
        match self {
            MemberEntry::Name(_) => None,
            MemberEntry::Record(member) => Some(member),
        }
    }

    /// Decodes a `/getusers` body entry by entry. The body must be an
    /// array; entries that fit neither shape are logged and skipped so
    /// one bad record cannot hide the rest of the group.
    pub fn decode_roster(body: Value) -> PlannerResult<Vec<MemberEntry>> {
        let Value::Array(raw) = body else {
            return Err(PlannerError::Decode("member list must be an array".into()));
        };
        let mut entries = Vec::with_capacity(raw.len());
        for (index, value) in raw.into_iter().enumerate() {
            match serde_json::from_value::<MemberEntry>(value) {
                Ok(entry) => entries.push(entry),
                Err(e) => tracing::warn!(index, error = %e, "skipping unreadable member entry"),
            }
        }
        Ok(entries)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Early page drafts posted budgets as raw input strings.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(0.0),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| de::Error::custom("number out of range")),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s.trim().parse().map_err(de::Error::custom),
        other => Err(de::Error::custom(format!("expected a number, got {}", other))),
    }
}

fn lenient_weight<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_whole(deserializer, MAX_PREFERENCE_WEIGHT)
}

fn lenient_limit<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_whole(deserializer, u32::MAX)
}

// The form never checked for whole numbers, so stored records can hold
// values like 2.5 or 7. Round and clamp into 0..=max.
fn lenient_whole<'de, D>(deserializer: D, max: u32) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = lenient_number(deserializer)?;
    let whole = raw.round().clamp(0.0, f64::from(max));
    if whole != raw {
        tracing::warn!(value = raw, stored = whole, "normalized out-of-range member field");
    }
    Ok(whole as u32)
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(de::Error::custom),
    }
}
