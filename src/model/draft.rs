use std::collections::BTreeMap;

use super::member::{Constraints, Member, PreferenceWeights, MAX_PREFERENCE_WEIGHT, MEMBER_FIELDS};
use crate::error::PlannerResult;
use crate::validation::{self, trim_optional};

/// Where an edited form field lands in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    PreferenceWeight,
    Constraint,
    TopLevel,
}

impl FieldTarget {
    /// Routes a field name. Preference keys are checked before constraint
    /// keys; anything else is a top-level text field.
    pub fn route(field: &str) -> Self {
        if PreferenceWeights::contains_key(field) {
            FieldTarget::PreferenceWeight
        } else if Constraints::contains_key(field) {
            FieldTarget::Constraint
        } else {
            FieldTarget::TopLevel
        }
    }
}

/// The "add member" form as the user is filling it in.
///
/// Top-level fields hold the raw text typed so far and are only coerced
/// when the draft is submitted; nested groups hold numbers already.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub total_budget: String,
    pub monthly_saving_capacity: String,
    pub preference_weights: PreferenceWeights,
    pub constraints: Constraints,
    pub notes: String,
    pub city: String,
    pub start_date: String,
    pub end_date: String,
    /// Top-level fields with no dedicated slot.
    pub extra: BTreeMap<String, String>,
}

impl MemberDraft {
    /// Applies one form edit. A numeric value that fails coercion leaves
    /// the draft untouched.
    pub fn edit_field(&mut self, field: &str, value: &str) -> PlannerResult<FieldTarget> {
        let target = FieldTarget::route(field);
        match target {
            FieldTarget::PreferenceWeight => {
                let n = validation::coerce_number(value, field)?;
                let weight = validation::whole_in_range(n, field, 0, MAX_PREFERENCE_WEIGHT)?;
                self.preference_weights.set(field, weight);
            }
            FieldTarget::Constraint => {
                let n = validation::coerce_number(value, field)?;
                let limit = validation::whole_in_range(n, field, 0, u32::MAX)?;
                self.constraints.set(field, limit);
            }
            FieldTarget::TopLevel => self.set_text(field, value),
        }
        Ok(target)
    }

    fn set_text(&mut self, field: &str, value: &str) {
        let slot = match field {
            "name" => &mut self.name,
            "total_budget" => &mut self.total_budget,
            "monthly_saving_capacity" => &mut self.monthly_saving_capacity,
            "notes" => &mut self.notes,
            "city" => &mut self.city,
            "start_date" => &mut self.start_date,
            "end_date" => &mut self.end_date,
            _ => {
                self.extra.insert(field.to_string(), value.to_string());
                return;
            }
        };
        *slot = value.to_string();
    }

    /// Current text of a top-level field.
    pub fn text(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "total_budget" => Some(&self.total_budget),
            "monthly_saving_capacity" => Some(&self.monthly_saving_capacity),
            "notes" => Some(&self.notes),
            "city" => Some(&self.city),
            "start_date" => Some(&self.start_date),
            "end_date" => Some(&self.end_date),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// Coerces the draft into the record sent to the backend.
    pub fn to_member(&self) -> PlannerResult<Member> {
        let mut member = Member::create(self.name.trim().to_string());
        member.total_budget = validation::non_negative(
            validation::coerce_number(&self.total_budget, "total_budget")?,
            "total_budget",
        )?;
        member.monthly_saving_capacity = validation::non_negative(
            validation::coerce_number(&self.monthly_saving_capacity, "monthly_saving_capacity")?,
            "monthly_saving_capacity",
        )?;
        member.preference_weights = self.preference_weights;
        member.constraints = self.constraints;
        member.notes = self.notes.clone();
        member.city = trim_optional(Some(self.city.as_str()));
        member.start_date = validation::optional_date(&self.start_date, "start_date")?;
        member.end_date = validation::optional_date(&self.end_date, "end_date")?;
        member.extra = self
            .extra
            .iter()
            .filter(|(k, _)| {
                let declared = MEMBER_FIELDS.contains(&k.as_str());
                if declared {
                    tracing::warn!(field = %k, "dropping form field that shadows a member field");
                }
                !declared
            })
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        Ok(member)
    }

    /// Back to the empty form: strings cleared, numbers zeroed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
