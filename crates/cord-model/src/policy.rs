use std::collections::BTreeMap;

use crate::field::Field;

/// Default sentinel written by the fill-with-default policy.
pub const DEFAULT_SENTINEL: &str = "Unknown";

/// Per-column rule for handling missing values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleaningPolicy {
    /// Remove the row when the column is absent.
    DropRow,
    /// Replace an absent value with a fixed sentinel.
    FillDefault(String),
    /// Leave the value absent but record a boolean presence flag.
    FlagMissing,
}

impl CleaningPolicy {
    /// Short label used in the `columns` listing.
    pub fn describe(&self) -> String {
        match self {
            CleaningPolicy::DropRow => "drop row if missing".to_string(),
            CleaningPolicy::FillDefault(sentinel) => format!("fill with \"{sentinel}\""),
            CleaningPolicy::FlagMissing => "keep, flag presence".to_string(),
        }
    }
}

/// The cleaning rules for a run, at most one per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicySet {
    rules: BTreeMap<Field, CleaningPolicy>,
}

impl PolicySet {
    pub fn new() -> Self {
        PolicySet::default()
    }

    pub fn with_rule(mut self, field: Field, policy: CleaningPolicy) -> Self {
        self.rules.insert(field, policy);
        self
    }

    pub fn rule(&self, field: Field) -> Option<&CleaningPolicy> {
        self.rules.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &CleaningPolicy)> {
        self.rules.iter().map(|(field, policy)| (*field, policy))
    }

    /// The policy set the dashboard analysis uses: title and publication
    /// date are mandatory, journal and source fall back to the sentinel,
    /// and abstracts stay absent but flagged.
    pub fn default_policies() -> Self {
        PolicySet::new()
            .with_rule(Field::Title, CleaningPolicy::DropRow)
            .with_rule(Field::PublishTime, CleaningPolicy::DropRow)
            .with_rule(
                Field::Journal,
                CleaningPolicy::FillDefault(DEFAULT_SENTINEL.to_string()),
            )
            .with_rule(
                Field::Source,
                CleaningPolicy::FillDefault(DEFAULT_SENTINEL.to_string()),
            )
            .with_rule(Field::Abstract, CleaningPolicy::FlagMissing)
    }
}

#[cfg(test)]
mod tests {
    use super::{CleaningPolicy, Field, PolicySet};

    #[test]
    fn later_rule_replaces_earlier_rule() {
        let policies = PolicySet::new()
            .with_rule(Field::Journal, CleaningPolicy::DropRow)
            .with_rule(Field::Journal, CleaningPolicy::FlagMissing);
        assert_eq!(
            policies.rule(Field::Journal),
            Some(&CleaningPolicy::FlagMissing)
        );
    }

    #[test]
    fn default_policies_drop_required_fields() {
        let policies = PolicySet::default_policies();
        assert_eq!(policies.rule(Field::Title), Some(&CleaningPolicy::DropRow));
        assert_eq!(
            policies.rule(Field::PublishTime),
            Some(&CleaningPolicy::DropRow)
        );
    }
}
