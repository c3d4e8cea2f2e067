//! Period / platform selection over a loaded record set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::record::CampaignRecord;

/// Value used by `<select>` elements for the "all" option. Record labels are
/// free text, so the sentinel lives outside the label space only by
/// convention; [`Selection::from_choice`] is the single place it is decoded.
pub const ALL_CHOICE: &str = "__all__";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL_CHOICE {
            Selection::All
        } else {
            Selection::Only(choice.to_string())
        }
    }

    pub fn choice(&self) -> &str {
        match self {
            Selection::All => ALL_CHOICE,
            Selection::Only(value) => value,
        }
    }

    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => value == Some(wanted.as_str()),
        }
    }

    fn still_valid(&self, available: &[String]) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => available.iter().any(|value| value == wanted),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterState {
    pub period: Selection,
    pub platform: Selection,
}

impl FilterState {
    pub fn apply<'a>(&self, records: &'a [CampaignRecord]) -> Vec<&'a CampaignRecord> {
        apply_filter(records, &self.period, &self.platform)
    }

    /// Drop selections that name values absent from `records`.
    pub fn reconcile(&self, records: &[CampaignRecord]) -> Self {
        let periods = available_periods(records);
        let platforms = available_platforms(records);

        Self {
            period: if self.period.still_valid(&periods) {
                self.period.clone()
            } else {
                Selection::All
            },
            platform: if self.platform.still_valid(&platforms) {
                self.platform.clone()
            } else {
                Selection::All
            },
        }
    }
}

/// Distinct period labels in first-occurrence order.
pub fn available_periods(records: &[CampaignRecord]) -> Vec<String> {
    distinct(records.iter().map(CampaignRecord::period))
}

/// Distinct platform labels in first-occurrence order.
pub fn available_platforms(records: &[CampaignRecord]) -> Vec<String> {
    distinct(records.iter().map(CampaignRecord::platform))
}

/// Records matching both selections, in their original order.
pub fn apply_filter<'a>(
    records: &'a [CampaignRecord],
    period: &Selection,
    platform: &Selection,
) -> Vec<&'a CampaignRecord> {
    records
        .iter()
        .filter(|record| period.matches(record.period()) && platform.matches(record.platform()))
        .collect()
}

fn distinct<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .flatten()
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
