//! Status filtering over billing records

use std::fmt;
use std::str::FromStr;

use crate::models::{BillingRecord, BillingStatus};

/// Which status bucket to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// Every record, unfiltered
    #[default]
    All,
    Only(BillingStatus),
}

impl StatusFilter {
    pub fn matches(&self, record: &BillingRecord) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => record.status == *status,
        }
    }
}

impl From<BillingStatus> for StatusFilter {
    fn from(status: BillingStatus) -> Self {
        Self::Only(status)
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "todas" | "todos" => Ok(Self::All),
            other => other.parse::<BillingStatus>().map(Self::Only),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Only(status) => write!(f, "{}", status.to_string().to_lowercase()),
        }
    }
}

/// Records matching the filter, in their original order
///
/// The result borrows from `records`; `StatusFilter::All` yields every record.
pub fn filter_by_status(records: &[BillingRecord], filter: StatusFilter) -> Vec<&BillingRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::test_support::{record, sample_ledger};
    use proptest::prelude::*;

    #[test]
    fn test_filter_preserves_order() {
        let ledger = sample_ledger();
        let pending: Vec<u64> = filter_by_status(&ledger, BillingStatus::Pending.into())
            .iter()
            .map(|r| r.id.value())
            .collect();
        assert_eq!(pending, vec![2, 5]);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let ledger = sample_ledger();
        let all: Vec<BillingRecord> = filter_by_status(&ledger, StatusFilter::All)
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(all, ledger);
    }

    #[test]
    fn test_filter_absent_status_is_empty() {
        let ledger: Vec<_> = sample_ledger()
            .into_iter()
            .filter(|r| r.status != BillingStatus::Scheduled)
            .collect();
        assert!(filter_by_status(&ledger, BillingStatus::Scheduled.into()).is_empty());
        assert!(filter_by_status(&[], StatusFilter::All).is_empty());
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!("all".parse::<StatusFilter>().unwrap(), StatusFilter::All);
        assert_eq!(
            "Atrasado".parse::<StatusFilter>().unwrap(),
            StatusFilter::Only(BillingStatus::Overdue)
        );
        assert!("nope".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Only(BillingStatus::Paid).to_string(), "paid");
    }

    fn arb_status() -> impl Strategy<Value = BillingStatus> {
        prop::sample::select(BillingStatus::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_filter_selects_exactly_matching(
            statuses in prop::collection::vec(arb_status(), 0..40),
            wanted in arb_status(),
        ) {
            let ledger: Vec<BillingRecord> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| record(i as u64 + 1, *s, 100 * i as i64))
                .collect();

            let filtered = filter_by_status(&ledger, wanted.into());
            let expected: Vec<&BillingRecord> =
                ledger.iter().filter(|r| r.status == wanted).collect();

            prop_assert_eq!(filtered, expected);
        }
    }
}
