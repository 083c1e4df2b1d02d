//! The in-memory filter/aggregate pipeline behind the inbound package view.
//!
//! All predicates are conjunctive narrowing passes over the already-fetched
//! package list; an empty text filter constrains nothing. The tier counts are
//! always recomputed from the filtered subset so the summary tiles agree with
//! the table.

use super::entities::InboundPackage;
use super::status::StatusTier;

/// View-owned predicate set. Not persisted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PackageFilter {
    pub show_completed: bool,
    pub client: String,
    pub package_type: String,
    pub serial_number: String,
    pub received_by: String,
    pub tier: Option<StatusTier>,
    /// Set when the view is already pinned to one client; the client-name
    /// predicate is skipped entirely in that case.
    pub scoped_to_client: bool,
}

/// Tier tally over a filtered subset. `ok + warning + critical` always equals
/// the subset length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub ok: usize,
    pub warning: usize,
    pub critical: usize,
}

impl TierCounts {
    pub fn total(&self) -> usize {
        self.ok + self.warning + self.critical
    }
}

/// Applies the filter chain and returns the visible subset in input order.
pub fn visible_packages<'a>(
    packages: &'a [InboundPackage],
    filter: &PackageFilter,
) -> Vec<&'a InboundPackage> {
    packages
        .iter()
        .filter(|pkg| filter.show_completed || !pkg.completed)
        .filter(|pkg| {
            filter.scoped_to_client || matches_text(&pkg.client_name, &filter.client)
        })
        .filter(|pkg| matches_text(&pkg.package_type, &filter.package_type))
        .filter(|pkg| matches_serial(pkg.serial_number.as_deref(), &filter.serial_number))
        .filter(|pkg| matches_text(&pkg.received_by, &filter.received_by))
        .filter(|pkg| filter.tier.map_or(true, |tier| tier == pkg.tier))
        .collect()
}

/// Tallies the tiers present in a filtered subset; absent tiers stay 0.
pub fn tier_counts(packages: &[&InboundPackage]) -> TierCounts {
    packages.iter().fold(TierCounts::default(), |mut acc, pkg| {
        match pkg.tier {
            StatusTier::Ok => acc.ok += 1,
            StatusTier::Warning => acc.warning += 1,
            StatusTier::Critical => acc.critical += 1,
        }
        acc
    })
}

fn matches_text(value: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    value.to_lowercase().contains(&filter.to_lowercase())
}

/// A package without a serial number never matches a non-empty serial filter.
fn matches_serial(serial: Option<&str>, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    serial.map_or(false, |value| matches_text(value, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    fn package(
        client: &str,
        package_type: &str,
        serial: Option<&str>,
        received_by: &str,
        tier: StatusTier,
        completed: bool,
    ) -> InboundPackage {
        InboundPackage {
            id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            client_name: client.to_string(),
            package_type: package_type.to_string(),
            received_by: received_by.to_string(),
            ticket_id: None,
            serial_number: serial.map(str::to_string),
            received_date: datetime!(2025-06-02 09:00 UTC),
            expected_date: date!(2025 - 06 - 02),
            tier,
            completed,
            completed_at: None,
            completed_by: None,
        }
    }

    fn sample() -> Vec<InboundPackage> {
        vec![
            package(
                "Northwind",
                "Laptop",
                Some("SN-100"),
                "Dana",
                StatusTier::Ok,
                false,
            ),
            package(
                "Northwind",
                "Server",
                None,
                "Alex",
                StatusTier::Warning,
                false,
            ),
            package(
                "Contoso",
                "Printer",
                Some("SN-200"),
                "Dana",
                StatusTier::Critical,
                false,
            ),
            package(
                "Contoso",
                "Laptop",
                Some("SN-300"),
                "Sam",
                StatusTier::Ok,
                true,
            ),
        ]
    }

    #[test]
    fn empty_filter_hides_only_completed() {
        let packages = sample();
        let filter = PackageFilter::default();
        let visible = visible_packages(&packages, &filter);
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|pkg| !pkg.completed));
    }

    #[test]
    fn show_completed_reveals_everything() {
        let packages = sample();
        let filter = PackageFilter {
            show_completed: true,
            ..PackageFilter::default()
        };
        assert_eq!(visible_packages(&packages, &filter).len(), packages.len());
    }

    #[test]
    fn client_filter_is_case_insensitive_substring() {
        let packages = sample();
        let filter = PackageFilter {
            client: "north".to_string(),
            ..PackageFilter::default()
        };
        let visible = visible_packages(&packages, &filter);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|pkg| pkg.client_name == "Northwind"));
    }

    #[test]
    fn client_filter_skipped_under_fixed_scope() {
        let packages = sample();
        let filter = PackageFilter {
            client: "no such client".to_string(),
            scoped_to_client: true,
            ..PackageFilter::default()
        };
        assert_eq!(visible_packages(&packages, &filter).len(), 3);
    }

    #[test]
    fn missing_serial_never_matches_a_serial_filter() {
        let packages = sample();
        let filter = PackageFilter {
            serial_number: "sn-".to_string(),
            ..PackageFilter::default()
        };
        let visible = visible_packages(&packages, &filter);
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|pkg| pkg.serial_number.is_some()));
    }

    #[test]
    fn tier_filter_is_exact() {
        let packages = sample();
        let filter = PackageFilter {
            tier: Some(StatusTier::Warning),
            ..PackageFilter::default()
        };
        let visible = visible_packages(&packages, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].package_type, "Server");
    }

    #[test]
    fn filtering_is_idempotent() {
        let packages = sample();
        let filter = PackageFilter {
            received_by: "dana".to_string(),
            ..PackageFilter::default()
        };
        let first: Vec<Uuid> = visible_packages(&packages, &filter)
            .iter()
            .map(|pkg| pkg.id)
            .collect();
        let second: Vec<Uuid> = visible_packages(&packages, &filter)
            .iter()
            .map(|pkg| pkg.id)
            .collect();
        assert_eq!(first, second);
        assert_eq!(
            tier_counts(&visible_packages(&packages, &filter)),
            tier_counts(&visible_packages(&packages, &filter))
        );
    }

    #[test]
    fn tier_counts_sum_to_subset_length() {
        let packages = sample();
        for filter in [
            PackageFilter::default(),
            PackageFilter {
                show_completed: true,
                ..PackageFilter::default()
            },
            PackageFilter {
                package_type: "laptop".to_string(),
                show_completed: true,
                ..PackageFilter::default()
            },
            PackageFilter {
                tier: Some(StatusTier::Critical),
                ..PackageFilter::default()
            },
        ] {
            let visible = visible_packages(&packages, &filter);
            assert_eq!(tier_counts(&visible).total(), visible.len());
        }
    }
}
