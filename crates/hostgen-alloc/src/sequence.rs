//! Sequence estimation over previously issued hostnames.
//!
//! Matching is deliberately loose: a record counts when its hostname starts
//! with the prefix and merely *contains* the environment and server-function
//! codes anywhere. A short environment code such as `P` will therefore also
//! match hostnames that carry a `P` inside another token.

use std::ops::RangeInclusive;

use hostgen_core::SegmentParsing;
use hostgen_state::HostnameRecord;
use rand::Rng;

use crate::prefix::OsPrefix;

/// Range of the random seed used when no previous sequence is known.
pub const SEED_RANGE: RangeInclusive<u64> = 10_000..=99_999;

/// Width of the fixed numeric window after the prefix.
pub const FIXED_WINDOW_WIDTH: usize = 5;

/// Draw a random five-digit sequence.
pub fn random_seed() -> u64 {
    rand::thread_rng().gen_range(SEED_RANGE)
}

/// Whether `hostname` belongs to the (prefix, environment, function) group.
pub fn matches_group(
    hostname: &str,
    prefix: OsPrefix,
    environment: &str,
    server_function: &str,
) -> bool {
    hostname.starts_with(prefix.as_char())
        && hostname.contains(environment)
        && hostname.contains(server_function)
}

/// Read the numeric segment that follows the one-character prefix.
///
/// Returns `None` when the segment does not start with a digit.
pub fn extract_segment(hostname: &str, parsing: SegmentParsing) -> Option<u64> {
    let after_prefix = hostname.chars().skip(1);
    let digits: String = match parsing {
        // Leading digits of the window; "12DAP" reads as 12.
        SegmentParsing::FixedWindow => after_prefix
            .take(FIXED_WINDOW_WIDTH)
            .take_while(|c| c.is_ascii_digit())
            .collect(),
        SegmentParsing::DigitRun => after_prefix.take_while(|c| c.is_ascii_digit()).collect(),
    };
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Outcome of scanning the record set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Estimate {
    /// At least one record matched; the next sequence is `max + 1`.
    Next(u64),
    /// No record matched the group.
    NoMatches,
    /// A matching record's segment could not be read.
    Malformed { hostname: String },
}

/// Compute the next sequence for a group from a full record listing.
pub fn estimate(
    records: &[HostnameRecord],
    prefix: OsPrefix,
    environment: &str,
    server_function: &str,
    parsing: SegmentParsing,
) -> Estimate {
    let mut highest: Option<u64> = None;
    for record in records {
        let hostname = record.hostname.as_str();
        if !matches_group(hostname, prefix, environment, server_function) {
            continue;
        }
        match extract_segment(hostname, parsing) {
            Some(n) => highest = Some(highest.map_or(n, |h| h.max(n))),
            None => {
                return Estimate::Malformed {
                    hostname: hostname.to_string(),
                };
            }
        }
    }
    match highest {
        Some(max) => Estimate::Next(max.saturating_add(1)),
        None => Estimate::NoMatches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::record;

    #[test]
    fn next_is_one_past_the_maximum() {
        let records = vec![
            record("W00005PAPP0"),
            record("W00012PAPP0"),
            record("W00007PAPP0"),
        ];
        let est = estimate(&records, OsPrefix::W, "P", "APP", SegmentParsing::FixedWindow);
        assert_eq!(est, Estimate::Next(13));
    }

    #[test]
    fn other_groups_are_ignored() {
        let records = vec![
            record("W50000PAPP0"),
            record("L90000PAPP0"),
            record("W80000DSQL0"),
        ];
        let est = estimate(&records, OsPrefix::W, "P", "APP", SegmentParsing::FixedWindow);
        assert_eq!(est, Estimate::Next(50001));
    }

    #[test]
    fn empty_group_reports_no_matches() {
        let records = vec![record("L12345PSQL0")];
        let est = estimate(&records, OsPrefix::W, "P", "APP", SegmentParsing::FixedWindow);
        assert_eq!(est, Estimate::NoMatches);
        assert_eq!(
            estimate(&[], OsPrefix::L, "P", "SQL", SegmentParsing::FixedWindow),
            Estimate::NoMatches
        );
    }

    #[test]
    fn containment_matching_is_loose() {
        // "D" appears inside "DOM" even though the environment is "P".
        let records = vec![record("W40000PDOM0")];
        let est = estimate(&records, OsPrefix::W, "D", "DOM", SegmentParsing::FixedWindow);
        assert_eq!(est, Estimate::Next(40001));
    }

    #[test]
    fn fixed_window_truncates_long_sequences() {
        assert_eq!(extract_segment("W123456PAPP0", SegmentParsing::FixedWindow), Some(12345));
        assert_eq!(extract_segment("W123456PAPP0", SegmentParsing::DigitRun), Some(123456));
    }

    #[test]
    fn fixed_window_reads_leading_digits_only() {
        assert_eq!(extract_segment("W12DAPP0", SegmentParsing::FixedWindow), Some(12));
        assert_eq!(extract_segment("W12DAPP0", SegmentParsing::DigitRun), Some(12));
    }

    #[test]
    fn non_numeric_segment_is_none() {
        assert_eq!(extract_segment("WABCDEPAPP0", SegmentParsing::FixedWindow), None);
        assert_eq!(extract_segment("W", SegmentParsing::DigitRun), None);
        assert_eq!(extract_segment("", SegmentParsing::FixedWindow), None);
    }

    #[test]
    fn malformed_match_is_reported() {
        let records = vec![record("W10000PAPP0"), record("WLEGACYPAPP0")];
        let est = estimate(&records, OsPrefix::W, "P", "APP", SegmentParsing::FixedWindow);
        assert_eq!(
            est,
            Estimate::Malformed {
                hostname: "WLEGACYPAPP0".to_string()
            }
        );
    }

    #[test]
    fn random_seed_is_five_digits() {
        for _ in 0..1000 {
            assert!(SEED_RANGE.contains(&random_seed()));
        }
    }
}
