use serde::{Deserialize, Serialize};

use crate::types::RsvpResponse;

/// Aggregated RSVP counts for a single event.
///
/// Buckets that have no rows in the database are reported as zero, so the
/// shape of the tally is stable regardless of which responses exist.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct RsvpTally {
    /// Number of attending responses.
    pub yes: i64,
    /// Number of declined responses.
    pub no: i64,
    /// Number of undecided responses.
    pub maybe: i64,
    /// Total number of responses.
    pub total: i64,
}

impl RsvpTally {
    /// Builds a tally from grouped `(response, count)` rows.
    pub fn from_counts(counts: &[(RsvpResponse, i64)]) -> Self {
        let mut tally = Self::default();
        for (response, count) in counts {
            match response {
                RsvpResponse::Yes => tally.yes += count,
                RsvpResponse::No => tally.no += count,
                RsvpResponse::Maybe => tally.maybe += count,
            }
            tally.total += count;
        }

        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_missing_buckets_with_zero() {
        let tally = RsvpTally::from_counts(&[(RsvpResponse::Yes, 3)]);
        assert_eq!(tally.yes, 3);
        assert_eq!(tally.no, 0);
        assert_eq!(tally.maybe, 0);
        assert_eq!(tally.total, 3);
    }

    #[test]
    fn sums_all_buckets_into_total() {
        let counts = [
            (RsvpResponse::Yes, 5),
            (RsvpResponse::No, 2),
            (RsvpResponse::Maybe, 1),
        ];

        let tally = RsvpTally::from_counts(&counts);
        assert_eq!(tally.yes, 5);
        assert_eq!(tally.no, 2);
        assert_eq!(tally.maybe, 1);
        assert_eq!(tally.total, 8);
    }

    #[test]
    fn empty_counts_produce_empty_tally() {
        assert_eq!(RsvpTally::from_counts(&[]), RsvpTally::default());
    }
}
