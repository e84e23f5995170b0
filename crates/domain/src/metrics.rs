//! Per-entry training metrics derived from parsed set records.
//!
//! Failure sets (`reps == 0`) are retained in the record sequence but
//! excluded from volume, rep and 1RM calculations.

use crate::SetRecord;

/// Total volume, the sum of sets × reps × weight over all completed sets.
#[must_use]
pub fn total_volume(records: &[SetRecord]) -> f32 {
    records
        .iter()
        .filter(|record| record.reps > 0)
        .map(set_volume)
        .sum()
}

/// Average weight per set, weighted by set count, over records with a
/// recorded weight. Zero if no set has a weight.
#[must_use]
pub fn average_weight(records: &[SetRecord]) -> f32 {
    let weighted = records
        .iter()
        .filter(|record| record.weight > 0.0)
        .collect::<Vec<_>>();

    let total_sets = weighted.iter().map(|record| record.sets).sum::<u32>();

    if total_sets == 0 {
        return 0.0;
    }

    #[allow(clippy::cast_precision_loss)]
    let total_weight = weighted
        .iter()
        .map(|record| record.sets as f32 * record.weight)
        .sum::<f32>();

    #[allow(clippy::cast_precision_loss)]
    {
        total_weight / total_sets as f32
    }
}

/// Total repetitions over all completed sets.
#[must_use]
pub fn total_reps(records: &[SetRecord]) -> u32 {
    records
        .iter()
        .filter(|record| record.reps > 0)
        .map(|record| record.sets * record.reps)
        .sum()
}

/// Estimated one-rep max using the Epley formula `weight × (1 + reps / 30)`,
/// taken over all weighted, completed sets. Zero if no set qualifies.
#[must_use]
pub fn estimated_one_rm(records: &[SetRecord]) -> f32 {
    records
        .iter()
        .filter(|record| record.reps > 0 && record.weight > 0.0)
        .map(|record| {
            #[allow(clippy::cast_precision_loss)]
            {
                record.weight * (1.0 + record.reps as f32 / 30.0)
            }
        })
        .fold(0.0, f32::max)
}

/// The heaviest weight lifted and the rep count at that weight. Ties on
/// weight keep the larger rep count. `(0, 0)` for an empty sequence.
#[must_use]
pub fn max_weight_and_reps(records: &[SetRecord]) -> (f32, u32) {
    let mut max_weight = 0.0;
    let mut reps_at_max = 0;

    for record in records {
        if record.weight > max_weight {
            max_weight = record.weight;
            reps_at_max = record.reps;
        } else if record.weight == max_weight {
            reps_at_max = reps_at_max.max(record.reps);
        }
    }

    (max_weight, reps_at_max)
}

#[allow(clippy::cast_precision_loss)]
fn set_volume(record: &SetRecord) -> f32 {
    record.sets as f32 * record.reps as f32 * record.weight
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::set_notation::parse;

    use super::*;

    #[rstest]
    #[case("3x10x135", 4050.0)]
    #[case("2x8x155; failure", 2480.0)]
    #[case("failure", 0.0)]
    #[case("", 0.0)]
    fn test_total_volume(#[case] notation: &str, #[case] expected: f32) {
        assert_eq!(total_volume(&parse(notation)), expected);
    }

    #[rstest]
    #[case("3x10x135", 135.0)]
    #[case("2x8x155; failure", 155.0)]
    #[case("2x10x100; 2x8x120", 110.0)]
    #[case("3x10", 0.0)]
    #[case("", 0.0)]
    fn test_average_weight(#[case] notation: &str, #[case] expected: f32) {
        assert_eq!(average_weight(&parse(notation)), expected);
    }

    #[rstest]
    #[case("3x10x135", 30)]
    #[case("2x8x155; failure", 16)]
    #[case("failure", 0)]
    #[case("", 0)]
    fn test_total_reps(#[case] notation: &str, #[case] expected: u32) {
        assert_eq!(total_reps(&parse(notation)), expected);
    }

    #[test]
    fn test_estimated_one_rm_epley() {
        assert_approx_eq!(estimated_one_rm(&parse("1x5x200")), 233.333_33, 1e-3);
    }

    #[rstest]
    #[case("3x10", 0.0)]
    #[case("failure", 0.0)]
    #[case("", 0.0)]
    fn test_estimated_one_rm_no_qualifying_set(#[case] notation: &str, #[case] expected: f32) {
        assert_eq!(estimated_one_rm(&parse(notation)), expected);
    }

    #[rstest]
    #[case("", (0.0, 0))]
    #[case("3x10x135", (135.0, 10))]
    #[case("1x8x155; 1x10x155", (155.0, 10))]
    #[case("1x10x155; 1x8x155", (155.0, 10))]
    #[case("2x8x155; failure", (155.0, 8))]
    fn test_max_weight_and_reps(#[case] notation: &str, #[case] expected: (f32, u32)) {
        assert_eq!(max_weight_and_reps(&parse(notation)), expected);
    }
}
