use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregates persisted next to a team's activity scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub total_score: i64,
    pub participate_num: i64,
}

/// Recomputes a team's totals from its activity score map.
///
/// `total_score` is the plain sum of all scores. `participate_num` counts
/// activities with a non-zero score, so an activity scored 0 is treated the
/// same as one that has not been scored yet.
pub fn aggregate(activities: &BTreeMap<String, i64>) -> ScoreSummary {
    activities
        .values()
        .fold(ScoreSummary::default(), |summary, &score| ScoreSummary {
            total_score: summary.total_score.saturating_add(score),
            participate_num: summary.participate_num + i64::from(score != 0),
        })
}
