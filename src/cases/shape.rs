use std::cmp::Ordering;

use crate::domain::{CaseRecord, OpenCaseRow};

/// Most cases the dashboard ever shows. Extra cases are not reported.
pub const CASE_CAP: usize = 50;

/// Turns raw store rows into what the map displays:
/// drop unlocated rows, order, cap, flatten.
pub fn shape_open_cases(rows: Vec<OpenCaseRow>) -> Vec<CaseRecord> {
    let mut located = retain_located(rows);
    located.sort_by(compare_for_display);
    located.truncate(CASE_CAP);
    located
        .into_iter()
        .filter_map(CaseRecord::from_row)
        .collect()
}

/// Drops rows whose site has no coordinate. This is a completeness filter,
/// not a failure.
pub fn retain_located(rows: Vec<OpenCaseRow>) -> Vec<OpenCaseRow> {
    rows.into_iter()
        .filter(|row| {
            let located = row.site.coordinate.is_some();
            if !located {
                log::debug!(
                    "case {} skipped: site {} has no coordinate",
                    row.case_number,
                    row.site.id
                );
            }
            located
        })
        .collect()
}

/// Delay descending with missing delays last, then newest first.
pub fn compare_for_display(a: &OpenCaseRow, b: &OpenCaseRow) -> Ordering {
    let by_delay = match (a.estimated_delay, b.estimated_delay) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_delay.then_with(|| b.created_at.cmp(&a.created_at))
}
