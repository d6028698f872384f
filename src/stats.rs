use crate::types::{ColumnStats, Record};
use crate::util::coerce_numeric;
use std::collections::HashMap;

/// Compute per-column aggregate statistics over every numerically-coercible
/// value in the record set.
///
/// Columns with no coercible values produce no entry at all; that is not an
/// error, the column is simply non-numeric. One full pass over
/// records x columns, no pruning: input sizes are bounded upstream, so
/// correctness wins over speed.
pub fn compute_stats(records: &[Record], columns: &[String]) -> HashMap<String, ColumnStats> {
    let mut stats = HashMap::new();
    for column in columns {
        let mut sum = 0.0;
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut count = 0usize;
        for record in records {
            let Some(value) = record.get(column) else {
                continue;
            };
            let Some(n) = coerce_numeric(value) else {
                continue;
            };
            sum += n;
            min = min.min(n);
            max = max.max(n);
            count += 1;
        }
        if count == 0 {
            continue;
        }
        stats.insert(
            column.clone(),
            ColumnStats {
                sum,
                average: sum / count as f64,
                min,
                max,
                count,
            },
        );
    }
    stats
}
