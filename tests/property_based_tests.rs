//! Property-based tests for loading, filtering and normalization

use gpu_timeline::filter::{multi_gpu, single_gpu, RowFilter};
use gpu_timeline::timeline::{baseline, normalize, GroupTimeline, ROWS_PER_SERIES};
use gpu_timeline::trace::{Lane, TraceRow, TraceTable};
use proptest::prelude::*;

fn row_strategy() -> impl Strategy<Value = Vec<i64>> {
    (
        0i64..2,
        0i64..2,
        0i64..2,
        prop::collection::vec(0i64..1_000_000_000_000, 4),
    )
        .prop_map(|(mode, gpu, lane, ts)| {
            let mut fields = vec![mode, gpu, lane];
            fields.extend(ts);
            fields
        })
}

fn render(rows: &[Vec<i64>]) -> String {
    rows.iter()
        .map(|r| {
            let line: Vec<String> = r.iter().map(i64::to_string).collect();
            format!("{}\n", line.join(" "))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_parse_preserves_every_row(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let table = TraceTable::parse(&render(&rows)).unwrap();
        prop_assert_eq!(table.len(), rows.len());
        for (row, fields) in table.rows().iter().zip(&rows) {
            prop_assert_eq!(row.timestamps(), &fields[3..]);
        }
    }

    #[test]
    fn prop_normalized_minimum_is_zero(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let table = TraceTable::parse(&render(&rows)).unwrap();
        let base = baseline(table.rows()).unwrap();
        let min = table
            .rows()
            .iter()
            .flat_map(|r| normalize(r, base).timestamps)
            .min();
        prop_assert_eq!(min, Some(0));
    }

    #[test]
    fn prop_groups_partition_known_rows(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let table = TraceTable::parse(&render(&rows)).unwrap();
        let total = single_gpu(&table).len() + multi_gpu(&table, 0).len() + multi_gpu(&table, 1).len();
        prop_assert_eq!(total, table.len());
    }

    #[test]
    fn prop_lane_filter_matches_column(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let table = TraceTable::parse(&render(&rows)).unwrap();
        let kernels = RowFilter::all().lane(Lane::Kernel).select(table.rows()).len();
        let expected = rows.iter().filter(|r| r[2] == 0).count();
        prop_assert_eq!(kernels, expected);
    }

    #[test]
    fn prop_full_group_segments_start_at_or_after_zero(
        offset in 0i64..1_000_000_000,
        gaps in prop::collection::vec(1i64..10_000, 10),
    ) {
        let mut text = String::new();
        for (i, gap) in gaps.iter().enumerate() {
            let lane = i % 2;
            let t = offset + i as i64 * 20_000;
            text.push_str(&format!("0 0 {lane} {t} {} {} {}\n", t + 1, t + gap, t + 2 * gap));
        }
        let table = TraceTable::parse(&text).unwrap();
        let rows: Vec<&TraceRow> = table.rows().iter().collect();
        let group = GroupTimeline::from_rows(&rows, ROWS_PER_SERIES);

        prop_assert_eq!(group.baseline, offset);
        for segment in group.kernel.segments.iter().chain(&group.runtime.segments) {
            prop_assert!(segment.from.x >= 0.0);
            prop_assert!(segment.to.x >= segment.from.x);
        }
    }
}
