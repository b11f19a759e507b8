//! End-to-end counts for both drivers, against the known numbers of
//! non-isomorphic configurations per size.

use convex_enum::{
    db::Tables,
    enumerate::{bfs, dfs},
};

fn bfs_counts(limit: u32) -> Vec<(u32, u64)> {
    let tables = Tables::new(limit);
    let mut sink = Vec::new();
    let summaries = bfs::enumerate(limit, &tables, &mut sink).expect("write to a vec");
    summaries
        .iter()
        .map(|summary| (summary.size, summary.tally.configurations))
        .collect()
}

fn dfs_count(limit: u32) -> u64 {
    let tables = Tables::new(limit);
    let mut sink = Vec::new();
    dfs::enumerate(limit, &tables, &mut sink)
        .expect("write to a vec")
        .configurations
}

// The BDD back end enumerates paths rather than models, so the deep sweeps are
// cross-checked only for the complete back ends; see tests/backends.rs for the
// BDD-specific checks.
#[cfg(all(not(feature = "order-types"), not(feature = "bdd")))]
mod plain {
    use super::*;

    const KNOWN: &[(u32, u64)] = &[(3, 1), (4, 2), (5, 3), (6, 16), (7, 135)];

    #[test]
    fn bfs_matches_known_counts() {
        let counts = bfs_counts(7);
        for (size, expected) in KNOWN {
            let (_, count) = counts
                .iter()
                .find(|(s, _)| s == size)
                .unwrap_or_else(|| panic!("no summary for size {size}"));
            assert_eq!(count, expected, "size {size}");
        }
    }

    #[test]
    fn dfs_matches_known_counts() {
        for (limit, expected) in KNOWN {
            assert_eq!(dfs_count(*limit), *expected, "limit {limit}");
        }
    }

    #[test]
    fn boundary_size_three() {
        assert_eq!(bfs_counts(3), vec![(3, 1)]);
        assert_eq!(dfs_count(3), 1);
    }

    #[cfg(not(feature = "print"))]
    #[test]
    fn summary_lines() {
        let tables = Tables::new(6);

        let mut sink = Vec::new();
        bfs::enumerate(6, &tables, &mut sink).expect("write to a vec");
        let output = String::from_utf8(sink).expect("utf8 output");
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Configs of size 4: 2"));
        assert!(lines[1].starts_with("Configs of size 5: 3"));
        assert!(lines[2].starts_with("Configs of size 6: 16"));

        let mut sink = Vec::new();
        dfs::enumerate(6, &tables, &mut sink).expect("write to a vec");
        let output = String::from_utf8(sink).expect("utf8 output");
        assert_eq!(output, "Configs of size 6: 16\n");
    }

    #[cfg(not(feature = "print"))]
    #[test]
    fn boundary_line_size_three() {
        let tables = Tables::new(3);
        let mut sink = Vec::new();
        dfs::enumerate(3, &tables, &mut sink).expect("write to a vec");
        assert_eq!(String::from_utf8(sink).unwrap(), "Configs of size 3: 1\n");
    }

    // Slow: roughly a minute of model enumeration.
    #[ignore]
    #[test]
    fn size_eight() {
        assert_eq!(dfs_count(8), 3315);
    }
}

#[cfg(all(feature = "order-types", not(feature = "bdd")))]
mod order_types {
    use super::*;

    fn dfs_tally(limit: u32) -> (u64, u64) {
        let tables = Tables::new(limit);
        let mut sink = Vec::new();
        let tally = dfs::enumerate(limit, &tables, &mut sink).expect("write to a vec");
        (tally.configurations, tally.mirror_symmetric)
    }

    #[test]
    fn counts_up_to_reflection() {
        assert_eq!(dfs_tally(3), (1, 1));
        assert_eq!(dfs_tally(4), (2, 2));
        assert_eq!(dfs_tally(5), (3, 3));
        assert_eq!(dfs_tally(6), (14, 12));
    }

    #[test]
    fn bfs_agrees_with_dfs() {
        let counts = bfs_counts(6);
        assert_eq!(counts.last(), Some(&(6, 14)));
    }

    #[test]
    fn mirror_symmetric_bounded_by_total() {
        let tables = Tables::new(7);
        let mut sink = Vec::new();
        let summaries = bfs::enumerate(7, &tables, &mut sink).expect("write to a vec");
        for summary in summaries {
            assert!(summary.tally.mirror_symmetric <= summary.tally.configurations);
        }
    }
}

mod agreement {
    use super::*;

    #[cfg(not(feature = "bdd"))]
    #[test]
    fn drivers_agree_up_to_seven() {
        for limit in 3..=7 {
            let (_, bfs_last) = *bfs_counts(limit).last().expect("at least one summary");
            assert_eq!(bfs_last, dfs_count(limit), "limit {limit}");
        }
    }

    #[cfg(feature = "bdd")]
    #[test]
    fn drivers_agree_up_to_five() {
        for limit in 3..=5 {
            let (_, bfs_last) = *bfs_counts(limit).last().expect("at least one summary");
            assert_eq!(bfs_last, dfs_count(limit), "limit {limit}");
        }
    }
}
