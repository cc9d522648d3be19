use linkplot::data::failures::failure_regions;

fn seconds(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[test]
fn no_failures_yields_no_regions() {
    let t = seconds(10);
    let failed = vec![false; 10];
    assert!(failure_regions(&t, &failed, 0.0, 10.0).is_empty());
    assert!(failure_regions(&[], &[], 0.0, 10.0).is_empty());
}

#[test]
fn single_run_is_widened_to_adjacent_good_samples() {
    let t = seconds(10);
    let mut failed = vec![false; 10];
    failed[3] = true;
    failed[4] = true;

    let regions = failure_regions(&t, &failed, 0.0, 9.0);
    assert_eq!(
        regions,
        vec![(2.0, 5.0)],
        "region must touch the good samples on both sides"
    );
}

#[test]
fn run_at_array_edges_is_not_widened_past_the_data() {
    let t = seconds(10);
    let mut failed = vec![false; 10];
    failed[0] = true;
    failed[1] = true;
    failed[8] = true;
    failed[9] = true;

    let regions = failure_regions(&t, &failed, 0.0, 9.0);
    assert_eq!(regions, vec![(0.0, 2.0), (7.0, 9.0)]);
}

#[test]
fn multiple_runs_stay_separate() {
    let t = seconds(20);
    let mut failed = vec![false; 20];
    failed[2] = true;
    failed[10] = true;
    failed[11] = true;

    let regions = failure_regions(&t, &failed, 0.0, 19.0);
    assert_eq!(regions, vec![(1.0, 3.0), (9.0, 12.0)]);
}

#[test]
fn regions_are_clamped_to_the_view_range() {
    let t = seconds(10);
    let mut failed = vec![false; 10];
    failed[3] = true;
    failed[4] = true;

    let regions = failure_regions(&t, &failed, 3.5, 4.5);
    assert_eq!(regions, vec![(3.5, 4.5)]);
}

#[test]
fn degenerate_view_yields_no_regions() {
    let t = seconds(10);
    let failed = vec![true; 10];
    assert!(failure_regions(&t, &failed, 5.0, 5.0).is_empty());
    assert!(failure_regions(&t, &failed, 7.0, 3.0).is_empty());
}

#[test]
fn all_failed_is_one_full_region() {
    let t = seconds(10);
    let failed = vec![true; 10];
    let regions = failure_regions(&t, &failed, 0.0, 9.0);
    assert_eq!(regions, vec![(0.0, 9.0)]);
}
