use drive_consumer::{error::Error, settings::Settings, startup::App};

use crate::helper::run_pipeline;

const SLOW_DRIVE: &str = "\
1,37.966660,23.728308,1405594957
1,37.966627,23.728263,1405594966
1,37.966625,23.728263,1405594974
1,37.966613,23.728375,1405594984
1,37.966203,23.728597,1405594992
1,37.966195,23.728613,1405595001
1,37.966195,23.728613,1405595009
1,37.966195,23.728613,1405595017
1,37.966195,23.728613,1405595026
1,37.966195,23.728613,1405595034
";

// Two identical coordinates 9 seconds apart: flag plus 9 idle seconds.
fn idle_pair(drive_id: i64, start: i64) -> String {
    format!(
        "{drive_id},37.95,23.70,{start}\n{drive_id},37.95,23.70,{end}\n",
        end = start + 9
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pipeline_emits_one_result_per_drive() {
    let input = format!("{SLOW_DRIVE}{}", idle_pair(2, 1405595100));
    let run = run_pipeline(&input).await;

    assert_eq!(2, run.summary.drives);
    assert_eq!(2, run.summary.results_written);
    assert_eq!(vec!["1, 1.56", "2, 1.33"], run.lines);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_non_contiguous_runs_of_a_drive_id_stay_separate() {
    let input = format!(
        "{}{}{}",
        idle_pair(1, 1405595100),
        idle_pair(2, 1405595200),
        idle_pair(1, 1405595300)
    );
    let run = run_pipeline(&input).await;

    assert_eq!(3, run.summary.drives);
    assert_eq!(vec!["1, 1.33", "1, 1.33", "2, 1.33"], run.lines);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_pipeline_is_idempotent_over_the_result_multiset() {
    let input = format!(
        "{SLOW_DRIVE}{}{}",
        idle_pair(2, 1405595100),
        idle_pair(3, 1405595200)
    );

    let first = run_pipeline(&input).await;
    let second = run_pipeline(&input).await;

    assert_eq!(first.lines, second.lines);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_malformed_records_are_skipped() {
    let input = format!(
        "not-a-drive-id,37.95,23.70,1405595100\n{}garbage\n1,bad,lat,record\n",
        idle_pair(2, 1405595200)
    );
    let run = run_pipeline(&input).await;

    assert_eq!(vec!["2, 1.33"], run.lines);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_degenerate_drive_produces_no_result_line() {
    let input = format!(
        "{}5,37.95,23.70,1405595250\n{}",
        idle_pair(2, 1405595100),
        idle_pair(3, 1405595300)
    );
    let run = run_pipeline(&input).await;

    // The single-sample drive is sealed as a batch but reports nothing.
    assert_eq!(3, run.summary.drives);
    assert_eq!(2, run.summary.results_written);
    assert_eq!(vec!["2, 1.33", "3, 1.33"], run.lines);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_input_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::new(
        &dir.path().join("does-not-exist.csv"),
        &dir.path().join("fares.out"),
    )
    .unwrap();

    let error = App::new(settings).run().await.unwrap_err();
    assert!(matches!(error, Error::OpenInput { .. }));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_uncreatable_output_sink_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("paths.csv");
    std::fs::write(&input_path, idle_pair(1, 1405595100)).unwrap();

    let settings = Settings::new(
        &input_path,
        &dir.path().join("missing-dir").join("fares.out"),
    )
    .unwrap();

    let error = App::new(settings).run().await.unwrap_err();
    assert!(matches!(error, Error::CreateOutput { .. }));
}
