use drive_consumer::{
    settings::Settings,
    startup::{App, PipelineSummary},
};

pub struct TestRun {
    pub summary: PipelineSummary,
    /// Output lines sorted for comparison, the pipeline itself guarantees no
    /// ordering between drives.
    pub lines: Vec<String>,
}

pub async fn run_pipeline(input: &str) -> TestRun {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("paths.csv");
    let output_path = dir.path().join("fares.out");
    std::fs::write(&input_path, input).unwrap();

    let settings = Settings::new(&input_path, &output_path).unwrap();
    let summary = App::new(settings).run().await.unwrap();

    let mut lines: Vec<String> = std::fs::read_to_string(&output_path)
        .unwrap()
        .lines()
        .map(Into::into)
        .collect();
    lines.sort();

    TestRun { summary, lines }
}
