use super::*;

fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

#[tokio::test]
async fn run_and_wait_reports_success() {
    let runner = SystemRunner::new();
    let code = runner.run_and_wait(&argv(&["true"])).await;
    assert_eq!(code, 0);
}

#[tokio::test]
async fn run_and_wait_reports_nonzero_exit() {
    let runner = SystemRunner::new();
    let code = runner.run_and_wait(&argv(&["false"])).await;
    assert_ne!(code, 0);
}

#[tokio::test]
async fn run_and_wait_missing_binary_is_not_fatal() {
    let runner = SystemRunner::new();
    let code = runner.run_and_wait(&argv(&["/nonexistent/binary"])).await;
    assert_eq!(code, 127);
}

#[tokio::test]
async fn run_and_capture_returns_both_streams() {
    let runner = SystemRunner::new();
    let (stdout, _stderr) = runner.run_and_capture(&argv(&["echo", "hello"])).await;
    assert_eq!(String::from_utf8_lossy(&stdout).trim(), "hello");
}

#[tokio::test]
async fn run_and_capture_returns_output_even_on_failure() {
    let runner = SystemRunner::new();
    let (stdout, stderr) = runner
        .run_and_capture(&argv(&["sh", "-c", "echo out; echo err 1>&2; exit 1"]))
        .await;
    assert_eq!(String::from_utf8_lossy(&stdout).trim(), "out");
    assert_eq!(String::from_utf8_lossy(&stderr).trim(), "err");
}
