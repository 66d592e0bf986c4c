use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;

use crate::core::failure::FailureKind;
use crate::core::pipeline::benchmarking::handle_benchmarking;
use crate::core::traits::executor::Executor;
use crate::domain::{BenchmarkJob, BenchmarkSet};
use crate::native::executor::NativeExecutor;
use crate::web::browser::MockBrowserLauncher;
use crate::web::server::{bind_dashboard, serve_dashboard};
use crate::web::template::DashboardTemplate;

async fn http_get(addr: std::net::SocketAddr) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("Failed to connect");
    stream
        .write_all(b"GET / HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
        .await
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

async fn bundled_template() -> DashboardTemplate {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/index.html");
    DashboardTemplate::load(&path)
        .await
        .expect("Bundled template should load")
}

#[tokio::test]
async fn test_benchmark_output_reaches_dashboard() {
    let listener = bind_dashboard("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut launcher = MockBrowserLauncher::new();
    launcher.expect_open().return_const(true);

    let (res_tx, res_rx) = mpsc::channel::<BenchmarkSet>(16);
    let (job_tx, job_rx) = mpsc::channel::<BenchmarkJob>(16);
    handle_benchmarking(res_tx, job_rx, Arc::new(NativeExecutor::new()));

    tokio::spawn(serve_dashboard(
        listener,
        Arc::new(bundled_template().await),
        res_rx,
        Arc::new(launcher),
    ));

    job_tx
        .send(BenchmarkJob {
            label: "integration".to_string(),
            dir: ".".into(),
            command: "sh".to_string(),
            args: vec![
                "-c".to_string(),
                "echo 'BenchmarkIntegration-8 1000 42 ns/op'".to_string(),
            ],
        })
        .await
        .unwrap();

    let mut response = String::new();
    for _ in 0..50 {
        response = http_get(addr).await;
        if response.contains("BenchmarkIntegration-8") {
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains(r#""label":"integration""#));
    assert!(response.contains("BenchmarkIntegration-8 1000 42 ns/op"));
}

#[tokio::test]
async fn test_dashboard_serves_before_any_results() {
    let listener = bind_dashboard("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut launcher = MockBrowserLauncher::new();
    launcher.expect_open().return_const(false);
    let (_res_tx, res_rx) = mpsc::channel::<BenchmarkSet>(1);

    tokio::spawn(serve_dashboard(
        listener,
        Arc::new(bundled_template().await),
        res_rx,
        Arc::new(launcher),
    ));

    let response = http_get(addr).await;

    assert!(response.starts_with("HTTP/1.1 200 OK"));
    assert!(response.contains("const sets = [];"));
}

#[tokio::test]
async fn test_failing_command_is_classified() {
    let executor = NativeExecutor::new();

    let failure = executor
        .run(
            Path::new("."),
            "sh",
            &[
                "-c".to_string(),
                "printf \"can't load package: package nope\\nmore\\nlines\\n\" >&2; exit 1"
                    .to_string(),
            ],
        )
        .await
        .unwrap_err();

    assert_eq!(failure.kind, FailureKind::BuildFailed);
    assert_eq!(failure.to_string(), format!("failed: {}", failure.stderr));
}
