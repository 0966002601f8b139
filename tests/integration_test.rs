use quiz_grader::clients::JudgeClient;
use quiz_grader::config::Config;
use quiz_grader::models::{CodingQuestion, Language, QuestionCatalog, QuestionKind};
use quiz_grader::services::verdict_builder::{ALL_PASSED, SYNTAX_ISSUES};
use quiz_grader::workflow::{GradingFlow, QuizPhase, QuizSession, SessionCtx};
use quiz_grader::{GradingError, GradingMode};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_test::{assert_err, assert_ok};

const JS_SUM: &str = "function sum(a, b) {\n  return a + b;\n}";
const JS_BAD_SUM: &str = "function sum(a, b) {\n  const c = a + b;\n  return c;\n}";

fn catalog() -> QuestionCatalog {
    QuestionCatalog::builtin().expect("内置题库应该可以加载")
}

fn js_sum_question() -> CodingQuestion {
    match catalog().find(Language::JavaScript, QuestionKind::Coding, 1) {
        Some(quiz_grader::models::Question::Coding(q)) => q,
        other => panic!("题库中缺少 JavaScript 编程题 1: {:?}", other),
    }
}

fn remote_flow(base_url: String, timeout_ms: u64) -> GradingFlow {
    let config = Config {
        grading_mode: GradingMode::Remote,
        judge_api_base_url: base_url,
        judge_api_key: "test-key".to_string(),
        judge_timeout_ms: timeout_ms,
        ..Config::default()
    };
    GradingFlow::from_config(&config, &catalog()).expect("远程评测流程应该可以创建")
}

/// 读取一个完整的 HTTP 请求（请求头 + Content-Length 指定的请求体）
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        let text = String::from_utf8_lossy(&buf).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())
                        .flatten()
                })
                .unwrap_or(0);
            if buf.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).to_string()
}

/// 启动一个只响应一次的假评测服务，返回地址和收到的请求
async fn fake_judge(status_line: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::channel(1);

    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let request = read_request(&mut stream).await;
            let _ = tx.send(request).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = stream.write_all(response.as_bytes()).await;
            let _ = stream.shutdown().await;
        }
    });

    (format!("http://{}", addr), rx)
}

#[tokio::test]
async fn remote_judge_accepted_response() {
    let (base_url, mut requests) = fake_judge(
        "HTTP/1.1 201 Created",
        r#"{"stdout":"Test case 1: Passed\nTest case 2: Passed\nTest case 3: Passed\nAll tests passed successfully!\n","stderr":null,"compile_output":null,"status":{"id":3,"description":"Accepted"}}"#,
    )
    .await;
    let flow = remote_flow(base_url, 5_000);

    let report = flow.grade_detailed(JS_SUM, &js_sum_question()).await;
    assert_eq!(report.graded_by, GradingMode::Remote);
    assert!(report.verdict.passed);
    assert_eq!(report.verdict.message, ALL_PASSED);
    assert_eq!(
        report.verdict.details,
        vec!["Test case 1: Passed", "Test case 2: Passed", "Test case 3: Passed"]
    );
    assert!(report.verdict.output.is_some());

    let request = requests.recv().await.expect("假评测服务应该收到请求");
    assert!(request.starts_with("POST /submissions/?base64_encoded=false&wait=true"));
    assert!(request.to_ascii_lowercase().contains("x-rapidapi-key: test-key"));
    assert!(request.contains("\"language_id\":63"));
    assert!(request.contains("All tests passed successfully!"));
}

#[tokio::test]
async fn remote_compile_error_is_reported() {
    let (base_url, _requests) = fake_judge(
        "HTTP/1.1 201 Created",
        r#"{"stdout":null,"compile_output":"SyntaxError: Unexpected token","status":{"id":6,"description":"Compilation Error"}}"#,
    )
    .await;
    let flow = remote_flow(base_url, 5_000);

    let verdict = flow.grade(JS_SUM, &js_sum_question()).await;
    assert!(!verdict.passed);
    assert_eq!(verdict.message, "There appears to be a syntax error in your code.");
    assert_eq!(verdict.details, vec!["Review your logic and try again."]);
}

#[tokio::test]
async fn unreachable_judge_falls_back_to_heuristics() {
    // 绑定后立即释放端口，保证连接被拒绝
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let flow = remote_flow(format!("http://{}", addr), 2_000);
    let heuristic = GradingFlow::heuristic();
    let question = js_sum_question();

    for code in [JS_SUM, JS_BAD_SUM, "let x = 1;"] {
        let report = flow.grade_detailed(code, &question).await;
        assert_eq!(report.graded_by, GradingMode::Heuristic);
        assert_eq!(report.verdict, heuristic.grade(code, &question).await);
    }
}

#[tokio::test]
async fn bad_status_falls_back_to_heuristics() {
    let (base_url, _requests) = fake_judge("HTTP/1.1 429 Too Many Requests", r#"{"message":"quota"}"#).await;
    let flow = remote_flow(base_url, 5_000);

    let report = flow.grade_detailed(JS_SUM, &js_sum_question()).await;
    assert_eq!(report.graded_by, GradingMode::Heuristic);
    assert!(report.verdict.passed);
    assert!(report.verdict.output.is_none());
}

#[tokio::test]
async fn malformed_response_falls_back_to_heuristics() {
    let (base_url, _requests) = fake_judge("HTTP/1.1 201 Created", "<html>not json</html>").await;
    let flow = remote_flow(base_url, 5_000);
    let question = js_sum_question();

    let report = flow.grade_detailed(JS_BAD_SUM, &question).await;
    assert_eq!(report.graded_by, GradingMode::Heuristic);
    assert_eq!(report.verdict, GradingFlow::heuristic().grade(JS_BAD_SUM, &question).await);
}

#[tokio::test]
async fn hanging_judge_times_out_and_falls_back() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        if let Ok((stream, _)) = listener.accept().await {
            // 保持连接但不响应
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(stream);
        }
    });

    let flow = remote_flow(format!("http://{}", addr), 300);
    let started = std::time::Instant::now();
    let report = flow.grade_detailed(JS_BAD_SUM, &js_sum_question()).await;

    assert!(started.elapsed() < Duration::from_secs(10));
    assert_eq!(report.graded_by, GradingMode::Heuristic);
    assert!(!report.verdict.passed);
}

#[tokio::test]
async fn session_end_to_end_score() {
    let catalog = catalog();
    let session = QuizSession::start(
        SessionCtx::new("stu-001", "Test Student", Language::JavaScript),
        &catalog,
        Arc::new(GradingFlow::heuristic()),
    );

    for q in catalog.mcq_for(Language::JavaScript) {
        assert_ok!(session.select_option(q.id, &q.correct_option_id));
        assert_ok!(session.next_question());
    }
    assert_eq!(session.phase(), QuizPhase::Coding);

    let verdict = assert_ok!(session.run_tests(1, JS_SUM).await);
    assert!(verdict.passed);
    assert_ok!(session.next_question());

    // 校验失败也算一次尝试
    let verdict = assert_ok!(session.run_tests(2, "isPalindrome = s => s").await);
    assert_eq!(verdict.message, SYNTAX_ISSUES);
    assert_err!(session.next_question());

    let verdict = assert_ok!(
        session
            .run_tests(2, "function isPalindrome(str) {\n  return str === str.split('').reverse().join('');\n}")
            .await
    );
    assert!(verdict.passed);
    assert_eq!(session.attempt().coding[1].attempt_count, 2);
    assert_eq!(assert_ok!(session.next_question()), QuizPhase::Completed);

    let outcome = session.complete();
    // (30 + 20 + 18) / 70
    assert_eq!(outcome.score_percent, 97);
    assert!(outcome.certificate_eligible);
    assert!(matches!(
        session.run_tests(2, JS_SUM).await,
        Err(GradingError::QuizCompleted)
    ));
}

#[test]
fn judge_client_builds_from_default_config() {
    let client = tokio_test::block_on(async { JudgeClient::new(&Config::default()) });
    assert_ok!(client);
}

#[tokio::test]
async fn app_replays_repository_attempts() {
    let log_file = std::env::temp_dir().join(format!("quiz_grader_app_{}.txt", std::process::id()));
    let config = Config {
        catalog_folder: concat!(env!("CARGO_MANIFEST_DIR"), "/catalog").to_string(),
        attempts_folder: concat!(env!("CARGO_MANIFEST_DIR"), "/attempts").to_string(),
        output_log_file: log_file.to_string_lossy().to_string(),
        max_concurrent_attempts: 2,
        ..Config::default()
    };

    let app = assert_ok!(quiz_grader::App::initialize(config).await);
    let stats = assert_ok!(app.run().await);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.success, 3);
    assert_eq!(stats.failed, 0);

    let mut scores: Vec<(String, u32)> = stats
        .outcomes
        .iter()
        .map(|o| (o.student_id.clone(), o.score_percent))
        .collect();
    scores.sort();
    assert_eq!(
        scores,
        vec![
            ("stu-001".to_string(), 80),
            ("stu-002".to_string(), 29),
            ("stu-003".to_string(), 71),
        ]
    );
    let summary = stats.summary().expect("应该有成绩统计");
    assert_eq!(summary.average, 60);

    let log = std::fs::read_to_string(&log_file).unwrap();
    assert_eq!(log.lines().filter(|l| l.starts_with("学生 ")).count(), 3);
    let _ = std::fs::remove_file(&log_file);
}
