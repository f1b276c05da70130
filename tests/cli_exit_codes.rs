// Process exit status of the crclink binary: 0 for every verdict, 1 for
// input, transport and empty-payload failures.

use std::io::Write;
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Child, Command, Output, Stdio};
use std::thread;
use std::time::Duration;

const BIN: &str = env!("CARGO_BIN_EXE_crclink");

fn crclink(args: &[&str]) -> Command {
    let mut cmd = Command::new(BIN);
    cmd.args(args).env("RUST_LOG", "off");
    cmd
}

fn loopback(args: &[&str]) -> Output {
    let mut full = vec!["loopback"];
    full.extend_from_slice(args);
    crclink(&full)
        .stdin(Stdio::null())
        .output()
        .expect("run crclink")
}

fn loopback_with_stdin(args: &[&str], input: &str) -> Output {
    let mut full = vec!["loopback"];
    full.extend_from_slice(args);
    let mut child = crclink(&full)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn crclink");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().expect("wait for crclink")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

fn spawn_receiver(port: u16) -> Child {
    crclink(&["recv", "--bind", &format!("127.0.0.1:{port}")])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn receiver")
}

fn connect(port: u16) -> TcpStream {
    for _ in 0..200 {
        if let Ok(stream) = TcpStream::connect(("127.0.0.1", port)) {
            return stream;
        }
        thread::sleep(Duration::from_millis(25));
    }
    panic!("receiver never listened on port {port}");
}

/// Send `payload` to a fresh `crclink recv` and collect its output
fn receive(payload: &[u8]) -> Output {
    let port = free_port();
    let receiver = spawn_receiver(port);

    let mut stream = connect(port);
    stream.write_all(payload).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();
    drop(stream);

    receiver.wait_with_output().expect("wait for receiver")
}

#[test]
fn test_clean_loopback_exits_zero() {
    let output = loopback(&["--data", "1011001100110101", "--fault", "0"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Receiver: NO ERROR DETECTED."));
}

#[test]
fn test_detected_corruption_exits_zero() {
    let output = loopback(&["--data", "1011001100110101", "--fault", "1"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("ERROR DETECTED!"));
}

#[test]
fn test_json_report_on_stdout() {
    let output =
        loopback(&["--data", "1011", "--fault", "4", "--seed", "1", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["verdict"], "ERROR DETECTED");
}

#[test]
fn test_input_errors_exit_one() {
    let bad_data = loopback(&["--data", "10x1", "--fault", "0"]);
    assert_eq!(bad_data.status.code(), Some(1));

    let even_count = loopback(&[
        "--data",
        "1011001100110101",
        "--fault",
        "3",
        "--count",
        "2",
    ]);
    assert_eq!(even_count.status.code(), Some(1));

    let unknown_choice = loopback(&["--data", "1011", "--fault", "7"]);
    assert_eq!(unknown_choice.status.code(), Some(1));
}

#[test]
fn test_count_without_random_choice_exits_one() {
    let output =
        loopback(&["--data", "1011", "--fault", "0", "--count", "5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Receiver:"));
}

#[test]
fn test_piped_stdin_answers_prompts() {
    let output = loopback_with_stdin(&[], "1011\n0\n");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Receiver: NO ERROR DETECTED."));

    let output =
        loopback_with_stdin(&["--seed", "3"], "1011001100110101\n3\n5\n");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("ERROR DETECTED!"));

    let output = loopback_with_stdin(&["--fault", "0"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_truncated_payload_exits_zero() {
    let output = receive(b"0101010");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("encoded length 7 is odd"));
}

#[test]
fn test_empty_connection_exits_one() {
    let output = receive(b"");
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("Receiver:"));
}

#[test]
fn test_unreachable_receiver_exits_one() {
    let port = free_port();
    let output = crclink(&[
        "send",
        "--data",
        "1011",
        "--fault",
        "0",
        "--addr",
        &format!("127.0.0.1:{port}"),
    ])
    .stdin(Stdio::null())
    .output()
    .expect("run crclink");
    assert_eq!(output.status.code(), Some(1));
}
