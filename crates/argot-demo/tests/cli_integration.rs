use std::process::{Command, Output};

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_argot-demo"))
}

fn run(args: &[&str]) -> Output {
    demo()
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run argot-demo")
}

#[test]
fn help_works_even_without_required_option() {
    let out = run(&["--help"]);
    assert!(
        out.status.success(),
        "argot-demo --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    let first = stdout.lines().next().unwrap_or_default();
    assert!(
        first.starts_with("usage: ")
            && first.ends_with(
                "[-h|--help] [-v|--verbose] -m|--message MESSAGE [-n N] [--schema]"
            ),
        "unexpected usage line:\n{stdout}"
    );
    assert!(stdout.contains("options:"), "unexpected help output:\n{stdout}");
    assert!(
        stdout.contains("-m, --message  message to print"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn prints_message_seeded_number_of_times() {
    let out = run(&["-m", "hello"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hello\nhello\nhello\n");
}

#[test]
fn bundled_short_options() {
    let out = run(&["-vn2", "--message=hi"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout), "hi\nhi\n");
    assert!(
        String::from_utf8_lossy(&out.stderr).contains("I will now print the message 2 times"),
        "stderr:\n{}",
        String::from_utf8_lossy(&out.stderr)
    );
}

#[test]
fn reports_every_error_and_exits_with_usage_status() {
    let out = run(&["--bogus", "-n", "many"]);
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("unknown option: --bogus"), "stderr:\n{stderr}");
    assert!(stderr.contains("invalid value \"many\" for -n"), "stderr:\n{stderr}");
    assert!(
        stderr.contains("option -m,--message is required, but not provided"),
        "stderr:\n{stderr}"
    );
}

#[test]
fn schema_flag_prints_json() {
    let out = run(&["--schema"]);
    assert!(out.status.success());
    let schema: serde_json::Value =
        serde_json::from_slice(&out.stdout).expect("schema output is not JSON");
    let options = schema["options"].as_array().expect("options array");
    assert_eq!(options.len(), 5);
    assert_eq!(options[2]["aliases"], serde_json::json!(["-m", "--message"]));
    assert_eq!(options[2]["required"], serde_json::json!(true));
}
