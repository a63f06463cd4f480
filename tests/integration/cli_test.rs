use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_seqguess"))
        .args(args)
        .output()
        .expect("Failed to execute seqguess")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn temp_profile_file(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("seqguess_{}_{}.toml", name, std::process::id()));
    fs::write(&path, contents).expect("Failed to write profile file");
    path
}

#[test]
fn test_guess_fibonacci_sample() {
    let output = run(&["guess", "--sample", "a"]);
    assert!(
        output.status.success(),
        "stderr: {}\nstdout: {}",
        stderr(&output),
        stdout(&output)
    );

    let text = stdout(&output);
    assert!(text.contains("The next number is 144"), "{}", text);
    assert!(text.contains("S(i-1) S(i-2) +"), "{}", text);
    assert!(text.contains("S(i-1) + S(i-2)"), "{}", text);
    assert!(text.contains("Took 00:00:"), "{}", text);
}

#[test]
fn test_guess_from_values() {
    let output = run(&["guess", "1,", "3,", "7,", "15,", "31,", "63,", "127"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("The next number is 255"));
}

#[test]
fn test_guess_verbose_prints_statistics() {
    let output = run(&["guess", "-v", "--sample", "A"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Search Statistics:"), "{}", text);
    assert!(text.contains("Candidates evaluated: 8"), "{}", text);
}

#[test]
fn test_guess_rejects_bad_input() {
    let output = run(&["guess", "1", "x", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Invalid number: 'x'"));

    let output = run(&["guess", "5"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("at least 2 numbers"));

    let output = run(&["guess", "--sample", "Z"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_guess_without_a_formula_exits_with_two() {
    // Two values would vacuously match `1 S(i-2) +` on the default ladder,
    // so use a profile that cannot look back that far
    let path = temp_profile_file(
        "tiny",
        "[[profile]]\nmax_items = 3\noperators = [\"+\"]\nmax_back_reference = 1\nconstants = 1\n",
    );
    let output = run(&["guess", "--profiles", path.to_str().unwrap(), "5", "100"]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(2), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("couldn't work out"));
}

#[test]
fn test_bad_profile_file_is_an_error() {
    let path = temp_profile_file("bad", "[[profile]]\nmax_items = 3\noperators = [\"pow\"]\n");
    let output = run(&["guess", "--profiles", path.to_str().unwrap(), "1", "2", "3"]);
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown operator: 'pow'"));

    let output = run(&["guess", "--profiles", "/nonexistent/seqguess.toml", "1", "2"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read profile file"));
}

#[test]
fn test_empty_ladder_is_an_error() {
    let output = run(&["guess", "--max-profile", "0", "1", "2", "3"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no profiles"));
}

#[test]
fn test_samples_lists_all_letters() {
    let output = run(&["samples"]);
    assert!(output.status.success());
    let text = stdout(&output);
    for letter in ["A:", "B:", "C:", "D:"] {
        assert!(text.contains(letter), "missing {} in {}", letter, text);
    }
    assert!(text.contains("1, 2, 3, 5, 8"));
}

#[test]
fn test_enumerate_lists_candidates_in_order() {
    let output = run(&[
        "enumerate",
        "--max-items",
        "3",
        "--ops",
        "+",
        "--back",
        "1",
        "--constants",
        "1",
    ]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let lines: Vec<String> = stdout(&output).lines().map(str::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "1",
            "1 1 +",
            "1 S(i-1) +",
            "1 i +",
            "S(i-1)",
            "S(i-1) S(i-1) +",
            "S(i-1) i +",
            "i",
            "i i +",
        ]
    );
}

#[test]
fn test_enumerate_limit_and_operator_errors() {
    let output = run(&["enumerate", "--max-items", "5", "--ops", "+,-,*", "--limit", "4"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).lines().count(), 4);

    let output = run(&["enumerate", "--ops", "+,?"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown operator"));
}

#[test]
fn test_interactive_session() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_seqguess"))
        .arg("interactive")
        .arg("--max-profile")
        .arg("3")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute seqguess");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"a\n1 oops\n2, 4, 6, 8\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("The next number is 144"), "{}", text);
    assert!(text.contains("Invalid number: 'oops'"), "{}", text);
    assert!(text.contains("The next number is 10"), "{}", text);
}
