use std::io::Write;
use std::process::{Command, Stdio};

/// Runs the compiled binary with a scripted stdin session and returns stdout.
fn run_session(script: &str) -> String {
    let mut child = Command::new("cargo")
        .args(["run", "--quiet"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    child
        .stdin
        .as_mut()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();

    let output = child.wait_with_output().unwrap();

    println!("{}", String::from_utf8(output.stderr).unwrap());
    assert!(output.status.success());

    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn scripted_session() {
    let script = "1\n1001\n1111\n1\n4\n1003\n249.50\n5\n7\n2\n";

    let stdout = run_session(script);

    assert!(stdout.contains("Login successful. Welcome, Amit Kumar!"));
    assert!(stdout.contains("Current Balance: \u{20b9}5000.00"));
    assert!(stdout.contains("Transfer successful. New balance: \u{20b9}4750.50"));
    assert!(stdout.contains("Transferred \u{20b9}249.50 to 1003, new balance \u{20b9}4750.50"));
    assert!(stdout.contains("Logging out..."));
    assert!(stdout.contains("Thank you for banking with us. Goodbye!"));
}

#[test]
fn locked_out_after_three_bad_pins() {
    let script = "1\n1001\n0000\n0000\n0000\n2\n";

    let stdout = run_session(script);

    assert!(stdout.contains("Too many incorrect attempts. Returning to main menu."));
    assert!(!stdout.contains("Login successful"));
}
