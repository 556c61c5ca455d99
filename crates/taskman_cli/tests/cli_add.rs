use std::process::Command;
use tempfile::TempDir;

fn read_store(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn add_command_creates_a_medium_pending_task() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["add", "Write", "report"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task added: Write report"));

    let stored = read_store(&store_path);
    let tasks = stored.as_array().expect("store is an array");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["description"], "Write report");
    assert_eq!(tasks[0]["priority"], "medium");
    assert_eq!(tasks[0]["completed"], false);
    assert!(tasks[0]["id"].is_u64());
    assert!(tasks[0]["createdAt"].is_string());
    assert!(tasks[0].get("completedAt").is_none());
}

#[test]
fn add_command_defaults_to_tasks_json_in_working_directory() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();

    let output = Command::new(exe)
        .args(["add", "demo task"])
        .current_dir(temp.path())
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stored = read_store(&temp.path().join("tasks.json"));
    assert_eq!(stored[0]["description"], "demo task");
}

#[test]
fn add_command_appends_after_existing_tasks() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    for description in ["first", "second"] {
        let output = Command::new(exe)
            .arg("--file")
            .arg(&store_path)
            .args(["add", description])
            .output()
            .expect("failed to run add command");
        assert!(output.status.success());
    }

    let stored = read_store(&store_path);
    let tasks = stored.as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["description"], "first");
    assert_eq!(tasks[1]["description"], "second");
    assert_ne!(tasks[0]["id"], tasks[1]["id"]);
}

#[test]
fn add_command_accepts_priority_flag() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["add", "--priority", "high", "Ship", "release"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stored = read_store(&store_path);
    assert_eq!(stored[0]["priority"], "high");
    assert_eq!(stored[0]["description"], "Ship release");
}

#[test]
fn add_command_uses_configured_default_priority() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");
    let config_path = temp.path().join("config.json");
    let config = serde_json::json!({
        "store_path": store_path,
        "default_priority": "low"
    });
    std::fs::write(&config_path, config.to_string()).unwrap();

    let output = Command::new(exe)
        .arg("--config")
        .arg(&config_path)
        .args(["add", "configured"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stored = read_store(&store_path);
    assert_eq!(stored[0]["priority"], "low");
}

#[test]
fn add_command_rejects_missing_description() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["add"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Please provide a task description."));
    assert!(!store_path.exists());
}

#[test]
fn add_command_rejects_unknown_priority() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["add", "--priority", "asap", "demo"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Priority must be one of"));
    assert!(!store_path.exists());
}

#[test]
fn add_command_json_output_is_the_task() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["--json", "add", "json task"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let payload: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).unwrap();
    assert_eq!(payload["description"], "json task");
    assert_eq!(payload, read_store(&store_path)[0]);
}

#[test]
fn add_command_keeps_hyphenated_words() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["add", "Fix", "the", "--force", "flag"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Task added: Fix the --force flag"));
    let stored = read_store(&store_path);
    assert_eq!(stored[0]["description"], "Fix the --force flag");
}

#[test]
fn add_command_does_not_treat_description_words_as_global_flags() {
    let exe = env!("CARGO_BIN_EXE_taskman");
    let temp = TempDir::new().unwrap();
    let store_path = temp.path().join("tasks.json");

    let output = Command::new(exe)
        .arg("--file")
        .arg(&store_path)
        .args(["add", "Fix", "-v", "crash"])
        .output()
        .expect("failed to run add command");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("DEBUG"));
    assert_eq!(read_store(&store_path)[0]["description"], "Fix -v crash");
}
