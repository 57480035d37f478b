// tests/integration_test.rs
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serial_test::serial;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_query-tags"))
}

#[test]
fn test_query_tags_help() {
    let output = binary().arg("--help").output().expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("query-tags"));
    assert!(stdout.contains("--use-release"));
    assert!(stdout.contains("--exclude-pre-release"));
}

#[test]
fn test_help_wins_over_other_flags() {
    let output = binary()
        .args(["--json", "--help", "8ae983c"])
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success());
}

#[test]
fn test_unknown_option() {
    let output = binary()
        .arg("--frobnicate")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Unknown option --frobnicate"));
}

#[test]
fn test_empty_piped_input() {
    let output = run_with_stdin(binary(), "no hashes in here\n");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("No hashes or patterns are provided"));
}

fn run_with_stdin(mut command: Command, input: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[cfg(unix)]
mod with_fake_gh {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    const PAGE_ONE: &str = r#"{"data":{"repository":{"refs":{
      "pageInfo":{"hasNextPage":true,"endCursor":"CURSOR2"},
      "nodes":[
        {"name":"swift-6.1-RELEASE","target":{"__typename":"Commit","oid":"f00dfeed12345678"}},
        {"name":"swift-6.0.3-RELEASE","target":{"__typename":"Tag","oid":"9999999999","target":{"oid":"0badc0de12345678"}}}
      ]}}}}"#;

    const PAGE_TWO: &str = r#"{"data":{"repository":{"refs":{
      "pageInfo":{"hasNextPage":false,"endCursor":null},
      "nodes":[
        {"name":"swift-6.0.2-RELEASE","target":{"__typename":"Commit","oid":"8ae983c3480462b0"}},
        {"name":"swift-6.0-RELEASE","target":{"__typename":"Commit","oid":"8ae983c3480462b0"}}
      ]}}}}"#;

    /// Newest first: a draft, a pre-release, then a regular release.
    const RELEASES: &str = r#"{"data":{"repository":{"releases":{
      "pageInfo":{"hasNextPage":false,"endCursor":null},
      "nodes":[
        {"createdAt":"2025-03-01T00:00:00Z","isDraft":true,"isLatest":false,"isPrerelease":false,
         "name":"Swift 6.2 (draft)","publishedAt":null,"description":null,
         "tag":{"name":"swift-6.2-RELEASE","target":{"__typename":"Commit","oid":"aaaaaaa111"}}},
        {"createdAt":"2025-02-18T00:00:00Z","isDraft":false,"isLatest":false,"isPrerelease":true,
         "name":"Development snapshot","publishedAt":"2025-02-18T01:00:00Z","description":"Nightly",
         "tag":{"name":"swift-DEVELOPMENT-SNAPSHOT-2025-02-18-a","target":{"__typename":"Commit","oid":"bbbbbbb222"}}},
        {"createdAt":"2025-01-10T00:00:00Z","isDraft":false,"isLatest":true,"isPrerelease":false,
         "name":"Swift 6.1","publishedAt":"2025-01-10T01:00:00Z","description":null,
         "tag":{"name":"swift-6.1-RELEASE","target":{"__typename":"Tag","oid":"ccccccc333","target":{"oid":"ddddddd444"}}}}
      ]}}}}"#;

    /// Writes a fake `gh` that serves two pages of tag refs (or one page of
    /// releases) and logs each call, plus a config file pointing at it.
    struct FakeGh {
        dir: tempfile::TempDir,
    }

    impl FakeGh {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let root = dir.path();
            std::fs::write(root.join("page1.json"), PAGE_ONE).unwrap();
            std::fs::write(root.join("page2.json"), PAGE_TWO).unwrap();
            std::fs::write(root.join("releases.json"), RELEASES).unwrap();

            let script = format!(
                "#!/bin/sh\nprintf '%s' \"$*\" | tr '\\n' ' ' >> '{root}/calls.log'\necho >> '{root}/calls.log'\ncase \"$*\" in\n  *\"releases(\"*) cat '{root}/releases.json' ;;\n  *endCursor=CURSOR2*) cat '{root}/page2.json' ;;\n  *) cat '{root}/page1.json' ;;\nesac\n",
                root = root.display()
            );
            let gh = root.join("gh");
            std::fs::write(&gh, script).unwrap();
            std::fs::set_permissions(&gh, std::fs::Permissions::from_mode(0o755)).unwrap();

            std::fs::write(
                root.join("querytags.toml"),
                format!("[tools]\ngh = '{}'\n\n[query]\ncache = \"\"\n", gh.display()),
            )
            .unwrap();

            FakeGh { dir }
        }

        fn config(&self) -> PathBuf {
            self.dir.path().join("querytags.toml")
        }

        fn calls(&self) -> Vec<String> {
            read_lines(&self.dir.path().join("calls.log"))
        }

        fn command(&self, args: &[&str]) -> Command {
            let mut command = binary();
            command.arg("--config").arg(self.config()).args(args);
            command
        }
    }

    fn read_lines(path: &Path) -> Vec<String> {
        std::fs::read_to_string(path)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    #[serial]
    fn test_hash_found_on_second_page() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["8ae983c"]), "");

        assert!(output.status.success());
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "swift-6.0.2-RELEASE\n");

        let calls = gh.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[0].contains("owner=swiftlang"));
        assert!(calls[0].contains("name=swift"));
        assert!(!calls[0].contains("endCursor="));
        assert!(calls[1].contains("endCursor=CURSOR2"));
    }

    #[test]
    #[serial]
    fn test_annotated_tag_resolves_to_commit() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["0badc0de"]), "");

        assert!(output.status.success());
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "swift-6.0.3-RELEASE\n");
        assert_eq!(gh.calls().len(), 1);
    }

    #[test]
    #[serial]
    fn test_hash_from_stdin() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&[]), "version 8ae983c3480462b built\n");

        assert!(output.status.success());
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "swift-6.0.2-RELEASE\n");
    }

    #[test]
    #[serial]
    fn test_all_matches_json() {
        let gh = FakeGh::new();
        let command = gh.command(&["-A", "--json", "-R", "apple/swift-nio", "8ae983c"]);
        let output = run_with_stdin(command, "");

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let names: Vec<String> = stdout
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["name"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(names, vec!["swift-6.0.2-RELEASE", "swift-6.0-RELEASE"]);
        assert!(gh.calls()[0].contains("owner=apple"));
        assert!(gh.calls()[0].contains("name=swift-nio"));
    }

    #[test]
    #[serial]
    fn test_no_match_exits_with_failure() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["deadbeef"]), "");

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        assert_eq!(gh.calls().len(), 2);
    }

    #[test]
    #[serial]
    fn test_failing_gh_is_not_found() {
        let gh = FakeGh::new();
        let failing = gh.dir.path().join("gh");
        std::fs::write(&failing, "#!/bin/sh\necho 'HTTP 401: Bad credentials' >&2\nexit 1\n")
            .unwrap();

        let output = run_with_stdin(gh.command(&["8ae983c"]), "");

        assert_eq!(output.status.code(), Some(1));
        assert!(output.stdout.is_empty());
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("Bad credentials"));
        assert!(stderr.contains("stopped early"));
    }

    fn jq_installed() -> bool {
        Command::new("jq")
            .arg("--version")
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    #[test]
    #[serial]
    fn test_jq_maps_first_match() {
        if !jq_installed() {
            eprintln!("jq not installed, skipping");
            return;
        }

        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["--jq", ".sha", "8ae983c"]), "");

        assert!(output.status.success());
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "8ae983c3480462b0\n");
    }

    #[test]
    #[serial]
    fn test_jq_with_all_maps_every_match() {
        if !jq_installed() {
            eprintln!("jq not installed, skipping");
            return;
        }

        let gh = FakeGh::new();
        let command = gh.command(&["-A", "--jq", "{tag: .name}", "8ae983c"]);
        let output = run_with_stdin(command, "");

        assert!(output.status.success());
        assert_eq!(
            String::from_utf8(output.stdout).unwrap(),
            "{\"tag\":\"swift-6.0.2-RELEASE\"}\n{\"tag\":\"swift-6.0-RELEASE\"}\n"
        );
    }

    #[test]
    #[serial]
    fn test_exclude_pre_release_queries_releases() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["--exclude-pre-release", "-A", "swift"]), "");

        assert!(output.status.success());
        assert_eq!(String::from_utf8(output.stdout).unwrap(), "swift-6.1-RELEASE\n");

        let calls = gh.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].contains("releases("));
        assert!(!calls[0].contains("refPrefix"));
    }

    #[test]
    #[serial]
    fn test_include_draft_queries_releases() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["--include-draft", "-A", "swift"]), "");

        assert!(output.status.success());
        assert_eq!(
            String::from_utf8(output.stdout).unwrap(),
            "swift-6.2-RELEASE\nswift-DEVELOPMENT-SNAPSHOT-2025-02-18-a\nswift-6.1-RELEASE\n"
        );
        assert!(gh.calls()[0].contains("releases("));
    }

    #[test]
    #[serial]
    fn test_use_release_json_peels_annotated_tag() {
        let gh = FakeGh::new();
        let output = run_with_stdin(gh.command(&["--use-release", "--json", "ddddddd"]), "");

        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
        assert_eq!(value["name"], "swift-6.1-RELEASE");
        assert_eq!(value["sha"], "ddddddd444");
        assert_eq!(value["release"]["isLatest"], true);
    }
}
