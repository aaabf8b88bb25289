use std::fs;

use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::tempdir;

use cli_wrapped::facts;
use cli_wrapped::history::{self, HistorySource, ShellKind, TOOL_NAME};
use cli_wrapped::personality;
use cli_wrapped::report::{self, Report};
use cli_wrapped::stats::FrequencyTable;
use cli_wrapped::style::Palette;

const BASH: &str = "\
#1700000000
git status
ls -la
git status
cli-wrapped
cd src

#1700000100
cargo test
";

const ZSH: &str = "\
: 1700000000:0;git status
: 1700000005:2;cli-wrapped --json
: 1700000009:0;docker ps
";

const FISH: &str = "\
- cmd: ls -la
  when: 1700000000
- cmd: \"git push\"
  when: 1700000010
- cmd: cli-wrapped
  when: 1700000020
";

fn render_plain(report: &Report<'_>) -> String {
    let mut buf = Vec::new();
    report::render(&mut buf, report, &Palette::plain()).unwrap();
    String::from_utf8(buf).unwrap()
}

fn read_fixture(contents: &str, shell: ShellKind) -> Vec<String> {
    let dir = tempdir().unwrap();
    let path = dir.path().join("history");
    fs::write(&path, contents).unwrap();
    history::read_history_or_else(&HistorySource::new(path, shell), Vec::new)
}

#[test]
fn reads_each_shell_format() {
    assert_eq!(
        read_fixture(BASH, ShellKind::Bash),
        vec!["git status", "ls -la", "git status", "cd src", "cargo test"]
    );
    assert_eq!(read_fixture(ZSH, ShellKind::Zsh), vec!["git status", "docker ps"]);
    assert_eq!(read_fixture(FISH, ShellKind::Fish), vec!["ls -la", "git push"]);
}

#[test]
fn parsing_is_repeatable_and_self_filtered() {
    for (contents, shell) in [(BASH, ShellKind::Bash), (ZSH, ShellKind::Zsh), (FISH, ShellKind::Fish)] {
        let first = read_fixture(contents, shell);
        let second = read_fixture(contents, shell);
        assert_eq!(first, second);
        assert!(first.iter().all(|cmd| !cmd.starts_with(TOOL_NAME)));
    }
}

#[test]
fn frequency_table_agrees_with_history() {
    let commands = read_fixture(BASH, ShellKind::Bash);
    let table = FrequencyTable::from_commands(&commands);
    assert_eq!(table.iter().map(|(_, n)| n).sum::<usize>(), commands.len());
    assert_eq!(table.unique(), 4);
    assert_eq!(table.most_common(1), vec![("git status", 2)]);
}

#[test]
fn empty_file_leads_to_onboarding() {
    let commands = read_fixture("", ShellKind::Bash);
    assert!(commands.is_empty());

    let table = FrequencyTable::from_commands(&commands);
    let report = Report::build(&table, ShellKind::Bash, 5, &mut StdRng::seed_from_u64(3));
    let text = render_plain(&report);
    assert!(text.contains("WELCOME TO THE COMMAND LINE ADVENTURE!"));
    for cmd in ["ls", "cd", "pwd", "mkdir", "touch"] {
        assert!(text.contains(&format!("{} - ", cmd)));
    }
}

#[test]
fn missing_file_uses_fallback() {
    let dir = tempdir().unwrap();
    let source = HistorySource::new(dir.path().join("nope"), ShellKind::Zsh);
    let commands = history::read_history_or_else(&source, || {
        history::parse_session_listing("  10  make\n  11  cli-wrapped\n")
    });
    assert_eq!(commands, vec!["make"]);
}

#[test]
fn five_bash_commands_need_five_more() {
    let commands = read_fixture("ls\ncd /\npwd\nls\nwhoami\n", ShellKind::Bash);
    let table = FrequencyTable::from_commands(&commands);
    let report = Report::build(&table, ShellKind::Bash, 5, &mut StdRng::seed_from_u64(3));

    let text = render_plain(&report);
    assert!(text.contains("You've cast 5 command spells so far!"));
    assert!(text.contains("Just 5 more to unlock your full CLI Wrapped experience!"));
}

#[test]
fn full_report_end_to_end() {
    let mut contents = String::new();
    for _ in 0..15 {
        contents.push_str("git\n");
    }
    contents.push_str("ls\nls\nls\ngit commit -m init\n");

    let commands = read_fixture(&contents, ShellKind::Bash);
    let table = FrequencyTable::from_commands(&commands);
    let report = Report::build(&table, ShellKind::Bash, 5, &mut StdRng::seed_from_u64(9));

    let summary = match &report {
        Report::Full(summary) => summary,
        other => panic!("expected a full report, got {:?}", other),
    };
    assert_eq!(summary.personality.name, "Git Wizard");
    assert_eq!(summary.personality, personality::classify(&table));
    assert!(facts::matching_facts(&table).contains(&summary.fun_fact));
    assert_eq!(summary.top, vec![("git", 15), ("ls", 3), ("git commit -m init", 1)]);

    let value = report::to_json(&report);
    assert_eq!(value["total"], 19);
    assert_eq!(value["unique"], 3);
}
