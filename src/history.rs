use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Commands starting with this are our own invocations and never counted.
pub const TOOL_NAME: &str = "cli-wrapped";

/// How many entries the live session query asks the shell for.
pub const SESSION_LIMIT: usize = 500;

lazy_static! {
    // `: <epoch>:<elapsed>;` left over after the zsh `": "` split
    static ref ZSH_METADATA: Regex = Regex::new(r"^\d+:\d+;").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
}

impl ShellKind {
    /// Lookup order when nothing points at a particular shell.
    pub const PRIORITY: [ShellKind; 3] = [ShellKind::Bash, ShellKind::Zsh, ShellKind::Fish];

    pub fn name(&self) -> &'static str {
        match self {
            ShellKind::Bash => "bash",
            ShellKind::Zsh => "zsh",
            ShellKind::Fish => "fish",
        }
    }

    pub fn history_path(&self, home: &Path) -> PathBuf {
        match self {
            ShellKind::Bash => home.join(".bash_history"),
            ShellKind::Zsh => home.join(".zsh_history"),
            ShellKind::Fish => home.join(".local/share/fish/fish_history"),
        }
    }

    /// Reads a `$SHELL`-style value such as `/usr/bin/zsh`.
    pub fn from_shell_env(value: &str) -> Option<Self> {
        let name = Path::new(value.trim()).file_name()?.to_str()?;
        name.parse().ok()
    }

    /// Best guess at the grammar of an arbitrary history file.
    pub fn guess_from_path(path: &Path) -> Self {
        let name = path.to_string_lossy().to_lowercase();
        if name.contains("zsh") {
            ShellKind::Zsh
        } else if name.contains("fish") {
            ShellKind::Fish
        } else {
            ShellKind::Bash
        }
    }

    /// Extracts the command from one line of this shell's history file.
    /// Returns `None` for lines that carry no command in this grammar.
    pub fn parse_line(&self, line: &str) -> Option<String> {
        match self {
            ShellKind::Zsh => {
                let (_, rest) = line.split_once(": ")?;
                Some(ZSH_METADATA.replace(rest.trim(), "").trim().to_string())
            }
            ShellKind::Fish => {
                let (_, rest) = line.split_once("cmd:")?;
                Some(rest.trim().trim_matches('"').to_string())
            }
            ShellKind::Bash => {
                if line.starts_with('#') {
                    return None;
                }
                let cmd = line.trim();
                if cmd.is_empty() {
                    None
                } else {
                    Some(cmd.to_string())
                }
            }
        }
    }
}

impl fmt::Display for ShellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bash" => Ok(ShellKind::Bash),
            "zsh" => Ok(ShellKind::Zsh),
            "fish" => Ok(ShellKind::Fish),
            other => Err(format!("unsupported shell: {}", other)),
        }
    }
}

/// A history file together with the grammar used to read it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySource {
    pub path: PathBuf,
    pub shell: ShellKind,
}

impl HistorySource {
    pub fn new(path: PathBuf, shell: ShellKind) -> Self {
        HistorySource { path, shell }
    }
}

pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Picks the history file to read. An explicit preference wins outright;
/// otherwise the shell named by `$SHELL` is used when its file exists,
/// then the first existing file in `ShellKind::PRIORITY`. With nothing on
/// disk this still answers bash, and the reader deals with the missing file.
///
/// The `$SHELL` step comes before the fixed bash/zsh/fish order, so with
/// several history files present it can pick a shell other than bash.
pub fn locate(home: &Path, preferred: Option<ShellKind>, shell_env: Option<&str>) -> HistorySource {
    if let Some(shell) = preferred {
        debug!(%shell, "using configured shell");
        return HistorySource::new(shell.history_path(home), shell);
    }

    if let Some(shell) = shell_env.and_then(ShellKind::from_shell_env) {
        let path = shell.history_path(home);
        if path.exists() {
            debug!(%shell, path = %path.display(), "using history of $SHELL");
            return HistorySource::new(path, shell);
        }
    }

    for shell in ShellKind::PRIORITY {
        let path = shell.history_path(home);
        if path.exists() {
            debug!(%shell, path = %path.display(), "found history file");
            return HistorySource::new(path, shell);
        }
    }

    debug!("no history file found, defaulting to bash");
    HistorySource::new(ShellKind::Bash.history_path(home), ShellKind::Bash)
}

fn keep_command(cmd: &str) -> bool {
    !cmd.is_empty() && !cmd.starts_with(TOOL_NAME)
}

/// UTF-8 decode that drops invalid bytes instead of failing.
pub fn decode_lossy(bytes: &[u8]) -> String {
    bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()
}

pub fn parse_history(contents: &str, shell: ShellKind) -> Vec<String> {
    contents
        .lines()
        .filter_map(|line| shell.parse_line(line))
        .filter(|cmd| keep_command(cmd))
        .collect()
}

/// Parses `fc -l` / `history` output: a leading ordinal, then the command.
pub fn parse_session_listing(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.trim_start().split_once(char::is_whitespace))
        .map(|(_, cmd)| cmd.trim().to_string())
        .filter(|cmd| keep_command(cmd))
        .collect()
}

pub fn read_history_file(source: &HistorySource) -> Vec<String> {
    match fs::read(&source.path) {
        Ok(bytes) => {
            let commands = parse_history(&decode_lossy(&bytes), source.shell);
            debug!(path = %source.path.display(), count = commands.len(), "parsed history file");
            commands
        }
        Err(e) => {
            debug!(path = %source.path.display(), error = %e, "could not read history file");
            Vec::new()
        }
    }
}

/// Asks the running shell for its recent history. Any failure is empty.
pub fn query_session_history() -> Vec<String> {
    let script = format!("fc -l -{} 2>/dev/null || history", SESSION_LIMIT);
    match Command::new("sh").arg("-c").arg(&script).output() {
        Ok(output) if output.status.success() => {
            let commands = parse_session_listing(&decode_lossy(&output.stdout));
            debug!(count = commands.len(), "read session history");
            commands
        }
        Ok(output) => {
            debug!(status = %output.status, "session history query failed");
            Vec::new()
        }
        Err(e) => {
            debug!(error = %e, "could not spawn shell for session history");
            Vec::new()
        }
    }
}

/// Reads the file, and when that yields nothing, whatever `fallback` returns.
pub fn read_history_or_else<F>(source: &HistorySource, fallback: F) -> Vec<String>
where
    F: FnOnce() -> Vec<String>,
{
    let commands = read_history_file(source);
    if commands.is_empty() {
        debug!("history file empty, falling back to session history");
        fallback()
    } else {
        commands
    }
}

pub fn read_history(source: &HistorySource) -> Vec<String> {
    read_history_or_else(source, query_session_history)
}
