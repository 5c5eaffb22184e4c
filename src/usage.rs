use std::io::{self, Write};

use crate::command::{Command, CommandKind};

/// One row of the command listing handed to the usage renderer.
///
/// Nested leaves carry their space-joined path as the name, e.g. `time curr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: String,
    pub description: String,
    pub hidden: bool,
}

/// Application fields available to the usage renderer.
#[derive(Debug, Clone, Default)]
pub struct UsageInfo {
    pub app_name: String,
    pub app_description: String,
    pub post_description: String,
    pub version: String,
}

/// Usage-rendering callback invoked by the `help` builtin.
///
/// Receives the fully assembled, sorted, builtin-inclusive command list and
/// is responsible for all formatting, including skipping hidden entries.
pub type UsageFn = Box<dyn Fn(&UsageInfo, &[CommandInfo], &mut dyn Write) -> io::Result<()>>;

/// Flatten a command tree into listing rows, leaves only, groups expanded
/// into space-joined paths. A hidden group hides all of its leaves.
pub(crate) fn flatten(cmds: &[Command]) -> Vec<CommandInfo> {
    let mut entries = Vec::new();
    collect(cmds, "", false, &mut entries);
    entries
}

fn collect(cmds: &[Command], prefix: &str, hidden: bool, entries: &mut Vec<CommandInfo>) {
    for cmd in cmds {
        let name = if prefix.is_empty() {
            cmd.name.clone()
        } else {
            format!("{prefix} {}", cmd.name)
        };
        let hidden = hidden || cmd.hidden;
        match &cmd.kind {
            CommandKind::Leaf(_) => entries.push(CommandInfo {
                name,
                description: cmd.description.clone(),
                hidden,
            }),
            CommandKind::Group(children) => collect(children, &name, hidden, entries),
        }
    }
}

/// The builtin tabular usage renderer: app description, usage line, a
/// two-column name/description table (hidden commands skipped), post
/// description and version line.
pub fn default_usage(info: &UsageInfo, cmds: &[CommandInfo], out: &mut dyn Write) -> io::Result<()> {
    if !info.app_description.is_empty() {
        writeln!(out, "{}\n", info.app_description)?;
    }

    writeln!(
        out,
        "Usage:\n\n    {} <command> [arguments...]\n\nThe commands are:\n",
        info.app_name
    )?;

    let width = cmds
        .iter()
        .filter(|c| !c.hidden)
        .map(|c| c.name.len())
        .max()
        .unwrap_or(0)
        + 11;
    for cmd in cmds.iter().filter(|c| !c.hidden) {
        let desc = if cmd.description.is_empty() {
            "<no description>"
        } else {
            &cmd.description
        };
        writeln!(out, "    {:<width$}{}", cmd.name, desc)?;
    }
    writeln!(out)?;

    if !info.post_description.is_empty() {
        writeln!(out, "{}\n", info.post_description)?;
    }
    if !info.version.is_empty() {
        writeln!(out, "Version: {}\n", info.version)?;
    }
    Ok(())
}

/// True when the argument tokens contain a help flag (`-h`, `-help` or
/// `--help`). Convenience for handlers that parse their own flags.
pub fn has_help_flag<S: AsRef<str>>(args: &[S]) -> bool {
    args.iter()
        .any(|a| matches!(a.as_ref(), "-h" | "-help" | "--help"))
}
