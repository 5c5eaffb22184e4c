use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::command::{Command, CommandKind};
use crate::errors::InitError;

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z0-9_:.-]+$").expect("command name pattern"));

/// Names synthesized by the runner and rejected anywhere in a user tree.
pub(crate) const RESERVED: [&str; 2] = ["help", "version"];

/// Validate a declared command tree.
///
/// Single depth-first traversal, fail-fast on the first violation. Each
/// children list (including the top level) is sorted by name as a side
/// effect, for deterministic listing later.
pub(crate) fn validate(cmds: &mut [Command]) -> Result<(), InitError> {
    validate_siblings(cmds)?;
    tracing::debug!(commands = cmds.len(), "command tree validated");
    Ok(())
}

fn validate_siblings(cmds: &mut [Command]) -> Result<(), InitError> {
    cmds.sort_by(|a, b| a.name.cmp(&b.name));

    // One growing set: a name colliding with a sibling's alias is also an error.
    let mut seen: HashSet<String> = HashSet::new();
    for cmd in cmds.iter_mut() {
        if !seen.insert(cmd.name.clone()) {
            return Err(InitError::DuplicateName(cmd.name.clone()));
        }
        if let Some(alias) = &cmd.alias {
            if !seen.insert(alias.clone()) {
                return Err(InitError::DuplicateAlias(alias.clone()));
            }
        }
        validate_node(cmd)?;
    }
    Ok(())
}

fn validate_node(cmd: &mut Command) -> Result<(), InitError> {
    if !NAME_RE.is_match(&cmd.name) {
        return Err(InitError::InvalidName(cmd.name.clone()));
    }
    if let Some(alias) = &cmd.alias {
        if !NAME_RE.is_match(alias) {
            return Err(InitError::InvalidAlias(alias.clone()));
        }
    }
    if RESERVED.contains(&cmd.name.as_str()) {
        return Err(InitError::ReservedName(cmd.name.clone()));
    }
    if let Some(alias) = &cmd.alias {
        if RESERVED.contains(&alias.as_str()) {
            return Err(InitError::ReservedAlias(alias.clone()));
        }
    }
    match &mut cmd.kind {
        CommandKind::Leaf(_) => Ok(()),
        CommandKind::Group(children) => {
            if children.is_empty() {
                return Err(InitError::EmptyGroup(cmd.name.clone()));
            }
            validate_siblings(children)
        }
    }
}
