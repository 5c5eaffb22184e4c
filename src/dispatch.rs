use std::io::Write;

use crate::command::{Command, CommandKind, Exec};
use crate::distance::distance;
use crate::errors::{Error, InitError};

/// Suggestions farther than this from the typed token are nonsense and
/// suppressed.
const MAX_SUGGEST_DISTANCE: usize = 2;

/// Walk the command tree against the argument vector and locate the deepest
/// matching leaf.
///
/// Returns the leaf's action and the residual arguments to pass to it. On a
/// miss, writes the unknown-command notice (with a best-effort suggestion
/// drawn from the current level only) to `out` before returning the error;
/// this is the only layer that writes human-facing text as a failure side
/// effect.
pub(crate) fn resolve<'a>(
    mut cmds: &'a [Command],
    mut args: &'a [String],
    app_name: &str,
    out: &mut dyn Write,
) -> Result<(&'a dyn Exec, &'a [String]), Error> {
    loop {
        let Some((selected, rest)) = args.split_first() else {
            // Unreachable through the runner: an empty vector is rejected at
            // init and descent checks the remainder first.
            return Err(Error::Init(InitError::NoArgs));
        };

        let Some(cmd) = cmds.iter().find(|c| c.matches(selected)) else {
            match suggest(selected, cmds) {
                Some(name) => {
                    let _ = writeln!(out, "{selected:?} unknown command, did you mean {name:?}?");
                }
                None => {
                    let _ = writeln!(out, "{selected:?} unknown command");
                }
            }
            let _ = writeln!(out, "Run {:?} for usage.\n", format!("{app_name} help"));
            return Err(Error::UnknownCommand(selected.clone()));
        };

        match &cmd.kind {
            CommandKind::Leaf(exec) => {
                tracing::debug!(command = %cmd.name, residual = rest.len(), "dispatching");
                return Ok((exec.as_ref(), rest));
            }
            CommandKind::Group(children) => {
                if rest.is_empty() {
                    return Err(Error::MissingSubcommand(selected.clone()));
                }
                tracing::debug!(group = %cmd.name, "descending");
                cmds = children;
                args = rest;
            }
        }
    }
}

/// Best within-threshold candidate name for a mistyped token, or `None`.
///
/// Only command names are considered, not aliases. Matching is
/// case-sensitive by policy: normalize before calling if case-insensitive
/// suggestions are wanted. Ties go to the first candidate seen.
pub(crate) fn suggest<'a>(target: &str, cmds: &'a [Command]) -> Option<&'a str> {
    let mut best = None;
    let mut best_dist = MAX_SUGGEST_DISTANCE + 1;
    for cmd in cmds {
        let dist = distance(target, &cmd.name);
        if dist < best_dist {
            best_dist = dist;
            best = Some(cmd.name.as_str());
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use crate::context::Context;

    fn nop(_: &Context, _: &[String]) -> anyhow::Result<()> {
        Ok(())
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    /// Leaf that records its marker into the shared log when executed.
    fn marker(name: &str, log: std::rc::Rc<std::cell::RefCell<Vec<String>>>) -> Command {
        let tag = name.to_string();
        Command::new(name, move |_: &Context, _: &[String]| -> anyhow::Result<()> {
            log.borrow_mut().push(tag.clone());
            Ok(())
        })
    }

    #[test]
    fn test_resolves_nested_leaf_with_residual_args() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let cmds = vec![
            Command::group(
                "test",
                [
                    Command::group("foo", [marker("for", log.clone())]),
                    marker("bar", log.clone()),
                ],
            ),
            marker("status", log.clone()),
        ];

        let argv = args(&["test", "foo", "for", "extra", "tokens"]);
        let mut out = Vec::new();
        let (exec, rest) = resolve(&cmds, &argv, "myapp", &mut out).unwrap();
        assert_eq!(rest, &["extra", "tokens"]);

        exec.exec(&Context::new(), rest).unwrap();
        assert_eq!(*log.borrow(), ["for"]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let cmds = vec![Command::new("status", nop), Command::new("stats", nop)];
        let argv = args(&["status", "x"]);
        for _ in 0..3 {
            let mut out = Vec::new();
            let (_, rest) = resolve(&cmds, &argv, "myapp", &mut out).unwrap();
            assert_eq!(rest, &["x"]);
        }
    }

    #[test]
    fn test_alias_dispatches_to_same_handler() {
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let cmds = vec![marker("foo", log.clone()).alias("f"), marker("bar", log.clone()).alias("b")];

        for token in ["foo", "f"] {
            let argv = args(&[token, "rest"]);
            let mut out = Vec::new();
            let (exec, rest) = resolve(&cmds, &argv, "myapp", &mut out).unwrap();
            assert_eq!(rest, &["rest"]);
            exec.exec(&Context::new(), rest).unwrap();
        }
        assert_eq!(*log.borrow(), ["foo", "foo"]);
    }

    #[test]
    fn test_group_with_no_remaining_args_fails() {
        let cmds = vec![Command::group("test", [Command::new("foo", nop)])];
        let argv = args(&["test"]);
        let mut out = Vec::new();
        let err = resolve(&cmds, &argv, "myapp", &mut out).err().unwrap();
        assert!(matches!(err, Error::MissingSubcommand(name) if name == "test"));
    }

    #[test]
    fn test_unknown_command_writes_suggestion() {
        let cmds = vec![
            Command::new("for", nop),
            Command::new("foo", nop),
            Command::new("bar", nop),
        ];
        let argv = args(&["fooo"]);
        let mut out = Vec::new();
        let err = resolve(&cmds, &argv, "myapp", &mut out).err().unwrap();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "fooo"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"fooo\" unknown command, did you mean \"foo\"?\nRun \"myapp help\" for usage.\n\n"
        );
    }

    #[test]
    fn test_unknown_command_without_suggestion() {
        let cmds = vec![Command::new("for", nop)];
        let argv = args(&["qwerty123"]);
        let mut out = Vec::new();
        assert!(resolve(&cmds, &argv, "myapp", &mut out).is_err());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"qwerty123\" unknown command\nRun \"myapp help\" for usage.\n\n"
        );
    }

    #[test]
    fn test_nested_miss_suggests_only_from_inner_scope() {
        let cmds = vec![
            Command::group(
                "test",
                [
                    Command::group("foo", [Command::new("for", nop)]),
                    Command::new("bar", nop),
                ],
            ),
            // close to "xyz" but out of scope once we descended into "foo"
            Command::new("xyyz", nop),
        ];
        let argv = args(&["test", "foo", "xyz"]);
        let mut out = Vec::new();
        let err = resolve(&cmds, &argv, "myapp", &mut out).err().unwrap();
        assert!(matches!(err, Error::UnknownCommand(name) if name == "xyz"));
        // only "for" was a candidate; distance("xyz", "for") > 2, so no hint
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\"xyz\" unknown command\nRun \"myapp help\" for usage.\n\n"
        );
    }

    #[test]
    fn test_suggest_threshold() {
        let cmds = vec![
            Command::new("for", nop),
            Command::new("foo", nop),
            Command::new("bar", nop),
        ];
        assert_eq!(suggest("fooo", &cmds), Some("foo"));

        let with_version = vec![Command::new("for", nop), Command::new("version", nop)];
        assert_eq!(suggest("verZion", &with_version), Some("version"));
        assert_eq!(suggest("verZION", &with_version), None);
    }

    #[test]
    fn test_suggest_ignores_aliases() {
        let cmds = vec![Command::new("remove", nop).alias("rm")];
        assert_eq!(suggest("rmm", &cmds), None);
    }

    #[test]
    fn test_suggest_first_seen_wins_ties() {
        let cmds = vec![Command::new("bat", nop), Command::new("cat", nop)];
        assert_eq!(suggest("hat", &cmds), Some("bat"));
    }
}
