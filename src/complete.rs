//! Shell-completion builtins, added by the runner when
//! [`Config::auto_complete`](crate::Config::auto_complete) is enabled.
//!
//! Fully outside the dispatch core: `complete-script` renders an embedded
//! completion script for the detected shell, `complete-install` writes it to
//! the shell's default completion directory. Both commands are hidden from
//! listings and parse their own flags.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use argh::{EarlyExit, FromArgs};

use crate::command::Command;
use crate::context::Context;
use crate::output::Output;

const BASH: &str = include_str!("complete/bash.sh");
const ZSH: &str = include_str!("complete/zsh.sh");
const FISH: &str = include_str!("complete/fish.sh");

#[derive(FromArgs)]
/// Print the shell completion script.
struct CompleteScript {
    #[argh(option, default = "detect_shell()")]
    /// shell dialect: bash, zsh or fish; defaults to $SHELL
    shell: String,
}

#[derive(FromArgs)]
/// Render and install the completion script into the shell's default
/// completion directory.
struct CompleteInstall {
    #[argh(option, default = "detect_shell()")]
    /// shell dialect: bash, zsh or fish; defaults to $SHELL
    shell: String,

    #[argh(option)]
    /// binary name to complete; defaults to the application name
    binary: Option<String>,

    #[argh(option)]
    /// directory to install into, overriding the shell default
    dir: Option<String>,

    #[argh(option)]
    /// file name to install as, overriding the shell default
    file: Option<String>,
}

pub(crate) fn script_command(output: Output, app_name: String) -> Command {
    Command::new(
        "complete-script",
        move |_: &Context, args: &[String]| -> Result<()> {
            let Some(opts) = parse::<CompleteScript>("complete-script", args, &output)? else {
                return Ok(());
            };
            let (template, _, _) = shell_profile(&opts.shell, &app_name)?;
            let mut out = output.clone();
            out.write_all(template.replace("%BINARY%", &app_name).as_bytes())?;
            Ok(())
        },
    )
    .description("prints the shell completion script")
    .hidden()
}

pub(crate) fn install_command(output: Output, app_name: String) -> Command {
    Command::new(
        "complete-install",
        move |_: &Context, args: &[String]| -> Result<()> {
            let Some(opts) = parse::<CompleteInstall>("complete-install", args, &output)? else {
                return Ok(());
            };
            let binary = opts.binary.unwrap_or_else(|| app_name.clone());
            let (template, default_dir, default_file) = shell_profile(&opts.shell, &binary)?;
            let script = template.replace("%BINARY%", &binary);

            let dir = opts.dir.unwrap_or(default_dir);
            let file = opts.file.unwrap_or(default_file);
            fs::create_dir_all(&dir)
                .with_context(|| format!("cannot create completion dir {dir}"))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(&dir, fs::Permissions::from_mode(0o700));
            }

            let path = Path::new(&dir).join(&file);
            fs::write(&path, script)
                .with_context(|| format!("cannot write completion script {}", path.display()))?;
            Ok(())
        },
    )
    .description("installs the shell completion script")
    .hidden()
}

/// Script template and default install location for a shell dialect.
fn shell_profile(shell: &str, binary: &str) -> Result<(&'static str, String, String)> {
    match shell {
        "bash" => Ok((
            BASH,
            "/etc/bash_completion.d".into(),
            format!("{binary}.bash"),
        )),
        "fish" => Ok((
            FISH,
            "/etc/fish/completions".into(),
            format!("{binary}.fish"),
        )),
        "zsh" => Ok((
            ZSH,
            "/usr/local/share/zsh/site-functions".into(),
            format!("_{binary}"),
        )),
        other => bail!("unknown shell: {other} (want: bash, fish, zsh)"),
    }
}

/// Shell dialect from `$SHELL`'s basename; `sh` is treated as `bash`.
fn detect_shell() -> String {
    let shell = std::env::var("SHELL").unwrap_or_default();
    let base = Path::new(&shell)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("bash");
    if base == "sh" {
        "bash".to_string()
    } else {
        base.to_string()
    }
}

/// Parse builtin flags with argh; `Ok(None)` means an early exit (`--help`)
/// whose text was already written to the sink.
fn parse<T: FromArgs>(name: &str, args: &[String], output: &Output) -> Result<Option<T>> {
    let argv: Vec<&str> = args.iter().map(String::as_str).collect();
    match T::from_args(&[name], &argv) {
        Ok(opts) => Ok(Some(opts)),
        Err(EarlyExit {
            output: text,
            status: Ok(()),
        }) => {
            let mut out = output.clone();
            let _ = writeln!(out, "{text}");
            Ok(None)
        }
        Err(EarlyExit { output: text, .. }) => bail!("{text}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemWriter;

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_script_mentions_binary() {
        for shell in ["bash", "zsh", "fish"] {
            let (template, _, _) = shell_profile(shell, "myapp").unwrap();
            let script = template.replace("%BINARY%", "myapp");
            assert!(script.contains("myapp"), "{shell} script misses binary");
            assert!(!script.contains("%BINARY%"));
        }
    }

    #[test]
    fn test_unknown_shell_is_rejected() {
        let err = shell_profile("tcsh", "myapp").unwrap_err();
        assert!(err.to_string().contains("unknown shell: tcsh"));
    }

    #[test]
    fn test_install_defaults() {
        let (_, dir, file) = shell_profile("bash", "myapp").unwrap();
        assert_eq!(dir, "/etc/bash_completion.d");
        assert_eq!(file, "myapp.bash");

        let (_, dir, file) = shell_profile("zsh", "myapp").unwrap();
        assert_eq!(dir, "/usr/local/share/zsh/site-functions");
        assert_eq!(file, "_myapp");

        let (_, dir, file) = shell_profile("fish", "myapp").unwrap();
        assert_eq!(dir, "/etc/fish/completions");
        assert_eq!(file, "myapp.fish");
    }

    #[test]
    fn test_script_command_writes_to_sink() {
        let (mw, handle) = MemWriter::with_handle();
        let output = Output::new(mw);
        let cmd = script_command(output, "myapp".to_string());
        assert!(cmd.is_hidden());

        let crate::command::CommandKind::Leaf(exec) = &cmd.kind else {
            panic!("complete-script must be a leaf");
        };
        exec.exec(&Context::new(), &args(&["--shell", "bash"])).unwrap();

        let text = String::from_utf8(handle.borrow().clone()).unwrap();
        assert!(text.contains("complete -F _myapp myapp"));
    }

    #[test]
    fn test_install_into_temp_dir() {
        let dir = std::env::temp_dir().join(format!("cmdtree_complete_{}", std::process::id()));
        let dir_str = dir.to_string_lossy().to_string();

        let (mw, _handle) = MemWriter::with_handle();
        let cmd = install_command(Output::new(mw), "myapp".to_string());
        let crate::command::CommandKind::Leaf(exec) = &cmd.kind else {
            panic!("complete-install must be a leaf");
        };
        exec.exec(
            &Context::new(),
            &args(&["--shell", "bash", "--dir", &dir_str]),
        )
        .unwrap();

        let written = fs::read_to_string(dir.join("myapp.bash")).unwrap();
        assert!(written.contains("complete -F _myapp myapp"));

        let _ = fs::remove_dir_all(dir);
    }
}
