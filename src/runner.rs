use std::io::Write;

use crate::command::{Command, Exec};
use crate::complete;
use crate::config::Config;
use crate::context::Context;
use crate::dispatch;
use crate::errors::{Error, InitError};
use crate::output::Output;
use crate::usage::{self, default_usage, CommandInfo, UsageFn, UsageInfo};
use crate::validate::validate;

const HELP_DESCR: &str = "shows help message";
const VERSION_DESCR: &str = "shows version of the application";

/// Runner of the sub-commands.
///
/// Constructed once from a command tree and a [`Config`]; the tree is
/// validated exactly once at construction and the builtin `help` and
/// `version` commands are attached as top-level siblings. Dispatch is
/// stateless beyond the immutable tree, so repeated [`Runner::run`] calls
/// are safe, but concurrent calls against one runner are not a supported
/// use case: the builtins write to a shared output sink without
/// synchronization.
///
/// ```
/// use cmdtree::{Command, Config, Context, Runner};
///
/// let cmds = vec![
///     Command::new("now", |_: &Context, _: &[String]| -> anyhow::Result<()> {
///         println!("now!");
///         Ok(())
///     })
///     .description("prints current time"),
/// ];
///
/// let r = Runner::new(
///     cmds,
///     Config::new()
///         .app_name("example")
///         .version("v1.0.0")
///         .args(["./example", "now"]),
/// );
/// r.run().unwrap();
/// ```
pub struct Runner {
    app_name: String,
    output: Output,
    ctx: Context,
    args: Vec<String>,
    cmds: Vec<Command>,
    err_init: Option<InitError>,
    exit_fn: Box<dyn Fn(i32)>,
}

impl Runner {
    /// Build a runner, resolving configuration defaults and validating the
    /// command tree.
    ///
    /// Structural errors in the tree are recorded and surfaced by
    /// [`Runner::run`] as [`Error::Init`].
    ///
    /// # Panics
    ///
    /// Panics when `cmds` is empty. A runner without commands is programmer
    /// misuse, not a runtime condition.
    pub fn new(cmds: Vec<Command>, cfg: Config) -> Runner {
        assert!(!cmds.is_empty(), "no commands provided");

        let mut argv = cfg.args.unwrap_or_else(|| std::env::args().collect());
        let app_name = cfg
            .app_name
            .unwrap_or_else(|| argv.first().cloned().unwrap_or_default());
        // argv[0] is the program path, not a command token
        let args = if argv.is_empty() {
            Vec::new()
        } else {
            argv.split_off(1)
        };

        let output = cfg.output.unwrap_or_else(Output::stderr);
        let ctx = cfg.context.unwrap_or_else(Context::on_termination);
        let usage = cfg.usage.unwrap_or_else(|| Box::new(default_usage));
        let exit_fn = cfg
            .exit_fn
            .unwrap_or_else(|| Box::new(|code| std::process::exit(code)));

        let mut cmds = cmds;
        let mut err_init = if args.is_empty() {
            Some(InitError::NoArgs)
        } else {
            None
        };
        if err_init.is_none() {
            err_init = validate(&mut cmds).err();
        }
        if err_init.is_none() {
            if cfg.auto_complete {
                cmds.push(complete::script_command(output.clone(), app_name.clone()));
                cmds.push(complete::install_command(output.clone(), app_name.clone()));
            }

            let info = UsageInfo {
                app_name: app_name.clone(),
                app_description: cfg.app_description,
                post_description: cfg.post_description,
                version: cfg.version.clone(),
            };
            let mut entries = usage::flatten(&cmds);
            entries.push(CommandInfo {
                name: "help".into(),
                description: HELP_DESCR.into(),
                hidden: false,
            });
            entries.push(CommandInfo {
                name: "version".into(),
                description: VERSION_DESCR.into(),
                hidden: false,
            });
            entries.sort_by(|a, b| a.name.cmp(&b.name));

            cmds.push(
                Command::new(
                    "help",
                    HelpCommand {
                        usage,
                        info,
                        entries,
                        output: output.clone(),
                    },
                )
                .description(HELP_DESCR),
            );

            let out = output.clone();
            let app = app_name.clone();
            let version = cfg.version;
            cmds.push(
                Command::new(
                    "version",
                    move |_: &Context, _: &[String]| -> anyhow::Result<()> {
                        let mut out = out.clone();
                        writeln!(out, "{app} version: {version}\n")?;
                        Ok(())
                    },
                )
                .description(VERSION_DESCR),
            );

            cmds.sort_by(|a, b| a.name.cmp(&b.name));
            tracing::debug!(app = %app_name, commands = cmds.len(), "runner initialized");
        }

        Runner {
            app_name,
            output,
            ctx,
            args,
            cmds,
            err_init,
            exit_fn,
        }
    }

    /// Dispatch to the command selected by the argument vector.
    ///
    /// Returns the construction-time validation error first if one was
    /// recorded, a resolution error on a miss, or the handler's own error
    /// unchanged.
    pub fn run(&self) -> Result<(), Error> {
        if let Some(err) = &self.err_init {
            return Err(Error::Init(err.clone()));
        }
        let mut out = self.output.clone();
        let (exec, rest) = dispatch::resolve(&self.cmds, &self.args, &self.app_name, &mut out)?;
        exec.exec(&self.ctx, rest).map_err(Error::Exec)
    }

    /// Translate a run result into a process exit.
    ///
    /// `Ok` exits with status 0 and prints nothing. An error carrying an
    /// [`ExitCode`](crate::ExitCode) exits with that status; any other error
    /// exits with status 1. Either way `"<app>: <error>"` is printed to the
    /// output sink first.
    pub fn exit(&self, result: Result<(), Error>) {
        let err = match result {
            Ok(()) => {
                (self.exit_fn)(0);
                return;
            }
            Err(err) => err,
        };
        let mut out = self.output.clone();
        match err.exit_code() {
            Some(code) => {
                let _ = writeln!(out, "{}: code {}", self.app_name, code);
                (self.exit_fn)(code);
            }
            None => {
                let _ = writeln!(out, "{}: {}", self.app_name, err);
                (self.exit_fn)(1);
            }
        }
    }

    /// [`Runner::run`] followed by [`Runner::exit`].
    pub fn run_and_exit(&self) {
        let result = self.run();
        self.exit(result);
    }
}

/// The `help` builtin: feeds the precomputed listing to the configured
/// usage renderer.
struct HelpCommand {
    usage: UsageFn,
    info: UsageInfo,
    entries: Vec<CommandInfo>,
    output: Output,
}

impl Exec for HelpCommand {
    fn exec(&self, _ctx: &Context, _args: &[String]) -> anyhow::Result<()> {
        let mut out = self.output.clone();
        (self.usage)(&self.info, &self.entries, &mut out)?;
        Ok(())
    }
}
