use std::io::{self, Write};

use crate::context::Context;
use crate::output::Output;
use crate::usage::{CommandInfo, UsageFn, UsageInfo};

/// Runner configuration. Every field is optional; defaults are resolved once
/// by [`Runner::new`](crate::Runner::new).
///
/// ```
/// use cmdtree::Config;
///
/// let cfg = Config::new()
///     .app_name("myapp")
///     .app_description("myapp is a test application.")
///     .version("v1.2.3")
///     .args(["./myapp", "status"]);
/// ```
#[derive(Default)]
pub struct Config {
    pub(crate) app_name: Option<String>,
    pub(crate) app_description: String,
    pub(crate) post_description: String,
    pub(crate) version: String,
    pub(crate) output: Option<Output>,
    pub(crate) context: Option<Context>,
    pub(crate) args: Option<Vec<String>>,
    pub(crate) usage: Option<UsageFn>,
    pub(crate) auto_complete: bool,
    pub(crate) exit_fn: Option<Box<dyn Fn(i32)>>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Application name; defaults to the first element of the argument
    /// vector.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Description printed by the default usage renderer before the usage
    /// line.
    pub fn app_description(mut self, description: impl Into<String>) -> Self {
        self.app_description = description.into();
        self
    }

    /// Free text printed by the default usage renderer after the command
    /// table.
    pub fn post_description(mut self, description: impl Into<String>) -> Self {
        self.post_description = description.into();
        self
    }

    /// Version string printed by the `version` builtin.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Sink for diagnostics and help text; defaults to stderr.
    pub fn output(mut self, output: Output) -> Self {
        self.output = Some(output);
        self
    }

    /// Cancellation context passed to handlers; defaults to one cancelled on
    /// SIGINT/SIGTERM.
    pub fn context(mut self, context: Context) -> Self {
        self.context = Some(context);
        self
    }

    /// Argument vector to parse, including the program path at index 0;
    /// defaults to the process's own arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Usage-rendering callback for the `help` builtin; defaults to
    /// [`default_usage`](crate::default_usage).
    pub fn usage(
        mut self,
        usage: impl Fn(&UsageInfo, &[CommandInfo], &mut dyn Write) -> io::Result<()> + 'static,
    ) -> Self {
        self.usage = Some(Box::new(usage));
        self
    }

    /// Add the hidden `complete-script` and `complete-install` builtins.
    pub fn auto_complete(mut self, enabled: bool) -> Self {
        self.auto_complete = enabled;
        self
    }

    /// Process-exit function used by [`Runner::exit`](crate::Runner::exit);
    /// defaults to [`std::process::exit`]. Substitutable for tests.
    pub fn exit_fn(mut self, exit: impl Fn(i32) + 'static) -> Self {
        self.exit_fn = Some(Box::new(exit));
        self
    }
}
