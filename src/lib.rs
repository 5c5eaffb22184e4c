//! Sub-command tree validation, dispatch and suggestions for CLI tools.
//!
//! The crate is deliberately small: you describe a tree of [`Command`]s,
//! hand it to a [`Runner`] together with a [`Config`], and the runner takes
//! care of validation, `help`/`version` builtins, "did you mean" hints for
//! typos and exit-code mapping. Flag parsing inside a command is left to the
//! handler.
//!
//! ```
//! use cmdtree::{Command, Config, Context, Runner};
//!
//! let cmds = vec![
//!     Command::new("now", |_: &Context, _: &[String]| -> anyhow::Result<()> {
//!         println!("now!");
//!         Ok(())
//!     })
//!     .description("prints current time"),
//!     Command::group(
//!         "time",
//!         vec![Command::new("curr", |_: &Context, _: &[String]| -> anyhow::Result<()> {
//!             println!("current time");
//!             Ok(())
//!         })],
//!     )
//!     .description("time related commands"),
//! ];
//!
//! let r = Runner::new(
//!     cmds,
//!     Config::new()
//!         .app_name("timer")
//!         .app_description("timer prints times.")
//!         .version("v0.1.0")
//!         .args(["./timer", "time", "curr"]),
//! );
//! r.run().unwrap();
//! ```

mod command;
mod complete;
mod config;
mod context;
mod dispatch;
mod distance;
mod errors;
mod output;
mod runner;
mod usage;
mod validate;

pub use command::{Command, Exec};
pub use config::Config;
pub use context::Context;
pub use errors::{Error, ExitCode, InitError};
pub use output::{MemWriter, Output};
pub use runner::Runner;
pub use usage::{default_usage, has_help_flag, CommandInfo, UsageFn, UsageInfo};
