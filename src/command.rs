use crate::context::Context;

/// Object-safe trait for anything a leaf command can execute.
///
/// A blanket implementation covers plain closures, so most commands are
/// declared with [`Command::new`] and a closure; implement the trait directly
/// when the command carries state:
///
/// ```
/// use cmdtree::{Command, Context, Exec};
///
/// struct Greet {
///     greeting: String,
/// }
///
/// impl Exec for Greet {
///     fn exec(&self, _ctx: &Context, args: &[String]) -> anyhow::Result<()> {
///         println!("{} {}", self.greeting, args.join(" "));
///         Ok(())
///     }
/// }
///
/// let cmd = Command::new("greet", Greet { greeting: "hello".into() });
/// ```
pub trait Exec {
    /// Execute the command with the cancellation context and the argument
    /// tokens remaining after the command itself was located.
    fn exec(&self, ctx: &Context, args: &[String]) -> anyhow::Result<()>;
}

impl<F> Exec for F
where
    F: Fn(&Context, &[String]) -> anyhow::Result<()>,
{
    fn exec(&self, ctx: &Context, args: &[String]) -> anyhow::Result<()> {
        self(ctx, args)
    }
}

/// A node in the command tree: either a leaf with an action or an interior
/// grouping node with children, never both.
pub struct Command {
    pub(crate) name: String,
    pub(crate) alias: Option<String>,
    pub(crate) description: String,
    pub(crate) hidden: bool,
    pub(crate) kind: CommandKind,
}

pub(crate) enum CommandKind {
    Leaf(Box<dyn Exec>),
    Group(Vec<Command>),
}

impl Command {
    /// A leaf command executing `exec` when invoked.
    pub fn new(name: impl Into<String>, exec: impl Exec + 'static) -> Self {
        Command {
            name: name.into(),
            alias: None,
            description: String::new(),
            hidden: false,
            kind: CommandKind::Leaf(Box::new(exec)),
        }
    }

    /// An interior grouping command; `children` are matched against the next
    /// argument token.
    pub fn group(name: impl Into<String>, children: impl IntoIterator<Item = Command>) -> Self {
        Command {
            name: name.into(),
            alias: None,
            description: String::new(),
            hidden: false,
            kind: CommandKind::Group(children.into_iter().collect()),
        }
    }

    /// Secondary literal token matching this command, e.g. a short form.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Free text shown by the usage renderer.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Exclude the command from rendered listings. It stays dispatchable.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// True when `token` equals the command's name or alias.
    pub(crate) fn matches(&self, token: &str) -> bool {
        self.name == token || self.alias.as_deref() == Some(token)
    }
}
