//! Binding table from clap argument ids back to model field paths.

/// How a clap argument's value is read.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum FlagShape {
    /// A single raw string.
    Value,
    /// One or more raw strings.
    Values,
    /// `--name`: present means `true`.
    Enable,
    /// `--no-name`: present means `false`.
    Disable,
}

/// One registered flag.
#[derive(Clone, Debug)]
pub(crate) struct FlagBinding {
    pub id: String,
    pub path: Vec<String>,
    pub shape: FlagShape,
}

/// One subcommand variant: the clap name, the field it fills and its own
/// bindings.
#[derive(Clone, Debug)]
pub(crate) struct CommandBinding {
    pub name: String,
    pub field: String,
    pub path: Vec<String>,
    pub surface: CommandSurface,
}

/// Bindings for one command level, in declaration order.
#[derive(Clone, Debug, Default)]
pub(crate) struct CommandSurface {
    pub flags: Vec<FlagBinding>,
    pub commands: Vec<CommandBinding>,
}

impl CommandSurface {
    /// Finds the variant clap selected by name.
    pub fn command(&self, name: &str) -> Option<&CommandBinding> {
        self.commands.iter().find(|command| command.name == name)
    }
}
