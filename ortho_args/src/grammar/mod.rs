//! Projection of a model schema onto a `clap` command.
//!
//! Scalar fields become long flags, nested models become argument groups
//! shown under their own help heading, and nested subcommand models become
//! mutually exclusive subcommands. Every flag collects its value as raw text;
//! typing happens later in [`crate::coerce`] and [`crate::validate`].
//!
//! Clap argument ids are the full dotted field path (`database.host`), so the
//! binding table produced alongside the command is enough to rebuild the
//! nested shape after parsing.

mod bound;
mod names;
mod surface;

pub use bound::BoundModel;
pub(crate) use surface::{CommandBinding, CommandSurface, FlagBinding, FlagShape};

use std::collections::{HashMap, HashSet};

use clap::{Arg, ArgAction, ArgGroup, Command};
use tracing::{debug, trace};

use crate::coerce::Caster;
use crate::error::GrammarError;
use crate::schema::{FieldDescriptor, ModelSchema, TypeClass};

/// Help heading for required flags.
pub(crate) const REQUIRED_HEADING: &str = "required arguments";
/// Help heading for optional flags.
pub(crate) const OPTIONAL_HEADING: &str = "optional arguments";
/// Help heading for `--help` and `--version`.
pub(crate) const HELP_HEADING: &str = "help";
/// Help heading for the subcommand list.
pub(crate) const COMMANDS_HEADING: &str = "commands";

const HELP_ID: &str = "__help";
const VERSION_ID: &str = "__version";
const INVERTED_SUFFIX: &str = "!no";
const REQUIRED_GROUP_SUFFIX: &str = "?";

/// A top-level argument group, validated as its own branch before the root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Submodel {
    pub field: String,
    pub group: String,
}

/// Everything the parser needs from one grammar build.
#[derive(Clone, Debug)]
pub(crate) struct Grammar {
    pub command: Command,
    pub surface: CommandSurface,
    pub model: BoundModel,
    pub submodels: Vec<Submodel>,
}

/// Reserved flags added to every command level.
#[derive(Clone, Debug, Default)]
pub(crate) struct Reserved {
    pub help: bool,
    pub version: Option<String>,
}

/// Builds the grammar for `schema` on top of an already configured root
/// command.
///
/// # Errors
///
/// Returns a [`GrammarError`] when two fields claim the same flag or command
/// name, or when a subcommand field sits inside an argument group.
pub(crate) fn build(
    root: Command,
    schema: ModelSchema,
    reserved: &Reserved,
) -> Result<Grammar, GrammarError> {
    debug!(model = schema.name(), "building grammar");
    let mut context = GrammarContext {
        help: reserved.help,
        submodels: Vec::new(),
    };
    let mut level = Level::default();
    let base = context.add_reserved(
        &mut level,
        root.disable_help_subcommand(true).args_override_self(true),
        reserved.version.as_deref(),
    )?;
    let (command, model) = context.add_model(&mut level, base, schema, &Scope::root())?;
    debug!(
        flags = level.surface.flags.len(),
        commands = level.surface.commands.len(),
        groups = context.submodels.len(),
        "grammar built"
    );
    Ok(Grammar {
        command,
        surface: level.surface,
        model,
        submodels: context.submodels,
    })
}

/// State shared by the whole build.
struct GrammarContext {
    help: bool,
    submodels: Vec<Submodel>,
}

/// Names claimed within one command level, plus its bindings.
#[derive(Default)]
struct Level {
    longs: HashMap<String, String>,
    shorts: HashMap<char, String>,
    commands: HashSet<String>,
    dispatcher: bool,
    surface: CommandSurface,
}

impl Level {
    fn claim_long(&mut self, flag: &str, owner: &str) -> Result<(), GrammarError> {
        if let Some(first) = self.longs.get(flag) {
            return Err(GrammarError::DuplicateFlag {
                flag: flag.to_owned(),
                first: first.clone(),
                second: owner.to_owned(),
            });
        }
        self.longs.insert(flag.to_owned(), owner.to_owned());
        Ok(())
    }

    fn claim_short(&mut self, short: char, owner: &str) -> Result<(), GrammarError> {
        if let Some(first) = self.shorts.get(&short) {
            return Err(GrammarError::DuplicateShort {
                short,
                first: first.clone(),
                second: owner.to_owned(),
            });
        }
        self.shorts.insert(short, owner.to_owned());
        Ok(())
    }

    fn claim_command(&mut self, name: &str) -> Result<(), GrammarError> {
        if self.commands.insert(name.to_owned()) {
            Ok(())
        } else {
            Err(GrammarError::DuplicateCommand {
                name: name.to_owned(),
            })
        }
    }
}

/// Position of the model currently being projected.
#[derive(Clone, Debug)]
struct Scope {
    path: Vec<String>,
    group: Option<String>,
    required: bool,
    top: bool,
}

impl Scope {
    const fn root() -> Self {
        Self {
            path: Vec::new(),
            group: None,
            required: true,
            top: true,
        }
    }

    fn child_path(&self, name: &str) -> Vec<String> {
        let mut path = self.path.clone();
        path.push(name.to_owned());
        path
    }

    fn heading(&self, required: bool) -> String {
        let fallback = if required {
            REQUIRED_HEADING
        } else {
            OPTIONAL_HEADING
        };
        self.group.clone().unwrap_or_else(|| fallback.to_owned())
    }
}

impl GrammarContext {
    fn add_reserved(
        &self,
        level: &mut Level,
        bare: Command,
        version: Option<&str>,
    ) -> Result<Command, GrammarError> {
        let mut command = bare.disable_help_flag(true).disable_version_flag(true);
        if self.help {
            level.claim_long("help", "help")?;
            level.claim_short('h', "help")?;
            command = command.arg(
                Arg::new(HELP_ID)
                    .short('h')
                    .long("help")
                    .action(ArgAction::Help)
                    .help("show this help message and exit")
                    .help_heading(HELP_HEADING),
            );
        }
        if let Some(text) = version {
            level.claim_long("version", "version")?;
            level.claim_short('v', "version")?;
            command = command.version(text.to_owned()).arg(
                Arg::new(VERSION_ID)
                    .short('v')
                    .long("version")
                    .action(ArgAction::Version)
                    .help("show program's version number and exit")
                    .help_heading(HELP_HEADING),
            );
        }
        Ok(command)
    }

    fn add_model(
        &mut self,
        level: &mut Level,
        mut command: Command,
        schema: ModelSchema,
        scope: &Scope,
    ) -> Result<(Command, BoundModel), GrammarError> {
        let mut validators = Vec::new();
        let mut nested = Vec::new();
        for field in schema.fields() {
            match field.model_schema() {
                Some(child) if child.is_subcommand() => {
                    if scope.group.is_some() {
                        return Err(GrammarError::CommandInGroup {
                            field: scope.child_path(field.name()).join("."),
                        });
                    }
                    let (next, bound) = self.add_command(level, command, field, child, scope)?;
                    command = next;
                    nested.push((field.name().to_owned(), bound));
                }
                Some(child) => {
                    let group = names::group_name(field);
                    let child_scope = Scope {
                        path: scope.child_path(field.name()),
                        group: Some(group.clone()),
                        required: scope.required && field.is_required(),
                        top: false,
                    };
                    let (next, bound) = self.add_model(level, command, child, &child_scope)?;
                    command = next;
                    if scope.top {
                        self.submodels.push(Submodel {
                            field: field.name().to_owned(),
                            group,
                        });
                    }
                    nested.push((field.name().to_owned(), bound));
                }
                _ => {
                    command = add_field(level, command, field, scope)?;
                    if let Some(caster) = Caster::for_field(field) {
                        validators.push((field.name().to_owned(), caster));
                    }
                }
            }
        }
        Ok((command, BoundModel::with_validators(schema, validators, nested)))
    }

    fn add_command(
        &mut self,
        level: &mut Level,
        mut command: Command,
        field: &FieldDescriptor,
        schema: ModelSchema,
        scope: &Scope,
    ) -> Result<(Command, BoundModel), GrammarError> {
        let name = field.command_name().to_owned();
        let path = scope.child_path(field.name());
        level.claim_command(&name)?;
        if !level.dispatcher {
            command = command
                .subcommand_required(true)
                .subcommand_help_heading(COMMANDS_HEADING)
                .subcommand_value_name("COMMAND");
            level.dispatcher = true;
        }
        trace!(command = %name, field = field.name(), "adding subcommand");

        let mut bare = Command::new(name.clone())
            .args_override_self(true)
            .disable_help_subcommand(true);
        if let Some(about) = field.description().or_else(|| schema.about()) {
            bare = bare.about(about.to_owned());
        }
        let mut sub_level = Level::default();
        let base = self.add_reserved(&mut sub_level, bare, None)?;
        let sub_scope = Scope {
            path: path.clone(),
            group: None,
            required: true,
            top: false,
        };
        let (sub, bound) = self.add_model(&mut sub_level, base, schema, &sub_scope)?;
        level.surface.commands.push(CommandBinding {
            name,
            field: field.name().to_owned(),
            path,
            surface: sub_level.surface,
        });
        Ok((command.subcommand(sub), bound))
    }
}

fn add_field(
    level: &mut Level,
    command: Command,
    field: &FieldDescriptor,
    scope: &Scope,
) -> Result<Command, GrammarError> {
    let path = scope.child_path(field.name());
    let id = path.join(".");
    let long = names::flag_name(field);
    level.claim_long(&long, &id)?;
    if let Some(short) = field.short() {
        level.claim_short(short, &id)?;
    }

    let required = scope.required && field.is_required();
    let heading = scope.heading(field.is_required());
    let mut flag = Arg::new(id.clone())
        .long(long.clone())
        .help(names::help_text(field))
        .help_heading(heading.clone());
    if let Some(short) = field.short() {
        flag = flag.short(short);
    }
    trace!(flag = %long, id = %id, required, "adding flag");

    if field.is_a(&[TypeClass::Bool]) {
        let inverted = names::inverted_flag_name(field);
        level.claim_long(&inverted, &id)?;
        let inverted_id = format!("{id}{INVERTED_SUFFIX}");
        let enable = flag
            .action(ArgAction::SetTrue)
            .overrides_with(inverted_id.clone());
        let disable = Arg::new(inverted_id.clone())
            .long(inverted.clone())
            .action(ArgAction::SetFalse)
            .help(format!("disable --{long}"))
            .help_heading(heading)
            .overrides_with(id.clone());
        level.surface.flags.push(FlagBinding {
            id: id.clone(),
            path: path.clone(),
            shape: FlagShape::Enable,
        });
        level.surface.flags.push(FlagBinding {
            id: inverted_id.clone(),
            path,
            shape: FlagShape::Disable,
        });
        let mut paired = command.arg(enable).arg(disable);
        if required {
            paired = paired.group(
                ArgGroup::new(format!("{id}{REQUIRED_GROUP_SUFFIX}"))
                    .args([id, inverted_id])
                    .required(true),
            );
        }
        return Ok(paired);
    }

    let valued = flag
        .value_name(names::metavar(field))
        .value_parser(clap::value_parser!(String))
        .allow_negative_numbers(field.is_a(&[TypeClass::Number]))
        .required(required);
    let (arg, shape) = if field.is_a(&[TypeClass::Sequence]) {
        (valued.action(ArgAction::Append).num_args(1..), FlagShape::Values)
    } else {
        (valued.action(ArgAction::Set), FlagShape::Value)
    };
    level.surface.flags.push(FlagBinding { id, path, shape });
    Ok(command.arg(arg))
}
