use clap::Parser;

/// Routes a resolved verb to its handler.
pub mod dispatcher;
/// One handler per verb.
pub mod handlers;

/// bioenv: per-project virtual environments for bioinformatics tools.
///
/// Commands (any unambiguous prefix works, e.g. `bioenv ins gatk`):
///
///   init <directory> <name>     Create an environment and its bioenv.json manifest
///   install <tool>              Fetch a tool from the registry into ./tools
///   call <tool> [args...]       Run an installed tool
///   export [file]               Print or save the environment manifest
///   quit                        Stop the environment
///
/// `install`, `call`, `export` and `quit` act on the current directory, or on
/// `BIOENV_DIR` when it is set.
#[derive(Parser, Debug)]
#[command(name = "bioenv", version, about, long_about, verbatim_doc_comment)]
// We disable clap's default help subcommand (`help`) so `h...` is never mistaken for a verb.
#[command(disable_help_subcommand = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// The command to run, or an unambiguous prefix of it.
    pub verb: Option<String>,

    /// Arguments for the command. Passed through untouched, including ones
    /// that start with `-` (so `bioenv call gatk --help` reaches gatk).
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Flattens the parsed line back into `[verb, args...]` for the dispatcher.
    pub fn into_args(self) -> Vec<String> {
        self.verb.into_iter().chain(self.args).collect()
    }
}
