use std::path::PathBuf;

use clap::Parser;

use crate::generator::{GeneratorOptions, UnsupportedKindAction};

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    #[arg(
        required = true,
        help = "Schema files, directories of .graphqls files, or URLs"
    )]
    pub inputs: Vec<String>,

    #[arg(short, long, help = "Write the generated code to this file instead of stdout")]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Name of the query root type [default: from the schema, else Query]")]
    pub query_type: Option<String>,

    #[arg(long, default_value = "deny", value_enum)]
    pub unsupported_kinds: UnsupportedKindAction,

    #[arg(long, help = "Emit the async_graphql imports the generated code needs")]
    pub prelude: bool,
}

impl Cli {
    pub fn generator_options(&self) -> GeneratorOptions {
        GeneratorOptions {
            unsupported_kinds: self.unsupported_kinds,
            prelude: self.prelude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_deny_unsupported_kinds() {
        let cli = Cli::parse_from(["graphql-generator", "schema"]);
        assert_eq!(cli.inputs, ["schema"]);
        assert_eq!(cli.unsupported_kinds, UnsupportedKindAction::Deny);
        assert!(!cli.generator_options().prelude);
        assert!(cli.output.is_none());
    }

    #[test]
    fn parses_all_options() {
        let cli = Cli::parse_from([
            "graphql-generator",
            "a.graphqls",
            "b.graphqls",
            "-o",
            "out.rs",
            "--query-type",
            "Root",
            "--unsupported-kinds",
            "warn",
            "--prelude",
        ]);
        assert_eq!(cli.inputs, ["a.graphqls", "b.graphqls"]);
        assert_eq!(cli.output, Some(PathBuf::from("out.rs")));
        assert_eq!(cli.query_type.as_deref(), Some("Root"));
        let options = cli.generator_options();
        assert_eq!(options.unsupported_kinds, UnsupportedKindAction::Warn);
        assert!(options.prelude);
    }

    #[test]
    fn requires_an_input() {
        assert!(Cli::try_parse_from(["graphql-generator"]).is_err());
    }
}
