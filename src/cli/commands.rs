//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: run one prompt with an input
//! - new: scaffold a prompt file
//! - list: list prompt files
//! - compare: run one input through several prompts

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// promptpg - Prompt Playground CLI
#[derive(Parser, Debug)]
#[command(name = "promptpg")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a prompt from a YAML file with provided input
    Run {
        /// Prompt file inside the prompts directory
        prompt_file: String,

        /// Input string to inject into the prompt
        #[arg(long)]
        input: String,

        /// Fail if the template has no {input} placeholder
        #[arg(long)]
        strict: bool,
    },

    /// Scaffold a new prompt YAML file
    New {
        /// Prompt name; written to <prompts_dir>/<name>.yaml
        name: String,
    },

    /// List all prompt files
    List,

    /// Compare multiple prompts with the same input
    Compare {
        /// Prompt files to run, in order
        prompt_files: Vec<String>,

        /// Input text to run through all prompts
        #[arg(long)]
        input: Option<String>,

        /// YAML file with an 'input' field
        #[arg(long)]
        input_file: Option<PathBuf>,

        /// Fail if a template has no {input} placeholder
        #[arg(long)]
        strict: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["promptpg"]).is_err());
    }

    #[test]
    fn test_cli_verbose_and_config() {
        let cli = Cli::try_parse_from(["promptpg", "-v", "-c", "/tmp/promptpg.yml", "list"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config.as_ref(), Some(&PathBuf::from("/tmp/promptpg.yml")));
    }

    #[test]
    fn test_run_command() {
        let cli = Cli::try_parse_from(["promptpg", "run", "translate.yaml", "--input", "hello"]).unwrap();
        match cli.command {
            Commands::Run {
                prompt_file,
                input,
                strict,
            } => {
                assert_eq!(prompt_file, "translate.yaml");
                assert_eq!(input, "hello");
                assert!(!strict);
            }
            _ => panic!("Expected run command"),
        }
    }

    #[test]
    fn test_run_requires_input() {
        assert!(Cli::try_parse_from(["promptpg", "run", "translate.yaml"]).is_err());
    }

    #[test]
    fn test_run_strict() {
        let cli = Cli::try_parse_from(["promptpg", "run", "t.yaml", "--input", "x", "--strict"]).unwrap();
        assert!(matches!(cli.command, Commands::Run { strict: true, .. }));
    }

    #[test]
    fn test_new_command() {
        let cli = Cli::try_parse_from(["promptpg", "new", "summarize"]).unwrap();
        match cli.command {
            Commands::New { name } => assert_eq!(name, "summarize"),
            _ => panic!("Expected new command"),
        }
    }

    #[test]
    fn test_list_command() {
        let cli = Cli::try_parse_from(["promptpg", "list"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_compare_with_input() {
        let cli = Cli::try_parse_from(["promptpg", "compare", "a.yaml", "b.yaml", "--input", "hi"]).unwrap();
        match cli.command {
            Commands::Compare {
                prompt_files,
                input,
                input_file,
                strict,
            } => {
                assert_eq!(prompt_files, vec!["a.yaml", "b.yaml"]);
                assert_eq!(input, Some("hi".to_string()));
                assert!(input_file.is_none());
                assert!(!strict);
            }
            _ => panic!("Expected compare command"),
        }
    }

    #[test]
    fn test_compare_with_input_file() {
        let cli = Cli::try_parse_from(["promptpg", "compare", "a.yaml", "--input-file", "in.yaml"]).unwrap();
        match cli.command {
            Commands::Compare { input, input_file, .. } => {
                assert!(input.is_none());
                assert_eq!(input_file, Some(PathBuf::from("in.yaml")));
            }
            _ => panic!("Expected compare command"),
        }
    }

    #[test]
    fn test_compare_without_input_still_parses() {
        // Missing input is reported as a usage error by the command, not clap
        let cli = Cli::try_parse_from(["promptpg", "compare", "a.yaml"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Compare {
                input: None,
                input_file: None,
                ..
            }
        ));
    }

    #[test]
    fn test_help_works() {
        Cli::command().debug_assert();
    }
}
