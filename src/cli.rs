use std::path::PathBuf;

use clap::Parser;

/// Generate pflag AddFlags methods from Go structs
///
/// Parses a Go source file, finds the structs whose doc comment contains the
/// +flags-gen marker and writes an AddFlags(fs *pflag.FlagSet) method for each
/// of them. Flag names come from the json tag (or the field name) in
/// kebab-case, defaults from the default tag and help text from the field's
/// doc comment.
///
/// Example:
///   flags-gen -i types.go -o flags_gen.go
#[derive(Parser, Debug)]
#[command(name = "flags-gen")]
#[command(version)]
#[command(about, long_about)]
pub struct Cli {
    /// Input Go file containing structs with +flags-gen annotations
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file for generated code (defaults to <input>_flags.go)
    #[arg(short = 'o', long = "output", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Output format: go, json
    #[arg(short = 'f', long = "format", default_value = "go")]
    pub format: OutputFormat,

    /// Print the result to stdout instead of writing a file
    #[arg(long = "stdout")]
    pub stdout: bool,

    /// Suppress colored output (useful for CI/CD pipelines)
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long = "verbose")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Go source with one AddFlags method per struct
    #[default]
    Go,
    /// The parsed struct descriptors as JSON
    Json,
}
