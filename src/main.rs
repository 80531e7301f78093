use std::fs;

use clap::Parser;
use flags_gen::{
    FlagsGenError, cli::Cli, config::Config, logging::init_logging, output::OutputWriter,
    parser::parse,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.no_color);

    let config = Config::from_cli(cli)?;

    log::debug!("Configuration: {:?}", config);

    let source = fs::read_to_string(&config.input).map_err(FlagsGenError::from)?;
    let descriptors = parse(&source).map_err(FlagsGenError::from)?;

    if descriptors.is_empty() {
        return Err(FlagsGenError::NoAnnotatedStructs(config.input).into());
    }

    log::debug!("Found {} annotated struct(s)", descriptors.len());
    for descriptor in &descriptors {
        log::debug!(
            "  {}: {} field(s), {} registered",
            descriptor.name,
            descriptor.fields.len(),
            descriptor.registered_fields().count()
        );
    }

    let writer = OutputWriter::new(config.format, config.output, config.no_color);
    writer.write(&descriptors).map_err(FlagsGenError::from)?;

    Ok(())
}
