#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
//! Command-line driver for protoweavec.
//!
//! Schema inputs are evaluated by the front-end matching their extension, every
//! resulting IR file is rendered into the output directory, and `protoc` runs on the
//! generated files when one of its output flags was passed through.

use std::path::{Path, PathBuf};

use clap::Parser;
use config::Config;
use pipeline::{
    compile_bundle, ir_loader::merge_bundles, write_generated, CompileOptions, Frontend,
    IrBundle, JsonFrontend, JsonnetFrontend, NickelFrontend, ProtocInvocation,
};
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while running protoweavec.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    /// Logging could not be initialized.
    #[error(transparent)]
    Logging(#[from] logging::LoggingError),
    /// A pipeline stage failed.
    #[error(transparent)]
    Pipeline(#[from] pipeline::PipelineError),
    /// Schema inputs were given without an output directory.
    #[error("must set --proto_out if passing in .jsonnet, .ncl or .json files")]
    MissingOutputDir,
    /// Some files failed in keep-going mode.
    #[error("{failed} file(s) failed to compile")]
    FilesFailed {
        /// Number of failed files
        failed: usize,
    },
}

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Command-line arguments.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "protoweavec",
    about = "Compile jsonnet and nickel schema scripts into proto3 files",
    version
)]
pub struct Cli {
    /// Directory receiving the generated .proto files
    #[arg(long = "proto_out", visible_alias = "proto-out", value_name = "DIR")]
    pub proto_out: Option<PathBuf>,
    /// Jsonnet library search path; later paths take precedence
    #[arg(short = 'J', long = "jpath", value_name = "DIR")]
    pub jpath: Vec<PathBuf>,
    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Log level or filter directive, overriding the configuration
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
    /// Keep compiling the remaining files after one fails
    #[arg(long)]
    pub keep_going: bool,
    /// Schema scripts (.jsonnet, .ncl) and IR documents (.json); other files go to protoc
    pub inputs: Vec<PathBuf>,
    /// Arguments passed through to protoc, e.g. `-- --go_out=gen -I .`
    #[arg(last = true, value_name = "PROTOC_ARGS")]
    pub protoc_args: Vec<String>,
}

/// Inputs split by the front-end that evaluates them.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Inputs {
    /// Jsonnet scripts
    pub jsonnet: Vec<PathBuf>,
    /// Nickel scripts
    pub nickel: Vec<PathBuf>,
    /// Pre-evaluated IR documents
    pub json: Vec<PathBuf>,
    /// Anything else, forwarded to protoc
    pub passthrough: Vec<String>,
}

impl Inputs {
    /// Whether any input produces generated files.
    pub fn has_schemas(&self) -> bool {
        !(self.jsonnet.is_empty() && self.nickel.is_empty() && self.json.is_empty())
    }
}

/// Dispatch positional inputs by extension.
pub fn classify_inputs(inputs: &[PathBuf]) -> Inputs {
    let jsonnet = JsonnetFrontend::default();
    let nickel = NickelFrontend::default();
    let json = JsonFrontend::new();
    let mut classified = Inputs::default();
    for input in inputs {
        if jsonnet.accepts(input) {
            classified.jsonnet.push(input.clone());
        } else if nickel.accepts(input) {
            classified.nickel.push(input.clone());
        } else if json.accepts(input) {
            classified.json.push(input.clone());
        } else {
            classified.passthrough.push(input.to_string_lossy().into_owned());
        }
    }
    classified
}

/// Output directory: the flag, else the configured one.
pub fn output_dir(cli: &Cli, config: &Config) -> Option<PathBuf> {
    cli.proto_out.clone().or_else(|| config.output.dir.clone())
}

/// Jsonnet search paths in command-line order, configured paths first.
pub fn jpaths(cli: &Cli, config: &Config) -> Vec<PathBuf> {
    config.frontend.jpaths.iter().chain(&cli.jpath).cloned().collect()
}

fn evaluate(inputs: &Inputs, cli: &Cli, config: &Config) -> Result<IrBundle> {
    let frontends: [(Box<dyn Frontend>, &[PathBuf]); 3] = [
        (
            Box::new(JsonnetFrontend::new(jpaths(cli, config))),
            inputs.jsonnet.as_slice(),
        ),
        (Box::new(NickelFrontend::new(&config.frontend.nickel_bin)), inputs.nickel.as_slice()),
        (Box::new(JsonFrontend::new()), inputs.json.as_slice()),
    ];

    let mut bundle = IrBundle::new();
    for (frontend, scripts) in frontends {
        if scripts.is_empty() {
            continue;
        }
        info!(frontend = frontend.name(), scripts = scripts.len(), "evaluating inputs");
        merge_bundles(&mut bundle, frontend.evaluate(scripts)?);
    }
    Ok(bundle)
}

/// Run protoweavec with parsed arguments.
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    logging::init(level, config.logging.file.as_deref())?;

    let inputs = classify_inputs(&cli.inputs);
    let out_dir = output_dir(&cli, &config);
    let mut protoc = ProtocInvocation::new(
        config.protoc.bin.clone(),
        inputs.passthrough.iter().chain(&cli.protoc_args).cloned().collect(),
    );

    if inputs.has_schemas() {
        let out_dir = out_dir.ok_or(CliError::MissingOutputDir)?;
        let generated = generate(&inputs, &cli, &config, &out_dir)?;
        protoc.add_files(generated.iter().map(String::as_str));
    }

    if protoc.requested() {
        protoc.run()?;
    }
    Ok(())
}

fn generate(inputs: &Inputs, cli: &Cli, config: &Config, out_dir: &Path) -> Result<Vec<String>> {
    let bundle = evaluate(inputs, cli, config)?;
    let report = compile_bundle(&bundle, CompileOptions { keep_going: cli.keep_going })?;
    write_generated(out_dir, &report.generated)?;

    for failure in &report.failures {
        warn!(source = %failure.source, error = %failure.error, "file failed");
        eprintln!("{}: {}", failure.source, failure.error);
    }
    if !report.is_success() {
        return Err(CliError::FilesFailed { failed: report.failures.len() });
    }
    Ok(report.generated.into_iter().map(|file| file.name).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("protoweavec").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn test_parses_flags_and_passthrough() {
        let cli = parse(&[
            "--proto_out=gen",
            "-J",
            "lib",
            "--jpath",
            "vendor",
            "a.jsonnet",
            "--",
            "--go_out=out",
            "-I.",
        ]);
        assert_eq!(cli.proto_out, Some(PathBuf::from("gen")));
        assert_eq!(cli.jpath, vec![PathBuf::from("lib"), PathBuf::from("vendor")]);
        assert_eq!(cli.inputs, vec![PathBuf::from("a.jsonnet")]);
        assert_eq!(cli.protoc_args, vec!["--go_out=out", "-I."]);
    }

    #[test]
    fn test_proto_out_alias() {
        assert_eq!(parse(&["--proto-out", "gen"]).proto_out, Some(PathBuf::from("gen")));
    }

    #[test]
    fn test_repeated_proto_out_rejected() {
        let result = Cli::try_parse_from(["protoweavec", "--proto_out=a", "--proto_out=b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_classify_inputs() {
        let inputs = classify_inputs(&[
            PathBuf::from("a.jsonnet"),
            PathBuf::from("b.ncl"),
            PathBuf::from("c.json"),
            PathBuf::from("existing.proto"),
        ]);
        assert_eq!(inputs.jsonnet, vec![PathBuf::from("a.jsonnet")]);
        assert_eq!(inputs.nickel, vec![PathBuf::from("b.ncl")]);
        assert_eq!(inputs.json, vec![PathBuf::from("c.json")]);
        assert_eq!(inputs.passthrough, vec!["existing.proto"]);
        assert!(inputs.has_schemas());
        assert!(!classify_inputs(&[PathBuf::from("x.proto")]).has_schemas());
    }

    #[test]
    fn test_output_dir_falls_back_to_config() {
        let mut config = Config::default();
        config.output.dir = Some(PathBuf::from("configured"));
        assert_eq!(output_dir(&parse(&[]), &config), Some(PathBuf::from("configured")));
        assert_eq!(
            output_dir(&parse(&["--proto_out", "flag"]), &config),
            Some(PathBuf::from("flag"))
        );
        assert_eq!(output_dir(&parse(&[]), &Config::default()), None);
    }

    #[test]
    fn test_command_line_jpaths_take_precedence() {
        let mut config = Config::default();
        config.frontend.jpaths = vec![PathBuf::from("configured")];
        let paths = jpaths(&parse(&["-J", "flag"]), &config);
        assert_eq!(paths, vec![PathBuf::from("configured"), PathBuf::from("flag")]);
    }
}
