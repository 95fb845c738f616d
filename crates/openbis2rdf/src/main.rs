use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use openbis2rdf::conversion::loader::load_input;
use openbis2rdf::conversion::{convert, ConversionOptions, TimestampZone, DEFAULT_BASE_URL};
use openbis2rdf::emitter::jsonld::JsonLdEmitter;
use openbis2rdf::emitter::ntriples::NTriplesEmitter;
use openbis2rdf::emitter::rdfxml::RdfXmlEmitter;
use openbis2rdf::emitter::turtle::TurtleEmitter;
use openbis2rdf::emitter::{emit_graph, TriplesEmitter};
use openbis2rdf::error::ConvertError;
use openbis2rdf::model::vocabulary::Vocabulary;

/// Convert openBIS JSON exports to RDF.
#[derive(Parser)]
#[command(name = "openbis2rdf", version, about)]
struct Cli {
    /// Path to an openBIS JSON document, or `-` for stdin.
    input: PathBuf,

    /// Output file path [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: ntriples, nquads, turtle, rdfxml, json-ld.
    #[arg(short, long, value_name = "FORMAT", default_value = "ntriples")]
    format: String,

    /// Base URL permanent identities are anchored under.
    #[arg(short, long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// JSON key table merged over the built-in openBIS vocabulary.
    #[arg(long, value_name = "FILE")]
    vocabulary: Option<PathBuf>,

    /// Render epoch timestamps in UTC instead of local time.
    #[arg(long)]
    utc: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let filter = if cli.quiet {
        EnvFilter::new("off")
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), ConvertError> {
    let mut vocabulary = Vocabulary::openbis();
    if let Some(path) = &cli.vocabulary {
        vocabulary.extend(Vocabulary::load(path)?);
    }
    tracing::debug!(terms = vocabulary.len(), "vocabulary ready");

    let document = load_input(&cli.input)?;

    let options = ConversionOptions {
        base_url: cli.base_url.clone(),
        timestamp_zone: if cli.utc {
            TimestampZone::Utc
        } else {
            TimestampZone::Local
        },
    };

    // Reject the format before doing any work
    let format = cli.format.to_lowercase();
    if !matches!(
        format.as_str(),
        "ntriples"
            | "nt"
            | "nquads"
            | "nq"
            | "turtle"
            | "ttl"
            | "rdfxml"
            | "xml"
            | "json-ld"
            | "jsonld"
    ) {
        return Err(ConvertError::UnknownFormat(format));
    }

    let graph = convert(&document, &vocabulary, &options)?;

    // Determine output writer
    let output_writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut emitter: Box<dyn TriplesEmitter> = match format.as_str() {
        "turtle" | "ttl" => Box::new(TurtleEmitter::new(output_writer)),
        "rdfxml" | "xml" => Box::new(RdfXmlEmitter::new(output_writer)),
        "json-ld" | "jsonld" => Box::new(JsonLdEmitter::new(output_writer)),
        _ => Box::new(NTriplesEmitter::new(output_writer)),
    };
    let triple_count = emit_graph(emitter.as_mut(), &graph)?;

    // Print summary to stderr (unless quiet)
    if !cli.quiet {
        eprintln!(
            "Converted {} into {triple_count} triples",
            cli.input.display()
        );
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
