use clap::{Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxdiagram")]
/// Oxdiagram command line toolkit and live diagram HTTP server
pub struct Args {
    /// Format of the log lines written to stderr
    ///
    /// The log level is read from the RUST_LOG environment variable.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the diagram editor HTTP server
    ///
    /// Every document posted to /update is compiled into class and object diagrams
    /// and, if valid, becomes the new current document.
    Serve {
        /// Host and port to listen to
        #[arg(short, long, env = "OXDIAGRAM_BIND", default_value = "localhost:3000", value_hint = ValueHint::Hostname)]
        bind: String,
        /// File in which the current document should be persisted
        ///
        /// If not present, the document is only kept in memory.
        #[arg(short, long, env = "OXDIAGRAM_DOCUMENT", value_hint = ValueHint::FilePath)]
        document: Option<PathBuf>,
        /// Allows cross-origin requests
        #[arg(long)]
        cors: bool,
    },
    /// Compile an RDF file into diagram models
    ///
    /// The models are written as JSON.
    Compile {
        /// File to compile
        ///
        /// If no file is given, stdin is used as if it were the input file content.
        /// In this case, the content format must be specified using the --format option.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// The format of the file to compile
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default, the format is guessed from the input file extension.
        #[arg(long, required_unless_present = "file")]
        format: Option<String>,
        /// Base IRI of the file to compile
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// The diagram(s) to output
        #[arg(long, value_enum, default_value_t = ViewSelection::Both)]
        view: ViewSelection,
        /// File to write the models to
        ///
        /// If no file is given, stdout is used.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ViewSelection {
    /// Classes, their properties and relations
    Class,
    /// Instances, their values and links
    Object,
    /// Both diagrams
    Both,
}
