//! The command-line interface to the clubscript compiler.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use clubscript::{Config, Labels, ScriptError};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The script to compile. Reads stdin when omitted.
    input: Option<PathBuf>,
    /// Club to compile for.
    #[arg(short, long)]
    club: Option<i64>,
    /// Audacity project holding the label track.
    #[arg(short, long)]
    labels: Option<PathBuf>,
    /// YAML config file with defaults for --club and --labels.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Emit the resolved script without time comments.
    #[arg(long)]
    plain: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ScriptError> {
    let file_config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let settings = file_config.merged(Config {
        club: args.club,
        labels: args.labels.clone(),
    });
    let options = settings.options()?;

    let labels = match &settings.labels {
        Some(path) => clubscript::load_label_track(path)?,
        None => Labels::new(),
    };

    let source = match &args.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            source
        }
    };

    log::info!("compiling for club {}", options.club);
    let program = clubscript::compile(&source, &options, &labels)?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(io::BufWriter::new(fs::File::create(path)?)),
        None => Box::new(io::BufWriter::new(io::stdout().lock())),
    };
    clubscript::emit(&program, &mut out, args.plain)
}
