use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use ride_profile::codec::RecordReader;
use ride_profile::config::Config;
use ride_profile::labeler::{label_stream, select_classifier, should_upgrade};
use ride_profile::report::LabelReport;

#[derive(Parser)]
#[command(name = "ride-profile")]
#[command(about = "Validate and label ride telemetry samples")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every line of a JSON-lines file decodes
    Validate { input: String },
    /// Attach a ride profile to every sample
    Label {
        /// JSON-lines input, `-` for stdin
        input: String,
        /// YAML file with classifier settings
        #[arg(long)]
        config: Option<String>,
        /// Fixed profile, overrides the config file
        #[arg(long)]
        profile: Option<String>,
        /// Write labeled records here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write a YAML run report
        #[arg(long)]
        report: Option<PathBuf>,
        /// Drop legacy track ids from the output
        #[arg(long)]
        upgrade: bool,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { input } => validate(&input),
        Commands::Label {
            input,
            config,
            profile,
            output,
            report,
            upgrade,
        } => label(LabelArgs {
            input,
            config,
            profile,
            output,
            report,
            upgrade,
        }),
    }
}

fn open_input(path: &str) -> io::Result<Box<dyn BufRead>> {
    if path == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}

fn validate(path: &str) -> ExitCode {
    let reader = match open_input(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut valid = 0;
    let mut failed = 0;
    for result in RecordReader::new(reader) {
        match result {
            Ok(record) => {
                valid += 1;
                let sample = record.sample();
                println!(
                    "  {}/{} [{}] profile={}",
                    sample.device_id(),
                    sample.window_id(),
                    record.schema_version(),
                    sample.classification_label().unwrap_or("-")
                );
            }
            Err(e) => {
                failed += 1;
                eprintln!("Parse error: {}", e);
            }
        }
    }

    println!("{} valid, {} invalid", valid, failed);
    if failed > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

struct LabelArgs {
    input: String,
    config: Option<String>,
    profile: Option<String>,
    output: Option<PathBuf>,
    report: Option<PathBuf>,
    upgrade: bool,
}

fn label(args: LabelArgs) -> ExitCode {
    let config = match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Config error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let classifier = match select_classifier(&config, args.profile.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let upgrade = should_upgrade(&config, args.upgrade);

    let reader = match open_input(&args.input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let sink: Box<dyn Write> = match &args.output {
        Some(path) => match File::create(path) {
            Ok(f) => Box::new(BufWriter::new(f)),
            Err(e) => {
                eprintln!("Error creating {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Box::new(BufWriter::new(io::stdout())),
    };
    let mut report = LabelReport::new(&args.input);

    log::info!("Labeling {} (run {})", args.input, report.run_id);

    if let Err(e) = label_stream(reader, sink, classifier.as_ref(), upgrade, &mut report) {
        eprintln!("Labeling stopped: {}", e);
        return ExitCode::FAILURE;
    }

    report.finish();
    log::info!("{}", report.summary());

    if let Some(path) = &args.report {
        if let Err(e) = report.save(path) {
            eprintln!("Error writing report {}: {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
