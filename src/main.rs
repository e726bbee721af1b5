use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use esgen::diagnostics::render_error;
use esgen::ir::Project;
use esgen::js::Program;
use esgen::{LowerConfig, LowerError};

#[derive(Parser)]
#[command(name = "esgen", version, about = "Lower typed IR to a JavaScript output tree")]
struct Cli {
    /// Config file (defaults to esgen.toml next to the input, if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Report per-file progress on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lower an IR project and write the output trees as JSON
    Lower {
        /// IR project file (JSON)
        file: PathBuf,
        /// Output path. If omitted, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Lower an IR project and only report errors
    Check {
        /// IR project file (JSON)
        file: PathBuf,
    },
}

fn load_config(explicit: Option<&Path>, input: &Path) -> Result<LowerConfig, LowerError> {
    match explicit {
        Some(path) => LowerConfig::load(path),
        None => {
            let dir = input.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
            LowerConfig::find(dir)
        }
    }
}

fn fail(filename: &str, err: &LowerError) -> ! {
    render_error(None, filename, err);
    std::process::exit(1);
}

/// Lower every file, rendering failures as they come. Returns the successes and the failure count.
fn lower_all(file: &Path, config: &LowerConfig, verbose: bool) -> (BTreeMap<String, Program>, usize) {
    let input = file.to_string_lossy().to_string();
    let (project, results) = match esgen::lower_path(file, config) {
        Ok(lowered) => lowered,
        Err(err) => fail(&input, &err),
    };

    let mut programs = BTreeMap::new();
    let mut failed = 0;
    for (path, result) in results {
        match result {
            Ok(program) => {
                if verbose {
                    eprintln!("  lowered {path} ({} statement(s))", program.statements.len());
                }
                programs.insert(path, program);
            }
            Err(err) => {
                failed += 1;
                render_error(source_of(&project, &path), &path, &err);
            }
        }
    }
    (programs, failed)
}

fn source_of<'p>(project: &'p Project, path: &str) -> Option<&'p str> {
    project.file(path).and_then(|f| f.source.as_deref())
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Lower { file, output } => {
            let config = load_config(cli.config.as_deref(), &file)
                .unwrap_or_else(|err| fail(&file.to_string_lossy(), &err));
            let (programs, failed) = lower_all(&file, &config, cli.verbose);

            let json = match serde_json::to_string_pretty(&programs) {
                Ok(json) => json,
                Err(e) => fail(&file.to_string_lossy(), &LowerError::input(format!("could not serialize output: {e}"))),
            };
            match output {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, json) {
                        eprintln!("error: could not write {}: {e}", path.display());
                        std::process::exit(1);
                    }
                    if cli.verbose {
                        eprintln!("wrote {}", path.display());
                    }
                }
                None => println!("{json}"),
            }

            eprintln!("lower: {} file(s) lowered, {failed} failed", programs.len());
            if failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => {
            let config = load_config(cli.config.as_deref(), &file)
                .unwrap_or_else(|err| fail(&file.to_string_lossy(), &err));
            let (programs, failed) = lower_all(&file, &config, cli.verbose);
            if failed > 0 {
                eprintln!("check: {failed} file(s) failed");
                std::process::exit(1);
            }
            eprintln!("check: {} file(s) ok", programs.len());
        }
    }
}
