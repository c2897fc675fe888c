use clap::Parser;
use npmpack::config::{PackOptions, PackageJsonOverride};
use npmpack::execute;
use npmpack::logger::initialize_logger;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

/// Prepares a folder as an NPM package.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(short = 'r', long, help = "Root directory containing the package files")]
    root: Option<PathBuf>,
    #[arg(
        short = 'c',
        long,
        visible_alias = "files",
        short_alias = 'f',
        num_args = 1..,
        help = "Individual files or directories to include"
    )]
    copy: Option<Vec<String>>,
    #[arg(short = 'i', long, num_args = 1.., help = "Glob pattern(s) of files to include")]
    include: Option<Vec<String>>,
    #[arg(short = 'e', long, num_args = 1.., help = "Glob pattern(s) of files to exclude")]
    exclude: Option<Vec<String>>,
    #[arg(short = 'o', long, help = "Path to output matched files")]
    output: Option<PathBuf>,
    #[arg(
        short = 'p',
        long,
        visible_alias = "props",
        help = "JSON string to override properties in the package.json"
    )]
    packagejson: Option<String>,
    #[arg(long, env = "NPMPACK_CONFIG", help = "JSON file with default options")]
    config: Option<PathBuf>,
}

impl CliArgs {
    fn into_options(self) -> PackOptions {
        PackOptions {
            root: self.root,
            copy: self.copy,
            include: self.include,
            exclude: self.exclude,
            output: self.output,
            packagejson: self.packagejson.map(PackageJsonOverride::Text),
        }
    }
}

fn main() {
    let cli_args = CliArgs::parse();
    initialize_logger();

    let defaults = match &cli_args.config {
        Some(path) => match PackOptions::from_file(path) {
            Ok(options) => options,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        None => PackOptions::default(),
    };
    let options = defaults.overlay(cli_args.into_options());

    match execute(options) {
        Ok(report) => info!("Wrote {}", report.manifest_path.display()),
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}
