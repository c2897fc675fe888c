use crate::config::{resolve, PackConfig, PackOptions};
use crate::errors::{PackError, SkipReason};
use crate::manifest::Manifest;
use crate::selector::FileSelector;
use crate::utils::base_name;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

/// Outcome of a packaging run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackReport {
    pub manifest_path: PathBuf,
    pub copied: Vec<(PathBuf, PathBuf)>,
    pub skipped: Vec<(String, SkipReason)>,
}

pub trait PackageAssembler {
    fn assemble(&self) -> Result<PackReport, PackError>;
}

pub struct BasicPackageAssembler {
    config: PackConfig,
    selector: FileSelector,
}

impl BasicPackageAssembler {
    /// Assembler whose relative paths resolve against `base_dir`.
    pub fn new<P: Into<PathBuf>>(config: PackConfig, base_dir: P) -> Self {
        BasicPackageAssembler {
            config,
            selector: FileSelector::new(base_dir),
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.selector.base_dir().join(path)
    }

    /// Explicit copy entries, then core files, then the include/exclude selection.
    pub fn file_list(&self) -> Vec<String> {
        let config = &self.config;
        let mut files = config.copy.clone();
        files.extend(self.selector.core_files(&config.root));
        files.extend(self.selector.expand_globs(&config.include, &config.exclude, false));
        files
    }

    fn copy_entry(&self, entry: &str, output: &Path) -> Result<PathBuf, SkipReason> {
        let source = self.resolve_path(Path::new(entry));
        let metadata = match fs::metadata(&source) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(SkipReason::Missing),
            Err(e) => return Err(SkipReason::CopyFailed(e.to_string())),
        };
        let name = base_name(entry).ok_or(SkipReason::NoBaseName)?;
        let destination = output.join(name);

        if metadata.is_file() {
            if is_same_file(&source, &destination) {
                debug!("{} is already in place", destination.display());
                return Ok(destination);
            }
            fs::copy(&source, &destination)
                .map_err(|e| SkipReason::CopyFailed(e.to_string()))?;
        } else if metadata.is_dir() {
            copy_dir(&source, &destination, output)
                .map_err(|e| SkipReason::CopyFailed(e.to_string()))?;
        } else {
            return Err(SkipReason::UnknownType);
        }
        Ok(destination)
    }
}

impl PackageAssembler for BasicPackageAssembler {
    fn assemble(&self) -> Result<PackReport, PackError> {
        let config = &self.config;
        let output = self.resolve_path(&config.output);

        debug!("Creating output directory {}", output.display());
        fs::create_dir_all(&output).map_err(|e| {
            PackError::IoError(format!("Failed to create {}: {}", output.display(), e))
        })?;

        let manifest = Manifest::load(&self.resolve_path(&config.root))?;
        let merged = manifest.merge(&config.packagejson);
        let manifest_path = merged.write(&output)?;

        let mut report = PackReport {
            manifest_path,
            ..PackReport::default()
        };

        for entry in self.file_list() {
            trace!("Copying {}", entry);
            match self.copy_entry(&entry, &output) {
                Ok(destination) => {
                    report
                        .copied
                        .push((self.resolve_path(Path::new(&entry)), destination));
                }
                Err(reason) => {
                    warn!("Warning: Skipping \"{}\", it {}", entry, reason);
                    report.skipped.push((entry, reason));
                }
            }
        }

        info!(
            "Packed {} item(s) into {} ({} skipped)",
            report.copied.len(),
            output.display(),
            report.skipped.len()
        );
        Ok(report)
    }
}

/// Packs relative to the current directory.
pub fn execute(options: PackOptions) -> Result<PackReport, PackError> {
    execute_in(".", options)
}

pub fn execute_in<P: Into<PathBuf>>(
    base_dir: P,
    options: PackOptions,
) -> Result<PackReport, PackError> {
    let config = resolve(options)?;
    BasicPackageAssembler::new(config, base_dir).assemble()
}

/// Recursively copies `source` into `destination`, merging with and
/// overwriting whatever is already there. Anything under `output` is skipped
/// so a package directory nested in the source is never copied into itself.
fn copy_dir(source: &Path, destination: &Path, output: &Path) -> io::Result<()> {
    if is_same_file(source, destination) {
        return Ok(());
    }
    let output = output.canonicalize()?;
    let walker = WalkDir::new(source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry
                .path()
                .canonicalize()
                .map(|path| path != output)
                .unwrap_or(true)
        });

    for entry in walker {
        let entry = entry.map_err(io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.file_type().is_symlink() {
            copy_link(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Recreates the link at `target` pointing where `link` points.
#[cfg(unix)]
fn copy_link(link: &Path, target: &Path) -> io::Result<()> {
    let pointee = fs::read_link(link)?;
    if let Ok(existing) = fs::symlink_metadata(target) {
        if existing.is_dir() {
            fs::remove_dir_all(target)?;
        } else {
            fs::remove_file(target)?;
        }
    }
    std::os::unix::fs::symlink(pointee, target)
}

#[cfg(not(unix))]
fn copy_link(link: &Path, target: &Path) -> io::Result<()> {
    if link.is_dir() {
        fs::create_dir_all(target)?;
        return copy_dir(link, target, target);
    }
    fs::copy(link, target).map(|_| ())
}

fn is_same_file(source: &Path, destination: &Path) -> bool {
    match (source.canonicalize(), destination.canonicalize()) {
        (Ok(source), Ok(destination)) => source == destination,
        _ => false,
    }
}
