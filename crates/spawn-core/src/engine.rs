//! Engine driver: walks an embedded tree and materializes it on disk.
//!
//! Per file: skip ignored paths, build a [`FileRecord`], run the pipeline,
//! validate, save. The first failure dumps the buffer at the point of failure
//! to the debug directory and aborts the tree. Files already written stay on
//! disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, error, warn};

use crate::config::ChainConfig;
use crate::error::{Result, SpawnError};
use crate::file::FileRecord;
use crate::pipeline::Pipeline;
use crate::templates::embedded::EmbeddedTree;
use crate::validate::Validator;

/// Paths never generated: the embed descriptor and the container-build helper directory.
pub const DEFAULT_IGNORE: [&str; 2] = ["embed.go", "heighliner/"];

/// Where failed buffers are dumped, relative to the working directory.
pub const DEFAULT_DEBUG_DIR: &str = "debugging";

/// Nested dependency manifests are embedded under this name and renamed on output.
pub const MANIFEST_PLACEHOLDER: &str = "go.mod_";

/// Outcome of materializing one tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeReport {
    pub tree: String,
    /// Destination paths written, in walk order.
    pub written: Vec<PathBuf>,
    /// Relative paths whose buffer was empty after transformation.
    pub skipped_empty: Vec<String>,
    /// Number of files matched by the ignore list.
    pub ignored: usize,
}

pub struct Engine {
    output_root: PathBuf,
    debug_dir: PathBuf,
    validator: Box<dyn Validator>,
    ignore: Vec<String>,
    written: BTreeSet<PathBuf>,
}

impl Engine {
    pub fn new(output_root: impl Into<PathBuf>, validator: Box<dyn Validator>) -> Self {
        Self {
            output_root: output_root.into(),
            debug_dir: PathBuf::from(DEFAULT_DEBUG_DIR),
            validator,
            ignore: DEFAULT_IGNORE.iter().map(|p| p.to_string()).collect(),
            written: BTreeSet::new(),
        }
    }

    pub fn with_debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_dir = dir.into();
        self
    }

    /// Replace the ignore list. A pattern ending in `/` matches a directory
    /// prefix; any other pattern matches a file name.
    pub fn with_ignore_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> Self {
        self.ignore = patterns.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    pub fn debug_dir(&self) -> &Path {
        &self.debug_dir
    }

    pub fn is_ignored(&self, relative_path: &str) -> bool {
        self.ignore.iter().any(|pattern| {
            if pattern.ends_with('/') {
                relative_path.starts_with(pattern.as_str())
            } else {
                relative_path == pattern || relative_path.ends_with(&format!("/{pattern}"))
            }
        })
    }

    /// Destination of a tree file, with the manifest placeholder renamed.
    pub fn destination_for(&self, relative_path: &str) -> PathBuf {
        match relative_path.strip_suffix(MANIFEST_PLACEHOLDER) {
            Some(dir) => {
                let renamed = format!("{dir}go.mod");
                debug!(from = relative_path, to = %renamed, "renaming dependency manifest");
                self.output_root.join(renamed)
            }
            None => self.output_root.join(relative_path),
        }
    }

    /// Materialize every file of `tree` under the output root.
    pub fn materialize(
        &mut self,
        tree: &EmbeddedTree,
        pipeline: &Pipeline,
        cfg: &ChainConfig,
    ) -> Result<TreeReport> {
        let mut report = TreeReport {
            tree: tree.name.to_string(),
            ..TreeReport::default()
        };

        for file in tree.files {
            if self.is_ignored(file.path) {
                debug!(path = file.path, "ignored");
                report.ignored += 1;
                continue;
            }

            let mut record = FileRecord::new(file.path, self.destination_for(file.path), file.contents);
            match self.process(&mut record, pipeline, cfg) {
                Ok(true) => report.written.push(record.destination().to_path_buf()),
                Ok(false) => {
                    debug!(path = file.path, "skipped empty file");
                    report.skipped_empty.push(file.path.to_string());
                }
                Err(e) => {
                    let dump = self.write_debug_dump(&record, cfg);
                    error!(
                        path = file.path,
                        error = %e,
                        debug_file = %dump.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
                        "failed to materialize file"
                    );
                    return Err(e);
                }
            }
        }

        Ok(report)
    }

    fn process(&mut self, record: &mut FileRecord, pipeline: &Pipeline, cfg: &ChainConfig) -> Result<bool> {
        pipeline.run(record, cfg)?;
        record.validate_syntax_if_applicable(self.validator.as_ref())?;

        if record.is_empty() {
            return Ok(false);
        }
        if !self.written.insert(record.destination().to_path_buf()) {
            return Err(SpawnError::DuplicateOutput(record.destination().to_path_buf()));
        }
        record.save()
    }

    /// Write the buffer to `debug-error-<project>-<timestamp>.<ext>`.
    fn write_debug_dump(&self, record: &FileRecord, cfg: &ChainConfig) -> Option<PathBuf> {
        let ext = Path::new(record.relative_path())
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("txt");
        let stamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
        let path = self
            .debug_dir
            .join(format!("debug-error-{}-{stamp}.{ext}", cfg.project_name));

        let written = std::fs::create_dir_all(&self.debug_dir)
            .and_then(|_| std::fs::write(&path, record.contents()));
        match written {
            Ok(()) => Some(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not write debug dump");
                None
            }
        }
    }
}
