//! The per-file transformer.
//!
//! A [`FileRecord`] owns one file of an embedded tree while it moves through
//! the pipeline. Every mutation is in memory; nothing touches the disk until
//! [`FileRecord::save`].

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::address;
use crate::construct;
use crate::error::{Result, SpawnError};
use crate::tags;
use crate::validate::Validator;

/// Relative-path suffixes of Go dependency manifests.
const DEPENDENCY_MANIFESTS: [&str; 3] = ["go.mod", "go.mod_", "go.sum"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Slash-separated path inside the embedded tree.
    relative_path: String,
    destination: PathBuf,
    contents: String,
}

impl FileRecord {
    pub fn new(relative_path: &str, destination: PathBuf, contents: &str) -> Self {
        Self {
            relative_path: relative_path.to_string(),
            destination,
            contents: contents.to_string(),
        }
    }

    pub fn relative_path(&self) -> &str {
        &self.relative_path
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    pub fn set_contents(&mut self, contents: String) {
        self.contents = contents;
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }

    // --- Path predicates ---

    pub fn has_path_suffix(&self, suffix: &str) -> bool {
        self.relative_path.ends_with(suffix)
    }

    pub fn has_path_prefix(&self, prefix: &str) -> bool {
        self.relative_path.starts_with(prefix)
    }

    pub fn contains_path(&self, segment: &str) -> bool {
        self.relative_path.contains(segment)
    }

    /// Whether the path ends with any of `suffixes`.
    pub fn in_paths(&self, suffixes: &[&str]) -> bool {
        suffixes.iter().any(|s| self.has_path_suffix(s))
    }

    pub fn is_dependency_manifest(&self) -> bool {
        self.in_paths(&DEPENDENCY_MANIFESTS)
    }

    // --- Plain edits ---

    pub fn replace_all(&mut self, old: &str, new: &str) {
        if self.contents.contains(old) {
            self.contents = self.contents.replace(old, new);
        }
    }

    /// Substring replacement on the destination path.
    pub fn rewrite_destination(&mut self, old_segment: &str, new_segment: &str) {
        let current = self.destination.to_string_lossy();
        if current.contains(old_segment) {
            let rewritten = PathBuf::from(current.replace(old_segment, new_segment));
            debug!(
                path = %self.relative_path,
                to = %rewritten.display(),
                "rewrote destination"
            );
            self.destination = rewritten;
        }
    }

    /// Empty the buffer when the path ends with `suffix`; the file is then not written.
    pub fn delete_contents_if_path_is(&mut self, suffix: &str) {
        if self.has_path_suffix(suffix) && !self.contents.is_empty() {
            debug!(path = %self.relative_path, "deleted contents");
            self.contents.clear();
        }
    }

    /// Empty the buffer of any file whose path contains `segment`.
    pub fn delete_directory_contents(&mut self, segment: &str) {
        if self.contains_path(segment) && !self.contents.is_empty() {
            debug!(path = %self.relative_path, segment, "deleted directory contents");
            self.contents.clear();
        }
    }

    // --- Tags ---

    pub fn remove_tagged_lines(&mut self, feature: &str, delete_line: bool) -> Result<()> {
        self.contents = tags::remove_tagged_lines(&self.relative_path, &self.contents, feature, delete_line)?;
        Ok(())
    }

    pub fn handle_comment_swaps(&mut self, feature: &str) {
        self.contents = tags::handle_comment_swaps(&self.contents, feature);
    }

    /// Uncomment the alternatives for `feature`, then drop everything tagged with it.
    pub fn handle_all_tagged(&mut self, feature: &str) -> Result<()> {
        self.handle_comment_swaps(feature);
        self.remove_tagged_lines(feature, true)
    }

    // --- Rewrites ---

    pub fn find_and_replace_address_prefix(&mut self, old_prefix: &str, new_prefix: &str) -> Result<()> {
        self.contents = address::replace_address_prefix(&self.contents, old_prefix, new_prefix)?;
        Ok(())
    }

    /// Remove `identifier` and the constructs it opens, in files matching `path_whitelist`.
    pub fn remove_construct_by_identifier(&mut self, identifier: &str, path_whitelist: &[&str]) {
        if !self.in_paths(path_whitelist) {
            return;
        }
        let removal = construct::remove_construct(&self.contents, identifier);
        if let Some(line) = removal.unclosed {
            warn!(
                path = %self.relative_path,
                identifier,
                line,
                "construct still open at end of file"
            );
        }
        self.contents = removal.contents;
    }

    /// [`remove_construct_by_identifier`](Self::remove_construct_by_identifier) for several identifiers.
    pub fn remove_constructs(&mut self, identifiers: &[&str], path_whitelist: &[&str]) {
        for identifier in identifiers {
            self.remove_construct_by_identifier(identifier, path_whitelist);
        }
    }

    /// Drop lines containing `substring` from dependency manifests.
    pub fn remove_import_line(&mut self, substring: &str) {
        if self.is_dependency_manifest() {
            self.remove_any_line_matching(substring);
        }
    }

    /// Drop every line containing `substring`.
    pub fn remove_any_line_matching(&mut self, substring: &str) {
        if !self.contents.contains(substring) {
            return;
        }
        self.contents = self
            .contents
            .split('\n')
            .filter(|line| !line.contains(substring))
            .collect::<Vec<_>>()
            .join("\n");
    }

    // --- Output ---

    /// Run `validator` over the buffer if it applies to this file.
    pub fn validate_syntax_if_applicable(&mut self, validator: &dyn Validator) -> Result<()> {
        let path = Path::new(&self.relative_path);
        if !validator.applies_to(path) || self.contents.is_empty() {
            return Ok(());
        }
        self.contents = validator.validate(path, &self.contents)?;
        Ok(())
    }

    /// Write the buffer to the destination. Returns `false` for an empty buffer.
    pub fn save(&self) -> Result<bool> {
        if self.contents.is_empty() {
            return Ok(false);
        }

        if let Some(parent) = self.destination.parent() {
            std::fs::create_dir_all(parent).map_err(|e| io_at(parent, e))?;
        }
        std::fs::write(&self.destination, &self.contents).map_err(|e| io_at(&self.destination, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.destination, std::fs::Permissions::from_mode(0o644))
                .map_err(|e| io_at(&self.destination, e))?;
        }

        Ok(true)
    }
}

fn io_at(path: &Path, source: std::io::Error) -> SpawnError {
    SpawnError::IoPath {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::DelimiterValidator;

    fn record(path: &str, contents: &str) -> FileRecord {
        FileRecord::new(path, PathBuf::from("out").join(path), contents)
    }

    #[test]
    fn test_path_predicates() {
        let f = record("interchaintest/setup.go", "");
        assert!(f.has_path_suffix("setup.go"));
        assert!(f.has_path_prefix("interchaintest/"));
        assert!(f.contains_path("chaintest"));
        assert!(f.in_paths(&["app/app.go", "interchaintest/setup.go"]));
        assert!(!f.in_paths(&["app/app.go"]));
    }

    #[test]
    fn test_dependency_manifests() {
        assert!(record("go.mod", "").is_dependency_manifest());
        assert!(record("interchaintest/go.mod_", "").is_dependency_manifest());
        assert!(record("go.sum", "").is_dependency_manifest());
        assert!(!record("app/app.go", "").is_dependency_manifest());
    }

    #[test]
    fn test_rewrite_destination() {
        let mut f = record("cmd/wasmd/main.go", "");
        f.rewrite_destination("cmd/wasmd", "cmd/appd");
        assert_eq!(f.destination(), Path::new("out/cmd/appd/main.go"));
        assert_eq!(f.relative_path(), "cmd/wasmd/main.go");
    }

    #[test]
    fn test_delete_contents_only_on_matching_path() {
        let mut f = record("app/wasm.go", "package app");
        f.delete_contents_if_path_is("app/app.go");
        assert!(!f.is_empty());
        f.delete_contents_if_path_is("app/wasm.go");
        assert!(f.is_empty());
    }

    #[test]
    fn test_delete_directory_contents() {
        let mut f = record("interchaintest/contracts/README.md", "# Contracts");
        f.delete_directory_contents("interchaintest/contracts");
        assert!(f.is_empty());
    }

    #[test]
    fn test_remove_import_line_is_manifest_scoped() {
        let text = "a\n\tgithub.com/CosmWasm/wasmd v0.51.0\nb";
        let mut manifest = record("go.mod", text);
        manifest.remove_import_line("github.com/CosmWasm/wasmd");
        assert_eq!(manifest.contents(), "a\nb");

        let mut source = record("app/app.go", text);
        source.remove_import_line("github.com/CosmWasm/wasmd");
        assert_eq!(source.contents(), text);
    }

    #[test]
    fn test_construct_removal_respects_whitelist() {
        let text = "x\napp.PoaKeeper = New(\n\ta,\n)\ny";
        let mut other = record("app/ante.go", text);
        other.remove_construct_by_identifier("PoaKeeper", &["app/app.go"]);
        assert_eq!(other.contents(), text);

        let mut app = record("app/app.go", text);
        app.remove_construct_by_identifier("PoaKeeper", &["app/app.go"]);
        assert_eq!(app.contents(), "x\ny");
    }

    #[test]
    fn test_handle_all_tagged() {
        let mut f = record(
            "app/ante.go",
            "a, // spawntag:globalfee\n// b, // ?spawntag:globalfee\nc,",
        );
        f.handle_all_tagged("globalfee").unwrap();
        assert_eq!(f.contents(), "b,\nc,");
    }

    #[test]
    fn test_validate_skips_non_go_files() {
        let mut f = record("Makefile", "target: (");
        assert!(f.validate_syntax_if_applicable(&DelimiterValidator).is_ok());

        let mut g = record("app/app.go", "func f() {");
        assert!(matches!(
            g.validate_syntax_if_applicable(&DelimiterValidator),
            Err(SpawnError::Syntax { .. })
        ));
    }

    #[test]
    fn test_save_writes_and_skips_empty() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/dir/file.txt");
        let f = FileRecord::new("nested/dir/file.txt", dest.clone(), "hello");
        assert!(f.save().unwrap());
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "hello");

        let empty = FileRecord::new("empty.txt", dir.path().join("empty.txt"), "");
        assert!(!empty.save().unwrap());
        assert!(!dir.path().join("empty.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("f.go");
        FileRecord::new("f.go", dest.clone(), "package f").save().unwrap();
        let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
