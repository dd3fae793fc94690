//! Invoice template option cache.
//!
//! The host's invoice form offers one option per file in the template
//! directory. Labels are recomputed on every page init and written, joined by
//! the configured delimiter, to a flat cache file that the form layer reads.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::InvoiceHooksConfig;

#[derive(Debug, Error)]
pub enum TemplateCacheError {
    #[error("failed to list templates in {path}: {source}")]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write template cache {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read template cache {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Display label for a template file name.
///
/// Underscores become spaces, the `.{extension}` suffix is dropped and the
/// first letter of every word is upper-cased: `late_notice.php` -> `Late Notice`.
/// Only ASCII letters are upper-cased and only ASCII whitespace separates
/// words, the same way the host's form layer title-cases labels.
pub fn template_label(file_name: &str, extension: &str) -> String {
    let spaced = file_name.replace('_', " ");
    let suffix = format!(".{extension}");
    let stem = spaced.strip_suffix(&suffix).unwrap_or(&spaced);

    let mut label = String::with_capacity(stem.len());
    let mut word_start = true;
    for c in stem.chars() {
        label.push(if word_start { c.to_ascii_uppercase() } else { c });
        word_start = c.is_ascii_whitespace();
    }
    label
}

/// Reads and writes the template option cache described by a config.
#[derive(Debug, Clone)]
pub struct TemplateCache {
    template_dir: PathBuf,
    extension: String,
    cache_path: PathBuf,
    delimiter: String,
}

impl TemplateCache {
    pub fn new(config: &InvoiceHooksConfig) -> Self {
        Self {
            template_dir: config.template_dir(),
            extension: config.template_extension.clone(),
            cache_path: config.cache_path(),
            delimiter: config.delimiter.clone(),
        }
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Labels of the template files, ordered by file name.
    ///
    /// A missing directory has no templates.
    pub fn scan(&self) -> Result<Vec<String>, TemplateCacheError> {
        let scan_err = |source: io::Error| TemplateCacheError::Scan {
            path: self.template_dir.clone(),
            source,
        };

        let entries = match std::fs::read_dir(&self.template_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(scan_err(e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(scan_err)?;
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == self.extension.as_str()) {
                continue;
            }
            // Follows symlinks: deployments often link shared templates in.
            match std::fs::metadata(&path) {
                Ok(meta) if meta.is_file() => {
                    names.push(entry.file_name().to_string_lossy().into_owned());
                }
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(path = %path.display(), "dangling template link skipped");
                }
                Err(e) => return Err(scan_err(e)),
            }
        }
        names.sort();

        Ok(names
            .iter()
            .map(|name| template_label(name, &self.extension))
            .collect())
    }

    /// Overwrite the cache file with `labels`.
    ///
    /// The content is staged in a temporary file next to the cache and then
    /// renamed over it, so readers see either the old or the new list. The
    /// cache keeps the permissions of the file it replaces; a new cache is
    /// world-readable since the host's web server reads it.
    pub fn write(&self, labels: &[String]) -> Result<(), TemplateCacheError> {
        let write_err = |source: io::Error| TemplateCacheError::Write {
            path: self.cache_path.clone(),
            source,
        };

        let dir = match self.cache_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut staged = NamedTempFile::new_in(dir).map_err(write_err)?;
        staged
            .write_all(labels.join(&self.delimiter).as_bytes())
            .map_err(write_err)?;
        let perms = self.cache_permissions(staged.as_file()).map_err(write_err)?;
        staged.as_file().set_permissions(perms).map_err(write_err)?;
        staged
            .persist(&self.cache_path)
            .map_err(|e| write_err(e.error))?;

        tracing::debug!(path = %self.cache_path.display(), count = labels.len(), "template cache written");
        Ok(())
    }

    fn cache_permissions(&self, staged: &std::fs::File) -> io::Result<std::fs::Permissions> {
        match std::fs::metadata(&self.cache_path) {
            Ok(meta) => Ok(meta.permissions()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => new_cache_permissions(staged),
            Err(e) => Err(e),
        }
    }

    /// Rescan the template directory and rewrite the cache.
    pub fn refresh(&self) -> Result<Vec<String>, TemplateCacheError> {
        let labels = self.scan()?;
        self.write(&labels)?;
        Ok(labels)
    }

    /// Labels currently in the cache file; a missing or empty file has none.
    pub fn read_cached(&self) -> Result<Vec<String>, TemplateCacheError> {
        let content = match std::fs::read_to_string(&self.cache_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(TemplateCacheError::Read {
                    path: self.cache_path.clone(),
                    source,
                });
            }
        };

        if content.is_empty() {
            return Ok(Vec::new());
        }
        Ok(content.split(self.delimiter.as_str()).map(str::to_string).collect())
    }
}

#[cfg(unix)]
fn new_cache_permissions(_staged: &std::fs::File) -> io::Result<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Ok(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_cache_permissions(staged: &std::fs::File) -> io::Result<std::fs::Permissions> {
    Ok(staged.metadata()?.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "<?php // template").unwrap();
    }

    fn cache_in(root: &Path) -> TemplateCache {
        TemplateCache::new(&InvoiceHooksConfig::rooted_at(root))
    }

    #[test]
    fn label_replaces_underscores_and_title_cases() {
        assert_eq!(template_label("a_b.php", "php"), "A B");
        assert_eq!(template_label("c.php", "php"), "C");
        assert_eq!(template_label("late_payment_notice.php", "php"), "Late Payment Notice");
    }

    #[test]
    fn label_keeps_inner_case_and_punctuation() {
        assert_eq!(template_label("modern-blue_v2.php", "php"), "Modern-blue V2");
        assert_eq!(template_label("ACME_invoice.php", "php"), "ACME Invoice");
    }

    #[test]
    fn refresh_writes_delimited_labels_in_name_order() {
        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(root.path());
        let templates = root.path().join("invoice-templates");
        std::fs::create_dir_all(&templates).unwrap();
        touch(&templates, "c.php");
        touch(&templates, "a_b.php");
        touch(&templates, "notes.txt");
        std::fs::create_dir(templates.join("nested.php")).unwrap();

        let labels = cache.refresh().unwrap();

        assert_eq!(labels, ["A B", "C"]);
        let written = std::fs::read_to_string(cache.cache_path()).unwrap();
        assert_eq!(written, "A B;;C");
    }

    #[test]
    fn missing_template_dir_writes_empty_cache() {
        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(root.path());
        std::fs::write(cache.cache_path(), "Stale;;Entries").unwrap();

        assert!(cache.refresh().unwrap().is_empty());
        assert_eq!(std::fs::read_to_string(cache.cache_path()).unwrap(), "");
    }

    #[test]
    fn read_splits_on_delimiter() {
        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(root.path());
        assert!(cache.read_cached().unwrap().is_empty());

        cache.write(&["Classic".to_string(), "Modern Blue".to_string()]).unwrap();
        assert_eq!(cache.read_cached().unwrap(), ["Classic", "Modern Blue"]);
    }

    #[test]
    fn write_into_missing_directory_fails() {
        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(&root.path().join("does-not-exist"));
        let err = cache.write(&[]).unwrap_err();
        assert!(matches!(err, TemplateCacheError::Write { .. }));
    }

    #[test]
    fn label_only_title_cases_ascii() {
        assert_eq!(template_label("ß_x.php", "php"), "ß X");
        assert_eq!(template_label("élan_vital.php", "php"), "élan Vital");
    }

    #[cfg(unix)]
    #[test]
    fn scan_includes_symlinked_templates() {
        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(root.path());
        let shared = root.path().join("shared");
        let templates = root.path().join("invoice-templates");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::create_dir_all(&templates).unwrap();
        touch(&shared, "classic.php");
        touch(&templates, "modern.php");
        std::os::unix::fs::symlink(shared.join("classic.php"), templates.join("classic.php")).unwrap();
        std::os::unix::fs::symlink(shared.join("gone.php"), templates.join("gone.php")).unwrap();

        assert_eq!(cache.scan().unwrap(), ["Classic", "Modern"]);
    }

    #[cfg(unix)]
    #[test]
    fn write_keeps_existing_cache_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(root.path());
        std::fs::write(cache.cache_path(), "Old").unwrap();
        std::fs::set_permissions(cache.cache_path(), std::fs::Permissions::from_mode(0o640)).unwrap();

        cache.write(&["A".to_string()]).unwrap();

        let mode = std::fs::metadata(cache.cache_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
        assert_eq!(cache.read_cached().unwrap(), ["A"]);
    }

    #[cfg(unix)]
    #[test]
    fn new_cache_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let root = tempfile::tempdir().unwrap();
        let cache = cache_in(root.path());

        cache.write(&["A".to_string()]).unwrap();

        let mode = std::fs::metadata(cache.cache_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: labels never contain underscores or the extension.
            #[test]
            fn label_drops_underscores_and_extension(stem in "[a-z][a-z_]{0,20}") {
                let label = template_label(&format!("{stem}.php"), "php");
                prop_assert!(!label.contains('_'));
                prop_assert!(!label.ends_with(".php"));
                prop_assert_eq!(label.len(), stem.len());
            }
        }
    }
}
