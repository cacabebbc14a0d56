//! Template resolution and materialization.
//!
//! Every project type has one template directory under the templates root, named after
//! the type's id. Materializing copies that tree into the target directory verbatim.

use crate::{
    error::{Error, Result},
    project::ProjectType,
};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Maps project types to template source directories.
#[derive(Debug, Clone)]
pub struct TemplateDescriptor {
    root: PathBuf,
}

impl TemplateDescriptor {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    /// Template source directory for a project type. Pure lookup; it may not exist.
    pub fn source_dir(&self, project_type: ProjectType) -> PathBuf {
        self.root.join(project_type.id())
    }

    /// Copies the template of `project_type` into `target_dir` and returns the number of
    /// files copied.
    ///
    /// The target directory is created when missing and never cleared; files that
    /// already exist with the same relative path are overwritten. A failure leaves
    /// whatever was copied so far in place.
    pub fn materialize<P: AsRef<Path>>(
        &self,
        project_type: ProjectType,
        target_dir: P,
    ) -> Result<usize> {
        let source_root = self.source_dir(project_type);
        if !source_root.is_dir() {
            return Err(Error::UnknownTemplateError {
                project_type: project_type.id().to_string(),
                template_dir: source_root.display().to_string(),
            });
        }

        let target_root = target_dir.as_ref();
        ensure_outside_source(&source_root, target_root)?;
        create_dir_all(target_root)?;
        log::debug!(
            "Copying template '{}' from {} to {}",
            project_type,
            source_root.display(),
            target_root.display()
        );

        let mut copied = 0;
        for dir_entry in WalkDir::new(&source_root).min_depth(1) {
            let dir_entry = dir_entry.map_err(|e| {
                let path = e.path().map(|p| p.display().to_string()).unwrap_or_default();
                Error::TemplateCopyError { path, source: e.into() }
            })?;

            let relative = dir_entry.path().strip_prefix(&source_root).map_err(|_| {
                Error::TemplateCopyError {
                    path: dir_entry.path().display().to_string(),
                    source: std::io::Error::other("entry is outside the template root"),
                }
            })?;
            let target = target_root.join(relative);

            if dir_entry.file_type().is_dir() {
                create_dir_all(&target)?;
            } else {
                copy_file(dir_entry.path(), &target)?;
                log::trace!("Copied {}", relative.display());
                copied += 1;
            }
        }

        log::info!("Copied {copied} template files into {}", target_root.display());
        Ok(copied)
    }
}

/// Fails when `target` is the template source or lies inside it.
fn ensure_outside_source(source: &Path, target: &Path) -> Result<()> {
    let copy_error = |err| Error::TemplateCopyError {
        path: target.display().to_string(),
        source: err,
    };
    let source = source.canonicalize().map_err(copy_error)?;
    let resolved = canonicalize_lenient(target).map_err(copy_error)?;

    if resolved.starts_with(&source) {
        return Err(copy_error(std::io::Error::other(format!(
            "cannot copy '{}' into itself",
            source.display()
        ))));
    }
    Ok(())
}

/// Canonicalizes the longest existing prefix of `path` and appends the rest.
fn canonicalize_lenient(path: &Path) -> std::io::Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    while !existing.exists() {
        let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
            break;
        };
        missing.push(name);
        existing = parent;
    }

    let existing = if existing.as_os_str().is_empty() { Path::new(".") } else { existing };
    let mut resolved = existing.canonicalize()?;
    resolved.extend(missing.iter().rev());
    Ok(resolved)
}

fn create_dir_all(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| Error::TemplateCopyError {
        path: path.display().to_string(),
        source,
    })
}

/// Copy a file, creating parent directories if needed.
fn copy_file(source_path: &Path, dest_path: &Path) -> Result<()> {
    if let Some(parent) = dest_path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::copy(source_path, dest_path).map(|_| ()).map_err(|source| {
        Error::TemplateCopyError { path: source_path.display().to_string(), source }
    })
}
