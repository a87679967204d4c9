//! Exporting a generated tree as a zip archive or a directory on disk

use crate::config::ProjectConfig;
use crate::generator::generate;
use crate::tree::{walk, FileNode};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::fs;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Failed to build zip archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to write archive data: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output directory does not exist: {0}")]
    MissingOutputDir(PathBuf),

    #[error("Invalid project name '{0}': expected a single folder name without path separators")]
    InvalidProjectName(String),
}

/// Check that a project name is usable as one folder or archive name
pub fn validate_project_name(name: &str) -> Result<(), ArchiveError> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." || name.contains(['/', '\\']) {
        return Err(ArchiveError::InvalidProjectName(name.to_string()));
    }
    Ok(())
}

/// Archive file name for a project: `<projectName>.zip`
pub fn archive_file_name(config: &ProjectConfig) -> String {
    format!("{}.zip", config.project_name)
}

/// Build an in-memory zip: a directory entry per folder and a file entry per file
pub fn build_zip(nodes: &[FileNode]) -> Result<Vec<u8>, ArchiveError> {
    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        for (path, node) in walk(nodes) {
            match node {
                FileNode::Folder { .. } => {
                    zip.add_directory(format!("{}/", path).as_str(), options)?;
                }
                FileNode::File { content, .. } => {
                    zip.start_file(path.as_str(), options)?;
                    zip.write_all(content.as_bytes())?;
                }
            }
        }

        zip.finish()?;
    }

    Ok(zip_buffer)
}

/// Generate the project and write `<projectName>.zip` into `out_dir`
pub async fn export_zip(config: &ProjectConfig, out_dir: &Path) -> Result<PathBuf, ArchiveError> {
    validate_project_name(&config.project_name)?;
    if !fs::metadata(out_dir).await.is_ok_and(|m| m.is_dir()) {
        return Err(ArchiveError::MissingOutputDir(out_dir.to_path_buf()));
    }

    let zip_bytes = build_zip(&generate(config))?;
    let zip_path = out_dir.join(archive_file_name(config));
    fs::write(&zip_path, &zip_bytes)
        .await
        .map_err(|source| ArchiveError::Write {
            path: zip_path.clone(),
            source,
        })?;

    Ok(zip_path)
}

/// Materialize a tree under `target_dir`, returning the relative paths of written files
pub async fn write_tree(
    nodes: &[FileNode],
    target_dir: &Path,
) -> Result<Vec<String>, ArchiveError> {
    fs::create_dir_all(target_dir)
        .await
        .map_err(|source| ArchiveError::Write {
            path: target_dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::new();
    for (path, node) in walk(nodes) {
        let target_path = target_dir.join(&path);
        match node {
            FileNode::Folder { .. } => {
                fs::create_dir_all(&target_path)
                    .await
                    .map_err(|source| ArchiveError::Write {
                        path: target_path.clone(),
                        source,
                    })?;
            }
            FileNode::File { content, .. } => {
                fs::write(&target_path, content)
                    .await
                    .map_err(|source| ArchiveError::Write {
                        path: target_path.clone(),
                        source,
                    })?;
                written.push(path);
            }
        }
    }

    Ok(written)
}

/// Output format for an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Zip,
    Directory,
}

/// Export session tracking whether an export is in flight
///
/// The flag is raised for the duration of an export and cleared afterwards,
/// whether the export succeeded, failed or was cancelled.
#[derive(Debug, Default)]
pub struct Exporter {
    exporting: AtomicBool,
}

/// Holds the exporting flag raised until dropped
struct ExportingGuard<'a>(&'a AtomicBool);

impl<'a> ExportingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for ExportingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Exporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting.load(Ordering::SeqCst)
    }

    /// Export the project, returning the zip path or the project directory
    pub async fn export(
        &self,
        config: &ProjectConfig,
        out_dir: &Path,
        format: ExportFormat,
    ) -> Result<PathBuf, ArchiveError> {
        let _guard = ExportingGuard::raise(&self.exporting);
        match format {
            ExportFormat::Zip => export_zip(config, out_dir).await,
            ExportFormat::Directory => {
                validate_project_name(&config.project_name)?;
                let project_dir = out_dir.join(&config.project_name);
                write_tree(&generate(config), &project_dir)
                    .await
                    .map(|_| project_dir)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ToolCategory;
    use crate::config::Action;
    use crate::tree::paths;
    use std::future::Future;
    use std::io::Read;
    use std::task::Poll;
    use zip::ZipArchive;

    fn lakehouse() -> ProjectConfig {
        ProjectConfig::default()
            .apply(&Action::SetProjectName("acme".to_string()))
            .apply(&Action::ApplyTemplate("lakehouse".to_string()))
    }

    fn entries(zip_bytes: &[u8]) -> Vec<(String, bool, String)> {
        let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut file = archive.by_index(i).unwrap();
                let mut content = String::new();
                if !file.is_dir() {
                    file.read_to_string(&mut content).unwrap();
                }
                (file.name().to_string(), file.is_dir(), content)
            })
            .collect()
    }

    #[test]
    fn test_zip_mirrors_tree() {
        let tree = generate(&lakehouse());
        let zip_entries = entries(&build_zip(&tree).unwrap());

        let names: Vec<String> = zip_entries
            .iter()
            .map(|(name, _, _)| name.trim_end_matches('/').to_string())
            .collect();
        assert_eq!(names, paths(&tree));

        for (name, is_dir, content) in &zip_entries {
            let node = crate::tree::find(&tree, name.trim_end_matches('/')).unwrap();
            assert_eq!(*is_dir, !node.is_file(), "{}", name);
            if let Some(expected) = node.content() {
                assert_eq!(content, expected, "{}", name);
            }
        }
    }

    #[test]
    fn test_empty_folders_are_kept() {
        let config = ProjectConfig::default().with_tools(&[(ToolCategory::Transformation, "dbt")]);
        let zip_entries = entries(&build_zip(&generate(&config)).unwrap());
        assert!(zip_entries
            .iter()
            .any(|(name, is_dir, _)| name == "transformations/dbt_project/tests/" && *is_dir));
        assert!(zip_entries
            .iter()
            .any(|(name, is_dir, _)| name == "ingestion/" && *is_dir));
    }

    #[test]
    fn test_archive_file_name() {
        assert_eq!(archive_file_name(&lakehouse()), "acme.zip");
    }

    #[tokio::test]
    async fn test_export_zip_writes_named_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = export_zip(&lakehouse(), dir.path()).await.unwrap();
        assert_eq!(path, dir.path().join("acme.zip"));

        let bytes = std::fs::read(&path).unwrap();
        let zip_entries = entries(&bytes);
        assert!(zip_entries.iter().any(|(name, _, _)| name == "docker-compose.yml"));
    }

    #[tokio::test]
    async fn test_write_tree_materializes_files() {
        let dir = tempfile::tempdir().unwrap();
        let tree = generate(&lakehouse());
        let written = write_tree(&tree, dir.path()).await.unwrap();

        assert!(written.contains(&"infrastructure/main.tf".to_string()));
        let main_tf = std::fs::read_to_string(dir.path().join("infrastructure/main.tf")).unwrap();
        assert!(main_tf.contains("acme-lake"));
        assert!(dir.path().join("great_expectations/checkpoints").is_dir());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("data_lake/gold/.gitkeep")).unwrap(),
            ""
        );
    }

    #[tokio::test]
    async fn test_exporter_clears_flag_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new();
        let path = exporter
            .export(&lakehouse(), dir.path(), ExportFormat::Directory)
            .await
            .unwrap();
        assert_eq!(path, dir.path().join("acme"));
        assert!(path.join("README.md").is_file());
        assert!(!exporter.is_exporting());
    }

    #[tokio::test]
    async fn test_exporter_clears_flag_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let exporter = Exporter::new();

        let err = exporter
            .export(&lakehouse(), &missing, ExportFormat::Zip)
            .await
            .unwrap_err();
        assert!(matches!(err, ArchiveError::MissingOutputDir(_)));
        assert!(!exporter.is_exporting());
    }

    #[tokio::test]
    async fn test_exporter_flag_is_raised_while_exporting() {
        let dir = tempfile::tempdir().unwrap();
        let config = lakehouse();
        let exporter = Exporter::new();
        assert!(!exporter.is_exporting());

        let export = exporter.export(&config, dir.path(), ExportFormat::Zip);
        tokio::pin!(export);
        let first = std::future::poll_fn(|cx| Poll::Ready(export.as_mut().poll(cx))).await;
        assert!(first.is_pending());
        assert!(exporter.is_exporting());

        let path = export.await.unwrap();
        assert!(path.is_file());
        assert!(!exporter.is_exporting());
    }

    #[tokio::test]
    async fn test_exporter_clears_flag_when_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let config = lakehouse();
        let exporter = Exporter::new();

        let export = Box::pin(exporter.export(&config, dir.path(), ExportFormat::Directory));
        let mut export = Some(export);
        let first = std::future::poll_fn(|cx| {
            Poll::Ready(export.as_mut().map(|f| f.as_mut().poll(cx)))
        })
        .await;
        assert!(matches!(first, Some(Poll::Pending)));
        assert!(exporter.is_exporting());

        drop(export.take());
        assert!(!exporter.is_exporting());
    }

    #[test]
    fn test_validate_project_name() {
        assert!(validate_project_name("acme").is_ok());
        assert!(validate_project_name("my-data-platform").is_ok());
        for name in ["", "  ", ".", "..", "../escaped", "/tmp/abs", "a/b", "a\\b"] {
            assert!(
                matches!(
                    validate_project_name(name),
                    Err(ArchiveError::InvalidProjectName(_))
                ),
                "{:?}",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_export_rejects_escaping_names() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        std::fs::create_dir(&out_dir).unwrap();
        let exporter = Exporter::new();

        let escaping = lakehouse().apply(&Action::SetProjectName("../escaped".to_string()));
        for format in [ExportFormat::Zip, ExportFormat::Directory] {
            let err = exporter.export(&escaping, &out_dir, format).await.unwrap_err();
            assert!(matches!(err, ArchiveError::InvalidProjectName(_)));
            assert!(!exporter.is_exporting());
        }
        assert!(!dir.path().join("escaped").exists());
        assert!(!dir.path().join("escaped.zip").exists());

        let unnamed = lakehouse().apply(&Action::SetProjectName(String::new()));
        let err = export_zip(&unnamed, &out_dir).await.unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidProjectName(_)));
        assert!(!out_dir.join(".zip").exists());
    }
}
