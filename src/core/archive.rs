use crate::domain::model::ArchiveSummary;
use crate::utils::error::{ComponentError, Result};
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use zip::write::{SimpleFileOptions, ZipWriter};
use zip::CompressionMethod;

/// 打包時一律排除的路徑 (gitignore 語法)
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "/dist/",
    "__pycache__/",
    ".mypy_cache/",
    ".ruff_cache/",
    ".pytest_cache/",
    ".git/",
    ".venv/",
    "*.pyc",
];

pub struct Packager {
    root: PathBuf,
    output: PathBuf,
    excludes: Gitignore,
}

impl Packager {
    pub fn new(
        root: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        extra_excludes: &[String],
    ) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ComponentError::ValidationError {
                message: format!("Project root {} is not a directory", root.display()),
            });
        }

        let mut builder = GitignoreBuilder::new(&root);
        for pattern in DEFAULT_EXCLUDES
            .iter()
            .copied()
            .chain(extra_excludes.iter().map(String::as_str))
        {
            builder.add_line(None, pattern)?;
        }

        Ok(Self {
            root,
            output: output.into(),
            excludes: builder.build()?,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// 要打包的檔案 (相對於 root)，已排序
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let skip = self.own_files();
        let mut files = Vec::new();
        self.walk(&self.root, Path::new(""), &skip, &mut files)?;
        files.sort();
        Ok(files)
    }

    pub fn package(&self) -> Result<ArchiveSummary> {
        let files = self.collect()?;
        tracing::debug!(
            "Packaging {} files from {}",
            files.len(),
            self.root.display()
        );

        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // 先寫暫存檔，成功後才 rename，避免留下不完整的 zip
        let tmp_path = temp_path(&self.output);
        if let Err(e) = self.write_archive(&tmp_path, &files) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp_path, &self.output) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        let bytes = fs::metadata(&self.output)?.len();
        tracing::debug!("Wrote {} ({} bytes)", self.output.display(), bytes);

        Ok(ArchiveSummary {
            path: self.output.clone(),
            file_count: files.len(),
            bytes,
        })
    }

    fn walk(
        &self,
        dir: &Path,
        relative: &Path,
        skip: &[PathBuf],
        files: &mut Vec<PathBuf>,
    ) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let rel_path = relative.join(entry.file_name());

            if file_type.is_symlink() {
                tracing::debug!("Skipping symlink {}", rel_path.display());
                continue;
            }

            let is_dir = file_type.is_dir();
            if self.excludes.matched(&rel_path, is_dir).is_ignore() {
                tracing::debug!("Excluding {}", rel_path.display());
                continue;
            }

            let path = entry.path();
            if is_dir {
                self.walk(&path, &rel_path, skip, files)?;
            } else if file_type.is_file() {
                if is_same_file(&path, skip) {
                    continue;
                }
                files.push(rel_path);
            }
        }
        Ok(())
    }

    fn write_archive(&self, path: &Path, files: &[PathBuf]) -> Result<()> {
        let mut zip = ZipWriter::new(fs::File::create(path)?);
        let base_options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for rel_path in files {
            let source = self.root.join(rel_path);
            let options = with_permissions(base_options, &source)?;
            zip.start_file(archive_name(rel_path), options)?;
            let mut file = fs::File::open(&source)?;
            io::copy(&mut file, &mut zip)?;
        }

        zip.finish()?;
        Ok(())
    }

    /// 輸出檔與暫存檔若位於 root 內，不可被打包進去
    fn own_files(&self) -> Vec<PathBuf> {
        [self.output.clone(), temp_path(&self.output)]
            .into_iter()
            .filter_map(|p| canonical_target(&p))
            .collect()
    }
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// 檔案可能尚未存在，因此 canonicalize 父目錄再接上檔名
fn canonical_target(path: &Path) -> Option<PathBuf> {
    let file_name = path.file_name()?;
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|p| p.join(file_name))
}

fn is_same_file(path: &Path, skip: &[PathBuf]) -> bool {
    if skip.is_empty() {
        return false;
    }
    path.canonicalize()
        .map(|p| skip.contains(&p))
        .unwrap_or(false)
}

/// zip 內一律使用 `/` 分隔
fn archive_name(rel_path: &Path) -> String {
    rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, source: &Path) -> Result<SimpleFileOptions> {
    use std::os::unix::fs::PermissionsExt;
    let mode = fs::metadata(source)?.permissions().mode();
    Ok(options.unix_permissions(mode))
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _source: &Path) -> Result<SimpleFileOptions> {
    Ok(options)
}
