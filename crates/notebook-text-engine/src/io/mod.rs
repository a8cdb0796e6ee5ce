use crate::{
    models::NotebookContent,
    parsing::{ParseError, text_to_notebook_content},
    serialization::{SerializeError, notebook_content_to_text},
};
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid notebook directory: {0}")]
    InvalidNotebookDir(String),
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

/// Read a notebook file and return its raw text
pub fn read_file(relative_path: &RelativePath, root: &Path) -> Result<String, IoError> {
    read_path(&relative_path.to_path(root))
}

/// Read and parse a notebook file
pub fn read_notebook(relative_path: &RelativePath, root: &Path) -> Result<NotebookContent, IoError> {
    load_notebook(&relative_path.to_path(root))
}

/// Read and parse a notebook by absolute (or working directory relative) path
pub fn load_notebook(path: &Path) -> Result<NotebookContent, IoError> {
    let text = read_path(path)?;
    text_to_notebook_content(&text).map_err(|source| IoError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_path(path: &Path) -> Result<String, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(IoError::Io)
}

/// Write raw text to a notebook file
pub fn write_file(relative_path: &RelativePath, root: &Path, content: &str) -> Result<(), IoError> {
    write_path(&relative_path.to_path(root), content)
}

/// Serialize and write a notebook
pub fn write_notebook(
    relative_path: &RelativePath,
    root: &Path,
    content: &NotebookContent,
) -> Result<(), IoError> {
    save_notebook(&relative_path.to_path(root), content)
}

/// Serialize and write a notebook to `path`
pub fn save_notebook(path: &Path, content: &NotebookContent) -> Result<(), IoError> {
    let text = notebook_content_to_text(content)?;
    write_path(path, &text)
}

fn write_path(path: &Path, content: &str) -> Result<(), IoError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(IoError::Io)?;
    }

    fs::write(path, content).map_err(IoError::Io)
}

/// Scan for notebook files with one of `extensions` under `root`, sorted
pub fn scan_notebook_files(
    root: &Path,
    extensions: &[String],
) -> Result<Vec<RelativePathBuf>, IoError> {
    if !root.exists() {
        return Err(IoError::InvalidNotebookDir(
            "notebook directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, root, extensions, &mut files)?;
    files.sort();
    Ok(files)
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    extensions: &[String],
    files: &mut Vec<RelativePathBuf>,
) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = entry.map_err(IoError::Io)?;
        let path = entry.path();

        if path.is_dir() {
            scan_directory_recursive(root, &path, extensions, files)?;
        } else if let Some(ext) = path.extension().and_then(|e| e.to_str())
            && extensions.iter().any(|wanted| wanted == ext)
            && let Ok(relative) = path.strip_prefix(root)
            && let Ok(relative) = RelativePathBuf::from_path(relative)
        {
            files.push(relative);
        }
    }

    Ok(())
}

pub fn validate_notebook_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidNotebookDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}
