use std::path::Path;

use tracing::debug;

use crate::error::CliError;

/// Write `content` to `output` when given, otherwise print it to stdout.
pub async fn emit(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => {
            save(content, path).await?;
            println!("File saved to: {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

pub async fn save(content: &str, path: &Path) -> Result<(), CliError> {
    debug!("Writing {} bytes to {}", content.len(), path.display());
    tokio::fs::write(path, content)
        .await
        .map_err(|cause| CliError::OutputError {
            path: path.to_path_buf(),
            cause,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_emit_writes_file() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("response.txt");

        emit("Status: 200 OK\nBody:\n{}", Some(&path)).await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "Status: 200 OK\nBody:\n{}");
    }

    #[tokio::test]
    async fn test_save_reports_path_on_failure() {
        let directory = TempDir::new().unwrap();
        let path = directory.path().join("missing-dir").join("response.txt");

        let error = save("x", &path).await.unwrap_err();
        assert!(matches!(error, CliError::OutputError { .. }));
        assert!(error.to_string().contains("missing-dir"));
    }
}
