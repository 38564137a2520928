//! Decks on disk: the same pretty JSON the editor saves and `generate` writes.

use slidesmith_common::Presentation;
use std::path::{Path, PathBuf};

use crate::error::{Result, SlidesmithError};
use crate::export::{export_presentation, HtmlDocumentWriter, SvgPageRenderer};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> SlidesmithError + '_ {
    move |source| SlidesmithError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub async fn read_deck(path: &Path) -> Result<Presentation> {
    let contents = tokio::fs::read_to_string(path).await.map_err(io_error(path))?;
    Ok(Presentation::from_json(&contents)?)
}

/// Write `presentation` to `path`, creating parent directories.
pub async fn write_deck(path: &Path, presentation: &Presentation) -> Result<()> {
    let json = presentation.to_json_pretty()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_error(parent))?;
    }
    tokio::fs::write(path, json).await.map_err(io_error(path))?;
    tracing::info!("saved deck to {}", path.display());
    Ok(())
}

/// Export the deck saved at `path` into `out_dir` with the built-in page
/// renderer and document writer.
pub async fn export_deck(path: &Path, out_dir: &Path) -> Result<PathBuf> {
    let presentation = read_deck(path).await?;
    Ok(export_presentation(&presentation, &SvgPageRenderer, &HtmlDocumentWriter, out_dir).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;
    use slidesmith_genai::fallback_presentation;

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deck.json");
        let deck = fallback_presentation();
        write_deck(&path, &deck).await.unwrap();
        assert_eq!(read_deck(&path).await.unwrap(), deck);
    }

    #[tokio::test]
    async fn test_errors_name_the_problem() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let err = read_deck(&missing).await.unwrap_err();
        assert!(matches!(err, SlidesmithError::Io { .. }));

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, r#"{"title":"t","slides":[]}"#).unwrap();
        assert!(matches!(
            read_deck(&empty).await.unwrap_err(),
            SlidesmithError::Model(_)
        ));
    }

    #[tokio::test]
    async fn test_export_saved_deck() {
        let dir = tempfile::tempdir().unwrap();
        let deck_path = dir.path().join("deck.json");
        write_deck(&deck_path, &fallback_presentation()).await.unwrap();

        let out = dir.path().join("out");
        let path = export_deck(&deck_path, &out).await.unwrap();
        assert_eq!(path, out.join("The_Future_of_Renewable_Energy.html"));
        assert!(path.exists());

        // A file where the output directory should be.
        let blocked = dir.path().join("blocked");
        std::fs::write(&blocked, "").unwrap();
        assert!(matches!(
            export_deck(&deck_path, &blocked).await.unwrap_err(),
            SlidesmithError::Export(ExportError::Io(_))
        ));
    }
}
