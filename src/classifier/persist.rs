use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::forest::RandomForest;
use crate::error::ModelLoadError;

/// Bumped whenever the serialized layout of [`RandomForest`] changes.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize)]
struct ArtifactRef<'a> {
    format_version: u32,
    model: &'a RandomForest,
}

#[derive(Deserialize)]
struct ArtifactHeader {
    format_version: u32,
}

#[derive(Deserialize)]
struct Artifact {
    model: RandomForest,
}

/// Write `model` to `path` as JSON.
///
/// The artifact is written to a temporary file next to `path` and renamed
/// into place, so readers never observe a partially written model.
pub fn save_model(model: &RandomForest, path: &Path) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        serde_json::to_writer(
            &mut writer,
            &ArtifactRef {
                format_version: FORMAT_VERSION,
                model,
            },
        )?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Read a model written by [`save_model`].
pub fn load_model(path: &Path) -> Result<RandomForest, ModelLoadError> {
    let bytes = std::fs::read(path).map_err(|source| ModelLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let corrupt = |source| ModelLoadError::Corrupt {
        path: path.to_path_buf(),
        source,
    };

    let header: ArtifactHeader = serde_json::from_slice(&bytes).map_err(corrupt)?;
    if header.format_version != FORMAT_VERSION {
        return Err(ModelLoadError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: header.format_version,
            expected: FORMAT_VERSION,
        });
    }

    let artifact: Artifact = serde_json::from_slice(&bytes).map_err(corrupt)?;
    if !artifact.model.is_well_formed() {
        return Err(ModelLoadError::Untrained {
            path: path.to_path_buf(),
        });
    }
    log::info!(
        "Loaded model with {} trees from {}",
        artifact.model.n_trees(),
        path.display()
    );
    Ok(artifact.model)
}
