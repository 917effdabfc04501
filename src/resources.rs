use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use crate::classifier::{load_model, RandomForest};
use crate::data::loader::load_data;
use crate::data::model::Dataset;
use crate::error::{DataFormatError, ModelLoadError};

type Loader<T, E> = Box<dyn Fn() -> Result<T, E> + Send + Sync>;

// ---------------------------------------------------------------------------
// LazyResource – construct-once, read-only
// ---------------------------------------------------------------------------

/// A value built by `loader` on first access and kept for the lifetime of
/// the owner. A failed load is kept too; it is never retried.
pub struct LazyResource<T, E> {
    name: &'static str,
    cell: OnceLock<Result<Arc<T>, E>>,
    loader: Loader<T, E>,
}

impl<T: 'static, E: 'static> LazyResource<T, E> {
    pub fn new(
        name: &'static str,
        loader: impl Fn() -> Result<T, E> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
            loader: Box::new(loader),
        }
    }

    /// Already built (successfully or not).
    pub fn ready(value: Result<T, E>) -> Self {
        Self {
            name: "preloaded",
            cell: OnceLock::from(value.map(Arc::new)),
            loader: Box::new(unreachable_loader::<T, E>),
        }
    }

    pub fn get(&self) -> Result<&Arc<T>, &E> {
        self.cell
            .get_or_init(|| {
                log::debug!("Initialising {}", self.name);
                (self.loader)().map(Arc::new)
            })
            .as_ref()
    }

    pub fn is_initialised(&self) -> bool {
        self.cell.get().is_some()
    }
}

fn unreachable_loader<T, E>() -> Result<T, E> {
    unreachable!("preloaded resource is always initialised")
}

// ---------------------------------------------------------------------------
// AppResources – what the diagnosis app reads
// ---------------------------------------------------------------------------

pub struct AppResources {
    pub model: LazyResource<RandomForest, ModelLoadError>,
    pub dataset: LazyResource<Dataset, DataFormatError>,
}

impl AppResources {
    /// Resources backed by files on disk.
    pub fn from_paths(model_path: PathBuf, data_path: PathBuf) -> Self {
        Self {
            model: LazyResource::new("model", move || load_model(&model_path)),
            dataset: LazyResource::new("dataset", move || load_data(&data_path)),
        }
    }

    /// Resources from already-constructed values.
    pub fn preloaded(
        model: Result<RandomForest, ModelLoadError>,
        dataset: Result<Dataset, DataFormatError>,
    ) -> Self {
        Self {
            model: LazyResource::ready(model),
            dataset: LazyResource::ready(dataset),
        }
    }
}
