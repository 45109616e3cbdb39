// Manages local file storage for the curated concert list ("My List").
//
// ⚠️ VERSION BUMP REQUIRED:
// Changes to the Concert struct serialization require incrementing
// MY_LIST_VERSION below so stale files are detected instead of misread.
use crate::context::AppContext;
use crate::model::Concert;
use anyhow::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v0: flat JSON array of records (no wrapper), as written by early builds
// - v1: versioned wrapper struct
const MY_LIST_VERSION: u32 = 1;

/// Wrapper struct for versioned my-list storage
#[derive(Serialize, Deserialize)]
struct MyListData {
    #[serde(default)]
    version: u32,
    concerts: Vec<Concert>,
}

pub struct LocalStorage;

impl LocalStorage {
    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive advisory lock on a sidecar file,
    /// so concurrent processes cannot interleave read-modify-write cycles.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Loads the persisted my-list. Never fails: a missing, corrupt or
    /// version-mismatched file degrades to an empty list so startup cannot
    /// be blocked by bad local state.
    pub fn load_my_list(ctx: &dyn AppContext) -> Vec<Concert> {
        let Some(path) = ctx.get_my_list_path() else {
            return Vec::new();
        };
        if !path.exists() {
            return Vec::new();
        }

        let result = Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;

            if let Ok(data) = serde_json::from_str::<MyListData>(&json) {
                if data.version == MY_LIST_VERSION {
                    return Ok(data.concerts);
                }
                log::warn!(
                    "my-list file has version {} (expected {}), starting empty",
                    data.version,
                    MY_LIST_VERSION
                );
                return Ok(Vec::new());
            }

            // No wrapper: assume the v0 flat array and upgrade in place.
            if let Ok(concerts) = serde_json::from_str::<Vec<Concert>>(&json) {
                log::info!("migrating my-list from v0 to v{}", MY_LIST_VERSION);
                let data = MyListData {
                    version: MY_LIST_VERSION,
                    concerts: concerts.clone(),
                };
                Self::atomic_write(&path, serde_json::to_string_pretty(&data)?)?;
                return Ok(concerts);
            }

            Err(anyhow::anyhow!("unrecognized my-list file format"))
        });

        match result {
            Ok(concerts) => concerts,
            Err(err) => {
                log::warn!("could not load my-list ({err}), starting empty");
                Vec::new()
            }
        }
    }

    /// Saves the my-list synchronously. Called after every mutation.
    pub fn save_my_list(ctx: &dyn AppContext, concerts: &[Concert]) -> Result<()> {
        let Some(path) = ctx.get_my_list_path() else {
            return Err(anyhow::anyhow!("no data directory for my-list"));
        };
        Self::with_lock(&path, || {
            let data = MyListData {
                version: MY_LIST_VERSION,
                concerts: concerts.to_vec(),
            };
            let json = serde_json::to_string_pretty(&data)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }
}
