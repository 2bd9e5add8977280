use std::{cell::RefCell, collections::BTreeMap, io::ErrorKind, path::PathBuf};

use crate::{config, error::SessionError, types::SelectedPlaylist, warning};

pub const KEY_CODE_VERIFIER: &str = "code_verifier";
pub const KEY_ACCESS_TOKEN: &str = "access_token";
pub const KEY_SELECTED_PLAYLIST: &str = "selectedPlaylist";
pub const KEY_GENERATED_IMAGE: &str = "generated_image";
pub const KEY_USER_ID_SEARCHED: &str = "userIdSearched";

/// String key/value storage scoped to one session.
///
/// Receivers are `&self` so one storage can be shared by reference between
/// the auth state machine and the workflow orchestrator. Reads come from
/// memory; writes may have to reach a file and are async.
#[allow(async_fn_in_trait)]
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError>;
    async fn remove_item(&self, key: &str) -> Result<(), SessionError>;
    async fn clear(&self) -> Result<(), SessionError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.items.borrow_mut().clear();
        Ok(())
    }
}

/// Write-through storage backed by a JSON object file.
///
/// A write only lands in memory after it reached the file, so a failed
/// write leaves the session exactly as it was. The file is replaced by
/// renaming a fully written sibling, never rewritten in place.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    items: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens the session file at `path`.
    ///
    /// A missing or empty file is an empty session. So is a file that is not
    /// a JSON object of strings: it is reported and replaced on the next
    /// write.
    pub async fn open(path: PathBuf) -> Result<Self, SessionError> {
        let items = match async_fs::read_to_string(&path).await {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warning!(
                    "Session file {} is unreadable, starting a new session. Err: {}",
                    path.display(),
                    e
                );
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(SessionError::Io(e)),
        };

        Ok(Self {
            path,
            items: RefCell::new(items),
        })
    }

    /// Opens `<data_local_dir>/playlist-cover/session.json`.
    pub async fn open_default() -> Result<Self, SessionError> {
        Self::open(Self::default_path()).await
    }

    pub fn default_path() -> PathBuf {
        config::data_dir().join("session.json")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn write_through(
        &self,
        update: impl FnOnce(&mut BTreeMap<String, String>),
    ) -> Result<(), SessionError> {
        let mut next = self.items.borrow().clone();
        update(&mut next);

        self.persist(&next).await?;
        *self.items.borrow_mut() = next;
        Ok(())
    }

    async fn persist(&self, items: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(items)?;
        let staged = self.path.with_extension("json.tmp");
        async_fs::write(&staged, json).await?;
        async_fs::rename(&staged, &self.path).await?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.write_through(|items| {
            items.insert(key.to_string(), value.to_string());
        })
        .await
    }

    async fn remove_item(&self, key: &str) -> Result<(), SessionError> {
        if !self.items.borrow().contains_key(key) {
            return Ok(());
        }
        self.write_through(|items| {
            items.remove(key);
        })
        .await
    }

    async fn clear(&self) -> Result<(), SessionError> {
        self.write_through(|items| items.clear()).await
    }
}

/// Typed access to the session keys.
///
/// The auth state machine is the only writer of the verifier and the access
/// token; the workflow orchestrator is the only writer of the generated image
/// and the selected playlist's artwork.
pub struct SessionStore<S: SessionStorage> {
    storage: S,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn code_verifier(&self) -> Option<String> {
        self.non_empty(KEY_CODE_VERIFIER)
    }

    pub async fn set_code_verifier(&self, verifier: &str) -> Result<(), SessionError> {
        self.storage.set_item(KEY_CODE_VERIFIER, verifier).await
    }

    pub async fn clear_code_verifier(&self) -> Result<(), SessionError> {
        self.storage.remove_item(KEY_CODE_VERIFIER).await
    }

    pub fn access_token(&self) -> Option<String> {
        self.non_empty(KEY_ACCESS_TOKEN)
    }

    pub async fn set_access_token(&self, token: &str) -> Result<(), SessionError> {
        self.storage.set_item(KEY_ACCESS_TOKEN, token).await
    }

    pub async fn clear_access_token(&self) -> Result<(), SessionError> {
        self.storage.remove_item(KEY_ACCESS_TOKEN).await
    }

    /// The stored playlist, or `None` when absent or not decodable.
    pub fn selected_playlist(&self) -> Option<SelectedPlaylist> {
        self.storage
            .get_item(KEY_SELECTED_PLAYLIST)
            .and_then(|json| serde_json::from_str(&json).ok())
    }

    pub async fn set_selected_playlist(
        &self,
        playlist: &SelectedPlaylist,
    ) -> Result<(), SessionError> {
        let json = serde_json::to_string(playlist)?;
        self.storage.set_item(KEY_SELECTED_PLAYLIST, &json).await
    }

    pub async fn clear_selected_playlist(&self) -> Result<(), SessionError> {
        self.storage.remove_item(KEY_SELECTED_PLAYLIST).await
    }

    pub fn generated_image(&self) -> Option<String> {
        self.non_empty(KEY_GENERATED_IMAGE)
            .filter(|url| url != "null")
    }

    pub async fn set_generated_image(&self, url: &str) -> Result<(), SessionError> {
        self.storage.set_item(KEY_GENERATED_IMAGE, url).await
    }

    pub async fn clear_generated_image(&self) -> Result<(), SessionError> {
        self.storage.remove_item(KEY_GENERATED_IMAGE).await
    }

    pub fn user_id_searched(&self) -> Option<String> {
        self.non_empty(KEY_USER_ID_SEARCHED)
    }

    pub async fn set_user_id_searched(&self, user_id: &str) -> Result<(), SessionError> {
        self.storage.set_item(KEY_USER_ID_SEARCHED, user_id).await
    }

    /// Ends the session: every key is dropped.
    pub async fn end_session(&self) -> Result<(), SessionError> {
        self.storage.clear().await
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).filter(|v| !v.is_empty())
    }
}
