//! Device identity: a random identifier standing in for a user account.
//!
//! Generated once per installation and cached in the client's durable local
//! store under a fixed key. Uniqueness is probabilistic; nothing coordinates
//! with the server, and a collision merges two installations' lists. That
//! risk is accepted.

use std::{fs, io, path::PathBuf, sync::Mutex};

use rand::{Rng, distributions::Alphanumeric, thread_rng};

pub const DEVICE_ID_KEY: &str = "todo_deviceId";

const DEVICE_ID_LEN: usize = 26;

/// The client's durable local key-value store, one value per key.
pub trait DeviceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Returns the cached identifier, or generates, persists, and returns a
/// fresh one. No network involved.
pub fn get_or_create_device_id<S: DeviceStore>(store: &S) -> io::Result<String> {
    if let Some(existing) = store.get(DEVICE_ID_KEY)
        && !existing.is_empty()
    {
        return Ok(existing);
    }

    let device_id = generate_device_id();
    store.set(DEVICE_ID_KEY, &device_id)?;

    Ok(device_id)
}

fn generate_device_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DEVICE_ID_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase()
}

/// File-per-key store under a caller-chosen directory.
pub struct FileDeviceStore {
    dir: PathBuf,
}

impl FileDeviceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DeviceStore for FileDeviceStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key))
            .ok()
            .map(|s| s.trim().to_string())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.dir.join(key), value)
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryDeviceStore {
    values: Mutex<Vec<(String, String)>>,
}

impl DeviceStore for MemoryDeviceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self.values.lock().unwrap();
        values.retain(|(k, _)| k != key);
        values.push((key.to_string(), value.to_string()));

        Ok(())
    }
}
