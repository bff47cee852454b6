use crate::error::{KonversiError, KonversiResult};
use crate::types::{Siswa, SiswaInput};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::info;

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    rows: BTreeMap<u64, Siswa>,
}

/// In-memory student table. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct SiswaStore {
    inner: RwLock<Inner>,
}

impl SiswaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All students ordered by id
    pub fn list(&self) -> Vec<Siswa> {
        self.read().rows.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> KonversiResult<Siswa> {
        self.read()
            .rows
            .get(&id)
            .cloned()
            .ok_or(KonversiError::NotFound(id))
    }

    pub fn create(&self, input: SiswaInput) -> KonversiResult<Siswa> {
        let input = input.validate()?;
        let mut inner = self.write();
        inner.next_id += 1;
        let now = Utc::now();
        let siswa = Siswa {
            id: inner.next_id,
            nama: input.nama,
            kelas: input.kelas,
            jenis_kelamin: input.jenis_kelamin,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(siswa.id, siswa.clone());
        info!(id = siswa.id, "student created");
        Ok(siswa)
    }

    pub fn update(&self, id: u64, input: SiswaInput) -> KonversiResult<Siswa> {
        let input = input.validate()?;
        let mut inner = self.write();
        let siswa = inner.rows.get_mut(&id).ok_or(KonversiError::NotFound(id))?;
        siswa.nama = input.nama;
        siswa.kelas = input.kelas;
        siswa.jenis_kelamin = input.jenis_kelamin;
        siswa.updated_at = Utc::now();
        info!(id, "student updated");
        Ok(siswa.clone())
    }

    pub fn delete(&self, id: u64) -> KonversiResult<Siswa> {
        let removed = self
            .write()
            .rows
            .remove(&id)
            .ok_or(KonversiError::NotFound(id))?;
        info!(id, "student deleted");
        Ok(removed)
    }

    pub fn len(&self) -> usize {
        self.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Poisoned locks are recovered; the map is left intact by every writer.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }
}
