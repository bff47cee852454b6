//! Student records store, search and pagination

use konversi_nilai::error::KonversiError;
use konversi_nilai::siswa::{paginate, search, SiswaStore, DEFAULT_PER_PAGE, KELAS_OPTIONS};
use konversi_nilai::types::{JenisKelamin, SiswaInput};
use pretty_assertions::assert_eq;

fn seeded_store(count: usize) -> SiswaStore {
    let store = SiswaStore::new();
    for i in 0..count {
        let kelas = KELAS_OPTIONS[i % KELAS_OPTIONS.len()];
        store
            .create(SiswaInput::new(
                format!("Siswa {:02}", i + 1),
                kelas,
                JenisKelamin::Perempuan,
            ))
            .unwrap();
    }
    store
}

#[test]
fn test_ids_are_sequential_and_not_reused() {
    let store = seeded_store(3);
    store.delete(3).unwrap();

    let next = store
        .create(SiswaInput::new("Baru", "XII IPS 3", JenisKelamin::LakiLaki))
        .unwrap();
    assert_eq!(next.id, 4);
    assert_eq!(
        store.list().iter().map(|s| s.id).collect::<Vec<_>>(),
        vec![1, 2, 4]
    );
}

#[test]
fn test_update_keeps_created_at() {
    let store = seeded_store(1);
    let before = store.get(1).unwrap();

    let after = store
        .update(1, SiswaInput::new("Nama Baru", "XII MIPA 4", JenisKelamin::Perempuan))
        .unwrap();
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.kelas, "XII MIPA 4");
}

#[test]
fn test_missing_ids_are_not_found() {
    let store = seeded_store(1);
    assert!(matches!(store.get(9), Err(KonversiError::NotFound(9))));
    assert!(matches!(store.delete(9), Err(KonversiError::NotFound(9))));
    assert!(matches!(
        store.update(9, SiswaInput::new("x", "XII IPS 1", JenisKelamin::LakiLaki)),
        Err(KonversiError::NotFound(9))
    ));
}

#[test]
fn test_invalid_input_is_not_stored() {
    let store = SiswaStore::new();
    let result = store.create(SiswaInput::new("Ani", " ", JenisKelamin::Perempuan));
    assert!(matches!(result, Err(KonversiError::Validation(_))));
    assert!(store.is_empty());
}

#[test]
fn test_search_then_paginate() {
    let store = seeded_store(25);
    let all = store.list();

    let found: Vec<_> = search(&all, "siswa 1").into_iter().cloned().collect();
    // Siswa 10 through Siswa 19
    assert_eq!(found.len(), 10);

    let first = paginate(&all, 1, DEFAULT_PER_PAGE);
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total_pages, 3);

    let last = paginate(&all, 99, DEFAULT_PER_PAGE);
    assert_eq!(last.page, 3);
    assert_eq!(last.items.len(), 5);
    assert_eq!(last.items[0].nama, "Siswa 21");
}

#[test]
fn test_paginate_empty_listing() {
    let page = paginate::<u32>(&[], 4, 10);
    assert_eq!(page.page, 1);
    assert_eq!(page.total_pages, 0);
    assert!(page.items.is_empty());
}
