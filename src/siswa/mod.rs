//! Student records: in-memory store, name search and pagination

mod store;

pub use store::SiswaStore;

use crate::types::Siswa;
use serde::Serialize;

/// Rows shown per page by default
pub const DEFAULT_PER_PAGE: usize = 10;

/// Classes offered by the student form
pub const KELAS_OPTIONS: [&str; 11] = [
    "XII MIPA 1",
    "XII MIPA 2",
    "XII MIPA 3",
    "XII MIPA 4",
    "XII IPS 1",
    "XII IPS 2",
    "XII IPS 3",
    "XII IPS 4",
    "XII IPS 5",
    "XII IPS 6",
    "XII IPS 7",
];

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number actually served
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Case-insensitive substring match on the student name
pub fn search<'a>(items: &'a [Siswa], query: &str) -> Vec<&'a Siswa> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .filter(|s| needle.is_empty() || s.nama.to_lowercase().contains(&needle))
        .collect()
}

/// Slice `items` into 1-based pages. Out of range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total_items);
    let items = items.get(start..end).map(<[T]>::to_vec).unwrap_or_default();

    Page {
        items,
        page,
        per_page,
        total_items,
        total_pages,
    }
}
