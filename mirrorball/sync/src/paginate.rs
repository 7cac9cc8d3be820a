//! Offset/limit paging over listing endpoints.
//!
//! A page shorter than the requested limit ends the listing. When the total
//! is an exact multiple of the limit this costs one extra request that comes
//! back empty.

use log::debug;

/// Page size used when listing a user's playlists.
pub const PLAYLIST_PAGE_SIZE: usize = 20;

/// Page size used when listing the entries of a playlist.
pub const TRACK_PAGE_SIZE: usize = 100;

/// Fetches every page and concatenates them in order. The first failing page
/// aborts the whole listing.
///
/// # Panics
///
/// Panics if `limit` is zero.
pub fn fetch_all<T, E, F>(limit: usize, mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(usize, usize) -> Result<Vec<T>, E>,
{
    assert!(limit > 0, "page limit must be positive");

    let mut items = Vec::new();
    let mut offset = 0;
    loop {
        let mut page = fetch(offset, limit)?;
        let count = page.len();
        debug!("Fetched {} items at offset {}", count, offset);
        items.append(&mut page);

        if count < limit {
            return Ok(items);
        }
        offset += limit;
    }
}

/// Like [`fetch_all`] but stops at the first item matching `predicate`,
/// without requesting the pages after it.
///
/// # Panics
///
/// Panics if `limit` is zero.
pub fn find_first<T, E, F, P>(limit: usize, mut fetch: F, mut predicate: P) -> Result<Option<T>, E>
where
    F: FnMut(usize, usize) -> Result<Vec<T>, E>,
    P: FnMut(&T) -> bool,
{
    assert!(limit > 0, "page limit must be positive");

    let mut offset = 0;
    loop {
        let page = fetch(offset, limit)?;
        let count = page.len();

        if let Some(found) = page.into_iter().find(|item| predicate(item)) {
            return Ok(Some(found));
        }
        if count < limit {
            return Ok(None);
        }
        offset += limit;
    }
}
