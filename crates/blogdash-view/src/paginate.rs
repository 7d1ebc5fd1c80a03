//! Table pagination.
//!
//! [`page_slice`] and [`total_pages`] are pure; [`Paginator`] only carries
//! the cursor and the rules for moving it.

use std::num::NonZeroUsize;
use std::ops::RangeInclusive;

use serde::Serialize;

use blogdash_core::Post;

/// Rows per page in the posts table.
pub const PAGE_SIZE: usize = 5;

/// Page cursor state handed to the table renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageState {
    pub page_size: usize,
    /// 1-based; always within `1..=max(total_pages, 1)`.
    pub current_page: usize,
    pub total_pages: usize,
}

impl PageState {
    /// Whether the Previous control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the Next control is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether the navigation bar is shown at all.
    pub fn shows_navigation(&self) -> bool {
        self.total_pages > 1
    }

    /// Numbers for the numbered page links.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }
}

/// `ceil(len / page_size)`; zero for an empty collection.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Records shown on 1-based `page`, in collection order.
///
/// Pages past the end (and page 0) are empty.
pub fn page_slice(posts: &[Post], page: usize, page_size: NonZeroUsize) -> &[Post] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size.get()))
    else {
        return &[];
    };
    if start >= posts.len() {
        return &[];
    }
    let end = start.saturating_add(page_size.get()).min(posts.len());
    &posts[start..end]
}

/// The table's page cursor.
#[derive(Debug, Clone)]
pub struct Paginator {
    page_size: NonZeroUsize,
    current_page: usize,
}

impl Paginator {
    /// Start on page 1.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Cursor state against a collection of `len` records.
    pub fn state(&self, len: usize) -> PageState {
        PageState {
            page_size: self.page_size.get(),
            current_page: self.current_page,
            total_pages: total_pages(len, self.page_size),
        }
    }

    /// Visible records for the current page.
    pub fn slice<'a>(&self, posts: &'a [Post]) -> &'a [Post] {
        page_slice(posts, self.current_page, self.page_size)
    }

    /// Move to page `n`.
    ///
    /// Requests outside `1..=total_pages` are ignored and return false.
    pub fn go_to_page(&mut self, n: usize, len: usize) -> bool {
        if n == 0 || n > total_pages(len, self.page_size) {
            return false;
        }
        self.current_page = n;
        true
    }

    pub fn next(&mut self, len: usize) -> bool {
        self.go_to_page(self.current_page + 1, len)
    }

    pub fn previous(&mut self, len: usize) -> bool {
        match self.current_page.checked_sub(1) {
            Some(n) => self.go_to_page(n, len),
            None => false,
        }
    }

    /// Pull the cursor back inside `1..=max(total_pages, 1)` after the
    /// collection shrank. Returns true if it moved.
    pub fn clamp(&mut self, len: usize) -> bool {
        let last = total_pages(len, self.page_size).max(1);
        if self.current_page > last {
            self.current_page = last;
            true
        } else {
            false
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogdash_core::PostId;

    fn five() -> NonZeroUsize {
        NonZeroUsize::new(5).unwrap()
    }

    fn posts(n: usize) -> Vec<Post> {
        (1..=n)
            .map(|i| Post::new(PostId::from_number(i as i64), format!("Post {i}")))
            .collect()
    }

    fn ids(slice: &[Post]) -> Vec<String> {
        slice.iter().map(|p| p.id.to_string()).collect()
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(total_pages(0, five()), 0);
        assert_eq!(total_pages(1, five()), 1);
        assert_eq!(total_pages(5, five()), 1);
        assert_eq!(total_pages(6, five()), 2);
        assert_eq!(total_pages(10, five()), 2);
        assert_eq!(total_pages(11, five()), 3);
    }

    #[test]
    fn slices_cover_collection_in_order() {
        for len in 0..33 {
            let all = posts(len);
            let total = total_pages(len, five());
            let mut seen = Vec::new();

            for page in 1..=total {
                let slice = page_slice(&all, page, five());
                assert!(slice.len() <= 5);
                if page == total {
                    assert_eq!(slice.len(), len - 5 * (total - 1));
                }
                seen.extend(ids(slice));
            }

            assert_eq!(seen, ids(&all));
        }
    }

    #[test]
    fn out_of_range_slices_are_empty() {
        let all = posts(7);
        assert!(page_slice(&all, 0, five()).is_empty());
        assert!(page_slice(&all, 3, five()).is_empty());
        assert!(page_slice(&all, usize::MAX, five()).is_empty());
        assert!(page_slice(&[], 1, five()).is_empty());
    }

    #[test]
    fn go_to_page_ignores_out_of_range() {
        let mut paginator = Paginator::new(five());

        assert!(paginator.go_to_page(2, 7));
        assert_eq!(paginator.current_page(), 2);

        assert!(!paginator.go_to_page(0, 7));
        assert!(!paginator.go_to_page(3, 7));
        assert_eq!(paginator.current_page(), 2);

        assert!(!paginator.go_to_page(1, 0));
    }

    #[test]
    fn next_and_previous_stop_at_boundaries() {
        let mut paginator = Paginator::new(five());

        assert!(!paginator.previous(11));
        assert!(paginator.next(11));
        assert!(paginator.next(11));
        assert!(!paginator.next(11));
        assert_eq!(paginator.current_page(), 3);
        assert!(paginator.previous(11));
        assert_eq!(paginator.current_page(), 2);
    }

    #[test]
    fn navigation_flags() {
        let mut paginator = Paginator::new(five());
        let first = paginator.state(11);
        assert!(!first.has_previous());
        assert!(first.has_next());
        assert!(first.shows_navigation());
        assert_eq!(first.page_numbers().collect::<Vec<_>>(), [1, 2, 3]);

        paginator.go_to_page(3, 11);
        let last = paginator.state(11);
        assert!(last.has_previous());
        assert!(!last.has_next());

        let single = Paginator::new(five()).state(4);
        assert!(!single.shows_navigation());
        assert!(!single.has_next());

        let empty = Paginator::new(five()).state(0);
        assert_eq!(empty.total_pages, 0);
        assert_eq!(empty.current_page, 1);
        assert_eq!(empty.page_numbers().count(), 0);
    }

    #[test]
    fn clamp_after_shrink() {
        let mut paginator = Paginator::new(five());
        paginator.go_to_page(2, 6);

        assert!(paginator.clamp(5));
        assert_eq!(paginator.current_page(), 1);

        assert!(!paginator.clamp(0));
        assert_eq!(paginator.current_page(), 1);
    }

    #[test]
    fn slice_follows_cursor() {
        let all = posts(7);
        let mut paginator = Paginator::new(five());
        assert_eq!(ids(paginator.slice(&all)), ["1", "2", "3", "4", "5"]);

        paginator.next(all.len());
        assert_eq!(ids(paginator.slice(&all)), ["6", "7"]);
    }
}
