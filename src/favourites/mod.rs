//! Favourites core: reconciling saved ids against the catalog and tab filtering.
//!
//! Both functions are pure. The view state calls them on every slot change
//! rather than re-fetching, so partial availability simply yields an empty list.

mod reconcile;
mod tabs;

pub use reconcile::{reconcile, stale_ids};
pub use tabs::{filter_by_tab, next_tab, prev_tab, ALL_TAB, TABS};
