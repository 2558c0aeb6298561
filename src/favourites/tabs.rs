use crate::model::Category;
use std::borrow::Cow;

/// Sentinel tab that disables filtering.
pub const ALL_TAB: &str = "All";

/// Tabs offered by the UI, in display order.
pub const TABS: [&str; 6] = [ALL_TAB, "Pork", "Beef", "Chicken", "Lamb", "Pasta"];

/// Narrow a category list to the names containing `tag`, ignoring case.
///
/// [`ALL_TAB`] returns the input slice itself. Any other tag, known or not, is
/// a plain substring filter; no match gives an empty list.
pub fn filter_by_tab<'a>(categories: &'a [Category], tag: &str) -> Cow<'a, [Category]> {
    if tag == ALL_TAB {
        return Cow::Borrowed(categories);
    }

    let needle = tag.to_lowercase();
    Cow::Owned(
        categories
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect(),
    )
}

/// The tab after `current`, wrapping. Unknown tags restart at [`ALL_TAB`].
pub fn next_tab(current: &str) -> &'static str {
    match TABS.iter().position(|t| *t == current) {
        Some(i) => TABS[(i + 1) % TABS.len()],
        None => ALL_TAB,
    }
}

/// The tab before `current`, wrapping. Unknown tags restart at [`ALL_TAB`].
pub fn prev_tab(current: &str) -> &'static str {
    match TABS.iter().position(|t| *t == current) {
        Some(i) => TABS[(i + TABS.len() - 1) % TABS.len()],
        None => ALL_TAB,
    }
}
