//! Note search.

use crate::model::note::Note;

/// Case-insensitive substring match over title, content and tags.
///
/// A blank term returns every note, in collection order.
pub fn search_notes<'n>(notes: &'n [Note], term: &str) -> Vec<&'n Note> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&needle)
                || note.content.to_lowercase().contains(&needle)
                || note
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        })
        .collect()
}
