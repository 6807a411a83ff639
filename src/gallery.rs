//! Gallery Ordering
//!
//! Photo sources return their photos in no particular order. For display,
//! captions carrying a number sort numerically ("Photo 2" before "Photo 10")
//! and come first; the rest follow alphabetically.

use std::cmp::Ordering;

use crate::models::PhotoItem;

/// First run of ASCII digits in a caption
fn caption_number(caption: &str) -> Option<u64> {
    let start = caption.find(|c: char| c.is_ascii_digit())?;
    let digits: String = caption[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn display_order(a: &PhotoItem, b: &PhotoItem) -> Ordering {
    match (caption_number(&a.caption), caption_number(&b.caption)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.caption.cmp(&b.caption)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a
            .caption
            .to_lowercase()
            .cmp(&b.caption.to_lowercase())
            .then_with(|| a.caption.cmp(&b.caption)),
    }
}

/// Sort photos in place for display (stable)
pub fn sort_for_display(photos: &mut [PhotoItem]) {
    photos.sort_by(display_order);
}
