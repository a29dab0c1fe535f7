use crate::model::level::Level;

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// File-name stem and count of the images shown while a student sits at a level.
const fn catalog_entry(level: Level) -> (&'static str, usize) {
    match level {
        Level::Nothing => ("letters", 30),
        Level::Letter => ("words", 29),
        Level::Word => ("sentence", 10),
        Level::Paragraph => ("StatementQuestion", 10),
        Level::Comprehension => ("", 0),
    }
}

/// The fixed, ordered image list for a level.
#[must_use]
pub fn level_images(level: Level) -> Vec<String> {
    let (stem, count) = catalog_entry(level);
    (1..=count).map(|n| format!("{stem}{n}.jpg")).collect()
}

//
// ─── SHUFFLING ─────────────────────────────────────────────────────────────────
//

/// Permutes a deck in place. Production code uses a uniform random shuffle;
/// tests inject a deterministic one.
pub trait DeckShuffle: Send + Sync {
    fn shuffle(&self, images: &mut [String]);
}

/// Leaves the catalog order untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepOrder;

impl DeckShuffle for KeepOrder {
    fn shuffle(&self, _images: &mut [String]) {}
}

//
// ─── DECK ──────────────────────────────────────────────────────────────────────
//

/// Shuffled carousel of images for the level currently under review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDeck {
    level: Level,
    images: Vec<String>,
    index: usize,
}

impl ImageDeck {
    /// Build the deck for `level`, shuffled once. Call again on every level change.
    #[must_use]
    pub fn for_level(level: Level, shuffle: &dyn DeckShuffle) -> Self {
        let mut images = level_images(level);
        shuffle.shuffle(&mut images);
        Self {
            level,
            images,
            index: 0,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// Step forward, wrapping to the first image after the last.
    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
        }
    }

    /// Step backward, wrapping to the last image before the first.
    pub fn prev(&mut self) {
        let len = self.images.len();
        if len != 0 {
            self.index = (self.index + len - 1) % len;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Reverse;

    impl DeckShuffle for Reverse {
        fn shuffle(&self, images: &mut [String]) {
            images.reverse();
        }
    }

    #[test]
    fn catalog_sizes_match_levels() {
        assert_eq!(level_images(Level::Nothing).len(), 30);
        assert_eq!(level_images(Level::Letter).len(), 29);
        assert_eq!(level_images(Level::Word).len(), 10);
        assert_eq!(level_images(Level::Paragraph)[0], "StatementQuestion1.jpg");
        assert!(level_images(Level::Comprehension).is_empty());
    }

    #[test]
    fn shuffled_deck_is_permutation_of_catalog() {
        let deck = ImageDeck::for_level(Level::Letter, &Reverse);
        let mut shuffled = deck.images().to_vec();
        let mut catalog = level_images(Level::Letter);
        assert_ne!(shuffled, catalog);
        shuffled.sort();
        catalog.sort();
        assert_eq!(shuffled, catalog);
    }

    #[test]
    fn stepping_wraps_in_both_directions() {
        let mut deck = ImageDeck::for_level(Level::Word, &KeepOrder);
        deck.prev();
        assert_eq!(deck.index(), 9);
        assert_eq!(deck.current(), Some("sentence10.jpg"));
        deck.next();
        assert_eq!(deck.index(), 0);

        for steps in [1_usize, 7, 10, 23] {
            let start = deck.index();
            for _ in 0..steps {
                deck.next();
            }
            assert_eq!(deck.index(), (start + steps) % deck.len());
            for _ in 0..steps {
                deck.prev();
            }
            assert_eq!(deck.index(), start);
        }
    }

    #[test]
    fn empty_deck_ignores_navigation() {
        let mut deck = ImageDeck::for_level(Level::Comprehension, &KeepOrder);
        deck.next();
        deck.prev();
        assert_eq!(deck.index(), 0);
        assert_eq!(deck.current(), None);
    }
}
