use literacy_core::model::DeckShuffle;
use rand::seq::SliceRandom;

/// Uniform shuffle backed by the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomShuffle;

impl DeckShuffle for RandomShuffle {
    fn shuffle(&self, images: &mut [String]) {
        images.shuffle(&mut rand::rng());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use literacy_core::model::{ImageDeck, Level, level_images};

    #[test]
    fn shuffle_is_a_permutation() {
        let deck = ImageDeck::for_level(Level::Nothing, &RandomShuffle);
        let mut shuffled = deck.images().to_vec();
        let mut catalog = level_images(Level::Nothing);
        shuffled.sort();
        catalog.sort();
        assert_eq!(shuffled, catalog);
    }
}
