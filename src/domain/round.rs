/// Round generation.
///
/// A round is the full puzzle the player must resolve: a target word, the
/// ink color it is drawn in (always different), and a shuffled board of
/// `OPTION_COUNT` distinct answer options containing the target.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::color::ColorToken;

/// Number of answer options on the board.
/// Must be ≤ the vocabulary size or option building cannot terminate.
pub const OPTION_COUNT: usize = 6;

#[derive(Clone, Debug)]
pub struct Round {
    /// The word the player reads. Picking this token is the correct answer.
    pub target: ColorToken,
    /// The ink the word is drawn in. Never equal to `target`.
    pub ink: ColorToken,
    /// Shuffled answer board. Distinct, always contains `target`.
    pub options: Vec<ColorToken>,
}

fn pick(rng: &mut impl Rng) -> ColorToken {
    ColorToken::ALL[rng.gen_range(0..ColorToken::ALL.len())]
}

/// Build a fresh round from the random source.
pub fn generate_round(rng: &mut impl Rng) -> Round {
    let target = pick(rng);

    // Resample until the ink differs from the word. Terminates with
    // probability 1; expected draws ≤ |ALL| / (|ALL| - 1).
    let mut ink = pick(rng);
    while ink == target {
        ink = pick(rng);
    }

    // Sampling without replacement: fine while OPTION_COUNT ≪ |ALL|.
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(target);
    while options.len() < OPTION_COUNT {
        let cand = pick(rng);
        if !options.contains(&cand) {
            options.push(cand);
        }
    }
    options.shuffle(rng);

    Round { target, ink, options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn ink_never_matches_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..500 {
            let r = generate_round(&mut rng);
            assert_ne!(r.ink, r.target);
        }
    }

    #[test]
    fn options_are_six_distinct_and_contain_target() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..500 {
            let r = generate_round(&mut rng);
            assert_eq!(r.options.len(), OPTION_COUNT);
            for (i, a) in r.options.iter().enumerate() {
                for b in &r.options[i + 1..] {
                    assert_ne!(a, b);
                }
            }
            assert!(r.options.contains(&r.target));
        }
    }

    #[test]
    fn target_position_varies() {
        // The shuffle should not pin the target to a fixed slot.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen = [false; OPTION_COUNT];
        for _ in 0..500 {
            let r = generate_round(&mut rng);
            let at = r.options.iter().position(|&c| c == r.target).unwrap();
            seen[at] = true;
        }
        assert!(seen.iter().all(|&s| s), "target never landed in some slot");
    }
}
