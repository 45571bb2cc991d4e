/// The color vocabulary.
/// Each token plays two roles in a round: as the *word* the player reads
/// and as the *ink* some other word is drawn in.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorToken {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Cyan,
    Brown,
    Lime,
}

impl ColorToken {
    /// The full closed vocabulary, in display order.
    pub const ALL: [ColorToken; 10] = [
        ColorToken::Red,
        ColorToken::Blue,
        ColorToken::Green,
        ColorToken::Yellow,
        ColorToken::Purple,
        ColorToken::Orange,
        ColorToken::Pink,
        ColorToken::Cyan,
        ColorToken::Brown,
        ColorToken::Lime,
    ];

    /// The word as shown on screen.
    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Red => "RED",
            ColorToken::Blue => "BLUE",
            ColorToken::Green => "GREEN",
            ColorToken::Yellow => "YELLOW",
            ColorToken::Purple => "PURPLE",
            ColorToken::Orange => "ORANGE",
            ColorToken::Pink => "PINK",
            ColorToken::Cyan => "CYAN",
            ColorToken::Brown => "BROWN",
            ColorToken::Lime => "LIME",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vocabulary_is_distinct() {
        for (i, a) in ColorToken::ALL.iter().enumerate() {
            for b in &ColorToken::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn names_are_distinct() {
        for (i, a) in ColorToken::ALL.iter().enumerate() {
            for b in &ColorToken::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }
}
