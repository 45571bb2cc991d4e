/// Events emitted by session transitions.
/// The presentation layer consumes these for sound and animation; they
/// never feed back into game state.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OverReason {
    WrongAnswer,
    TimeUp,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Started,
    /// An option was picked (fires before the answer is judged).
    AnswerPicked,
    RoundSolved,
    ComboBonus { bonus: u32 },
    /// Countdown entered the urgency window; supersedes the previous cue.
    UrgencyTick { secs_left: u32 },
    GameOver { reason: OverReason },
}
