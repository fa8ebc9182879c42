/// Staged reveal of an answer that has already been fully received.
///
/// Purely presentational: the session log always holds the complete text,
/// this only decides how much of it to draw on the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingAnimation {
    message_index: usize,
    total_chars: usize,
    revealed: usize,
    chars_per_tick: usize,
}

impl TypingAnimation {
    /// `chars_per_tick == 0` disables the animation
    pub fn new(message_index: usize, text: &str, chars_per_tick: usize) -> Self {
        let total_chars = text.chars().count();
        Self {
            message_index,
            total_chars,
            revealed: if chars_per_tick == 0 { total_chars } else { 0 },
            chars_per_tick,
        }
    }

    pub fn message_index(&self) -> usize {
        self.message_index
    }

    /// Advance by one UI tick
    pub fn tick(&mut self) {
        self.revealed = (self.revealed + self.chars_per_tick).min(self.total_chars);
    }

    pub fn is_done(&self) -> bool {
        self.revealed >= self.total_chars
    }

    /// Skip to the end
    pub fn finish(&mut self) {
        self.revealed = self.total_chars;
    }

    /// The part of `text` visible right now, cut on a char boundary
    pub fn visible<'a>(&self, text: &'a str) -> &'a str {
        match text.char_indices().nth(self.revealed) {
            Some((byte_idx, _)) => &text[..byte_idx],
            None => text,
        }
    }
}
