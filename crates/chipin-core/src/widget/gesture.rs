/// Two-step backspace deletion: the first Backspace on an empty input
/// highlights the last chip, the second removes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteGesture {
    #[default]
    Idle,
    Highlighted { index: usize },
}

/// What a Backspace on an empty input should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureStep {
    Highlight(usize),
    Delete(usize),
}

impl DeleteGesture {
    /// Next step for a Backspace with `last_index` as the last chip.
    pub fn step(self, last_index: usize) -> GestureStep {
        match self {
            Self::Idle => GestureStep::Highlight(last_index),
            Self::Highlighted { .. } => GestureStep::Delete(last_index),
        }
    }

    pub fn highlight(self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Highlighted { index } => Some(index),
        }
    }

    pub fn pending_delete(self) -> bool {
        matches!(self, Self::Highlighted { .. })
    }

    pub fn reset(&mut self) {
        *self = Self::Idle;
    }
}
