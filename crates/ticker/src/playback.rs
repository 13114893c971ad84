//! The ticker playback state machine.
//!
//! Replaces timer-callback control flow with explicit states and discrete
//! inputs. The only suspension point is the tick boundary: a `Stop` input
//! cancels whatever a pending tick would have done, and the poll loop
//! checks [`Playback::is_engaged`] so a running slideshow is never
//! replaced out from under the viewer.

/// Where the slideshow is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing playing; polling runs normally.
    Idle,
    /// Autoplay advancing one page per tick.
    Playing,
    /// Manual control has taken over; ticks are ignored.
    Paused,
    /// The last page has been shown; waiting for stop or restart.
    Finished,
}

impl PlaybackState {
    /// Wire name used in frames and status responses.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Finished => "finished",
        }
    }
}

/// Discrete inputs driving the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackInput {
    Tick,
    Next,
    Prev,
    Stop,
}

/// The slideshow position over a fixed page sequence.
///
/// Pages are 1-based; `total` is fixed when playback starts and does not
/// change until the sequence is restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Playback {
    state: PlaybackState,
    page: usize,
    total: usize,
}

impl Playback {
    pub fn idle() -> Self {
        Self {
            state: PlaybackState::Idle,
            page: 0,
            total: 0,
        }
    }

    /// Start autoplay over `total` pages. A zero-page sequence has nothing
    /// to play and leaves the machine idle.
    pub fn start(&mut self, total: usize) {
        if total == 0 {
            *self = Self::idle();
            return;
        }
        self.state = PlaybackState::Playing;
        self.page = 1;
        self.total = total;
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current 1-based page, 0 when idle.
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// While engaged, the periodic poll timer is suspended.
    pub fn is_engaged(&self) -> bool {
        matches!(self.state, PlaybackState::Playing | PlaybackState::Paused)
    }

    /// Apply one input and return the resulting state.
    pub fn apply(&mut self, input: PlaybackInput) -> PlaybackState {
        match (self.state, input) {
            (_, PlaybackInput::Stop) => {
                *self = Self::idle();
            }
            (PlaybackState::Playing, PlaybackInput::Tick) => {
                if self.page >= self.total {
                    self.state = PlaybackState::Finished;
                } else {
                    self.page += 1;
                }
            }
            (PlaybackState::Playing | PlaybackState::Paused, PlaybackInput::Next) => {
                if self.page >= self.total {
                    self.state = PlaybackState::Finished;
                } else {
                    self.page += 1;
                    self.state = PlaybackState::Paused;
                }
            }
            (PlaybackState::Playing | PlaybackState::Paused, PlaybackInput::Prev) => {
                self.page = self.page.saturating_sub(1).max(1);
                self.state = PlaybackState::Paused;
            }
            // Ticks are meaningless outside Playing; Next/Prev are
            // meaningless outside an active sequence.
            _ => {}
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_and_tick_through() {
        let mut playback = Playback::idle();
        playback.start(3);
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.page(), 1);

        assert_eq!(playback.apply(PlaybackInput::Tick), PlaybackState::Playing);
        assert_eq!(playback.page(), 2);
        playback.apply(PlaybackInput::Tick);
        assert_eq!(playback.page(), 3);

        // Ticking past the last page finishes the sequence.
        assert_eq!(playback.apply(PlaybackInput::Tick), PlaybackState::Finished);
        assert_eq!(playback.page(), 3);
    }

    #[test]
    fn test_start_with_zero_pages_stays_idle() {
        let mut playback = Playback::idle();
        playback.start(0);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert!(!playback.is_engaged());
    }

    #[test]
    fn test_manual_next_pauses_autoplay() {
        let mut playback = Playback::idle();
        playback.start(3);
        assert_eq!(playback.apply(PlaybackInput::Next), PlaybackState::Paused);
        assert_eq!(playback.page(), 2);

        // Ticks no longer advance while paused.
        playback.apply(PlaybackInput::Tick);
        assert_eq!(playback.page(), 2);
    }

    #[test]
    fn test_prev_clamps_at_first_page() {
        let mut playback = Playback::idle();
        playback.start(2);
        playback.apply(PlaybackInput::Prev);
        assert_eq!(playback.page(), 1);
        playback.apply(PlaybackInput::Prev);
        assert_eq!(playback.page(), 1);
        assert_eq!(playback.state(), PlaybackState::Paused);
    }

    #[test]
    fn test_stop_from_any_state() {
        let mut playback = Playback::idle();
        playback.start(2);
        playback.apply(PlaybackInput::Tick);
        playback.apply(PlaybackInput::Stop);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(playback.page(), 0);
        assert!(!playback.is_engaged());

        // Stop is idempotent.
        playback.apply(PlaybackInput::Stop);
        assert_eq!(playback.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_finished_is_not_engaged() {
        let mut playback = Playback::idle();
        playback.start(1);
        playback.apply(PlaybackInput::Tick);
        assert_eq!(playback.state(), PlaybackState::Finished);
        assert!(!playback.is_engaged());

        // Inputs other than stop are ignored once finished.
        playback.apply(PlaybackInput::Tick);
        playback.apply(PlaybackInput::Next);
        assert_eq!(playback.state(), PlaybackState::Finished);
    }

    #[test]
    fn test_restart_after_finish() {
        let mut playback = Playback::idle();
        playback.start(1);
        playback.apply(PlaybackInput::Tick);
        playback.start(4);
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.page(), 1);
        assert_eq!(playback.total(), 4);
    }
}
