//! Frame playback.
//!
//! The clock is driven by the caller: each UI update passes the time elapsed
//! since the previous one to [`Playback::tick`]. Ticks therefore run on the
//! same thread as edits and never interleave with them.

use std::time::Duration;

/// Fastest and slowest allowed frame interval, in seconds.
pub const MIN_FRAME_INTERVAL: f64 = 0.01;
pub const MAX_FRAME_INTERVAL: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum PlaybackState {
    Stopped,
    Playing {
        cursor_before_playback: usize,
        /// Time accumulated towards the next frame
        pending: Duration,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Playback {
    state: PlaybackState,
    interval: Duration,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl Playback {
    /// A stopped player advancing one frame every `interval_secs`, clamped to
    /// the allowed range.
    pub fn new(interval_secs: f64) -> Self {
        Self {
            state: PlaybackState::Stopped,
            interval: clamp_interval(interval_secs),
        }
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval_secs: f64) {
        self.interval = clamp_interval(interval_secs);
    }

    /// The frame that was current when playback started.
    pub fn cursor_before_playback(&self) -> Option<usize> {
        match self.state {
            PlaybackState::Playing {
                cursor_before_playback,
                ..
            } => Some(cursor_before_playback),
            PlaybackState::Stopped => None,
        }
    }

    /// Starts playing from `cursor`. Needs at least two frames; returns
    /// whether playback started.
    pub fn start(&mut self, frame_count: usize, cursor: usize) -> bool {
        if frame_count < 2 || self.is_playing() {
            return false;
        }
        self.state = PlaybackState::Playing {
            cursor_before_playback: cursor,
            pending: Duration::ZERO,
        };
        true
    }

    /// Advances `cursor` by one frame per whole interval in `elapsed`,
    /// wrapping at `frame_count`. Returns the number of frames advanced,
    /// saturating at `usize::MAX`.
    pub fn tick(&mut self, elapsed: Duration, frame_count: usize, cursor: &mut usize) -> usize {
        let PlaybackState::Playing { pending, .. } = &mut self.state else {
            return 0;
        };
        if frame_count == 0 {
            return 0;
        }

        let total = pending.saturating_add(elapsed);
        let interval = self.interval.as_nanos();
        let steps = total.as_nanos() / interval;
        let remainder = total.as_nanos() % interval;
        // The remainder is below one interval, which is at most a second.
        *pending = Duration::from_nanos(remainder as u64);

        let wrap = (steps % frame_count as u128) as usize;
        *cursor = (*cursor % frame_count + wrap) % frame_count;
        usize::try_from(steps).unwrap_or(usize::MAX)
    }

    /// Time left before the next frame change, `None` when stopped.
    pub fn time_until_next_frame(&self) -> Option<Duration> {
        match self.state {
            PlaybackState::Playing { pending, .. } => Some(self.interval.saturating_sub(pending)),
            PlaybackState::Stopped => None,
        }
    }

    /// Stops playback. The cursor lands on the last frame, not on the frame
    /// playback started from. Returns that frame, or `None` if not playing.
    pub fn stop(&mut self, frame_count: usize) -> Option<usize> {
        if !self.is_playing() {
            return None;
        }
        self.state = PlaybackState::Stopped;
        Some(frame_count.saturating_sub(1))
    }
}

fn clamp_interval(secs: f64) -> Duration {
    let secs = if secs.is_finite() { secs } else { MIN_FRAME_INTERVAL };
    Duration::from_secs_f64(secs.clamp(MIN_FRAME_INTERVAL, MAX_FRAME_INTERVAL))
}
