use crate::frames::Frame;

/// Upper bound of the start-offset range when sliding a window of
/// length W over N frames.
///
/// The reference pipeline stopped at `N - 2W + 1`, discarding the final
/// W frames entirely; whether that was intended is unknown, so both
/// readings are explicit here instead of one being silently "fixed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum WindowBound {
    /// Reference-faithful `N - 2W + 1` offsets.
    Truncated,
    /// Every window that fits: `N - W + 1` offsets.
    Full,
}

impl WindowBound {
    fn offset_count(self, len: usize, window_size: usize) -> usize {
        match self {
            WindowBound::Truncated => (len + 1).saturating_sub(2 * window_size),
            WindowBound::Full => (len + 1).saturating_sub(window_size),
        }
    }
}

/// Lazy iterator over overlapping fixed-length windows, step 1,
/// yielding only windows free of degenerate frames.
pub struct Windows<'a> {
    frames: &'a [Frame],
    window_size: usize,
    degenerate: Vec<bool>,
    offset: usize,
    end: usize,
}

impl<'a> Windows<'a> {
    fn new(frames: &'a [Frame], window_size: usize, bound: WindowBound) -> Self {
        assert!(window_size > 0, "window size must be positive");

        let degenerate = frames.iter().map(Frame::is_degenerate).collect();
        let end = bound.offset_count(frames.len(), window_size);
        Self {
            frames,
            window_size,
            degenerate,
            offset: 0,
            end,
        }
    }
}

impl<'a> Iterator for Windows<'a> {
    type Item = &'a [Frame];

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.end {
            let start = self.offset;
            self.offset += 1;

            if self.degenerate[start..start + self.window_size]
                .iter()
                .any(|d| *d)
            {
                continue;
            }
            let frames: &'a [Frame] = self.frames;
            return Some(&frames[start..start + self.window_size]);
        }
        None
    }
}

/// Slides a window of `window_size` frames over `frames` with step 1.
pub fn windows(frames: &[Frame], window_size: usize, bound: WindowBound) -> Windows<'_> {
    Windows::new(frames, window_size, bound)
}
