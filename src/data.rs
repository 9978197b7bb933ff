//! Core data structures for morph sequences.

use std::borrow::Cow;

/// A single pre-rendered block of text art.
///
/// Frames have no identity of their own; a [`Sequence`] addresses them by index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Text content (with newlines)
    pub content: Cow<'static, str>,
}

impl Frame {
    /// Neutral placeholder shown when nothing is loaded.
    pub const EMPTY: Frame = Frame {
        content: Cow::Borrowed(""),
    };

    /// Create a frame from a static string (no allocation).
    pub const fn from_static(content: &'static str) -> Self {
        Self {
            content: Cow::Borrowed(content),
        }
    }

    /// Create a frame owning its content.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Cow::Owned(content.into()),
        }
    }

    /// The frame text.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Whether the frame has no visible content.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Get the frame dimensions (columns, rows) from the text content.
    pub fn dimensions(&self) -> (usize, usize) {
        let rows = self.content.lines().count();
        let cols = self
            .content
            .lines()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(0);
        (cols, rows)
    }
}

impl Default for Frame {
    fn default() -> Self {
        Frame::EMPTY
    }
}

/// A named, ordered, immutable list of frames.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    name: Cow<'static, str>,
    frames: Vec<Frame>,
    /// Suggested playback interval in milliseconds
    suggested_interval_ms: Option<u32>,
}

impl Sequence {
    /// Create a sequence from owned frames.
    pub fn new(name: impl Into<Cow<'static, str>>, frames: Vec<Frame>) -> Self {
        Self {
            name: name.into(),
            frames,
            suggested_interval_ms: None,
        }
    }

    /// Create a sequence borrowing static frame text.
    pub fn from_static(name: &'static str, frames: &[&'static str]) -> Self {
        Self::new(name, frames.iter().copied().map(Frame::from_static).collect())
    }

    /// Attach a suggested playback interval.
    pub fn with_suggested_interval(mut self, interval_ms: u32) -> Self {
        self.suggested_interval_ms = (interval_ms > 0).then_some(interval_ms);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Get the frame at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Interval the site plays this sequence at, if it has one.
    #[inline]
    pub fn suggested_interval_ms(&self) -> Option<u32> {
        self.suggested_interval_ms
    }

    /// Largest (columns, rows) across all frames.
    ///
    /// Useful to size a display area once so the art does not jump
    /// around while morphing.
    pub fn max_dimensions(&self) -> (usize, usize) {
        self.frames.iter().fold((0, 0), |(c, r), f| {
            let (fc, fr) = f.dimensions();
            (c.max(fc), r.max(fr))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let frame = Frame::from_static("ABC\nDEF\nGHI");
        assert_eq!(frame.dimensions(), (3, 3));

        let frame2 = Frame::new("ABCD\nEF");
        assert_eq!(frame2.dimensions(), (4, 2));

        assert_eq!(Frame::EMPTY.dimensions(), (0, 0));
    }

    #[test]
    fn test_frame_is_empty() {
        assert!(Frame::EMPTY.is_empty());
        assert!(Frame::new("  \n ").is_empty());
        assert!(!Frame::from_static(" /\\ ").is_empty());
    }

    #[test]
    fn test_sequence_accessors() {
        let seq = Sequence::from_static("dots", &[".", "..", "..."]).with_suggested_interval(250);
        assert_eq!(seq.name(), "dots");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.get(2).map(Frame::as_str), Some("..."));
        assert_eq!(seq.get(3), None);
        assert_eq!(seq.suggested_interval_ms(), Some(250));
        assert_eq!(seq.max_dimensions(), (3, 1));
    }

    #[test]
    fn test_zero_suggested_interval_is_dropped() {
        let seq = Sequence::new("x", vec![Frame::new("x")]).with_suggested_interval(0);
        assert_eq!(seq.suggested_interval_ms(), None);
    }
}
