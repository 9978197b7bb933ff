//! Fitting frames into a character-grid viewport.

use crate::{Frame, Sequence};

/// A character grid a frame is painted into.
///
/// Frames are centred inside the grid after subtracting padding; frames
/// larger than the available area are clipped from the bottom-right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    /// Grid width in columns
    pub columns: usize,
    /// Grid height in rows
    pub rows: usize,
    /// Blank columns/rows kept on every side
    pub padding: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            columns: 80,
            rows: 24,
            padding: 1,
        }
    }
}

impl Viewport {
    /// Create a viewport with the default padding.
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    /// Area left for art after padding, as (columns, rows).
    pub fn available(&self) -> (usize, usize) {
        (
            self.columns.saturating_sub(self.padding * 2),
            self.rows.saturating_sub(self.padding * 2),
        )
    }

    /// Check whether content of the given size fits without clipping.
    pub fn fits(&self, cols: usize, rows: usize) -> bool {
        let (avail_cols, avail_rows) = self.available();
        cols <= avail_cols && rows <= avail_rows
    }

    /// Top-left offset (column, row) that centres content of the given size.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use shapes_morph::display::Viewport;
    ///
    /// let viewport = Viewport { columns: 20, rows: 10, padding: 0 };
    /// assert_eq!(viewport.offset(10, 4), (5, 3));
    /// ```
    pub fn offset(&self, cols: usize, rows: usize) -> (usize, usize) {
        let (avail_cols, avail_rows) = self.available();
        let x = self.padding + avail_cols.saturating_sub(cols) / 2;
        let y = self.padding + avail_rows.saturating_sub(rows) / 2;
        (x, y)
    }

    /// Lay out `frame` in the viewport, returning one string per grid row.
    ///
    /// `extent` is the size used for centring; pass
    /// [`Sequence::max_dimensions`] so frames of one sequence share an
    /// anchor, or `None` to centre on the frame itself.
    pub fn layout(&self, frame: &Frame, extent: Option<(usize, usize)>) -> Vec<String> {
        let (cols, rows) = extent.unwrap_or_else(|| frame.dimensions());
        let (x, y) = self.offset(cols, rows);
        // Room left after the offset; a small extent can push art past the padding
        let max_cols = self.columns.saturating_sub(self.padding).saturating_sub(x);
        let max_rows = self.rows.saturating_sub(self.padding).saturating_sub(y);

        let mut grid = vec![String::new(); self.rows];
        for (i, line) in frame.as_str().lines().take(max_rows).enumerate() {
            let Some(row) = grid.get_mut(y + i) else {
                break;
            };
            row.push_str(&" ".repeat(x));
            row.extend(line.chars().take(max_cols));
            let trimmed = row.trim_end().len();
            row.truncate(trimmed);
        }
        grid
    }

    /// [`layout`](Self::layout) joined into a single block of text.
    pub fn render(&self, frame: &Frame, extent: Option<(usize, usize)>) -> String {
        self.layout(frame, extent).join("\n")
    }

    /// Render a sequence frame anchored on the sequence's largest frame.
    pub fn render_in(&self, sequence: &Sequence, frame: &Frame) -> String {
        self.render(frame, Some(sequence.max_dimensions()))
    }
}
