use super::types::Layout;

/// Running vertical offset shared by every block of one stream.
///
/// Blocks are stacked top to bottom in completion order, so the offset only
/// ever grows.
#[derive(Debug, Default, Clone)]
pub struct LayoutTracker {
    offset: u32,
}

impl LayoutTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Row where the next finished block will be placed.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Rows needed for `content` plus the kind's fixed border rows.
    ///
    /// Empty content still occupies one row.
    pub fn height_for(content: &str, chrome_rows: u32) -> u32 {
        let rows = u32::try_from(content.split('\n').count()).unwrap_or(u32::MAX);
        rows.saturating_add(chrome_rows)
    }

    /// Assigns the next slot of `height` rows.
    pub fn place(&mut self, height: u32) -> Layout {
        let layout = Layout {
            top: self.offset,
            height,
        };
        self.offset = layout.bottom();
        layout
    }
}
