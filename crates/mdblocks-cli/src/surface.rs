use mdblocks_engine::{BlockKind, FinishedBlock, Layout, RenderError, Renderer};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget},
};

const HORIZONTAL_RULE: &str = "─";
const MIN_BOX_WIDTH: u16 = 4;

/// Index of a block drawn on a [`TerminalRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHandle(pub usize);

/// Draws finished blocks onto an off-screen buffer that grows downwards.
///
/// Each block lands at its layout rows; the viewer copies the visible window
/// into the frame with [`blit`](Self::blit).
pub struct TerminalRenderer {
    block_width_percent: u16,
    surface: Buffer,
    blocks: Vec<FinishedBlock>,
}

impl TerminalRenderer {
    pub fn new(width: u16, block_width_percent: u16) -> Self {
        Self {
            block_width_percent,
            surface: Buffer::empty(Rect::new(0, 0, width, 0)),
            blocks: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.surface.area.width
    }

    pub fn height(&self) -> u16 {
        self.surface.area.height
    }

    pub fn blocks(&self) -> &[FinishedBlock] {
        &self.blocks
    }

    /// Redraws every block for a new terminal width.
    pub fn set_width(&mut self, width: u16) {
        if width == self.width() {
            return;
        }
        self.surface = Buffer::empty(Rect::new(0, 0, width, self.height()));
        for block in &self.blocks {
            draw(
                &mut self.surface,
                self.block_width_percent,
                &block.kind,
                &block.content,
                block.layout,
            );
        }
    }

    /// Copies the surface rows starting at `scroll` into `area` of `buf`.
    pub fn blit(&self, scroll: u16, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let width = area.width.min(self.width());
        for row in 0..area.height {
            let Some(y) = scroll.checked_add(row).filter(|y| *y < self.height()) else {
                break;
            };
            for x in 0..width {
                buf[(area.x + x, area.y + row)] = self.surface[(x, y)].clone();
            }
        }
    }

    fn grow_to(&mut self, rows: u16) {
        if rows > self.height() {
            let area = Rect::new(0, 0, self.width(), rows);
            self.surface.resize(area);
        }
    }
}

impl Renderer for TerminalRenderer {
    type Handle = BlockHandle;

    fn render(
        &mut self,
        kind: &BlockKind,
        content: &str,
        layout: Layout,
    ) -> Result<BlockHandle, RenderError> {
        let bottom = u16::try_from(layout.bottom()).map_err(|_| {
            format!(
                "row {} is past the end of the terminal surface",
                layout.bottom()
            )
        })?;
        self.grow_to(bottom);
        draw(&mut self.surface, self.block_width_percent, kind, content, layout);

        self.blocks.push(FinishedBlock {
            kind: kind.clone(),
            content: content.to_string(),
            layout,
        });
        Ok(BlockHandle(self.blocks.len() - 1))
    }
}

/// Rows are assumed to fit the surface; callers grow it first.
fn draw(surface: &mut Buffer, width_percent: u16, kind: &BlockKind, content: &str, layout: Layout) {
    let full = Rect::new(0, layout.top as u16, surface.area.width, layout.height as u16);
    let boxed = Rect {
        width: box_width(full.width, width_percent),
        ..full
    };

    match kind {
        BlockKind::HorizontalRule => {
            let rule = HORIZONTAL_RULE.repeat(full.width as usize);
            Paragraph::new(Line::styled(rule, Style::default().fg(Color::DarkGray)))
                .render(full, surface);
        }
        BlockKind::Header { level } => {
            Paragraph::new(Line::styled(content, header_style(*level))).render(full, surface);
        }
        BlockKind::IndentedCode => {
            Paragraph::new(content)
                .style(code_style())
                .block(Block::bordered())
                .render(boxed, surface);
        }
        BlockKind::FencedCode { lang, .. } => {
            let mut frame = Block::bordered();
            if let Some(lang) = lang {
                frame = frame.title(format!(" {lang} "));
            }
            Paragraph::new(content)
                .style(code_style())
                .block(frame)
                .render(boxed, surface);
        }
        BlockKind::Paragraph => {
            Paragraph::new(content)
                .block(Block::bordered().border_type(BorderType::Rounded))
                .render(boxed, surface);
        }
    }
}

fn box_width(full: u16, percent: u16) -> u16 {
    let width = u32::from(full) * u32::from(percent) / 100;
    (width as u16).max(MIN_BOX_WIDTH).min(full)
}

fn header_style(level: u8) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    match level {
        1 => style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        2 => style.fg(Color::Cyan),
        3 => style.fg(Color::Blue),
        _ => style,
    }
}

fn code_style() -> Style {
    Style::default().fg(Color::Yellow)
}
