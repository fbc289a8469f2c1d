//! Terminal renderer built on crossterm
//!
//! Each character cell shows two board rows using the upper-half block
//! glyph: foreground is the upper row, background the lower one. Boards
//! larger than the terminal are cropped. In the laboratory each column
//! zone's survive window is printed above the board and each row zone's
//! born count to its left.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};

use crate::core::config::DisplayConfig;
use crate::core::error::Result;
use crate::core::types::GameMode;
use crate::render::colors::Rgb;
use crate::render::{Frame, RenderSink};
use crate::rules::ZoneLayout;

const HALF_BLOCK: char = '▀';

// Terminal rows above the board: the status line, then the survive legend
const STATUS_ROW: u16 = 0;
const LEGEND_ROW: u16 = 1;
const HEADER_ROWS: u16 = 2;

/// Columns left of the board holding the born legend
const LEGEND_COLS: u16 = 2;

pub struct TerminalRenderer {
    out: Stdout,
    display: DisplayConfig,
    active: bool,
}

impl TerminalRenderer {
    /// Switch the terminal to the alternate screen in raw mode
    pub fn new(display: DisplayConfig) -> Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            SetTitle("Chat plays Conway's Game of Life"),
            Hide
        )?;
        enable_raw_mode()?;
        execute!(out, Clear(ClearType::All))?;
        Ok(Self {
            out,
            display,
            active: true,
        })
    }

    fn restore(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            disable_raw_mode()?;
            execute!(self.out, ResetColor, LeaveAlternateScreen, Show)?;
        }
        Ok(())
    }

    fn draw_border(&mut self, width: u16, height: u16) -> Result<()> {
        let border = self.display.border_size;
        queue!(self.out, SetBackgroundColor(self.display.grid_color.into()))?;
        for y in 0..height {
            let row = HEADER_ROWS.saturating_add(y);
            if y < border || y >= height - border {
                queue!(self.out, MoveTo(LEGEND_COLS, row), Print(" ".repeat(width as usize)))?;
            } else {
                let right = LEGEND_COLS.saturating_add(width - border);
                queue!(
                    self.out,
                    MoveTo(LEGEND_COLS, row),
                    Print(" ".repeat(border as usize)),
                    MoveTo(right, row),
                    Print(" ".repeat(border as usize))
                )?;
            }
        }
        Ok(())
    }

    /// Survive windows above the board and born counts to its left; blank
    /// outside the laboratory
    fn draw_legend(&mut self, frame: &Frame<'_>, legend: Option<&ZoneLegend>) -> Result<()> {
        let border = self.display.border_size;
        let origin_x = LEGEND_COLS.saturating_add(border);
        let origin_y = HEADER_ROWS.saturating_add(border);
        let lines = frame.grid.height().div_ceil(2);

        queue!(self.out, ResetColor, MoveTo(0, LEGEND_ROW), Clear(ClearType::CurrentLine))?;
        for line in 0..lines.min(u16::MAX as usize) as u16 {
            let row = origin_y.saturating_add(line);
            queue!(self.out, MoveTo(0, row), Print(" ".repeat(LEGEND_COLS as usize)))?;
        }

        let Some(legend) = legend else {
            return Ok(());
        };

        queue!(
            self.out,
            SetForegroundColor(self.display.alive.into()),
            SetBackgroundColor(self.display.grid_color.into())
        )?;
        for (col, window) in &legend.survive {
            let x = origin_x.saturating_add(*col as u16);
            queue!(self.out, MoveTo(x, LEGEND_ROW), Print(window))?;
        }
        for (row, born) in &legend.born {
            let y = origin_y.saturating_add((row / 2) as u16);
            queue!(self.out, MoveTo(0, y), Print(born))?;
        }
        Ok(())
    }
}

impl RenderSink for TerminalRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let border = self.display.border_size;
        let grid = frame.grid;
        let layout = ZoneLayout::for_grid(grid);

        queue!(
            self.out,
            ResetColor,
            MoveTo(0, STATUS_ROW),
            Clear(ClearType::CurrentLine),
            Print(truncate(&frame.status_line(), cols as usize))
        )?;

        let frame_inset = border.saturating_mul(2);
        let visible_cols = cols.saturating_sub(LEGEND_COLS.saturating_add(frame_inset)) as usize;
        let visible_lines = rows.saturating_sub(HEADER_ROWS.saturating_add(frame_inset)) as usize;
        let board_cols = grid.width().min(visible_cols);
        let board_lines = grid.height().div_ceil(2).min(visible_lines);

        let legend = if frame.mode == GameMode::Laboratory {
            let shown_rows = (board_lines * 2).min(grid.height());
            Some(ZoneLegend::for_board(&layout, board_cols, shown_rows))
        } else {
            None
        };
        self.draw_legend(frame, legend.as_ref())?;

        let frame_width = (board_cols as u16).saturating_add(frame_inset);
        let frame_height = (board_lines as u16).saturating_add(frame_inset);
        self.draw_border(frame_width, frame_height)?;

        let origin_x = LEGEND_COLS.saturating_add(border);
        let origin_y = HEADER_ROWS.saturating_add(border);
        for line in 0..board_lines {
            queue!(self.out, MoveTo(origin_x, origin_y.saturating_add(line as u16)))?;
            let mut last: Option<(Rgb, Rgb)> = None;
            for col in 0..board_cols {
                let upper = cell_color(&self.display, frame, &layout, line * 2, col);
                let lower = cell_color(&self.display, frame, &layout, line * 2 + 1, col);
                if last != Some((upper, lower)) {
                    queue!(
                        self.out,
                        SetForegroundColor(upper.into()),
                        SetBackgroundColor(lower.into())
                    )?;
                    last = Some((upper, lower));
                }
                queue!(self.out, Print(HALF_BLOCK))?;
            }
        }

        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.restore()
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Color of board cell (row, col); rows past the bottom edge use the border color
pub fn cell_color(
    display: &DisplayConfig,
    frame: &Frame<'_>,
    layout: &ZoneLayout,
    row: usize,
    col: usize,
) -> Rgb {
    if row >= frame.grid.height() {
        return display.grid_color;
    }
    if frame.grid.get(row, col).is_alive() {
        return display.alive;
    }
    let zone_line = frame.mode == GameMode::Laboratory
        && (layout.starts_zone(row) || layout.starts_zone(col));
    if zone_line {
        display.grid_color2
    } else {
        display.background
    }
}

/// Axis legend of the laboratory
///
/// `survive` holds the survival window of every column zone keyed by its
/// first column, cut to the zone width. `born` holds the birth count of
/// every row zone keyed by its first row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLegend {
    pub survive: Vec<(usize, String)>,
    pub born: Vec<(usize, String)>,
}

impl ZoneLegend {
    /// Legend for the top-left `width` x `height` cells of the board
    pub fn for_board(layout: &ZoneLayout, width: usize, height: usize) -> Self {
        let starts = |len: usize| -> Vec<usize> {
            (0..len).filter(|&i| i == 0 || layout.starts_zone(i)).collect()
        };

        let columns = starts(width);
        let survive = columns
            .iter()
            .enumerate()
            .map(|(i, &col)| {
                let span = columns.get(i + 1).map_or(width, |&next| next) - col;
                let window = layout.rule_at(0, col).survive_window();
                (col, truncate(&window, span))
            })
            .collect();

        let born = starts(height)
            .into_iter()
            .map(|row| (row, layout.rule_at(row, 0).born.to_string()))
            .collect();

        Self { survive, born }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::state::SimulationState;
    use crate::spatial::Grid;

    #[test]
    fn test_cell_colors_classic() {
        let display = DisplayConfig::default();
        let state = SimulationState::with_grid(Grid::from_rows(&["#.", ".."]), 0);
        let frame = Frame::capture(&state);
        let layout = ZoneLayout::for_grid(frame.grid);
        assert_eq!(cell_color(&display, &frame, &layout, 0, 0), display.alive);
        assert_eq!(cell_color(&display, &frame, &layout, 1, 1), display.background);
        assert_eq!(cell_color(&display, &frame, &layout, 2, 0), display.grid_color);
    }

    #[test]
    fn test_zone_lines_only_in_laboratory() {
        let display = DisplayConfig::default();
        let mut state = SimulationState::with_grid(Grid::new(32, 16), 0);
        let layout = ZoneLayout::for_grid(&state.grid);

        let frame = Frame::capture(&state);
        assert_eq!(cell_color(&display, &frame, &layout, 2, 5), display.background);

        state.mode = GameMode::Laboratory;
        let frame = Frame::capture(&state);
        // zones are 2 cells wide: row 2 and column 4 start new zones
        assert_eq!(cell_color(&display, &frame, &layout, 2, 5), display.grid_color2);
        assert_eq!(cell_color(&display, &frame, &layout, 3, 4), display.grid_color2);
        assert_eq!(cell_color(&display, &frame, &layout, 3, 5), display.background);
    }

    #[test]
    fn test_legend_on_default_board() {
        let layout = ZoneLayout::for_height(176);
        let legend = ZoneLegend::for_board(&layout, 352, 176);

        let windows: Vec<&str> = legend.survive.iter().map(|(_, w)| w.as_str()).collect();
        assert_eq!(
            windows,
            vec![
                "0-1", "1-2", "2-3", "3-4", "4-5", "5-6", "6-7", "7-8", "0-2", "1-3", "2-4",
                "3-5", "4-6", "5-7", "6-8", "7-9",
            ]
        );
        assert_eq!(legend.survive[1].0, 22);
        assert_eq!(legend.survive[15].0, 330);

        let born: Vec<(usize, &str)> = legend.born.iter().map(|(r, b)| (*r, b.as_str())).collect();
        assert_eq!(born[0], (0, "0"));
        assert_eq!(born[7], (154, "7"));
        assert_eq!(born.len(), 8);
    }

    #[test]
    fn test_legend_cut_to_zone_width_and_view() {
        // Zones two cells wide; only the visible 5 columns are labelled
        let layout = ZoneLayout::for_height(16);
        let legend = ZoneLegend::for_board(&layout, 5, 4);
        assert_eq!(
            legend.survive,
            vec![(0, "0-".to_string()), (2, "1-".to_string()), (4, "2".to_string())]
        );
        assert_eq!(legend.born, vec![(0, "0".to_string()), (2, "1".to_string())]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("ab", 3), "ab");
    }
}
