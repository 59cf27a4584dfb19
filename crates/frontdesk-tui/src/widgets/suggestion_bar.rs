//! Suggested action chips.
//!
//! Each chip is a one-click shortcut for submitting its text. Chip geometry
//! comes from [`crate::ui::layout::chip_areas`] so mouse hit-testing and
//! rendering agree.

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::ui::layout::{chip_areas, chip_label};
use crate::ui::theme::Styles;

/// Row of suggested actions.
pub struct SuggestionBar<'a> {
    actions: &'a [String],
    selected: Option<usize>,
}

impl<'a> SuggestionBar<'a> {
    pub fn new(actions: &'a [String]) -> Self {
        Self {
            actions,
            selected: None,
        }
    }

    /// Highlight the chip at `selected`.
    #[must_use]
    pub fn selected(mut self, selected: Option<usize>) -> Self {
        self.selected = selected;
        self
    }
}

impl Widget for SuggestionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Styles::default());

        for (i, (chip, action)) in chip_areas(area, self.actions)
            .into_iter()
            .zip(self.actions)
            .enumerate()
        {
            let style = if self.selected == Some(i) {
                Styles::chip_selected()
            } else {
                Styles::chip()
            };
            buf.set_stringn(chip.x, chip.y, chip_label(action), usize::from(chip.width), style);
        }
    }
}
