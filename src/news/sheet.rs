/// Position of the bottom sheet hosting the portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SheetState {
    #[default]
    Expanded,
    Collapsed,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BottomSheet {
    pub state: SheetState,
    /// When set, collapsing goes straight to hidden.
    pub skip_collapsed: bool,
    /// Rows shown while collapsed.
    pub peek_height: u16,
}

impl BottomSheet {
    pub const DEFAULT_PEEK_HEIGHT: u16 = 4;

    pub fn new() -> Self {
        Self {
            state: SheetState::Expanded,
            skip_collapsed: false,
            peek_height: Self::DEFAULT_PEEK_HEIGHT,
        }
    }

    pub fn expand(&mut self) {
        self.state = SheetState::Expanded;
    }

    pub fn collapse(&mut self) {
        self.state = if self.skip_collapsed {
            SheetState::Hidden
        } else {
            SheetState::Collapsed
        };
    }

    pub fn hide(&mut self) {
        self.state = SheetState::Hidden;
    }

    pub fn is_hidden(&self) -> bool {
        self.state == SheetState::Hidden
    }

    /// Rows the sheet occupies in an area `area_height` rows tall.
    pub fn height_in(&self, area_height: u16) -> u16 {
        match self.state {
            SheetState::Expanded => (area_height.saturating_mul(3) / 4).max(self.peek_height),
            SheetState::Collapsed => self.peek_height,
            SheetState::Hidden => 0,
        }
        .min(area_height)
    }
}

impl Default for BottomSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_respects_skip_flag() {
        let mut sheet = BottomSheet::new();
        sheet.collapse();
        assert_eq!(sheet.state, SheetState::Collapsed);

        sheet.expand();
        sheet.skip_collapsed = true;
        sheet.collapse();
        assert_eq!(sheet.state, SheetState::Hidden);
        assert!(sheet.is_hidden());
    }

    #[test]
    fn heights() {
        let mut sheet = BottomSheet::new();
        assert_eq!(sheet.height_in(40), 30);
        assert_eq!(sheet.height_in(4), 4);
        sheet.collapse();
        assert_eq!(sheet.height_in(40), BottomSheet::DEFAULT_PEEK_HEIGHT);
        assert_eq!(sheet.height_in(2), 2);
        sheet.hide();
        assert_eq!(sheet.height_in(40), 0);
    }
}
