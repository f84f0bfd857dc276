use crate::api::NewsItem;

/// Which of the three mutually exclusive states the news list is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewStatus {
    #[default]
    Loading,
    Empty,
    Content,
}

/// Visibility of the three regions the list screen is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionVisibility {
    pub list: bool,
    pub empty: bool,
    pub progress: bool,
}

impl ViewStatus {
    /// `None` means nothing has arrived yet.
    pub fn from_items(items: Option<&[NewsItem]>) -> Self {
        match items {
            None => Self::Loading,
            Some([]) => Self::Empty,
            Some(_) => Self::Content,
        }
    }

    pub fn regions(self) -> RegionVisibility {
        match self {
            Self::Loading => RegionVisibility {
                list: false,
                empty: false,
                progress: true,
            },
            Self::Empty => RegionVisibility {
                list: false,
                empty: true,
                progress: false,
            },
            Self::Content => RegionVisibility {
                list: true,
                empty: false,
                progress: false,
            },
        }
    }

    /// Whether the bottom sheet should skip its collapsed state while in this
    /// status.
    pub fn skips_collapsed(self) -> bool {
        matches!(self, Self::Loading | Self::Empty)
    }
}
