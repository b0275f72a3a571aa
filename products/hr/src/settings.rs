use serde::Deserialize;

use crate::pagination::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_WIDTH};

/// Storage slot the collection lives under unless configured otherwise.
pub const DEFAULT_SLOT: &str = "employees";

/// Fixed parameters of a list controller.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ListSettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_window_width")]
    pub window_width: usize,
    #[serde(default = "default_slot")]
    pub storage_slot: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_window_width() -> usize {
    DEFAULT_WINDOW_WIDTH
}

fn default_slot() -> String {
    DEFAULT_SLOT.to_string()
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            window_width: DEFAULT_WINDOW_WIDTH,
            storage_slot: default_slot(),
        }
    }
}

impl ListSettings {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}
