use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use products_hr::ListSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage_slot: String,
    pub page_size: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let defaults = ListSettings::default();

        let data_dir = std::env::var("HR_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".hr-data"));

        let storage_slot = std::env::var("HR_STORAGE_SLOT")
            .ok()
            .map(|slot| slot.trim().to_string())
            .filter(|slot| !slot.is_empty())
            .unwrap_or(defaults.storage_slot);

        let page_size = match std::env::var("HR_PAGE_SIZE") {
            Ok(raw) => parse_page_size(&raw)?,
            Err(_) => defaults.page_size,
        };

        Ok(Self {
            data_dir,
            storage_slot,
            page_size,
        })
    }

    pub fn list_settings(&self) -> ListSettings {
        ListSettings {
            storage_slot: self.storage_slot.clone(),
            ..ListSettings::default()
        }
        .with_page_size(self.page_size)
    }
}

fn parse_page_size(raw: &str) -> Result<usize> {
    let size: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid HR_PAGE_SIZE `{raw}`"))?;
    if size == 0 {
        return Err(anyhow!("HR_PAGE_SIZE must be at least 1"));
    }
    Ok(size)
}
