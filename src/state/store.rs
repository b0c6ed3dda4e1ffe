/// Single-entry item store
///
/// Hands the most recently submitted item from the Add Form to the Carousel
/// View. Created once at application start and owned by the application, so
/// it survives every screen change. Holds at most one record; each `set`
/// overwrites the previous one.
///
/// The slot keeps the record serialized, which lets a read tell apart
/// "nothing added yet" from a payload that no longer parses.
use super::data::ItemRecord;

/// Outcome of reading the store
#[derive(Debug, Clone, PartialEq)]
pub enum StoreRead {
    Present(ItemRecord),
    Empty,
    Malformed(String),
}

#[derive(Debug, Default)]
pub struct ItemStore {
    slot: Option<String>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a record, replacing whatever was there
    pub fn set(&mut self, record: &ItemRecord) -> Result<(), serde_json::Error> {
        self.slot = Some(serde_json::to_string(record)?);
        tracing::info!("📦 Stored item \"{}\"", record.name);
        Ok(())
    }

    pub fn get(&self) -> StoreRead {
        match &self.slot {
            None => StoreRead::Empty,
            Some(json) => match serde_json::from_str(json) {
                Ok(record) => StoreRead::Present(record),
                Err(e) => StoreRead::Malformed(e.to_string()),
            },
        }
    }

    /// Empty the slot. The store offers set, get and clear; the screens only
    /// ever overwrite, so the slot lives until exit.
    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.slot = None;
    }

    /// Put a raw payload in the slot
    #[cfg(test)]
    pub fn set_raw(&mut self, json: &str) {
        self.slot = Some(json.to_string());
    }
}
