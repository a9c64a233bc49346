use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use super::RecordStore;
use crate::models::{NewRecord, Record};

/// Process-local store, selected with `DATABASE_URL=memory`.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: NewRecord) -> Result<Record> {
        let mut records = self.records.write().await;
        let record = record.into_record(records.len() as i64 + 1);
        records.push(record.clone());
        Ok(record)
    }

    async fn latest_balance(&self, address: &str) -> Result<Option<f64>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .rev()
            .find(|r| r.address.eq_ignore_ascii_case(address))
            .map(|r| r.balance))
    }
}
