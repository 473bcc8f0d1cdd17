//! Process-local question store.
//!
//! Used when no database is configured and by the tests. A store handle owns the
//! table lock for as long as it lives, so handles are serialized. A
//! transactional handle keeps a snapshot of the table and puts it back unless
//! it is committed.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::core::models::{
    common::Pagination,
    question::{Payload, Question},
};
use crate::core::ports::repository::{Manager, QuestionCommon, Store, TxStore};
use crate::error::Error;

#[derive(Debug, Clone, Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Question>,
}

#[derive(Debug, Clone, Default)]
pub struct Memory {
    table: Arc<Mutex<Table>>,
}

pub struct MemStore {
    table: OwnedMutexGuard<Table>,
    snapshot: Option<Table>,
}

impl Drop for MemStore {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.table = snapshot;
        }
    }
}

impl QuestionCommon for MemStore {
    async fn insert(&mut self, payload: Payload) -> Result<Question, Error> {
        let (question, type_, options, answer) = payload.into_columns();
        let now = Utc::now();
        self.table.last_id += 1;
        let id = self.table.last_id;
        let record = Question {
            id,
            question,
            type_,
            options,
            answer,
            created_at: now,
            updated_at: now,
        };
        self.table.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&mut self, id: i32) -> Result<Question, Error> {
        self.table.rows.get(&id).cloned().ok_or(Error::NotFound)
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Question, Error> {
        self.get(id).await
    }

    async fn query(&mut self, pagination: Pagination) -> Result<Vec<Question>, Error> {
        let mut rows: Vec<&Question> = self.table.rows.values().collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        let offset = usize::try_from(pagination.offset).unwrap_or(0);
        let limit = usize::try_from(pagination.limit).unwrap_or(0);
        Ok(rows.into_iter().skip(offset).take(limit).cloned().collect())
    }

    async fn count(&mut self) -> Result<i64, Error> {
        Ok(self.table.rows.len() as i64)
    }

    async fn update(&mut self, id: i32, payload: Payload) -> Result<Question, Error> {
        let record = self.table.rows.get_mut(&id).ok_or(Error::NotFound)?;
        let (question, type_, options, answer) = payload.into_columns();
        record.question = question;
        record.type_ = type_;
        record.options = options;
        record.answer = answer;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.table.rows.remove(&id).map(|_| ()).ok_or(Error::NotFound)
    }

    async fn sample(&mut self, size: i64) -> Result<Vec<Question>, Error> {
        let size = usize::try_from(size).unwrap_or(0);
        let mut rng = rand::thread_rng();
        let mut picked = reservoir(self.table.rows.values(), size, &mut rng);
        picked.shuffle(&mut rng);
        debug!("sampled {} of {} questions", picked.len(), self.table.rows.len());
        Ok(picked.into_iter().cloned().collect())
    }
}

/// Uniform sample of at most `size` items in a single pass.
fn reservoir<T, I, R>(items: I, size: usize, rng: &mut R) -> Vec<T>
where
    I: Iterator<Item = T>,
    R: Rng,
{
    let mut picked = Vec::with_capacity(size);
    if size == 0 {
        return picked;
    }
    for (seen, item) in items.enumerate() {
        if seen < size {
            picked.push(item);
        } else {
            let slot = rng.gen_range(0..=seen);
            if slot < size {
                picked[slot] = item;
            }
        }
    }
    picked
}

impl Store for MemStore {}

impl TxStore for MemStore {
    async fn commit(mut self) -> Result<(), Error> {
        self.snapshot = None;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        // restored on drop
        Ok(())
    }
}

impl Manager for Memory {
    type Store = MemStore;
    type TxStore = MemStore;

    async fn db(&self) -> Result<Self::Store, Error> {
        let table = self.table.clone().lock_owned().await;
        Ok(MemStore { table, snapshot: None })
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let table = self.table.clone().lock_owned().await;
        let snapshot = Some(table.clone());
        Ok(MemStore { table, snapshot })
    }
}
