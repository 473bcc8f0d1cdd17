use crate::core::models::{
    common::Pagination,
    question::{Payload, Question},
};
use crate::error::Error;

/// Persistence of questions.
///
/// Lookups by id fail with `Error::NotFound` when no such record exists.
pub trait QuestionCommon {
    async fn insert(&mut self, payload: Payload) -> Result<Question, Error>;
    async fn get(&mut self, id: i32) -> Result<Question, Error>;
    /// Like `get`, but keeps the record locked until the surrounding transaction ends.
    async fn get_for_update(&mut self, id: i32) -> Result<Question, Error>;
    /// Newest first.
    async fn query(&mut self, pagination: Pagination) -> Result<Vec<Question>, Error>;
    async fn count(&mut self) -> Result<i64, Error>;
    async fn update(&mut self, id: i32, payload: Payload) -> Result<Question, Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
    /// Up to `size` distinct questions in random order.
    async fn sample(&mut self, size: i64) -> Result<Vec<Question>, Error>;
}

pub trait Store: QuestionCommon {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
    async fn rollback(self) -> Result<(), Error>;
}

pub trait Manager {
    type Store: Store;
    type TxStore: TxStore;

    async fn db(&self) -> Result<Self::Store, Error>;
    async fn tx(&self) -> Result<Self::TxStore, Error>;
}
