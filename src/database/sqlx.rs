use chrono::Utc;
use log::debug;
use sqlx::pool::PoolConnection;
use sqlx::types::Json;
use sqlx::{query, query_as, query_scalar, Executor, PgPool, Postgres, Transaction};

use crate::core::models::{
    common::Pagination,
    question::{Payload, Question},
};
use crate::core::ports::repository::{Manager, QuestionCommon, Store, TxStore};
use crate::database::models::question::QuestionRow;
use crate::error::Error;

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

impl<E> QuestionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, payload: Payload) -> Result<Question, Error> {
        let (question, type_, options, answer) = payload.into_columns();
        let row: QuestionRow = query_as(
            "
        INSERT INTO questions (question, type_, options, answer, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $5)
        RETURNING *",
        )
        .bind(question)
        .bind(type_)
        .bind(Json(options))
        .bind(Json(answer))
        .bind(Utc::now())
        .fetch_one(&mut self.executor)
        .await?;
        Ok(row.into())
    }

    async fn get(&mut self, id: i32) -> Result<Question, Error> {
        let row: QuestionRow = query_as("SELECT * FROM questions WHERE id = $1").bind(id).fetch_one(&mut self.executor).await?;
        Ok(row.into())
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Question, Error> {
        let row: QuestionRow = query_as("SELECT * FROM questions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(row.into())
    }

    async fn query(&mut self, pagination: Pagination) -> Result<Vec<Question>, Error> {
        let rows: Vec<QuestionRow> = query_as("SELECT * FROM questions ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2")
            .bind(pagination.limit)
            .bind(pagination.offset)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn count(&mut self) -> Result<i64, Error> {
        let total = query_scalar("SELECT COUNT(*) FROM questions").fetch_one(&mut self.executor).await?;
        Ok(total)
    }

    async fn update(&mut self, id: i32, payload: Payload) -> Result<Question, Error> {
        let (question, type_, options, answer) = payload.into_columns();
        let row: QuestionRow = query_as(
            "
        UPDATE questions
        SET question = $1, type_ = $2, options = $3, answer = $4, updated_at = $5
        WHERE id = $6
        RETURNING *",
        )
        .bind(question)
        .bind(type_)
        .bind(Json(options))
        .bind(Json(answer))
        .bind(Utc::now())
        .bind(id)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(row.into())
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        let deleted = query("DELETE FROM questions WHERE id = $1").bind(id).execute(&mut self.executor).await?.rows_affected();
        if deleted == 0 {
            return Err(Error::NotFound);
        }
        Ok(())
    }

    async fn sample(&mut self, size: i64) -> Result<Vec<Question>, Error> {
        let rows: Vec<QuestionRow> = query_as("SELECT * FROM questions ORDER BY RANDOM() LIMIT $1")
            .bind(size)
            .fetch_all(&mut self.executor)
            .await?;
        debug!("sampled {} questions", rows.len());
        Ok(rows.into_iter().map(Question::from).collect())
    }
}

impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl Store for PgSqlx<Transaction<'static, Postgres>> {}

impl TxStore for PgSqlx<Transaction<'static, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), Error> {
        self.executor.rollback().await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Manager for PgSqlxManager {
    type Store = PgSqlx<PoolConnection<Postgres>>;
    type TxStore = PgSqlx<Transaction<'static, Postgres>>;

    async fn db(&self) -> Result<Self::Store, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }

    async fn tx(&self) -> Result<Self::TxStore, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }
}
