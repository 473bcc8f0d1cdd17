use log::{debug, info};

use crate::core::models::{
    common::Pagination,
    question::{Draft, Payload, Question},
};
use crate::core::ports::repository::{QuestionCommon, Store, TxStore};
use crate::error::Error;

pub const QUIZ_SET_SIZE: i64 = 5;

pub async fn create_question<S>(storer: &mut S, draft: Draft) -> Result<Question, Error>
where
    S: Store,
{
    let payload = Payload::try_from(draft)?;
    debug!("creating {} question {:?}", payload.type_(), payload.question());
    let question = QuestionCommon::insert(storer, payload).await?;
    info!("created question {} ({})", question.id, question.type_);
    Ok(question)
}

pub async fn question_detail<S>(storer: &mut S, id: i32) -> Result<Question, Error>
where
    S: Store,
{
    QuestionCommon::get(storer, id).await
}

pub async fn list_questions<S>(storer: &mut S, pagination: Pagination) -> Result<(Vec<Question>, i64), Error>
where
    S: Store,
{
    let total = QuestionCommon::count(storer).await?;
    let questions = QuestionCommon::query(storer, pagination).await?;
    debug!("listed {} of {} questions (limit {}, offset {})", questions.len(), total, pagination.limit, pagination.offset);
    Ok((questions, total))
}

/// Replaces (`partial == false`) or patches (`partial == true`) a question.
///
/// The merged record is validated as a whole before it is written. A replace
/// starts from the body alone, so an omitted `type` means single-choice. In a
/// patch, absent and `null` fields keep their stored values. The caller owns
/// the transaction and decides whether to commit.
pub async fn update_question<T>(tx: &mut T, id: i32, draft: Draft, partial: bool) -> Result<Question, Error>
where
    T: TxStore,
{
    let current = QuestionCommon::get_for_update(tx, id).await?;
    let draft = if partial { Draft::from(current).merge(draft) } else { draft };
    let payload = Payload::try_from(draft)?;
    let question = QuestionCommon::update(tx, id, payload).await?;
    info!("updated question {} (partial: {})", id, partial);
    Ok(question)
}

pub async fn delete_question<S>(storer: &mut S, id: i32) -> Result<(), Error>
where
    S: Store,
{
    QuestionCommon::delete(storer, id).await?;
    info!("deleted question {}", id);
    Ok(())
}

/// Random questions for a quiz session. Repeated calls are not reproducible.
pub async fn quiz_set<S>(storer: &mut S, size: i64) -> Result<Vec<Question>, Error>
where
    S: Store,
{
    let questions = QuestionCommon::sample(storer, size).await?;
    if questions.is_empty() {
        return Err(Error::NoQuestionsAvailable);
    }
    Ok(questions)
}
