use crate::actix_web::web::{Data, Json, Path, Query};
use crate::actix_web::HttpResponse;
use crate::core::models::question::{Draft, Question};
use crate::core::ports::repository::{Manager, TxStore};
use crate::core::services::question::{self as service, QUIZ_SET_SIZE};
use crate::error::Error;
use crate::request::PaginationParams;
use crate::response::{List, QuizSet};

pub async fn list<M: Manager>(params: Query<PaginationParams>, manager: Data<M>) -> Result<Json<List<Question>>, Error> {
    let pagination = params.parse()?;
    let mut db = manager.db().await?;
    let (questions, total) = service::list_questions(&mut db, pagination).await?;
    Ok(Json(List::new(questions, total, pagination)))
}

pub async fn create<M: Manager>(Json(draft): Json<Draft>, manager: Data<M>) -> Result<HttpResponse, Error> {
    let mut db = manager.db().await?;
    let question = service::create_question(&mut db, draft).await?;
    Ok(HttpResponse::Created().json(question))
}

pub async fn detail<M: Manager>(id: Path<(i32,)>, manager: Data<M>) -> Result<Json<Question>, Error> {
    let id = id.into_inner().0;
    let mut db = manager.db().await?;
    let question = service::question_detail(&mut db, id).await?;
    Ok(Json(question))
}

async fn save<M: Manager>(manager: &M, id: i32, draft: Draft, partial: bool) -> Result<Question, Error> {
    let mut tx = manager.tx().await?;
    let result = service::update_question(&mut tx, id, draft, partial).await;
    match result {
        Ok(question) => {
            tx.commit().await?;
            Ok(question)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e)
        }
    }
}

pub async fn update<M: Manager>(id: Path<(i32,)>, Json(draft): Json<Draft>, manager: Data<M>) -> Result<Json<Question>, Error> {
    let question = save(manager.get_ref(), id.into_inner().0, draft, false).await?;
    Ok(Json(question))
}

pub async fn patch<M: Manager>(id: Path<(i32,)>, Json(draft): Json<Draft>, manager: Data<M>) -> Result<Json<Question>, Error> {
    let question = save(manager.get_ref(), id.into_inner().0, draft, true).await?;
    Ok(Json(question))
}

pub async fn delete<M: Manager>(id: Path<(i32,)>, manager: Data<M>) -> Result<HttpResponse, Error> {
    let id = id.into_inner().0;
    let mut db = manager.db().await?;
    service::delete_question(&mut db, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// The seed is echoed back but does not influence the selection.
pub async fn quiz_set<M: Manager>(seed: Path<(String,)>, manager: Data<M>) -> Result<Json<QuizSet>, Error> {
    let seed = seed.into_inner().0;
    let mut db = manager.db().await?;
    let questions = service::quiz_set(&mut db, QUIZ_SET_SIZE).await?;
    Ok(Json(QuizSet::new(seed, questions)))
}
