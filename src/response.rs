use crate::core::models::common::Pagination;
use crate::core::models::question::Question;
use crate::serde::Serialize;

#[derive(Debug, Serialize)]
pub struct List<T> {
    results: Vec<T>,
    count: i64,
    limit: i64,
    offset: i64,
}

impl<T> List<T> {
    pub fn new(results: Vec<T>, count: i64, pagination: Pagination) -> Self {
        List {
            results,
            count,
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuizSet {
    seed: String,
    count: usize,
    questions: Vec<Question>,
}

impl QuizSet {
    pub fn new(seed: String, questions: Vec<Question>) -> Self {
        QuizSet {
            seed,
            count: questions.len(),
            questions,
        }
    }
}
