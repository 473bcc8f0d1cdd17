use crate::core::models::common::{Pagination, DEFAULT_LIMIT};
use crate::error::Error;
use crate::serde::Deserialize;

/// Raw `limit`/`offset` query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PaginationParams {
    pub fn parse(&self) -> Result<Pagination, Error> {
        let limit = parse_param("limit", self.limit.as_deref(), DEFAULT_LIMIT)?;
        let offset = parse_param("offset", self.offset.as_deref(), 0)?;
        Ok(Pagination::new(limit, offset))
    }
}

fn parse_param(name: &str, value: Option<&str>, default: i64) -> Result<i64, Error> {
    let Some(value) = value else {
        return Ok(default);
    };
    match value.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(Error::InvalidPagination(format!("{} must be a non-negative integer, got '{}'", name, value))),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn params(limit: Option<&str>, offset: Option<&str>) -> PaginationParams {
        PaginationParams {
            limit: limit.map(Into::into),
            offset: offset.map(Into::into),
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PaginationParams::default().parse().unwrap(), Pagination { limit: 20, offset: 0 });
    }

    #[test]
    fn test_parse() {
        assert_eq!(params(Some("5"), Some("10")).parse().unwrap(), Pagination { limit: 5, offset: 10 });
        assert_eq!(params(Some("1000"), None).parse().unwrap(), Pagination { limit: 100, offset: 0 });
    }

    #[test]
    fn test_invalid() {
        for (limit, offset) in [(Some("abc"), None), (None, Some("1.5")), (Some("-1"), None), (None, Some(""))] {
            assert!(matches!(params(limit, offset).parse(), Err(Error::InvalidPagination(_))));
        }
    }
}
