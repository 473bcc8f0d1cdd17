pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    /// `limit` is clamped to `MAX_LIMIT`.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.min(MAX_LIMIT),
            offset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(Pagination::new(1000, 0).limit, MAX_LIMIT);
        assert_eq!(Pagination::new(100, 0).limit, 100);
        assert_eq!(Pagination::new(7, 3), Pagination { limit: 7, offset: 3 });
    }
}
