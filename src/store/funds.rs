use diesel::prelude::*;
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::models::{Fund, NewFund};
use crate::store::schema::funds::dsl;
use crate::store::{DbPool, get_connection};

/// Repository for fund records.
pub struct FundRepository {
    pool: Arc<DbPool>,
}

impl FundRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn insert(&self, new_fund: NewFund) -> Result<Fund> {
        new_fund.validate()?;

        let mut conn = get_connection(&self.pool)?;
        let fund = diesel::insert_into(dsl::funds)
            .values(&new_fund)
            .returning(Fund::as_returning())
            .get_result(&mut conn)?;

        Ok(fund)
    }

    /// Looks up a fund by its ticker. A miss is a regular outcome, not an
    /// error.
    pub fn find_by_ticker(&self, fund_ticker: &str) -> Result<Option<Fund>> {
        let mut conn = get_connection(&self.pool)?;
        let fund = dsl::funds
            .filter(dsl::ticker.eq(fund_ticker))
            .first::<Fund>(&mut conn)
            .optional()?;

        Ok(fund)
    }

    pub fn list(&self) -> Result<Vec<Fund>> {
        let mut conn = get_connection(&self.pool)?;
        let all = dsl::funds.order(dsl::id.asc()).load::<Fund>(&mut conn)?;
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use crate::store::open_test_pool;

    fn new_fund(ticker: &str) -> NewFund {
        NewFund::new(
            "Test Fund".to_string(),
            ticker.to_string(),
            "A test fund".to_string(),
            1000,
        )
    }

    #[test]
    fn test_insert_and_find_by_ticker() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FundRepository::new(open_test_pool(dir.path()));

        let fund = repo.insert(new_fund("TST")).unwrap();
        assert_eq!(fund.ticker, "TST");
        assert_eq!(fund.initial_investment, 0.0);
        assert_eq!(fund.shares_outstanding, 1000);

        let found = repo.find_by_ticker("TST").unwrap();
        assert_eq!(found, Some(fund));

        assert!(repo.find_by_ticker("ZZZ").unwrap().is_none());
    }

    #[test]
    fn test_insert_rejects_invalid_fund() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FundRepository::new(open_test_pool(dir.path()));

        let mut invalid = new_fund("TST");
        invalid.shares_outstanding = 0;
        assert!(matches!(
            repo.insert(invalid),
            Err(Error::InvalidInput(_))
        ));
        assert!(repo.list().unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_ticker_violates_unique_constraint() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FundRepository::new(open_test_pool(dir.path()));

        repo.insert(new_fund("TST")).unwrap();
        assert!(matches!(
            repo.insert(new_fund("TST")),
            Err(Error::Database(_))
        ));
    }

    #[test]
    fn test_list_orders_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FundRepository::new(open_test_pool(dir.path()));

        repo.insert(new_fund("AFUND")).unwrap();
        repo.insert(new_fund("BFUND")).unwrap();

        let all = repo.list().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].ticker, "AFUND");
        assert_eq!(all[1].ticker, "BFUND");
    }
}
