use diesel::prelude::*;
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::models::{Holding, NewHolding};
use crate::store::schema::fund_holdings::dsl;
use crate::store::{DbPool, get_connection};

/// Repository for a fund's positions in underlying securities.
pub struct HoldingRepository {
    pool: Arc<DbPool>,
}

impl HoldingRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn insert(&self, new_holding: NewHolding) -> Result<Holding> {
        let mut conn = get_connection(&self.pool)?;
        let holding = diesel::insert_into(dsl::fund_holdings)
            .values(&new_holding)
            .returning(Holding::as_returning())
            .get_result(&mut conn)?;

        Ok(holding)
    }

    pub fn list_for_fund(&self, fund: i32) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        let all = dsl::fund_holdings
            .filter(dsl::fund_id.eq(fund))
            .order(dsl::id.asc())
            .load::<Holding>(&mut conn)?;
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::funds::FundRepository;
    use crate::store::models::NewFund;
    use crate::store::open_test_pool;

    #[test]
    fn test_insert_and_list_scoped_to_fund() {
        let dir = tempfile::tempdir().unwrap();
        let pool = open_test_pool(dir.path());
        let funds = FundRepository::new(pool.clone());
        let repo = HoldingRepository::new(pool);

        let fund_a = funds
            .insert(NewFund::new(
                "Fund A".to_string(),
                "AFUND".to_string(),
                String::new(),
                100,
            ))
            .unwrap();
        let fund_b = funds
            .insert(NewFund::new(
                "Fund B".to_string(),
                "BFUND".to_string(),
                String::new(),
                100,
            ))
            .unwrap();

        repo.insert(NewHolding {
            fund_id: fund_a.id,
            ticker: "AAPL".to_string(),
            quantity: 10,
            purchase_price: 1500.0,
        })
        .unwrap();
        repo.insert(NewHolding {
            fund_id: fund_b.id,
            ticker: "MSFT".to_string(),
            quantity: 5,
            purchase_price: 2000.0,
        })
        .unwrap();

        let for_a = repo.list_for_fund(fund_a.id).unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].ticker, "AAPL");
        assert_eq!(for_a[0].quantity, 10);
        assert_eq!(for_a[0].purchase_price, 1500.0);

        let for_b = repo.list_for_fund(fund_b.id).unwrap();
        assert_eq!(for_b.len(), 1);
        assert_eq!(for_b[0].ticker, "MSFT");
    }
}
