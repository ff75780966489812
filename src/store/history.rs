use diesel::prelude::*;
use std::sync::Arc;

use crate::core::error::Result;
use crate::store::models::{FundHistory, NewFundHistory};
use crate::store::schema::fund_histories::dsl;
use crate::store::{DbPool, get_connection};

/// Repository for the append-only NAV history of a fund.
pub struct HistoryRepository {
    pool: Arc<DbPool>,
}

impl HistoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub fn append(&self, entry: NewFundHistory) -> Result<FundHistory> {
        let mut conn = get_connection(&self.pool)?;
        let appended = diesel::insert_into(dsl::fund_histories)
            .values(&entry)
            .returning(FundHistory::as_returning())
            .get_result(&mut conn)?;

        Ok(appended)
    }

    pub fn list_for_fund(&self, fund: i32) -> Result<Vec<FundHistory>> {
        let mut conn = get_connection(&self.pool)?;
        let all = dsl::fund_histories
            .filter(dsl::fund_id.eq(fund))
            .order(dsl::id.asc())
            .load::<FundHistory>(&mut conn)?;
        Ok(all)
    }
}
