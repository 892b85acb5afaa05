//! Company repository implementation, including the predicate-driven search.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use certmatch_core::error::{AppError, ErrorKind};
use certmatch_core::result::AppResult;
use certmatch_core::types::{CompanyId, UserId};
use certmatch_entity::company::{
    Company, CompanyClause, CompanyOrder, CompanyPredicate, CompanyWithOwner, CreateCompany,
    UpdateCompany,
};
use certmatch_entity::user::UserSummary;

use super::violated_constraint;
use crate::store::CompanyStore;

const USER_KEY: &str = "companies_user_id_key";
const USER_FKEY: &str = "companies_user_id_fkey";

const SELECT_WITH_OWNER: &str = "SELECT c.id, c.user_id, c.name, c.industry, c.size, c.address, \
            c.created_at, c.updated_at, \
            u.email AS owner_email, u.name AS owner_name, u.phone AS owner_phone \
     FROM companies c \
     JOIN users u ON u.id = c.user_id";

#[derive(Debug, FromRow)]
struct CompanyOwnerRow {
    #[sqlx(flatten)]
    company: Company,
    owner_email: String,
    owner_name: String,
    owner_phone: Option<String>,
}

impl From<CompanyOwnerRow> for CompanyWithOwner {
    fn from(row: CompanyOwnerRow) -> Self {
        let user = UserSummary {
            id: row.company.user_id,
            email: row.owner_email,
            name: row.owner_name,
            phone: row.owner_phone,
        };
        Self {
            company: row.company,
            user,
        }
    }
}

/// Repository for company profiles.
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: PgPool,
}

impl CompanyRepository {
    /// Create a new company repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append the predicate's clauses and ordering to a query.
fn push_predicate(qb: &mut QueryBuilder<'_, Postgres>, predicate: &CompanyPredicate) {
    for (i, clause) in predicate.clauses.iter().enumerate() {
        qb.push(if i == 0 { " WHERE " } else { " AND " });
        match clause {
            CompanyClause::IndustryContains(value) => {
                qb.push("c.industry ILIKE ")
                    .push_bind(contains_pattern(value))
                    .push(" ESCAPE '\\'");
            }
            CompanyClause::SizeEquals(value) => {
                qb.push("c.size = ").push_bind(value.clone());
            }
            CompanyClause::AddressContains(value) => {
                qb.push("c.address ILIKE ")
                    .push_bind(contains_pattern(value))
                    .push(" ESCAPE '\\'");
            }
        }
    }

    match predicate.order {
        CompanyOrder::NameAsc => {
            qb.push(" ORDER BY c.name COLLATE \"C\" ASC, c.created_at ASC, c.id ASC");
        }
    }
}

/// `%value%` with LIKE metacharacters escaped so they match literally.
fn contains_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for ch in value.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl CompanyStore for CompanyRepository {
    async fn create(&self, data: &CreateCompany) -> AppResult<Company> {
        sqlx::query_as::<_, Company>(
            "INSERT INTO companies (id, user_id, name, industry, size, address) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(CompanyId::new())
        .bind(data.user_id)
        .bind(&data.name)
        .bind(&data.industry)
        .bind(&data.size)
        .bind(&data.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some(USER_KEY) => AppError::conflict(format!(
                "User {} already has a company profile",
                data.user_id
            )),
            Some(USER_FKEY) => AppError::not_found(format!("User {} not found", data.user_id)),
            _ => AppError::with_source(ErrorKind::Database, "Failed to create company", e),
        })
    }

    async fn find_by_id(&self, id: CompanyId) -> AppResult<Option<CompanyWithOwner>> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_WITH_OWNER);
        qb.push(" WHERE c.id = ").push_bind(id);

        let row = qb
            .build_query_as::<CompanyOwnerRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find company by id", e)
            })?;
        Ok(row.map(CompanyWithOwner::from))
    }

    async fn find_by_user(&self, user_id: UserId) -> AppResult<Option<Company>> {
        sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find company by owner", e)
            })
    }

    async fn update(&self, id: CompanyId, data: &UpdateCompany) -> AppResult<Company> {
        sqlx::query_as::<_, Company>(
            "UPDATE companies SET name = COALESCE($2, name), \
                                  industry = COALESCE($3, industry), \
                                  size = COALESCE($4, size), \
                                  address = COALESCE($5, address), \
                                  updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.industry)
        .bind(&data.size)
        .bind(&data.address)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update company", e))?
        .ok_or_else(|| AppError::not_found(format!("Company {id} not found")))
    }

    async fn delete(&self, id: CompanyId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete company", e)
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_many(&self, predicate: &CompanyPredicate) -> AppResult<Vec<CompanyWithOwner>> {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_WITH_OWNER);
        push_predicate(&mut qb, predicate);

        let rows = qb
            .build_query_as::<CompanyOwnerRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Company query failed", e))?;

        Ok(rows.into_iter().map(CompanyWithOwner::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use certmatch_entity::company::SearchCriteria;

    use super::*;

    fn sql_for(criteria: SearchCriteria) -> String {
        let mut qb = QueryBuilder::<Postgres>::new(SELECT_WITH_OWNER);
        push_predicate(&mut qb, &criteria.to_predicate());
        qb.sql().to_string()
    }

    #[test]
    fn test_contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("IT"), "%IT%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }

    #[test]
    fn test_empty_predicate_has_no_where() {
        let sql = sql_for(SearchCriteria::default());
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY c.name COLLATE \"C\" ASC, c.created_at ASC, c.id ASC"));
    }

    #[test]
    fn test_full_predicate_sql() {
        let sql = sql_for(SearchCriteria {
            industry: Some("it".to_string()),
            size: Some("SMALL".to_string()),
            location: Some("Seoul".to_string()),
        });
        assert!(sql.contains(
            " WHERE c.industry ILIKE $1 ESCAPE '\\' AND c.size = $2 AND c.address ILIKE $3 ESCAPE '\\'"
        ));
    }

    #[test]
    fn test_size_only_uses_equality() {
        let sql = sql_for(SearchCriteria {
            size: Some("SMALL".to_string()),
            ..Default::default()
        });
        assert!(sql.contains(" WHERE c.size = $1 ORDER BY"));
        assert!(!sql.contains("ILIKE"));
    }
}
