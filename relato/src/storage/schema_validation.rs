use sqlx::{Pool, Postgres, Row, Sqlite};

/// Validates that a Postgres table schema matches what we expect
pub(crate) async fn validate_postgres_table_schema<E>(
    pool: &Pool<Postgres>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT FROM information_schema.tables WHERE table_name = $1)",
    )
    .bind(table_name)
    .fetch_one(pool)
    .await
    .map_err(|e| error_mapper(e.to_string()))?;

    if !table_exists {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    let rows = sqlx::query(
        "SELECT column_name, data_type FROM information_schema.columns
         WHERE table_name = $1 ORDER BY column_name",
    )
    .bind(table_name)
    .fetch_all(pool)
    .await
    .map_err(|e| error_mapper(e.to_string()))?;

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| (row.get("column_name"), row.get("data_type")))
        .collect();

    check_columns(table_name, expected_columns, &actual_columns, error_mapper)
}

/// Validates that a SQLite table schema matches what we expect
pub(crate) async fn validate_sqlite_table_schema<E>(
    pool: &Pool<Sqlite>,
    table_name: &str,
    expected_columns: &[(&str, &str)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    let rows = sqlx::query(&format!("PRAGMA table_info({table_name})"))
        .fetch_all(pool)
        .await
        .map_err(|e| error_mapper(e.to_string()))?;

    if rows.is_empty() {
        return Err(error_mapper(format!(
            "Schema validation failed: Table '{table_name}' does not exist"
        )));
    }

    let actual_columns: Vec<(String, String)> = rows
        .iter()
        .map(|row| {
            let name: String = row.get("name");
            let type_: String = row.get("type");
            (name, type_)
        })
        .collect();

    check_columns(table_name, expected_columns, &actual_columns, error_mapper)
}

fn check_columns<E>(
    table_name: &str,
    expected_columns: &[(&str, &str)],
    actual_columns: &[(String, String)],
    error_mapper: impl Fn(String) -> E,
) -> Result<(), E> {
    for (expected_name, expected_type) in expected_columns {
        let found = actual_columns
            .iter()
            .find(|(name, _)| name == expected_name);

        match found {
            Some((_, actual_type)) if actual_type.eq_ignore_ascii_case(expected_type) => {}
            Some((_, actual_type)) => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Column '{expected_name}' has type '{actual_type}' but expected '{expected_type}'"
                )));
            }
            None => {
                return Err(error_mapper(format!(
                    "Schema validation failed: Missing column '{expected_name}'"
                )));
            }
        }
    }

    for (actual_name, _) in actual_columns {
        if !expected_columns
            .iter()
            .any(|(name, _)| name == actual_name)
        {
            tracing::warn!(
                "Extra column '{}' found in table '{}'",
                actual_name,
                table_name
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(e: String) -> String {
        e
    }

    #[test]
    fn test_check_columns_match() {
        let actual = vec![
            ("id".to_string(), "TEXT".to_string()),
            ("created_at".to_string(), "TIMESTAMP".to_string()),
        ];
        let expected = [("id", "TEXT"), ("created_at", "TIMESTAMP")];
        assert!(check_columns("t", &expected, &actual, map).is_ok());
    }

    #[test]
    fn test_check_columns_missing() {
        let actual = vec![("id".to_string(), "TEXT".to_string())];
        let expected = [("id", "TEXT"), ("email", "TEXT")];
        let err = check_columns("t", &expected, &actual, map).unwrap_err();
        assert!(err.contains("Missing column 'email'"));
    }

    #[test]
    fn test_check_columns_wrong_type() {
        let actual = vec![("id".to_string(), "INTEGER".to_string())];
        let expected = [("id", "TEXT")];
        let err = check_columns("t", &expected, &actual, map).unwrap_err();
        assert!(err.contains("has type 'INTEGER'"));
    }

    #[test]
    fn test_check_columns_case_insensitive() {
        let actual = vec![("id".to_string(), "text".to_string())];
        let expected = [("id", "TEXT")];
        assert!(check_columns("t", &expected, &actual, map).is_ok());
    }
}
