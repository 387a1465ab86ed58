//! SurrealQL statements used by the CRUD layer.
//!
//! Every builder returns something that implements [`surrealdb::opt::IntoQuery`],
//! the statements are only parsed when they are executed (or in the tests below each builder).

pub mod generic;
pub mod song;

#[cfg(test)]
pub fn validate_query(query: impl surrealdb::opt::IntoQuery, expected: &str) {
    use pretty_assertions::assert_eq;
    // first check if we can use IntoQuery to parse the query
    let compiled_query: surrealdb::sql::Query = query
        .as_str()
        .map(surrealdb::syn::parse)
        .map_or_else(|| query.into_query().unwrap().into(), Result::unwrap);

    let compiled_expected = surrealdb::syn::parse(expected).unwrap();
    assert!(
        !compiled_expected.0.is_empty(),
        "Expected query compiled to an empty list of statements: \"{expected}\""
    );
    assert_eq!(compiled_query, compiled_expected);
}
