use anyhow::{anyhow, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use csvql::query::parser::ast::{Expression, Operator, SelectStatement};
use csvql::query::parser::{parse, parse_sql, tokenize, ParseError, TokenType};

#[test]
fn test_simple_select_query() -> Result<()> {
    let select = parse_sql("SELECT nama, nim FROM data.csv WHERE nilai_angka > 3").map_err(|e| anyhow!("Parse error: {}", e))?;

    assert_eq!(select.columns, vec!["nama", "nim"]);
    assert_eq!(select.table, "data.csv");
    assert_eq!(select.limit, None);

    match select.where_clause {
        Some(Expression::BinaryOp { op, .. }) => assert_eq!(op, Operator::GreaterThan),
        other => panic!("Expected binary operation in WHERE clause, got {:?}", other),
    }

    Ok(())
}

#[test]
fn test_complex_select_query() -> Result<()> {
    let sql = "SELECT * FROM data.csv WHERE semester = 5 AND nilai_huruf = 'A' OR status != \"Lulus\" LIMIT 10";
    let select = parse_sql(sql)?;

    assert_eq!(select.columns, vec!["*"]);
    assert_eq!(select.limit, Some(10));

    let expected = Expression::binary(
        Expression::binary(
            Expression::binary(
                Expression::Identifier("semester".to_string()),
                Operator::Equals,
                Expression::Number(5.0),
            ),
            Operator::And,
            Expression::binary(
                Expression::Identifier("nilai_huruf".to_string()),
                Operator::Equals,
                Expression::StringLiteral("A".to_string()),
            ),
        ),
        Operator::Or,
        Expression::binary(
            Expression::Identifier("status".to_string()),
            Operator::NotEquals,
            Expression::StringLiteral("Lulus".to_string()),
        ),
    );
    assert_eq!(select.where_clause, Some(expected));

    Ok(())
}

#[test]
fn test_keywords_in_either_case() -> Result<()> {
    let upper = parse_sql("SELECT nama FROM data.csv WHERE sks > 2 AND semester < 5 LIMIT 3")?;
    let lower = parse_sql("select nama from data.csv where sks > 2 and semester < 5 limit 3")?;
    assert_eq!(upper, lower);

    // Mixed case is not a keyword
    let err = parse_sql("Select nama FROM data.csv").unwrap_err();
    assert!(matches!(err, ParseError::ExpectedToken { expected: "SELECT", .. }));
    Ok(())
}

#[test]
fn test_syntax_error_messages_name_the_token_and_position() -> Result<()> {
    let err = parse_sql("SELECT nama mata_kuliah FROM data.csv").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Expected FROM, found identifier 'mata_kuliah' at position 12"
    );

    let err = parse_sql("SELECT nama FROM").unwrap_err();
    assert_eq!(err, ParseError::EndOfInput { expected: "table name after FROM" });

    let err = parse_sql("SELECT nama FROM data.csv WHERE = 5").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken(ref token) if token.token_type == TokenType::EQUALS));
    Ok(())
}

#[test]
fn test_invalid_predicates() {
    for sql in [
        "SELECT * FROM data.csv WHERE",
        "SELECT * FROM data.csv WHERE nilai >",
        "SELECT * FROM data.csv WHERE a = b = c",
        "SELECT * FROM data.csv WHERE a = 1 AND",
        "SELECT * FROM data.csv LIMIT",
        "SELECT * FROM data.csv LIMIT nama",
        "SELECT * FROM 'data.csv'",
        "SELECT , FROM data.csv",
        "",
    ] {
        assert!(parse_sql(sql).is_err(), "expected a syntax error for {:?}", sql);
    }
}

#[test]
fn test_permissive_lexer_behaviour() -> Result<()> {
    // Unknown characters are dropped rather than reported
    let stmt = parse_sql("SELECT nama; FROM data.csv WHERE nilai_angka >= 3.5 #")?;
    assert_eq!(stmt.columns, vec!["nama"]);

    // `-` is dropped, so a negative number reads as positive
    let stmt = parse_sql("SELECT nama FROM data.csv WHERE nilai_angka > -1")?;
    assert_eq!(
        stmt.where_clause,
        Some(Expression::binary(
            Expression::Identifier("nilai_angka".to_string()),
            Operator::GreaterThan,
            Expression::Number(1.0),
        ))
    );

    // An unterminated string runs to the end of input
    let stmt = parse_sql("SELECT nama FROM data.csv WHERE status = 'Lulus")?;
    assert_eq!(
        stmt.where_clause,
        Some(Expression::binary(
            Expression::Identifier("status".to_string()),
            Operator::Equals,
            Expression::StringLiteral("Lulus".to_string()),
        ))
    );
    Ok(())
}

#[test]
fn test_limit_is_truncated() -> Result<()> {
    assert_eq!(parse_sql("SELECT * FROM data.csv LIMIT 2.9")?.limit, Some(2));
    assert_eq!(parse_sql("SELECT * FROM data.csv LIMIT 0")?.limit, Some(0));
    Ok(())
}

const COLUMNS: [&str; 6] = ["nama", "nim", "sks", "nilai_angka", "semester", "status"];
const COMPARISONS: [(Operator, &str); 6] = [
    (Operator::Equals, "="),
    (Operator::NotEquals, "!="),
    (Operator::GreaterThan, ">"),
    (Operator::LessThan, "<"),
    (Operator::GreaterEquals, ">="),
    (Operator::LessEquals, "<="),
];

fn random_leaf(rng: &mut StdRng) -> (Expression, String) {
    match rng.gen_range(0..3) {
        0 => {
            let name = COLUMNS[rng.gen_range(0..COLUMNS.len())];
            (Expression::Identifier(name.to_string()), name.to_string())
        }
        1 => {
            let value = rng.gen_range(0..400) as f64 / 4.0;
            (Expression::Number(value), value.to_string())
        }
        _ => {
            let words = ["Lulus", "Tidak Lulus", "A", "B+", "Basis Data"];
            let word = words[rng.gen_range(0..words.len())];
            (Expression::StringLiteral(word.to_string()), format!("'{}'", word))
        }
    }
}

fn random_comparison(rng: &mut StdRng) -> (Expression, String) {
    let (left, left_text) = random_leaf(rng);
    let (right, right_text) = random_leaf(rng);
    let (op, symbol) = COMPARISONS[rng.gen_range(0..COMPARISONS.len())];
    (Expression::binary(left, op, right), format!("{} {} {}", left_text, symbol, right_text))
}

/// A random OR-of-ANDs predicate and its source text. Without parentheses
/// in the grammar this shape is the only one text can express.
fn random_predicate(rng: &mut StdRng) -> (Expression, String) {
    let mut or_terms = Vec::new();
    for _ in 0..rng.gen_range(1..4) {
        let (mut expr, mut text) = random_comparison(rng);
        for _ in 0..rng.gen_range(0..3) {
            let (next, next_text) = random_comparison(rng);
            expr = Expression::binary(expr, Operator::And, next);
            text = format!("{} AND {}", text, next_text);
        }
        or_terms.push((expr, text));
    }

    let mut terms = or_terms.into_iter();
    let (mut expr, mut text) = terms.next().expect("at least one term");
    for (next, next_text) in terms {
        expr = Expression::binary(expr, Operator::Or, next);
        text = format!("{} OR {}", text, next_text);
    }
    (expr, text)
}

fn random_statement(rng: &mut StdRng) -> (SelectStatement, String) {
    let columns: Vec<String> = if rng.gen_bool(0.3) {
        vec!["*".to_string()]
    } else {
        (0..rng.gen_range(1..5))
            .map(|_| COLUMNS[rng.gen_range(0..COLUMNS.len())].to_string())
            .collect()
    };
    let mut text = format!("SELECT {} FROM data.csv", columns.join(", "));

    let where_clause = if rng.gen_bool(0.7) {
        let (expr, expr_text) = random_predicate(rng);
        text.push_str(&format!(" WHERE {}", expr_text));
        Some(expr)
    } else {
        None
    };

    let limit = if rng.gen_bool(0.5) {
        let limit = rng.gen_range(0..100);
        text.push_str(&format!(" LIMIT {}", limit));
        Some(limit)
    } else {
        None
    };

    let stmt = SelectStatement {
        columns,
        table: "data.csv".to_string(),
        where_clause,
        limit,
    };
    (stmt, text)
}

#[test]
fn test_generated_queries_round_trip() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..500 {
        let (expected, text) = random_statement(&mut rng);
        let parsed = parse(tokenize(&text)).map_err(|e| anyhow!("{}: {}", text, e))?;
        assert_eq!(parsed, expected, "round trip failed for {:?}", text);
    }
    Ok(())
}
