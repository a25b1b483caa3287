// Semantic Validation Integration Tests
//
// Checks statements against the header of real CSV files on disk.

use anyhow::Result;

use csvql::config::EngineConfig;
use csvql::query::executor::result::QueryError;
use csvql::query::parser::parse_sql;
use csvql::query::semantic::SemanticAnalyzer;

#[path = "../common/mod.rs"]
mod common;
use common::{engine_for, student_dir, write_csv, STUDENT_HEADERS};

#[test]
fn test_valid_student_queries() -> Result<()> {
    let dir = student_dir()?;
    let analyzer = SemanticAnalyzer::new(&EngineConfig::with_data_dir(dir.path()));

    for sql in [
        "SELECT * FROM data.csv",
        "SELECT nama, mata_kuliah FROM data.csv WHERE nilai_huruf = \"A\"",
        "SELECT * FROM data.csv WHERE nilai_angka >= 3.0 AND semester = 5",
        "SELECT nama FROM data.csv LIMIT 5",
    ] {
        let result = analyzer.analyze(&parse_sql(sql)?);
        assert!(result.valid, "{} should be valid: {:?}", sql, result.errors);
        assert!(result.warnings.is_empty());
    }
    Ok(())
}

#[test]
fn test_unknown_column_lists_available_columns() -> Result<()> {
    let dir = student_dir()?;
    let analyzer = SemanticAnalyzer::new(&EngineConfig::with_data_dir(dir.path()));

    let result = analyzer.analyze(&parse_sql("SELECT ipk FROM data.csv")?);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);

    let message = &result.errors[0];
    assert!(message.contains("'ipk'"));
    let mut available = STUDENT_HEADERS.to_vec();
    available.sort();
    assert!(message.ends_with(&format!("(available columns: {})", available.join(", "))));
    Ok(())
}

#[test]
fn test_unknown_column_is_never_executed() -> Result<()> {
    let dir = student_dir()?;
    let engine = engine_for(dir.path());

    match engine.execute_query("SELECT ipk FROM data.csv") {
        Err(QueryError::Semantic(result)) => {
            assert!(!result.valid);
            assert_eq!(result.errors.len(), 1);
        }
        other => panic!("expected a semantic error, got {:?}", other.map(|o| o.result)),
    }
    Ok(())
}

#[test]
fn test_missing_file_is_a_single_error() -> Result<()> {
    let dir = student_dir()?;
    let analyzer = SemanticAnalyzer::new(&EngineConfig::with_data_dir(dir.path()));

    let result = analyzer.analyze(&parse_sql("SELECT * FROM missing.csv")?);
    assert!(!result.valid);
    assert_eq!(result.errors, vec!["file not found: 'missing.csv'"]);
    assert!(result.warnings.is_empty());

    // Column problems are not reported when there is no header to check against
    let result = analyzer.analyze(&parse_sql("SELECT ipk FROM missing.csv WHERE umur > 1 LIMIT 0")?);
    assert_eq!(result.errors.len(), 1);
    assert!(result.warnings.is_empty());
    Ok(())
}

#[test]
fn test_errors_accumulate() -> Result<()> {
    let dir = student_dir()?;
    let analyzer = SemanticAnalyzer::new(&EngineConfig::with_data_dir(dir.path()));

    let result = analyzer.analyze(&parse_sql("SELECT ipk, umur FROM data.csv WHERE kota = 'Bandung' AND sks > 2")?);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 3);
    assert!(result.errors[0].contains("'ipk'"));
    assert!(result.errors[1].contains("'umur'"));
    assert!(result.errors[2].contains("'kota'"));
    Ok(())
}

#[test]
fn test_warnings_do_not_block_execution() -> Result<()> {
    let dir = student_dir()?;
    let engine = engine_for(dir.path());

    let outcome = engine.execute_query("SELECT nama FROM data.csv LIMIT 0")?;
    assert!(outcome.semantic.valid);
    assert_eq!(outcome.semantic.warnings, vec!["LIMIT 0 will return zero rows"]);
    assert_eq!(outcome.result.row_count(), 0);
    assert_eq!(outcome.result.columns(), ["nama"]);
    Ok(())
}

#[test]
fn test_wide_select_warning() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let headers: Vec<String> = (1..=12).map(|i| format!("kolom_{}", i)).collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    write_csv(dir.path(), "lebar.csv", &header_refs, [vec!["x"; 12]])?;

    let config = EngineConfig::with_data_dir(dir.path());
    let analyzer = SemanticAnalyzer::new(&config);
    let result = analyzer.analyze(&parse_sql("SELECT * FROM lebar.csv")?);
    assert!(result.valid);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("12 columns"));

    // 8 student columns stay under the default threshold of 10
    let students = student_dir()?;
    let analyzer = SemanticAnalyzer::new(&EngineConfig::with_data_dir(students.path()));
    assert!(analyzer.analyze(&parse_sql("SELECT * FROM data.csv")?).warnings.is_empty());

    // The threshold is configurable
    let strict = SemanticAnalyzer::new(&EngineConfig {
        wide_select_threshold: 5,
        ..EngineConfig::with_data_dir(students.path())
    });
    assert_eq!(strict.analyze(&parse_sql("SELECT * FROM data.csv")?).warnings.len(), 1);
    Ok(())
}

#[test]
fn test_header_only_and_empty_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("kosong.csv"), "")?;
    std::fs::write(dir.path().join("header.csv"), "nama,nim\n")?;
    let analyzer = SemanticAnalyzer::new(&EngineConfig::with_data_dir(dir.path()));

    let result = analyzer.analyze(&parse_sql("SELECT nama FROM kosong.csv")?);
    assert!(!result.valid);
    assert_eq!(result.errors.len(), 1);

    let result = analyzer.analyze(&parse_sql("SELECT nama FROM header.csv")?);
    assert!(result.valid);
    Ok(())
}
