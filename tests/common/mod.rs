#![allow(dead_code)]

use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;

use csvql::config::EngineConfig;
use csvql::query::executor::engine::ExecutionEngine;

pub const STUDENT_HEADERS: [&str; 8] = [
    "nama",
    "nim",
    "mata_kuliah",
    "sks",
    "nilai_angka",
    "nilai_huruf",
    "semester",
    "status",
];

// Column positions in STUDENTS
pub const NAMA: usize = 0;
pub const NILAI_ANGKA: usize = 4;
pub const NILAI_HURUF: usize = 5;
pub const SEMESTER: usize = 6;
pub const STATUS: usize = 7;

pub static STUDENTS: [[&str; 8]; 22] = [
    ["Andi Pratama", "2201001", "Basis Data", "3", "4.0", "A", "5", "Lulus"],
    ["Budi Santoso", "2201002", "Basis Data", "3", "3.7", "A-", "5", "Lulus"],
    ["Citra Lestari", "2201003", "Teknik Kompilasi", "3", "3.3", "B+", "5", "Lulus"],
    ["Dewi Anggraini", "2201004", "Teknik Kompilasi", "3", "2.7", "B-", "5", "Lulus"],
    ["Eko Saputra", "2201005", "Jaringan Komputer", "2", "2.0", "C", "3", "Lulus"],
    ["Fajar Nugroho", "2201006", "Jaringan Komputer", "2", "1.0", "D", "3", "Tidak Lulus"],
    ["Gita Permata", "2201007", "Basis Data", "3", "4.0", "A", "3", "Lulus"],
    ["Hadi Wijaya", "2201008", "Teknik Kompilasi", "3", "3.0", "B", "5", "Lulus"],
    ["Indah Sari", "2201009", "Kecerdasan Buatan", "3", "3.7", "A-", "5", "Lulus"],
    ["Joko Susilo", "2201010", "Kecerdasan Buatan", "3", "0.0", "E", "5", "Tidak Lulus"],
    ["Kartika Putri", "2201011", "Basis Data", "3", "3.3", "B+", "3", "Lulus"],
    ["Lukman Hakim", "2201012", "Sistem Operasi", "3", "2.3", "C+", "3", "Lulus"],
    ["Maya Sari", "2201013", "Sistem Operasi", "3", "4.0", "A", "5", "Lulus"],
    ["Nanda Putra", "2201014", "Teknik Kompilasi", "3", "4.0", "A", "5", "Lulus"],
    ["Oki Setiawan", "2201015", "Jaringan Komputer", "2", "2.7", "B-", "3", "Lulus"],
    ["Putri Ayu", "2201016", "Kecerdasan Buatan", "3", "3.0", "B", "5", "Lulus"],
    ["Rina Marlina", "2201017", "Sistem Operasi", "3", "1.0", "D", "5", "Tidak Lulus"],
    ["Siti Aminah, S.Kom", "2201018", "Basis Data", "3", "3.7", "A-", "1", "Lulus"],
    ["Taufik Hidayat", "2201019", "Teknik Kompilasi", "3", "2.0", "C", "1", "Lulus"],
    ["Umi Kalsum", "2201020", "Kecerdasan Buatan", "3", "4.0", "A", "1", "Lulus"],
    ["Vina Oktaviani", "2201021", "Sistem Operasi", "3", "3.3", "B+", "5", "Lulus"],
    ["Wahyu Ramadhan", "2201022", "Jaringan Komputer", "2", "3.0", "B", "3", "Lulus"],
];

/// Write a CSV file with a header row into `dir`
pub fn write_csv<R, S>(dir: &Path, name: &str, headers: &[&str], rows: R) -> Result<()>
where
    R: IntoIterator,
    R::Item: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_path(dir.join(name))?;
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Temporary directory holding the student grades table as `data.csv`
pub fn student_dir() -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    write_csv(dir.path(), "data.csv", &STUDENT_HEADERS, STUDENTS.iter())?;
    Ok(dir)
}

/// Engine reading tables from `dir`
pub fn engine_for(dir: &Path) -> ExecutionEngine {
    ExecutionEngine::new(EngineConfig::with_data_dir(dir))
}

/// Student rows matching a predicate, in file order
pub fn students_where(pred: impl Fn(&[&str; 8]) -> bool) -> Vec<&'static [&'static str; 8]> {
    STUDENTS.iter().filter(|row| pred(row)).collect()
}

pub fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
