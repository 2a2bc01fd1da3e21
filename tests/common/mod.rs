#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const GROCERIES_ID: &str = "6f1c2d3e-0000-4000-8000-000000000001";
pub const TRANSPORT_ID: &str = "6f1c2d3e-0000-4000-8000-000000000002";
pub const LEISURE_ID: &str = "6f1c2d3e-0000-4000-8000-000000000003";

/// Groceries end up over budget, transport near its limit and leisure is paused.
pub const SAMPLE_SNAPSHOT: &str = r#"{
  "budgets": [
    {
      "id": "6f1c2d3e-0000-4000-8000-000000000001",
      "categoryId": 1,
      "limitAmount": "50000",
      "periodType": "monthly",
      "startDate": "2024-03-10"
    },
    {
      "id": "6f1c2d3e-0000-4000-8000-000000000002",
      "categoryId": 2,
      "limitAmount": 20000,
      "periodType": "weekly",
      "startDate": "2024-03-04"
    },
    {
      "id": "6f1c2d3e-0000-4000-8000-000000000003",
      "categoryId": 5,
      "limitAmount": 10000,
      "periodType": "biweekly",
      "startDate": "2024-03-04",
      "active": false
    }
  ],
  "expenses": [
    { "amount": 30000, "date": "2024-02-28", "category": 1, "description": "Feria" },
    { "amount": 42000, "date": "2024-03-14", "category": 1, "description": "Supermercado" },
    { "amount": 30000, "date": "2024-03-19", "category": 1, "description": "Carnicería" },
    { "amount": "15000.50", "date": "2024-03-18", "category": 2, "description": "Gasolina" },
    { "amount": 4000, "date": "2024-03-17", "category": 2, "description": "Bus" },
    { "amount": 15000, "date": "2024-03-19", "category": 5, "description": "Cine" }
  ]
}"#;

/// Creates a unique directory that outlives the calling test.
pub fn temp_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn write_snapshot(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("budgets.json");
    fs::write(&path, contents).expect("write snapshot");
    path
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}
