//! カタログ読み込みのテスト

use image_curator::catalog::Catalog;
use image_curator::error::CuratorError;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

/// CSVから行を読み込む
#[test]
fn test_load_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(
        &path,
        "amp,supplier_product_code,title,price\n\
         A100,SUP1_red,\"Mug, red\",10\n\
         A200,SUP2,Bowl,12\n\
         A300,SUP3_x_y,Plate,8\n",
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.source(), path.as_path());

    let row = catalog.get(0).unwrap();
    assert_eq!(row.identifier, "A100");
    assert_eq!(row.secondary_code, "SUP1");
    assert_eq!(row.title, "Mug, red");
    assert_eq!(catalog.get(2).unwrap().secondary_code, "SUP3");
}

/// 引用符内に改行を含むタイトル
#[test]
fn test_load_csv_multiline_title() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(
        &path,
        "amp,supplier_product_code,title\nA1,S1,\"Mug\nlarge\"\nA2,S2,Bowl\n",
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0).unwrap().title, "Mug\nlarge");
    assert_eq!(catalog.get(1).unwrap().identifier, "A2");
}

/// ファイルが無い
#[test]
fn test_load_missing_file() {
    let err = Catalog::load(Path::new("/nonexistent/catalog/data.csv")).unwrap_err();
    assert!(matches!(err, CuratorError::CatalogNotFound(_)));
    assert!(err.is_configuration());
}

/// ヘッダーのみ、または空ファイル
#[test]
fn test_load_empty_catalog() {
    let dir = tempdir().expect("Failed to create temp dir");

    let header_only = dir.path().join("header.csv");
    std::fs::write(&header_only, "amp,supplier_product_code,title\n").unwrap();
    assert!(matches!(
        Catalog::load(&header_only),
        Err(CuratorError::EmptyCatalog(_))
    ));

    let blank = dir.path().join("blank.csv");
    std::fs::write(&blank, "").unwrap();
    assert!(matches!(Catalog::load(&blank), Err(CuratorError::EmptyCatalog(_))));
}

/// 必須列が無い
#[test]
fn test_load_missing_column() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "amp,title\nA1,x\n").unwrap();

    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, CuratorError::InvalidCatalog(_)));
    assert!(err.to_string().contains("supplier_product_code"));
}

/// Excelから読み込む（数値セルの識別子は整数表記）
#[test]
fn test_load_xlsx() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("data.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "amp").unwrap();
    sheet.write_string(0, 1, "supplier_product_code").unwrap();
    sheet.write_string(0, 2, "title").unwrap();
    sheet.write_number(1, 0, 100).unwrap();
    sheet.write_string(1, 1, "S1_a").unwrap();
    sheet.write_string(1, 2, "Lamp").unwrap();
    sheet.write_string(2, 0, "B7").unwrap();
    sheet.write_string(2, 1, "S2").unwrap();
    sheet.write_string(2, 2, "Chair").unwrap();
    workbook.save(&path).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0).unwrap().identifier, "100");
    assert_eq!(catalog.get(0).unwrap().secondary_code, "S1");
    assert_eq!(catalog.find_by_identifier("B7").map(|(i, _)| i), Some(1));
}
