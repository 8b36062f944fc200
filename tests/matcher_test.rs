//! 候補画像検索のテスト

use image_curator::error::CuratorError;
use image_curator::matcher::{probe, ImageMatcher};
use tempfile::tempdir;

fn names(images: &[image_curator::matcher::ImageRef]) -> Vec<String> {
    let mut names: Vec<String> = images.iter().map(|i| i.file_name.clone()).collect();
    names.sort();
    names
}

/// 一致なしは空のVec
#[test]
fn test_find_no_match_is_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("B200_1.jpg"), b"x").unwrap();

    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf()]);
    let result = matcher.find("A100", "SUP9").unwrap();
    assert!(result.is_empty());
}

/// 識別子・仕入先コードどちらの接頭辞でも一致、大文字小文字無視
#[test]
fn test_find_by_identifier_or_secondary_code() {
    let dir = tempdir().expect("Failed to create temp dir");
    for name in [
        "A100_1.jpg",
        "a100_2.PNG",
        "SUP9-front.jpeg",
        "sup9_back.JPG",
        "A100_notes.txt",
        "A100_anim.gif",
        "X_A100.jpg",
    ] {
        std::fs::write(dir.path().join(name), b"x").unwrap();
    }

    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf()]);
    let result = matcher.find("A100", "SUP9").unwrap();
    assert_eq!(
        names(&result),
        vec!["A100_1.jpg", "SUP9-front.jpeg", "a100_2.PNG", "sup9_back.JPG"]
    );
}

/// フォルダは設定順に走査される
#[test]
fn test_find_directory_order() {
    let first = tempdir().expect("Failed to create temp dir");
    let second = tempdir().expect("Failed to create temp dir");
    std::fs::write(second.path().join("A1_z.jpg"), b"x").unwrap();
    std::fs::write(first.path().join("A1_a.jpg"), b"x").unwrap();
    std::fs::write(first.path().join("A1_b.jpg"), b"x").unwrap();

    let matcher = ImageMatcher::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);
    let result = matcher.find("A1", "").unwrap();

    assert_eq!(result.len(), 3);
    assert!(result[..2].iter().all(|i| i.path.starts_with(first.path())));
    assert!(result[2].path.starts_with(second.path()));
}

/// サブフォルダは走査しない
#[test]
fn test_find_ignores_subdirectories() {
    let dir = tempdir().expect("Failed to create temp dir");
    let nested = dir.path().join("A100_dir.jpg");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("A100_inner.jpg"), b"x").unwrap();

    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf()]);
    assert!(matcher.find("A100", "").unwrap().is_empty());
}

/// 空の仕入先コードは全ファイルに一致しない
#[test]
fn test_find_empty_secondary_code() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("other.jpg"), b"x").unwrap();
    std::fs::write(dir.path().join("A7.jpg"), b"x").unwrap();

    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf()]);
    assert_eq!(names(&matcher.find("A7", "").unwrap()), vec!["A7.jpg"]);
}

/// 接頭辞一致なので短い識別子は長い識別子の画像にも一致する
#[test]
fn test_find_prefix_overlap() {
    let dir = tempdir().expect("Failed to create temp dir");
    std::fs::write(dir.path().join("A1_1.jpg"), b"x").unwrap();
    std::fs::write(dir.path().join("A10_1.jpg"), b"x").unwrap();

    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf()]);
    assert_eq!(matcher.find("A1", "").unwrap().len(), 2);
    assert_eq!(matcher.find("A10", "").unwrap().len(), 1);
}

/// 入力フォルダが無ければエラー
#[test]
fn test_find_missing_directory() {
    let dir = tempdir().expect("Failed to create temp dir");
    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf(), dir.path().join("gone")]);

    let err = matcher.find("A100", "").unwrap_err();
    assert!(matches!(err, CuratorError::DirectoryNotFound(_)));
    assert!(err.is_configuration());
    assert!(matcher.check_directories().is_err());
}

/// 画像の寸法読み取り、壊れた画像はエラー
#[test]
fn test_probe() {
    let dir = tempdir().expect("Failed to create temp dir");
    let good = dir.path().join("A1_ok.png");
    let bad = dir.path().join("A1_bad.jpg");
    image::RgbImage::new(4, 3).save(&good).unwrap();
    std::fs::write(&bad, b"not really a jpeg").unwrap();

    let matcher = ImageMatcher::new(vec![dir.path().to_path_buf()]);
    let found = matcher.find("A1", "").unwrap();
    assert_eq!(found.len(), 2);

    for image in &found {
        let result = probe(image);
        if image.path == good {
            let dim = result.unwrap();
            assert_eq!((dim.width, dim.height), (4, 3));
            assert_eq!(dim.to_string(), "4x3");
        } else {
            assert!(matches!(result, Err(CuratorError::ImageRead { .. })));
        }
    }
}

/// 読めない入力フォルダは警告を出して一致なし扱い
#[cfg(unix)]
#[test]
fn test_find_unreadable_directory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().expect("Failed to create temp dir");
    let locked = dir.path().join("locked");
    std::fs::create_dir(&locked).unwrap();
    std::fs::write(locked.join("A1_1.jpg"), b"x").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o000)).unwrap();

    // root等で読めてしまう環境では確認できない
    let readable = std::fs::read_dir(&locked).is_ok();
    let matcher = ImageMatcher::new(vec![locked.clone()]);
    let result = matcher.find("A1", "");

    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
    if readable {
        return;
    }
    assert!(result.unwrap().is_empty());
}
