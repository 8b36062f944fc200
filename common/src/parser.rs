//! CSVパーサ
//!
//! カタログCSVをヘッダー付きの表として読み込む。
//! ダブルクォート内のカンマ・改行と `""` エスケープに対応。

use crate::error::{Error, Result};

/// ヘッダーとデータ行
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

impl CsvTable {
    /// ヘッダー名から列番号を引く（前後空白・大文字小文字は無視）
    pub fn column(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::MissingColumn(name.to_string()))
    }
}

/// CSV文字列を表に変換
pub fn parse_csv_str(content: &str) -> Result<CsvTable> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = parse_records(content)?.into_iter();

    let headers = match records.next() {
        Some(header) => header,
        None => return Ok(CsvTable::default()),
    };

    Ok(CsvTable {
        headers,
        records: records.collect(),
    })
}

/// 1レコードをフィールドに分割
pub fn parse_csv_line(line: &str) -> Result<Vec<String>> {
    Ok(parse_records(line)?
        .into_iter()
        .next()
        .unwrap_or_else(|| vec![String::new()]))
}

/// 全体を1文字ずつ読んでレコードに分ける
///
/// 引用符の中の改行はフィールドの一部。空行は読み飛ばす。
fn parse_records(content: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            ',' if !in_quotes => {
                record.push(std::mem::take(&mut field).trim().to_string());
            }
            '\n' if !in_quotes => {
                record.push(std::mem::take(&mut field).trim().to_string());
                push_record(&mut records, std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Parse(format!(
            "閉じていない引用符 (レコード {})",
            records.len() + 1
        )));
    }

    record.push(field.trim().to_string());
    push_record(&mut records, record);
    Ok(records)
}

fn push_record(records: &mut Vec<Vec<String>>, record: Vec<String>) {
    let blank = record.len() == 1 && record[0].is_empty();
    if !blank {
        records.push(record);
    }
}
