//! 端末での対話レビュー

use super::{Action, Candidate, Outcome, ReviewSession, RowView};
use crate::error::{CuratorError, Result};
use crate::matcher::probe;
use crate::store::PriorityAssignment;
use dialoguer::Input;
use image_curator_common::Step;
use tracing::warn;

/// 入力コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Goto(usize),
    Save,
    Quit,
    Help,
}

/// 対話レビューを実行
pub fn run_review(session: &mut ReviewSession<'_>, max_priority: u32, columns: usize) -> Result<()> {
    println!("操作: [n]次 [p]前 [g 行番号]移動 [s]優先度を入力して保存 [q]終了");
    println!("---\n");

    loop {
        let view = recover(session.view())?;
        if let Some(view) = &view {
            render(view, columns);
        }

        // 端末入力の失敗は続行しようがないのでそのまま返す
        let action = match read_command()? {
            Command::Next => Action::Next,
            Command::Previous => Action::Previous,
            Command::Goto(index) => Action::Goto(index),
            Command::Quit => Action::Quit,
            Command::Help => {
                println!("  n:次の行 p:前の行 g 12 または 12:行へ移動 s:保存 q:終了\n");
                continue;
            }
            Command::Save => match &view {
                Some(view) if !view.candidates.is_empty() => {
                    Action::Save(prompt_priorities(&view.candidates, max_priority)?)
                }
                _ => {
                    println!("  → 優先度を付けられる画像がありません\n");
                    continue;
                }
            },
        };

        let outcome = match recover(session.apply(action))? {
            Some(outcome) => outcome,
            None => continue,
        };

        match outcome {
            Outcome::Navigated(Step::Moved(index)) => println!("  → 行 {}\n", index),
            Outcome::Navigated(Step::AtStart) => println!("  → 最初の行です\n"),
            Outcome::Navigated(Step::AtEnd) => println!("  → 最後の行です\n"),
            Outcome::Saved { identifier, count, step } => {
                if count == 0 {
                    println!("⚠ 画像が選択されていません（{} の保存済みは削除しました）", identifier);
                } else {
                    println!("✔ {} に {}枚を保存しました", identifier, count);
                }
                if step == Step::AtEnd {
                    println!("🎉 すべての行を確認しました");
                }
                println!();
            }
            Outcome::Quit => {
                println!("終了します");
                return Ok(());
            }
        }
    }
}

/// 設定系のエラーだけを返し、それ以外は表示してレビューを続ける
pub fn recover<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_configuration() => Err(e),
        Err(e) => {
            warn!(error = %e, "review step failed, continuing");
            println!("⚠ {}\n", e);
            Ok(None)
        }
    }
}

/// 行番号（0始まり）と進捗
pub fn header_line(view: &RowView) -> String {
    format!(
        "[行 {} | {}/{}] 📦 {}",
        view.index,
        view.index + 1,
        view.row_count,
        view.row.title
    )
}

/// 現在行を表示
pub fn render(view: &RowView, columns: usize) {
    println!("{}", header_line(view));
    println!(
        "  AMP: {} | Supplier code: {}",
        view.row.identifier, view.row.secondary_code
    );

    if view.has_no_images() {
        println!("  ❌ この商品の画像が見つかりません");
    } else {
        let cells: Vec<String> = view
            .candidates
            .iter()
            .enumerate()
            .map(|(i, c)| format!("[{}] {} ({})", i + 1, c.image.file_name, c.dimensions))
            .collect();
        print_grid(&cells, columns);

        for (image, reason) in &view.unreadable {
            println!("  ⚠ 読み込めない画像 {}: {}", image.file_name, reason);
        }
    }

    if !view.persisted.is_empty() {
        println!("  📸 保存済み:");
        let cells: Vec<String> = view
            .persisted
            .iter()
            .map(|p| match probe(&p.image) {
                Ok(dim) => format!("{} ({})", p.image.file_name, dim),
                Err(_) => format!("{} (読込不可)", p.image.file_name),
            })
            .collect();
        print_grid(&cells, columns);
    }
    println!();
}

fn print_grid(cells: &[String], columns: usize) {
    for chunk in cells.chunks(columns.max(1)) {
        println!("    {}", chunk.join("   "));
    }
}

fn read_command() -> Result<Command> {
    let input: String = Input::new()
        .with_prompt("操作")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| CuratorError::Prompt(e.to_string()))?;

    Ok(parse_command(&input))
}

/// 入力文字列をコマンドに変換（解釈できなければヘルプ）
pub fn parse_command(input: &str) -> Command {
    let mut parts = input.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (head, arg) {
        ("n" | "next", None) => Command::Next,
        ("p" | "prev", None) => Command::Previous,
        ("s" | "save", None) => Command::Save,
        ("q" | "quit", None) => Command::Quit,
        ("g" | "go", Some(n)) => n.parse().map(Command::Goto).unwrap_or(Command::Help),
        (n, None) => n.parse().map(Command::Goto).unwrap_or(Command::Help),
        _ => Command::Help,
    }
}

/// 候補ごとに優先度を入力させる（0は未選択）
fn prompt_priorities(candidates: &[Candidate], max_priority: u32) -> Result<PriorityAssignment> {
    let mut assignment = PriorityAssignment::new();

    for (i, candidate) in candidates.iter().enumerate() {
        let priority: u32 = Input::new()
            .with_prompt(format!("  [{}] {} の優先度 (0-{})", i + 1, candidate.image.file_name, max_priority))
            .default(0)
            .validate_with(|v: &u32| -> std::result::Result<(), String> {
                if *v <= max_priority {
                    Ok(())
                } else {
                    Err(format!("0から{}で入力してください", max_priority))
                }
            })
            .interact_text()
            .map_err(|e| CuratorError::Prompt(e.to_string()))?;

        assignment.set(candidate.image.clone(), priority);
    }

    Ok(assignment)
}
