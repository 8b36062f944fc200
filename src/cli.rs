use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curate")]
#[command(about = "商品カタログ画像の選別・優先順位付けツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// カタログファイル（設定を上書き）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// 入力フォルダ（複数指定可、設定を上書き）
    #[arg(long = "input", global = true)]
    pub inputs: Vec<PathBuf>,

    /// 出力フォルダ（設定を上書き）
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 行ごとに画像を確認して優先度を付ける
    Review {
        /// 開始行（0始まり）
        #[arg(short, long, default_value = "0")]
        start: usize,
    },

    /// カタログの行を一覧表示
    Rows {
        /// 表示する最大行数
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// 指定行の候補画像を表示
    Find {
        /// 行番号（0始まり）
        #[arg(required = true)]
        row: usize,
    },

    /// 優先度を指定して保存（対話なし）
    Save {
        /// 識別子（amp）
        #[arg(required = true)]
        identifier: String,

        /// 画像と優先度 PATH=PRIORITY（指定順が同順位の並び）
        #[arg(short, long = "pick", value_parser = parse_pick)]
        picks: Vec<(PathBuf, u32)>,
    },

    /// 保存済みの選択を順位順に表示
    List {
        /// 識別子（amp）
        #[arg(required = true)]
        identifier: String,
    },

    /// 保存済みの選択を削除
    Clear {
        /// 識別子（amp）
        #[arg(required = true)]
        identifier: String,
    },

    /// 全行の保存状況を集計
    Status {
        /// 未保存の行も一覧表示
        #[arg(long)]
        show_pending: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// カタログファイルを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 出力フォルダを設定
        #[arg(long)]
        set_output: Option<PathBuf>,

        /// 入力フォルダを追加
        #[arg(long)]
        add_input: Vec<PathBuf>,

        /// 入力フォルダを空にしてから追加
        #[arg(long)]
        clear_inputs: bool,

        /// 優先度の上限を設定
        #[arg(long)]
        set_max_priority: Option<u32>,
    },
}

/// `PATH=PRIORITY` を分解
pub fn parse_pick(s: &str) -> Result<(PathBuf, u32), String> {
    let (path, priority) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("PATH=PRIORITY の形式で指定してください: {}", s))?;

    if path.is_empty() {
        return Err(format!("パスが空です: {}", s));
    }

    let priority = priority
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("優先度は0以上の整数です: {}", priority))?;

    Ok((PathBuf::from(path), priority))
}
