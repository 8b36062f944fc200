use anyhow::{bail, Context};
use clap::Parser;
use image_curator::{catalog, cli, config, logging, matcher, review, status, store};
use catalog::Catalog;
use cli::{Cli, Commands};
use config::Config;
use matcher::{probe, ImageMatcher, ImageRef};
use std::path::PathBuf;
use store::{PriorityAssignment, SelectionStore};

/// コマンドライン上書きを反映した設定と、そこから作る検索・保存
struct Workspace {
    config: Config,
    matcher: ImageMatcher,
    store: SelectionStore,
}

impl Workspace {
    fn open(overrides: Overrides) -> anyhow::Result<Self> {
        let config = Config::load()
            .context("設定の読み込みに失敗")?
            .with_overrides(overrides.catalog, overrides.inputs, overrides.output);
        config.validate()?;

        Ok(Self {
            matcher: ImageMatcher::new(config.input_dirs.clone()),
            store: SelectionStore::new(config.output_dir.clone()),
            config,
        })
    }

    fn load_catalog(&self) -> anyhow::Result<Catalog> {
        Ok(Catalog::load(&self.config.catalog_path)?)
    }
}

struct Overrides {
    catalog: Option<PathBuf>,
    inputs: Vec<PathBuf>,
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let Cli { command, verbose, catalog, inputs, output } = Cli::parse();
    logging::init_logging(verbose);
    let overrides = Overrides { catalog, inputs, output };

    match command {
        Commands::Review { start } => {
            println!("🖼  image-curator - 画像選別\n");
            let ws = Workspace::open(overrides)?;
            let catalog = ws.load_catalog()?;
            println!("✔ {}行を読み込みました\n", catalog.len());

            let mut session = review::ReviewSession::new(&catalog, ws.matcher, ws.store, start)?;
            review::prompt::run_review(&mut session, ws.config.max_priority, ws.config.gallery_columns)?;
        }

        Commands::Rows { limit } => {
            let ws = Workspace::open(overrides)?;
            let catalog = ws.load_catalog()?;
            let limit = limit.unwrap_or(catalog.len());
            for (i, row) in catalog.rows().iter().enumerate().take(limit) {
                println!("{:>5}  {}  {}  {}", i, row.identifier, row.secondary_code, row.title);
            }
            println!("\n全{}行", catalog.len());
        }

        Commands::Find { row } => {
            let ws = Workspace::open(overrides)?;
            let catalog = ws.load_catalog()?;
            let row = catalog.get(row)?;
            println!("📦 {} (AMP: {} | Supplier code: {})", row.title, row.identifier, row.secondary_code);

            let images = ws.matcher.find(&row.identifier, &row.secondary_code)?;
            if images.is_empty() {
                println!("❌ この商品の画像が見つかりません");
            }
            for image in &images {
                match probe(image) {
                    Ok(dim) => println!("  {} ({})", image.path.display(), dim),
                    Err(e) => println!("  ⚠ {}", e),
                }
            }
        }

        Commands::Save { identifier, picks } => {
            let ws = Workspace::open(overrides)?;
            for (path, _) in &picks {
                if !path.is_file() {
                    bail!("画像ファイルが見つかりません: {}", path.display());
                }
            }

            let assignment: PriorityAssignment = picks
                .iter()
                .map(|(path, priority)| (ImageRef::from_path(path), *priority))
                .collect();

            let count = ws.store.save(&identifier, &assignment)?;
            if count == 0 {
                println!("⚠ 画像が選択されていません（{} の保存済みは削除しました）", identifier);
            } else {
                println!("✔ {} に {}枚を保存しました", identifier, count);
            }
        }

        Commands::List { identifier } => {
            let ws = Workspace::open(overrides)?;
            let persisted = ws.store.list_existing(&identifier)?;
            if persisted.is_empty() {
                println!("{} の保存済み画像はありません", identifier);
            }
            for p in &persisted {
                println!("{:>3}  {}", p.rank, p.image.path.display());
            }
        }

        Commands::Clear { identifier } => {
            let ws = Workspace::open(overrides)?;
            let removed = ws.store.clear(&identifier)?;
            println!("✔ {} の保存済み画像を{}件削除しました", identifier, removed);
        }

        Commands::Status { show_pending } => {
            let ws = Workspace::open(overrides)?;
            let catalog = ws.load_catalog()?;
            let bar = status::progress_bar(catalog.len());
            let report = status::summarize(&catalog, &ws.store, &bar)?;

            println!("保存状況:");
            println!("  保存済みの行: {}/{}", report.saved_rows(), catalog.len());
            println!("  保存済み画像: {}枚", report.total_images());

            if show_pending {
                println!("未保存:");
                for row in report.pending() {
                    println!("{:>5}  {}", row.index, row.identifier);
                }
            }
        }

        Commands::Config { show, set_catalog, set_output, add_input, clear_inputs, set_max_priority } => {
            let mut config = Config::load().context("設定の読み込みに失敗")?;
            let changed = set_catalog.is_some()
                || set_output.is_some()
                || set_max_priority.is_some()
                || clear_inputs
                || !add_input.is_empty();

            if let Some(path) = set_catalog {
                config.catalog_path = path;
            }
            if let Some(path) = set_output {
                config.output_dir = path;
            }
            if let Some(max) = set_max_priority {
                config.max_priority = max;
            }
            if clear_inputs {
                config.input_dirs.clear();
            }
            config.input_dirs.extend(add_input);

            if changed {
                config.validate()?;
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !changed {
                println!("設定:");
                println!("  カタログ: {}", config.catalog_path.display());
                for dir in &config.input_dirs {
                    println!("  入力フォルダ: {}", dir.display());
                }
                println!("  出力フォルダ: {}", config.output_dir.display());
                println!("  優先度上限: {}", config.max_priority);
                println!("  表示列数: {}", config.gallery_columns);
            }
        }
    }

    Ok(())
}
