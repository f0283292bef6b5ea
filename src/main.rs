use clap::Parser;
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use pallet_ai_rust::{cli, config, detector, error, ledger, manifest, photo, reader, scanner, workflow};

use cli::{Cli, Commands};
use config::Config;
use detector::{cache, DetectCache, PalletDetector, RoboflowDetector};
use error::{PalletAiError, Result};
use ledger::{ExcelLedger, ImageStore, LocalImageStore, RecordSink, SheetWebhook, WebhookImageStore, NO_IMAGE};
use manifest::{AddOutcome, ExtractPolicy};
use reader::{CodeReader, ZbarReader};
use std::path::{Path, PathBuf};
use workflow::CountSession;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Count {
            pallet,
            document,
            manifest,
            policy,
            yes,
            dry_run,
            ledger,
        } => {
            println!("📦 pallet-ai - 搬出記録\n");
            run_count(
                &config,
                &pallet,
                document.as_deref(),
                &manifest,
                policy,
                yes,
                dry_run,
                ledger.as_deref(),
                cli.verbose,
            )?;
        }

        Commands::Detect { target, use_cache } => {
            println!("📦 pallet-ai - パレット検出\n");

            let detector = build_detector(&config)?;
            if target.is_file() {
                let bytes = photo::load_jpeg_bytes(&target)?;
                let result = detector.detect(&bytes)?;
                println!("🎯 検出: {}台", result.count);
            } else {
                run_detect_folder(&target, use_cache, &detector)?;
            }
        }

        Commands::Decode { document, policy } => {
            println!("📦 pallet-ai - バーコード読取\n");
            run_decode(&document, policy)?;
        }

        Commands::Config {
            set_api_key,
            set_detector_url,
            set_sheet_url,
            set_upload_url,
            set_ledger,
            show,
        } => {
            let mut config = config;
            let mut changed = false;

            if let Some(key) = set_api_key {
                config.api_key = Some(key);
                changed = true;
            }
            if let Some(url) = set_detector_url {
                config.detector_url = url;
                changed = true;
            }
            if let Some(url) = set_sheet_url {
                config.sheet_url = Some(url);
                changed = true;
            }
            if let Some(url) = set_upload_url {
                config.upload_url = Some(url);
                changed = true;
            }
            if let Some(path) = set_ledger {
                config.ledger_path = Some(path);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  検出API: {}", config.detector_url);
                println!(
                    "  APIキー: {}",
                    if config.api_key.is_some() { "設定済み" } else { "未設定" }
                );
                println!(
                    "  シートWebhook: {}",
                    config.sheet_url.as_deref().unwrap_or("未設定")
                );
                println!(
                    "  アップロードWebhook: {}",
                    config.upload_url.as_deref().unwrap_or("未設定")
                );
                match &config.ledger_path {
                    Some(path) => println!("  Excel台帳: {}", path.display()),
                    None => println!("  Excel台帳: 未設定"),
                }
                println!("  タイムアウト: {}秒", config.timeout_seconds);
            }
        }

        Commands::Cache { clear, folder, info } => {
            let target = folder.unwrap_or_else(|| PathBuf::from("."));
            let cache_path = DetectCache::cache_path(&target);

            if info || !clear {
                if cache_path.exists() {
                    let cache = DetectCache::load(&target);
                    println!("キャッシュ情報:");
                    println!("  パス: {}", cache_path.display());
                    println!("  件数: {}", cache.len());
                    if let Ok(meta) = std::fs::metadata(&cache_path) {
                        println!("  サイズ: {} bytes", meta.len());
                    }
                } else {
                    println!("キャッシュファイルが存在しません: {}", cache_path.display());
                }
            }

            if clear {
                match DetectCache::clear(&target) {
                    Ok(true) => println!("✔ キャッシュを削除しました: {}", cache_path.display()),
                    Ok(false) => println!("キャッシュファイルが存在しません"),
                    Err(e) => println!("キャッシュ削除エラー: {}", e),
                }
            }
        }
    }

    Ok(())
}

fn build_detector(config: &Config) -> Result<RoboflowDetector> {
    let api_key = config.get_api_key()?;
    RoboflowDetector::new(config.detector_url.clone(), api_key, config.timeout())
}

/// 記録先の選択: --ledger > 設定のExcel台帳 > シートWebhook
fn build_sink(config: &Config, ledger_arg: Option<&Path>) -> Result<Box<dyn RecordSink>> {
    if let Some(path) = ledger_arg {
        return Ok(Box::new(ExcelLedger::new(path)));
    }
    if let Some(path) = &config.ledger_path {
        return Ok(Box::new(ExcelLedger::new(path.clone())));
    }
    if let Some(url) = &config.sheet_url {
        return Ok(Box::new(SheetWebhook::new(url.clone(), config.timeout())?));
    }
    Err(PalletAiError::Config(
        "記録先が設定されていません。--ledger か `pallet-ai config --set-sheet-url` を設定してください".into(),
    ))
}

fn build_store(config: &Config) -> Result<Box<dyn ImageStore>> {
    if let Some(url) = &config.upload_url {
        return Ok(Box::new(WebhookImageStore::new(url.clone(), config.timeout())?));
    }
    Ok(Box::new(LocalImageStore::new(config.photo_dir.clone())))
}

fn report_add(outcome: &AddOutcome) {
    match outcome {
        AddOutcome::Added(token) => println!("  → 追加: {}", token),
        AddOutcome::Rejected(reason) => println!("  ⚠ {}", reason),
    }
}

fn prompt_error(e: impl std::fmt::Display) -> PalletAiError {
    PalletAiError::Workflow(format!("入力エラー: {}", e))
}

fn run_count(
    config: &Config,
    pallet: &Path,
    document: Option<&Path>,
    manifest_args: &[String],
    policy: ExtractPolicy,
    yes: bool,
    dry_run: bool,
    ledger_arg: Option<&Path>,
    verbose: bool,
) -> Result<()> {
    let mut session = CountSession::new(policy);

    // ステップ1: 管理票の特定
    println!("📄 ステップ1: 管理票の特定 (ポリシー: {})", policy);

    let document_bytes = match document {
        Some(path) => {
            match ZbarReader::new().decode(path) {
                Ok(texts) if texts.is_empty() => {
                    println!("  バーコードは読み取れませんでした");
                }
                Ok(texts) => {
                    for text in &texts {
                        if verbose {
                            println!("  読取: {}", text);
                        }
                        report_add(&session.add_manifest_text(text));
                    }
                }
                // 読取機の不調は手入力で続行できる
                Err(e) => println!("  ⚠ {}", e),
            }
            Some(photo::load_jpeg_bytes(path)?)
        }
        None => None,
    };

    for text in manifest_args {
        report_add(&session.add_manifest_text(text));
    }

    if yes {
        session.advance()?;
    } else {
        loop {
            let input: String = Input::<String>::new()
                .with_prompt("管理票番号 (空Enterで次へ)")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_error)?;

            let trimmed = input.trim();
            if trimmed.is_empty() {
                match session.advance() {
                    Ok(()) => break,
                    Err(e) => println!("⚠ {}", e),
                }
                continue;
            }
            report_add(&session.add_manifest_text(trimmed));
        }
    }

    let registered: Vec<String> = session
        .manifests()
        .iter()
        .map(|t| t.to_string())
        .collect();
    println!("✔ 管理票番号: {}\n", registered.join(", "));

    // ステップ2: パレットの計数
    println!("📦 ステップ2: パレットの計数");
    let pallet_bytes = photo::load_jpeg_bytes(pallet)?;

    match build_detector(config).and_then(|d| d.detect(&pallet_bytes)) {
        Ok(result) => {
            session.record_detection(result.count);
            println!("🎯 検出: {}台", result.count);
        }
        // 検出に失敗しても手入力の台数で記録できる
        Err(e) => println!("⚠ 検出できませんでした: {}", e),
    }

    if !yes {
        let count: i64 = Input::<i64>::new()
            .with_prompt("パレット台数を確認")
            .default(session.confirmed_count())
            .interact_text()
            .map_err(prompt_error)?;
        session.confirm_count(count);
    }

    if dry_run {
        let recorded_at = chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        let record = session.finish(recorded_at, NO_IMAGE.into(), NO_IMAGE.into())?;

        println!("\n--- dry-run: 保存せず終了 ---");
        for (header, value) in workflow::HEADERS.iter().zip(record.to_row()) {
            println!("  {}: {}", header, value);
        }
        return Ok(());
    }

    if !yes {
        let proceed = Confirm::new()
            .with_prompt("台帳へ保存しますか？")
            .default(true)
            .interact()
            .map_err(prompt_error)?;
        if !proceed {
            println!("中止しました（保存なし）");
            return Ok(());
        }
    }

    println!("💾 保存中...");
    let sink = build_sink(config, ledger_arg)?;
    let store = build_store(config)?;
    let record = workflow::submit(
        &session,
        document_bytes.as_deref(),
        &pallet_bytes,
        store.as_ref(),
        sink.as_ref(),
    )?;

    println!(
        "\n✅ 記録を保存しました: {} / 検出 {}台 → 確認 {}台",
        record.recorded_at, record.detected_count, record.confirmed_count
    );
    Ok(())
}

fn run_detect_folder(folder: &Path, use_cache: bool, detector: &RoboflowDetector) -> Result<()> {
    let photos = scanner::scan_folder(folder)?;
    if photos.is_empty() {
        return Err(PalletAiError::NoImagesFound(folder.display().to_string()));
    }
    println!("✔ {}枚の写真を対象に検出します\n", photos.len());

    let mut cache_file = if use_cache {
        DetectCache::load(folder)
    } else {
        DetectCache::default()
    };
    let (cached, uncached) = if use_cache {
        cache::partition_cached(&photos, &cache_file)
    } else {
        let all = photos
            .iter()
            .map(|p| (p.clone(), String::new()))
            .collect();
        (Vec::new(), all)
    };

    let mut total: i64 = 0;

    for (photo_info, count) in &cached {
        println!("  {} → {}台 (キャッシュ)", photo_info.file_name, count);
        total += *count as i64;
    }

    let bar = ProgressBar::new(uncached.len() as u64);
    for (photo_info, hash) in &uncached {
        let bytes = photo::load_jpeg_bytes(&photo_info.path)?;
        let result = detector.detect(&bytes)?;

        let date = photo_info.date.as_deref().unwrap_or("-");
        bar.println(format!(
            "  {} ({}) → {}台",
            photo_info.file_name, date, result.count
        ));
        bar.inc(1);

        total += result.count as i64;
        if use_cache && !hash.is_empty() {
            cache_file.insert(
                hash.clone(),
                photo_info.file_name.clone(),
                photo_info.file_size,
                result.count,
            );
        }
    }
    bar.finish_and_clear();

    if use_cache {
        cache_file.save(folder)?;
    }

    println!("\n✅ 合計 {}台", total);
    Ok(())
}

fn run_decode(document: &Path, policy: ExtractPolicy) -> Result<()> {
    let texts = ZbarReader::new().decode(document)?;

    if texts.is_empty() {
        println!("読取結果なし");
        return Ok(());
    }

    println!("✔ {}件の読取 (ポリシー: {})", texts.len(), policy);
    for text in &texts {
        match manifest::extract(text, policy) {
            Some(token) => println!("  {} → {}", text, token),
            None => println!("  {} → 番号なし", text),
        }
    }
    Ok(())
}
