//! 検出結果キャッシュ
//!
//! 画像のSHA-256ハッシュをキーに検出台数をキャッシュし、
//! フォルダ一括検出での同一画像の再送信をスキップする。

use crate::error::Result;
use crate::scanner::PhotoInfo;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".pallet-detect-cache.json";

/// キャッシュファイルの構造
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectCache {
    /// バージョン（互換性チェック用）
    version: u32,
    /// 画像ハッシュ → エントリのマップ
    entries: HashMap<String, CacheEntry>,
}

/// キャッシュエントリ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    /// 検出された台数
    pub count: u32,
}

impl DetectCache {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// キャッシュファイルを読み込み（壊れている・古い場合は空で開始）
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Self::default();
        }

        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        let reader = BufReader::new(file);
        match serde_json::from_reader::<_, DetectCache>(reader) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                eprintln!("キャッシュバージョン不一致、再生成します");
                Self::default()
            }
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// キャッシュファイルを削除。存在しなかった場合は `false`
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if !cache_path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(cache_path)?;
        Ok(true)
    }

    pub fn get(&self, hash: &str) -> Option<u32> {
        self.entries.get(hash).map(|e| e.count)
    }

    pub fn insert(&mut self, hash: String, file_name: String, file_size: u64, count: u32) {
        self.entries.insert(
            hash,
            CacheEntry {
                file_name,
                file_size,
                count,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DetectCache {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

/// 画像ファイルのSHA-256ハッシュを計算する
pub fn compute_file_hash(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let digest = Sha256::digest(&buffer);
    Ok(hex::encode(digest))
}

/// キャッシュ済みと未検出の画像に振り分ける
///
/// 戻り値: (キャッシュ済みの (画像, 台数), 未検出の (画像, ハッシュ))
/// ハッシュ計算に失敗した画像は未検出扱い（ハッシュ空文字）。
pub fn partition_cached(
    photos: &[PhotoInfo],
    cache: &DetectCache,
) -> (Vec<(PhotoInfo, u32)>, Vec<(PhotoInfo, String)>) {
    let mut cached = Vec::new();
    let mut uncached = Vec::new();

    for photo in photos {
        let hash = match compute_file_hash(&photo.path) {
            Ok(h) => h,
            Err(_) => {
                uncached.push((photo.clone(), String::new()));
                continue;
            }
        };

        match cache.get(&hash) {
            Some(count) => cached.push((photo.clone(), count)),
            None => uncached.push((photo.clone(), hash)),
        }
    }

    (cached, uncached)
}
