use crate::manifest::ExtractPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pallet-ai")]
#[command(about = "パレット計数AI・搬出記録台帳ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 1件分の搬出を記録（管理票特定→計数→保存の2ステップ）
    Count {
        /// パレット写真のパス
        #[arg(required = true)]
        pallet: PathBuf,

        /// 管理票写真のパス（バーコード読取と保管に使用）
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// 管理票番号のテキスト（複数指定可）
        #[arg(short, long)]
        manifest: Vec<String>,

        /// 番号の抽出ポリシー (first-digits/prefixed)
        #[arg(long, value_enum, default_value_t = ExtractPolicy::FirstDigits)]
        policy: ExtractPolicy,

        /// 確認プロンプトを省略して検出値をそのまま採用
        #[arg(short, long)]
        yes: bool,

        /// 保存せず記録内容の表示のみ
        #[arg(long)]
        dry_run: bool,

        /// ローカルExcel台帳のパス（指定時はWebhookより優先）
        #[arg(short, long)]
        ledger: Option<PathBuf>,
    },

    /// 写真1枚またはフォルダ内の写真からパレットを検出
    Detect {
        /// 写真ファイルまたはフォルダのパス
        #[arg(required = true)]
        target: PathBuf,

        /// キャッシュを使用（同一画像の再検出をスキップ）
        #[arg(long)]
        use_cache: bool,
    },

    /// 管理票写真のバーコードを読み取り、番号抽出を確認
    Decode {
        /// 管理票写真のパス
        #[arg(required = true)]
        document: PathBuf,

        /// 番号の抽出ポリシー (first-digits/prefixed)
        #[arg(long, value_enum, default_value_t = ExtractPolicy::FirstDigits)]
        policy: ExtractPolicy,
    },

    /// 設定を表示/編集
    Config {
        /// 検出APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// 検出APIエンドポイントを設定
        #[arg(long)]
        set_detector_url: Option<String>,

        /// スプレッドシート追記Webhookを設定
        #[arg(long)]
        set_sheet_url: Option<String>,

        /// 写真アップロードWebhookを設定
        #[arg(long)]
        set_upload_url: Option<String>,

        /// ローカルExcel台帳のパスを設定
        #[arg(long)]
        set_ledger: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },

    /// 検出キャッシュ管理
    Cache {
        /// キャッシュを削除
        #[arg(long)]
        clear: bool,

        /// 対象フォルダ（省略時はカレント）
        #[arg(short, long)]
        folder: Option<PathBuf>,

        /// キャッシュ情報を表示
        #[arg(long)]
        info: bool,
    },
}
