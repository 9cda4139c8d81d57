use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "visual-search")]
#[command(about = "Búsqueda visual de productos similares por imagen", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログ（演出コンソール行・送信先）を出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像を送信して類似アイテムを表示
    Search {
        /// 検索に使う画像ファイル
        #[arg(required = true)]
        image: PathBuf,

        /// サーバーURL（例: http://127.0.0.1:5000）。設定・環境変数より優先
        #[arg(short, long)]
        server: Option<String>,

        /// 結果をJSONで出力
        #[arg(long)]
        json: bool,

        /// プログレスバーを表示しない
        #[arg(short, long)]
        quiet: bool,
    },

    /// 設定を表示/編集
    Config {
        /// サーバーURLを設定
        #[arg(long)]
        set_server: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
