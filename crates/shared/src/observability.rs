//! # ログ出力の初期化
//!
//! `tracing` の subscriber を組み立ててプロセスに登録する。
//!
//! | 環境変数 | 役割 | 未設定時 |
//! |----------|------|----------|
//! | `LOG_FORMAT` | `json` または `pretty` | `pretty` |
//! | `RUST_LOG` | ログフィルタ | [`DEFAULT_ENV_FILTER`] |
//!
//! subscriber 登録前に設定を読むため、読み取り時の警告は stderr に直接出す。

use std::str::FromStr;

use thiserror::Error;

/// `RUST_LOG` 未設定時のフィルタ
pub const DEFAULT_ENV_FILTER: &str = "info,music_store=debug,tower_http=debug";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON。ログ基盤に取り込む環境で使う
    Json,
    /// 端末向けの整形出力
    #[default]
    Pretty,
}

/// `LOG_FORMAT` に解釈できない値が指定された
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("LOG_FORMAT={0:?} は json / pretty のいずれでもありません")]
pub struct UnknownLogFormat(pub String);

/// 大文字小文字と前後の空白は区別しない
impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

impl LogFormat {
    /// 環境変数の値から出力形式を決める
    ///
    /// 未設定なら既定値。解釈できない値は起動を止めず、警告を出して既定値に倒す。
    pub fn from_value(value: Option<&str>) -> Self {
        match value.map(str::parse::<Self>) {
            None => Self::default(),
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                eprintln!("WARNING: {e}（pretty で出力します）");
                Self::default()
            }
        }
    }
}

/// subscriber の組み立てに使う設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 起動時の `app` スパンに `service` として付与する名前
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        let log_format = LogFormat::from_value(std::env::var("LOG_FORMAT").ok().as_deref());
        Self::new(service_name, log_format)
    }
}

/// グローバル subscriber を登録する
///
/// フィルタ、出力形式に応じた fmt レイヤー、`tracing_error::ErrorLayer` の 3 層で構成する。
/// `ErrorLayer` があることで、インフラ層のエラーが生成時点の `SpanTrace` を取得できる。
///
/// 既に subscriber が登録済みの場合はエラーを返す。
#[cfg(feature = "observability")]
pub fn init_tracing(config: &TracingConfig) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::{
        EnvFilter,
        Layer as _,
        fmt,
        layer::SubscriberExt,
        util::SubscriberInitExt,
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_ENV_FILTER));

    // JSON ではイベントのフィールドをトップレベルに展開し、直近のスパン（`app` など）だけを添える
    let output = match config.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(output)
        .with(tracing_error::ErrorLayer::default())
        .try_init()
}
