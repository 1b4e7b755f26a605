//! # Catalog Service サーバー
//!
//! 楽曲トラック（アーティスト名・タイトル）の CRUD API を提供する HTTP サーバー。
//!
//! ## 役割
//!
//! - **トラック API**: `/tracks` 配下で作成・一覧・取得・部分更新・削除を行う
//! - **データ永続化**: PostgreSQL の `tracks` テーブルに保存する
//! - **ヘルスチェック**: `/health`（Liveness）と `/health/ready`（Readiness）
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CATALOG_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CATALOG_PORT` | No | ポート番号（デフォルト: `8080`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `DATABASE_MAX_CONNECTIONS` | No | 接続プールの最大接続数（デフォルト: `10`） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//! | `RUST_LOG` | No | ログフィルタ（デフォルト: `info,music_store=debug,tower_http=debug`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env を読み込む）
//! cargo run -p music-store-catalog-service
//!
//! # 本番環境
//! LOG_FORMAT=json DATABASE_URL=postgres://... cargo run -p music-store-catalog-service --release
//! ```

use std::sync::Arc;

use anyhow::Context;
use music_store_catalog_service::{
    app_builder::build_app,
    config::CatalogConfig,
    handler::{ReadinessState, TrackState},
};
use music_store_infra::{db, repository::PostgresTrackRepository};
use music_store_shared::observability::{TracingConfig, init_tracing};
use tokio::{net::TcpListener, signal};

/// Catalog Service サーバーのエントリーポイント
///
/// 起動時の失敗（設定、DB 接続、マイグレーション）はエラーとして返し、
/// 非ゼロの終了コードでプロセスを終了する。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("catalog-service");
    init_tracing(&tracing_config).context("トレーシングの初期化に失敗しました")?;
    let _tracing_guard =
        tracing::info_span!("app", service = %tracing_config.service_name).entered();

    // 設定読み込み
    let config = CatalogConfig::from_env().context("設定の読み込みに失敗しました")?;

    tracing::info!(
        "Catalog Service サーバーを起動します: {}",
        config.bind_address()
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("データベース接続に失敗しました")?;
    tracing::info!("データベースに接続しました");

    db::run_migrations(&pool)
        .await
        .context("マイグレーションの適用に失敗しました")?;
    tracing::info!("マイグレーションを適用しました");

    // 依存コンポーネントを初期化
    let track_state = Arc::new(TrackState {
        repository: Arc::new(PostgresTrackRepository::new(pool.clone())),
    });
    let readiness_state = Arc::new(ReadinessState { pool });

    let app = build_app(track_state, readiness_state);

    let listener = TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("{} にバインドできません", config.bind_address()))?;
    tracing::info!(
        "Catalog Service サーバーが起動しました: {}",
        listener.local_addr()?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("サーバーが異常終了しました")?;

    tracing::info!("Catalog Service サーバーを停止しました");
    Ok(())
}

/// Ctrl-C または SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Ctrl-C ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("シャットダウンシグナルを受信しました");
}
