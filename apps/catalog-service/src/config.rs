//! # Catalog Service 設定
//!
//! 環境変数から Catalog Service サーバーの設定を読み込む。
//!
//! 値の取得元は関数で差し替えられる（[`CatalogConfig::from_lookup`]）。
//! テストはプロセスの環境変数を書き換えずに設定の解釈を検証できる。

use std::{env, str::FromStr};

use thiserror::Error;

/// 未設定時のバインドアドレス
const DEFAULT_HOST: &str = "0.0.0.0";
/// 未設定時のポート番号
const DEFAULT_PORT: u16 = 8080;
/// 未設定時のプール最大接続数
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が設定されていない
    #[error("{0} が設定されていません（.env を確認してください）")]
    MissingVar(&'static str),

    /// 値が期待する形式ではない
    #[error("{name} の値が不正です: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Catalog Service サーバーの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データベース接続 URL
    pub database_url: String,
    /// 接続プールの最大接続数
    pub max_connections: u32,
}

impl CatalogConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の取得関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            host: lookup("CATALOG_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("CATALOG_PORT", lookup("CATALOG_PORT"), DEFAULT_PORT)?,
            database_url: lookup("DATABASE_URL")
                .filter(|url| !url.is_empty())
                .ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
            max_connections: parse_or(
                "DATABASE_MAX_CONNECTIONS",
                lookup("DATABASE_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
        })
    }

    /// `host:port` 形式のバインドアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn lookup_from(
        pairs: &[(&'static str, &'static str)],
    ) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_未設定の項目はデフォルト値になる() {
        let config =
            CatalogConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://db/music")]))
                .unwrap();

        assert_eq!(
            config,
            CatalogConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                database_url: "postgres://db/music".to_string(),
                max_connections: 10,
            }
        );
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_from_lookup_全項目を上書きできる() {
        let config = CatalogConfig::from_lookup(lookup_from(&[
            ("CATALOG_HOST", "127.0.0.1"),
            ("CATALOG_PORT", "3000"),
            ("DATABASE_URL", "postgres://db/music"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.max_connections, 4);
    }

    #[rstest]
    #[case::未設定(&[])]
    #[case::空文字列(&[("DATABASE_URL", "")])]
    fn test_from_lookup_database_urlがなければエラー(
        #[case] pairs: &[(&'static str, &'static str)],
    ) {
        let result = CatalogConfig::from_lookup(lookup_from(pairs));

        assert_eq!(result, Err(ConfigError::MissingVar("DATABASE_URL")));
    }

    #[rstest]
    #[case("CATALOG_PORT", "http")]
    #[case("CATALOG_PORT", "70000")]
    #[case("DATABASE_MAX_CONNECTIONS", "-1")]
    fn test_from_lookup_数値でない値はエラー(#[case] name: &'static str, #[case] value: &'static str) {
        let result = CatalogConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://db/music"),
            (name, value),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name,
                value: value.to_string(),
            })
        );
    }
}
