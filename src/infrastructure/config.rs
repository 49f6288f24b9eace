/// アプリケーション設定
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// 設定読み込みのエラー型
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// CORS許可オリジンのデフォルト値
const DEFAULT_ALLOWED_ORIGIN: &str = "*";

/// DynamoDBクライアントとテーブル名、CORS設定を持つアプリケーション設定
///
/// グローバルな可変状態を持たず、ハンドラー構築時に明示的に注入される。
/// 設定は以下の環境変数から読み込む:
/// - ENTITIES_TABLE: エンティティ保存用テーブル名（必須）
/// - ALLOWED_ORIGIN: CORS許可オリジン（省略時は`*`）
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// エンティティテーブル名
    entities_table: String,
    /// CORS許可オリジン
    allowed_origin: String,
}

impl AppConfig {
    /// 環境からAWS設定を読み込み、環境変数から設定値を読み取って新しいAppConfigを作成
    ///
    /// AWS認証情報とリージョンはaws-configにより自動読み込みされる。
    pub async fn from_env() -> Result<Self, AppConfigError> {
        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        // AWS設定からDynamoDBクライアントを作成
        let client = DynamoDbClient::new(&aws_config);

        // 環境変数からテーブル名を読み込み
        let entities_table = std::env::var("ENTITIES_TABLE")
            .map_err(|_| AppConfigError::MissingEnvVar("ENTITIES_TABLE".to_string()))?;

        // CORS許可オリジン（未設定ならデフォルト）
        let allowed_origin =
            std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());

        Ok(Self {
            client,
            entities_table,
            allowed_origin,
        })
    }

    /// 明示的な値で新しいAppConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, entities_table: String, allowed_origin: String) -> Self {
        Self {
            client,
            entities_table,
            allowed_origin,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// エンティティテーブル名を取得
    pub fn entities_table(&self) -> &str {
        &self.entities_table
    }

    /// CORS許可オリジンを取得
    pub fn allowed_origin(&self) -> &str {
        &self.allowed_origin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // テストで環境変数を安全に設定/削除するヘルパー
    // 注: Rust 2024エディションでset_var/remove_varはunsafe
    unsafe fn set_env(key: &str, value: &str) {
        unsafe { std::env::set_var(key, value) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    /// テスト用のDynamoDBクライアントを作成
    async fn test_client() -> DynamoDbClient {
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        DynamoDbClient::new(&aws_config)
    }

    /// エラーの表示メッセージを確認
    #[test]
    fn test_missing_env_var_error_display() {
        let error = AppConfigError::MissingEnvVar("ENTITIES_TABLE".to_string());
        assert_eq!(
            error.to_string(),
            "Missing environment variable: ENTITIES_TABLE"
        );
    }

    /// 明示的な値でAppConfigを構築できることを確認
    #[tokio::test]
    async fn test_app_config_new() {
        let config = AppConfig::new(
            test_client().await,
            "test-entities".to_string(),
            "http://localhost:3000".to_string(),
        );

        assert_eq!(config.entities_table(), "test-entities");
        assert_eq!(config.allowed_origin(), "http://localhost:3000");

        // クライアントがアクセス可能であることを確認
        let _client_ref = config.client();
    }

    /// ENTITIES_TABLEが欠落している場合にfrom_envが失敗することを確認
    #[tokio::test]
    #[serial(app_config_env)]
    async fn test_from_env_missing_table() {
        unsafe {
            remove_env("ENTITIES_TABLE");
            remove_env("ALLOWED_ORIGIN");
        }

        let result = AppConfig::from_env().await;
        assert!(result.is_err());
        match result.unwrap_err() {
            AppConfigError::MissingEnvVar(var) => assert_eq!(var, "ENTITIES_TABLE"),
        }
    }

    /// ALLOWED_ORIGIN未設定時にデフォルト値が使われることを確認
    #[tokio::test]
    #[serial(app_config_env)]
    async fn test_from_env_default_origin() {
        unsafe {
            set_env("ENTITIES_TABLE", "test-entities");
            remove_env("ALLOWED_ORIGIN");
        }

        let config = AppConfig::from_env().await.unwrap();
        assert_eq!(config.entities_table(), "test-entities");
        assert_eq!(config.allowed_origin(), "*");

        unsafe {
            remove_env("ENTITIES_TABLE");
        }
    }

    /// 両方の環境変数が設定されている場合にfrom_envが成功することを確認
    #[tokio::test]
    #[serial(app_config_env)]
    async fn test_from_env_all_set() {
        unsafe {
            set_env("ENTITIES_TABLE", "my-entities-table");
            set_env("ALLOWED_ORIGIN", "http://localhost:3000");
        }

        let config = AppConfig::from_env().await.unwrap();
        assert_eq!(config.entities_table(), "my-entities-table");
        assert_eq!(config.allowed_origin(), "http://localhost:3000");

        unsafe {
            remove_env("ENTITIES_TABLE");
            remove_env("ALLOWED_ORIGIN");
        }
    }
}
