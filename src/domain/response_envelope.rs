// レスポンスエンベロープ
//
// すべてのHTTPレスポンスボディは`{data, errorMessage}`の統一形式をとる。
// 成功時はdataのみ、失敗時はerrorMessageのみが非null。
// OPTIONSプリフライトのみ両フィールドがnullになる。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 統一レスポンスエンベロープ
///
/// 両フィールドは常にJSONに含まれる（nullでも省略しない）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    /// 成功時のペイロード（失敗時はnull）
    pub data: Value,
    /// 失敗時のエラーメッセージ（成功時はnull）
    pub error_message: Option<String>,
}

impl ResponseEnvelope {
    /// 成功レスポンス用エンベロープを作成
    pub fn data(data: Value) -> Self {
        Self {
            data,
            error_message: None,
        }
    }

    /// エラーレスポンス用エンベロープを作成
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            data: Value::Null,
            error_message: Some(message.into()),
        }
    }

    /// 両フィールドがnullのエンベロープを作成（プリフライト用）
    pub fn empty() -> Self {
        Self {
            data: Value::Null,
            error_message: None,
        }
    }
}
