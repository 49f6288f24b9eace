// レスポンスビルダー
//
// ハンドラーの結果（またはエラー）を統一エンベロープに包み、
// CORSヘッダー付きのHTTPレスポンスを構築する。
// エンベロープ自体のシリアライズに失敗した場合は固定の500ボディに置き換える。

use lambda_http::http::header::{
    HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE,
};
use lambda_http::http::StatusCode;
use lambda_http::{Body, Response};
use serde::Serialize;
use tracing::error;

use crate::domain::ResponseEnvelope;

/// エンベロープシリアライズ失敗時の固定フォールバックボディ
const FALLBACK_BODY: &str = r#"{"data": null, "errorMessage": "Internal Server Error"}"#;

/// プリフライトレスポンスで通知する許可メソッド一覧
const ALLOWED_METHODS: &str = "OPTIONS, POST, GET, PUT, DELETE";

/// エンベロープ形式のHTTPレスポンスビルダー
///
/// 許可オリジンは構築時に注入される（プロセス全体の可変状態は持たない）。
pub struct ResponseBuilder {
    /// CORS許可オリジン
    allowed_origin: String,
}

impl ResponseBuilder {
    /// 新しいResponseBuilderを作成
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    /// 成功レスポンス（200）を構築
    ///
    /// ペイロードはエンベロープのdataフィールドに格納される。
    pub fn success<T: Serialize>(&self, data: &T) -> Response<Body> {
        match serde_json::to_value(data) {
            Ok(value) => self.build(StatusCode::OK, self.base_headers(), &ResponseEnvelope::data(value)),
            Err(err) => {
                error!(error = %err, "Failed to serialize response data");
                self.fallback()
            }
        }
    }

    /// エラーレスポンスを構築
    ///
    /// エンベロープのerrorMessageフィールドにメッセージを格納する。
    pub fn error(&self, status: StatusCode, message: &str) -> Response<Body> {
        self.build(status, self.base_headers(), &ResponseEnvelope::error(message))
    }

    /// CORSプリフライトレスポンス（200）を構築
    ///
    /// 許可メソッドヘッダーを追加し、エンベロープは両フィールドnull。
    pub fn preflight(&self) -> Response<Body> {
        self.build(
            StatusCode::OK,
            self.preflight_headers(),
            &ResponseEnvelope::empty(),
        )
    }

    /// エンベロープをシリアライズしてレスポンスを組み立てる
    fn build(
        &self,
        status: StatusCode,
        headers: HeaderMap,
        envelope: &ResponseEnvelope,
    ) -> Response<Body> {
        match serde_json::to_string(envelope) {
            Ok(json) => Self::assemble(status, headers, json),
            Err(err) => {
                error!(error = %err, "Failed to serialize response envelope");
                self.fallback()
            }
        }
    }

    /// シリアライズ失敗時の固定500レスポンス
    fn fallback(&self) -> Response<Body> {
        Self::assemble(
            StatusCode::INTERNAL_SERVER_ERROR,
            self.base_headers(),
            FALLBACK_BODY.to_string(),
        )
    }

    /// ステータス・ヘッダー・ボディからレスポンスを組み立てる
    fn assemble(status: StatusCode, headers: HeaderMap, body: String) -> Response<Body> {
        let mut response = Response::new(Body::Text(body));
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }

    /// 全レスポンス共通のヘッダーを生成
    fn base_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // 設定されたオリジンがヘッダー値として不正な場合は`*`にフォールバック
        let origin = HeaderValue::from_str(&self.allowed_origin)
            .unwrap_or_else(|_| HeaderValue::from_static("*"));
        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);

        headers.insert(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        );

        headers
    }

    /// プリフライト用ヘッダーを生成（共通ヘッダー + 許可メソッド）
    fn preflight_headers(&self) -> HeaderMap {
        let mut headers = self.base_headers();

        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );

        headers
    }
}
