/// CRUDリクエストハンドラー
///
/// HTTPメソッドごとにリポジトリ操作へディスパッチし、
/// 結果を統一エンベロープのレスポンスに変換する。
use lambda_http::http::StatusCode;
use lambda_http::{Body, Request, Response};
use tracing::{error, info, warn};

use crate::application::ResponseBuilder;
use crate::domain::{EntityValidator, ValidationError};
use crate::infrastructure::{EntityRepository, RepositoryError};

/// CRUDリクエストを処理するハンドラー
///
/// リポジトリとレスポンスビルダーは構築時に注入される。
/// リクエストごとの状態は持たず、すべての失敗はHTTPレスポンスに変換される。
pub struct CrudHandler<R>
where
    R: EntityRepository,
{
    /// エンティティリポジトリ
    repository: R,
    /// レスポンスビルダー
    responses: ResponseBuilder,
}

impl<R> CrudHandler<R>
where
    R: EntityRepository,
{
    /// 新しいCrudHandlerを作成
    pub fn new(repository: R, responses: ResponseBuilder) -> Self {
        Self {
            repository,
            responses,
        }
    }

    /// 受信したHTTPリクエストを処理
    ///
    /// # 処理フロー
    /// 1. メソッドとパスを抽出
    /// 2. メソッドに応じたハンドラーへディスパッチ（未対応メソッドは405）
    /// 3. 結果をエンベロープ形式のレスポンスに変換
    pub async fn handle(&self, request: Request) -> Response<Body> {
        let method = request.method().clone();
        let path = request.uri().path().to_string();

        info!(method = %method, path = %path, "Processing request");

        match method.as_str() {
            "GET" => self.process_get(&path).await,
            "POST" => self.process_post(request.body()).await,
            "PUT" => self.process_put(&path, request.body()).await,
            "DELETE" => self.process_delete(&path).await,
            "OPTIONS" => self.process_options(),
            _ => {
                warn!(method = %method, "Unsupported HTTP method");
                self.responses
                    .error(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed")
            }
        }
    }

    /// パスからエンティティIDを抽出
    ///
    /// `/entities`は1セグメント（ID無し）、`/entities/{id}`は2セグメント。
    fn extract_entity_id(path: &str) -> Option<&str> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        if segments.len() == 2 {
            Some(segments[1])
        } else {
            None
        }
    }

    /// リクエストボディを文字列として取得
    fn body_as_str(body: &Body) -> Option<&str> {
        match body {
            Body::Text(text) => Some(text.as_str()),
            Body::Binary(bytes) => std::str::from_utf8(bytes).ok(),
            Body::Empty => None,
            _ => None,
        }
    }

    /// GETリクエストを処理（パスにIDがあれば単体取得、なければ一覧）
    async fn process_get(&self, path: &str) -> Response<Body> {
        match Self::extract_entity_id(path) {
            Some(id) => self.process_get_by_id(id).await,
            None => self.process_get_all().await,
        }
    }

    /// 全エンティティの一覧を返す
    async fn process_get_all(&self) -> Response<Body> {
        match self.repository.list().await {
            Ok(entities) => {
                info!(count = entities.len(), "Listed entities");
                self.responses.success(&entities)
            }
            Err(err) => self.repository_error_response("GET", err),
        }
    }

    /// IDで単一エンティティを返す
    async fn process_get_by_id(&self, id: &str) -> Response<Body> {
        match self.repository.get_by_id(id).await {
            Ok(entity) => self.responses.success(&entity),
            Err(err) => self.repository_error_response("GET", err),
        }
    }

    /// POSTリクエストを処理（ボディ検証→作成）
    async fn process_post(&self, body: &Body) -> Response<Body> {
        let payload = match EntityValidator::validate_request_body(Self::body_as_str(body)) {
            Ok(payload) => payload,
            Err(err) => return self.validation_error_response("POST", err),
        };

        match self.repository.create(payload).await {
            Ok(entity) => {
                info!(entity_id = %entity.id, "Entity created");
                self.responses.success(&entity)
            }
            Err(err) => self.repository_error_response("POST", err),
        }
    }

    /// PUTリクエストを処理（パスID必須、ボディ検証→上書き）
    async fn process_put(&self, path: &str, body: &Body) -> Response<Body> {
        let Some(id) = Self::extract_entity_id(path) else {
            warn!(path = path, "PUT request without entity id");
            return self
                .responses
                .error(StatusCode::BAD_REQUEST, "Missing entity id in path");
        };

        let payload = match EntityValidator::validate_request_body(Self::body_as_str(body)) {
            Ok(payload) => payload,
            Err(err) => return self.validation_error_response("PUT", err),
        };

        match self.repository.update(id, payload).await {
            Ok(entity) => {
                info!(entity_id = %entity.id, "Entity updated");
                self.responses.success(&entity)
            }
            Err(err) => self.repository_error_response("PUT", err),
        }
    }

    /// DELETEリクエストを処理（パスID必須）
    async fn process_delete(&self, path: &str) -> Response<Body> {
        let Some(id) = Self::extract_entity_id(path) else {
            warn!(path = path, "DELETE request without entity id");
            return self
                .responses
                .error(StatusCode::BAD_REQUEST, "Missing entity id in path");
        };

        match self.repository.delete(id).await {
            Ok(()) => {
                info!(entity_id = id, "Entity deleted");
                self.responses.success(&"OK")
            }
            Err(err) => self.repository_error_response("DELETE", err),
        }
    }

    /// OPTIONSリクエストを処理（CORSプリフライト）
    fn process_options(&self) -> Response<Body> {
        info!("Responding to CORS preflight");
        self.responses.preflight()
    }

    /// 検証エラーを400レスポンスに変換
    fn validation_error_response(&self, method: &str, err: ValidationError) -> Response<Body> {
        warn!(method = method, error = %err, "Request body validation failed");
        self.responses
            .error(StatusCode::BAD_REQUEST, &err.to_string())
    }

    /// リポジトリエラーをレスポンスに変換
    ///
    /// NotFoundはクライアントエラー（400）、それ以外はストア障害（500）。
    /// 詳細は変換前にログへ出力し、500のボディには内部情報を含めない。
    fn repository_error_response(&self, method: &str, err: RepositoryError) -> Response<Body> {
        match &err {
            RepositoryError::NotFound(id) => {
                warn!(method = method, entity_id = %id, "Entity not found");
                self.responses
                    .error(StatusCode::BAD_REQUEST, &err.to_string())
            }
            _ => {
                error!(method = method, error = %err, "Store operation failed");
                self.responses
                    .error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}
