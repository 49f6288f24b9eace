/// エンティティCRUD API Lambdaエントリポイント
///
/// API Gateway経由のHTTPリクエストを受け取り、
/// HTTPメソッドに応じたCRUD操作をDynamoDBに対して実行する。
use entity_api::application::{CrudHandler, ResponseBuilder};
use entity_api::infrastructure::{init_logging, AppConfig, DynamoEntityRepository};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("Entity API Lambda関数を初期化");

    // 設定とDynamoDBクライアントはプロセスごとに一度だけ構築し、
    // 以降の呼び出しで共有する
    let config = AppConfig::from_env().await?;

    let repository = DynamoEntityRepository::new(
        config.client().clone(),
        config.entities_table().to_string(),
    );
    let handler = CrudHandler::new(repository, ResponseBuilder::new(config.allowed_origin()));

    // Lambda関数を実行
    run(service_fn(|request| handler_fn(&handler, request))).await
}

/// 受信リクエストをCrudHandlerへ委譲する
///
/// すべての失敗はハンドラー内でHTTPレスポンスに変換されるため、
/// この関数自体がErrを返すことはない。
async fn handler_fn(
    handler: &CrudHandler<DynamoEntityRepository>,
    request: Request,
) -> Result<Response<Body>, Error> {
    Ok(handler.handle(request).await)
}
