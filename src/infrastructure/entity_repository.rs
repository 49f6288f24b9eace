/// DynamoDBでエンティティを管理するためのリポジトリ
use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoDbClient;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::{Entity, NewEntity};

/// リポジトリ操作のエラー型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    /// 指定IDのエンティティが存在しない
    #[error("Entity not found with id: {0}")]
    NotFound(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// エンティティ永続化用トレイト
///
/// このトレイトは永続化機能を抽象化し、
/// 異なる実装を可能にします（実際のDynamoDB、テスト用モック）。
#[async_trait]
pub trait EntityRepository: Send + Sync {
    /// 全エンティティを取得
    ///
    /// # 戻り値
    /// * 成功時は`Ok(Vec<Entity>)`（順序はストア依存）
    /// * 失敗時は`Err(RepositoryError)`
    async fn list(&self) -> Result<Vec<Entity>, RepositoryError>;

    /// IDでエンティティを取得
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Entity)`
    /// * 見つからなかった場合は`Err(RepositoryError::NotFound)`
    async fn get_by_id(&self, id: &str) -> Result<Entity, RepositoryError>;

    /// 新しいIDを生成してエンティティを保存
    ///
    /// # 戻り値
    /// * 成功時は作成された`Ok(Entity)`（ID割り当て済み）
    async fn create(&self, payload: NewEntity) -> Result<Entity, RepositoryError>;

    /// 既存エンティティのdescription/quantityを上書き
    ///
    /// IDは不変。対象が存在しない場合は`NotFound`で失敗し、何も書き込まない。
    ///
    /// # 戻り値
    /// * 成功時は更新後の`Ok(Entity)`
    async fn update(&self, id: &str, payload: NewEntity) -> Result<Entity, RepositoryError>;

    /// IDでエンティティを削除
    ///
    /// 対象が存在しない場合は`NotFound`で失敗する。
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// EntityRepositoryのDynamoDB実装
///
/// エンティティを1テーブルに永続化する。属性は
/// id（S、パーティションキー）、description（S）、quantity（N）。
#[derive(Debug, Clone)]
pub struct DynamoEntityRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// エンティティテーブル名
    table_name: String,
}

impl DynamoEntityRepository {
    /// 新しいDynamoEntityRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - エンティティテーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// DynamoDB項目をEntityにデコード
    fn entity_from_item(item: &HashMap<String, AttributeValue>) -> Result<Entity, RepositoryError> {
        let id = item
            .get("id")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| RepositoryError::SerializationError("Missing id attribute".to_string()))?
            .clone();

        let description = item
            .get("description")
            .and_then(|v| v.as_s().ok())
            .ok_or_else(|| {
                RepositoryError::SerializationError("Missing description attribute".to_string())
            })?
            .clone();

        let quantity = item
            .get("quantity")
            .and_then(|v| v.as_n().ok())
            .and_then(|n| n.parse::<i64>().ok())
            .ok_or_else(|| {
                RepositoryError::SerializationError("Missing quantity attribute".to_string())
            })?;

        Ok(Entity {
            id,
            description,
            quantity,
        })
    }
}

#[async_trait]
impl EntityRepository for DynamoEntityRepository {
    async fn list(&self) -> Result<Vec<Entity>, RepositoryError> {
        // テーブル全体をスキャン（ページネーションなし、1ページで返る規模を想定）
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.to_string()))?;

        let items = result.items.unwrap_or_default();

        let mut entities = Vec::with_capacity(items.len());
        for item in &items {
            entities.push(Self::entity_from_item(item)?);
        }

        Ok(entities)
    }

    async fn get_by_id(&self, id: &str) -> Result<Entity, RepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::ReadError(e.to_string()))?;

        match result.item {
            Some(item) => Self::entity_from_item(&item),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    async fn create(&self, payload: NewEntity) -> Result<Entity, RepositoryError> {
        let entity = Entity::new(payload);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item("id", AttributeValue::S(entity.id.clone()))
            .item("description", AttributeValue::S(entity.description.clone()))
            .item("quantity", AttributeValue::N(entity.quantity.to_string()))
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.to_string()))?;

        Ok(entity)
    }

    async fn update(&self, id: &str, payload: NewEntity) -> Result<Entity, RepositoryError> {
        // 対象が存在する場合のみ上書き（条件: id属性が存在する）
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .update_expression("SET #description = :description, #quantity = :quantity")
            .expression_attribute_names("#description", "description")
            .expression_attribute_names("#quantity", "quantity")
            .expression_attribute_values(
                ":description",
                AttributeValue::S(payload.description.clone()),
            )
            .expression_attribute_values(":quantity", AttributeValue::N(payload.quantity.to_string()))
            .condition_expression("attribute_exists(id)")
            .send()
            .await;

        match result {
            Ok(_) => Ok(Entity::with_id(id, payload)),
            Err(err) => {
                let service_error = err.into_service_error();
                if service_error.is_conditional_check_failed_exception() {
                    return Err(RepositoryError::NotFound(id.to_string()));
                }
                Err(RepositoryError::WriteError(service_error.to_string()))
            }
        }
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        // 削除前の属性を返させ、空なら対象が存在しなかったと判定する
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(id.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| RepositoryError::WriteError(e.to_string()))?;

        match result.attributes {
            Some(attributes) if !attributes.is_empty() => Ok(()),
            _ => Err(RepositoryError::NotFound(id.to_string())),
        }
    }
}
