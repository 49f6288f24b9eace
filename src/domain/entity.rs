/// エンティティレコード
///
/// このサービスが永続化する唯一のレコード型。
/// idはサーバー側で生成され、作成後は不変。
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 永続化されるエンティティ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// 一意なエンティティID（UUID v4文字列）
    pub id: String,
    /// エンティティの説明文
    pub description: String,
    /// 数量（非負整数）
    pub quantity: i64,
}

/// 検証済みの作成/更新ペイロード
///
/// idを持たない。バリデーター通過後にのみ構築される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntity {
    /// エンティティの説明文
    pub description: String,
    /// 数量（非負整数）
    pub quantity: i64,
}

impl Entity {
    /// 新しいIDを生成してエンティティを作成
    pub fn new(payload: NewEntity) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: payload.description,
            quantity: payload.quantity,
        }
    }

    /// 既存のIDでエンティティを作成（更新・読み取り時）
    pub fn with_id(id: impl Into<String>, payload: NewEntity) -> Self {
        Self {
            id: id.into(),
            description: payload.description,
            quantity: payload.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payload() -> NewEntity {
        NewEntity {
            description: "widget".to_string(),
            quantity: 5,
        }
    }

    /// 生成されたIDが空でないことを確認
    #[test]
    fn test_new_generates_non_empty_id() {
        let entity = Entity::new(sample_payload());
        assert!(!entity.id.is_empty());
    }

    /// 生成されたIDが呼び出しごとに異なることを確認
    #[test]
    fn test_new_generates_distinct_ids() {
        let first = Entity::new(sample_payload());
        let second = Entity::new(sample_payload());
        assert_ne!(first.id, second.id);
    }

    /// ペイロードの内容が引き継がれることを確認
    #[test]
    fn test_new_preserves_payload_fields() {
        let entity = Entity::new(sample_payload());
        assert_eq!(entity.description, "widget");
        assert_eq!(entity.quantity, 5);
    }

    /// with_idが指定したIDを保持することを確認
    #[test]
    fn test_with_id_preserves_id() {
        let entity = Entity::with_id("abc-123", sample_payload());
        assert_eq!(entity.id, "abc-123");
        assert_eq!(entity.description, "widget");
        assert_eq!(entity.quantity, 5);
    }

    /// JSONシリアライズに3フィールドすべてが含まれることを確認
    #[test]
    fn test_entity_serializes_all_fields() {
        let entity = Entity::with_id("abc-123", sample_payload());
        let value = serde_json::to_value(&entity).unwrap();

        assert_eq!(value["id"], "abc-123");
        assert_eq!(value["description"], "widget");
        assert_eq!(value["quantity"], 5);
    }

    /// JSONからデシリアライズできることを確認
    #[test]
    fn test_entity_deserializes_from_json() {
        let json = r#"{"id":"abc-123","description":"widget","quantity":5}"#;
        let entity: Entity = serde_json::from_str(json).unwrap();

        assert_eq!(entity.id, "abc-123");
        assert_eq!(entity.description, "widget");
        assert_eq!(entity.quantity, 5);
    }
}
