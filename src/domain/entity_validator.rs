/// リクエストボディバリデーター
///
/// 受信したJSONボディを検査し、検証済みのNewEntityに変換する。
use serde_json::Value;
use thiserror::Error;

use crate::domain::NewEntity;

/// リクエストボディ検証エラー
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    /// ボディが欠落または空
    #[error("request body is missing or empty")]
    EmptyBody,

    /// JSONパースに失敗
    #[error("request body is not valid JSON")]
    InvalidJson,

    /// descriptionが欠落または文字列でない
    #[error("description must be a string")]
    InvalidDescription,

    /// descriptionが空文字列
    #[error("description must not be empty")]
    EmptyDescription,

    /// quantityが欠落または整数でない
    #[error("quantity must be an integer")]
    InvalidQuantity,

    /// quantityが負の値
    #[error("quantity must not be negative: {0}")]
    NegativeQuantity(i64),
}

/// リクエストボディバリデーター
pub struct EntityValidator;

impl EntityValidator {
    /// リクエストボディを検証してNewEntityに変換
    ///
    /// # 引数
    /// * `body` - 生のリクエストボディ（欠落時はNone）
    ///
    /// # 戻り値
    /// * `Ok(NewEntity)` - 検証成功時
    /// * `Err(ValidationError)` - 検証失敗時
    pub fn validate_request_body(body: Option<&str>) -> Result<NewEntity, ValidationError> {
        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ValidationError::EmptyBody),
        };

        let value: Value = serde_json::from_str(body).map_err(|_| ValidationError::InvalidJson)?;

        // descriptionは必須の文字列
        let description = value
            .get("description")
            .and_then(|v| v.as_str())
            .ok_or(ValidationError::InvalidDescription)?;

        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        // quantityは必須の整数（小数や文字列は拒否）
        let quantity = value
            .get("quantity")
            .and_then(|v| v.as_i64())
            .ok_or(ValidationError::InvalidQuantity)?;

        if quantity < 0 {
            return Err(ValidationError::NegativeQuantity(quantity));
        }

        Ok(NewEntity {
            description: description.to_string(),
            quantity,
        })
    }
}
