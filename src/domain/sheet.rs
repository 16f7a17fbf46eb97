// ==========================================
// 汽车工厂生产线 - 技术参数表
// ==========================================
// 职责: 发动机/整车的只读投影 (不含展示格式)
// 说明: 字段 key 为稳定标识，由展示层翻译为标签
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 技术参数表字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetField {
    pub key: String,
    pub value: JsonValue,
}

/// 技术参数表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSheet {
    pub kind: String,                       // 品类标识 (EngineKind / CarKind)
    pub fields: Vec<SheetField>,            // 有序字段
    pub engine: Option<Box<TechnicalSheet>>, // 整车所装发动机
}

impl TechnicalSheet {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
            engine: None,
        }
    }

    /// 追加字段 (链式)
    pub fn field(mut self, key: &str, value: impl Into<JsonValue>) -> Self {
        self.fields.push(SheetField {
            key: key.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn with_engine(mut self, engine: TechnicalSheet) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// 按 key 查询字段值
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }
}

// ==========================================
// Trait: Describable
// ==========================================
pub trait Describable {
    /// 生成当前状态的技术参数表
    fn technical_sheet(&self) -> TechnicalSheet;
}
