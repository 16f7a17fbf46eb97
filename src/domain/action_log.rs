// ==========================================
// 汽车工厂生产线 - 操作日志领域模型
// ==========================================
// 红线: 所有成功的写操作必须记录
// 用途: 审计追踪 (入库/装配/拆解)
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionLog {
    pub action_id: String,               // 日志ID (uuid v4)
    pub action_type: ActionType,         // 操作类型
    pub action_ts: NaiveDateTime,        // 操作时间戳
    pub engine_code: Option<String>,     // 关联发动机编码
    pub car_id: Option<String>,          // 关联整车ID
    pub payload_json: Option<JsonValue>, // 操作参数 (JSON)
    pub detail: Option<String>,          // 详细描述
}

impl ActionLog {
    /// 以当前本地时间创建日志
    pub fn now(action_type: ActionType) -> Self {
        Self {
            action_id: uuid::Uuid::new_v4().to_string(),
            action_type,
            action_ts: chrono::Local::now().naive_local(),
            engine_code: None,
            car_id: None,
            payload_json: None,
            detail: None,
        }
    }

    pub fn engine_code(mut self, code: &str) -> Self {
        self.engine_code = Some(code.to_string());
        self
    }

    pub fn car_id(mut self, id: &str) -> Self {
        self.car_id = Some(id.to_string());
        self
    }

    pub fn payload(mut self, payload: JsonValue) -> Self {
        self.payload_json = Some(payload);
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    AddEngine,       // 发动机入库
    AssembleCar,     // 整车装配
    DecommissionCar, // 拆解返修
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::AddEngine => "AddEngine",
            ActionType::AssembleCar => "AssembleCar",
            ActionType::DecommissionCar => "DecommissionCar",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
