// ==========================================
// 汽车工厂生产线 - 操作日志仓储 (内存)
// ==========================================
// 红线: 所有写入必须记录
// 说明: 不跨进程持久化
// ==========================================

use crate::domain::action_log::{ActionLog, ActionType};
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::{Mutex, MutexGuard};

// ==========================================
// ActionLogRepository - 操作日志仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据存取
#[derive(Debug, Default)]
pub struct ActionLogRepository {
    logs: Mutex<Vec<ActionLog>>,
}

impl ActionLogRepository {
    /// 创建新的操作日志仓储
    pub fn new() -> Self {
        Self::default()
    }

    fn get_logs(&self) -> RepositoryResult<MutexGuard<'_, Vec<ActionLog>>> {
        self.logs
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 插入操作日志
    ///
    /// # 返回
    /// - `Ok(action_id)`: 成功插入,返回action_id
    pub fn insert(&self, log: &ActionLog) -> RepositoryResult<String> {
        let mut logs = self.get_logs()?;
        logs.push(log.clone());
        Ok(log.action_id.clone())
    }

    /// 在持锁线程中 panic，使日志锁进入中毒状态
    #[cfg(test)]
    pub(crate) fn poison_lock(&self) {
        let _ = std::thread::scope(|scope| {
            scope
                .spawn(|| {
                    let _guard = self.logs.lock();
                    panic!("action log writer panicked");
                })
                .join()
        });
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按写入顺序返回全部日志
    pub fn list_all(&self) -> RepositoryResult<Vec<ActionLog>> {
        Ok(self.get_logs()?.clone())
    }

    /// 最近 N 条日志 (新的在前)
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.get_logs()?;
        Ok(logs.iter().rev().take(limit).cloned().collect())
    }

    /// 查询某台发动机相关的日志
    pub fn find_by_engine_code(&self, engine_code: &str) -> RepositoryResult<Vec<ActionLog>> {
        let logs = self.get_logs()?;
        Ok(logs
            .iter()
            .filter(|log| log.engine_code.as_deref() == Some(engine_code))
            .cloned()
            .collect())
    }

    /// 按ID查询
    pub fn find_by_id(&self, action_id: &str) -> RepositoryResult<ActionLog> {
        let logs = self.get_logs()?;
        logs.iter()
            .find(|log| log.action_id == action_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "action_log".to_string(),
                id: action_id.to_string(),
            })
    }

    pub fn count_by_type(&self, action_type: ActionType) -> RepositoryResult<usize> {
        let logs = self.get_logs()?;
        Ok(logs.iter().filter(|log| log.action_type == action_type).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_query() {
        let repo = ActionLogRepository::new();
        let first = ActionLog::now(ActionType::AddEngine).engine_code("ENG1");
        let second = ActionLog::now(ActionType::AssembleCar).engine_code("ENG1").car_id("CAR1");
        let third = ActionLog::now(ActionType::AddEngine).engine_code("ENG2");

        let id = repo.insert(&first).unwrap();
        assert_eq!(id, first.action_id);
        repo.insert(&second).unwrap();
        repo.insert(&third).unwrap();

        assert_eq!(repo.list_all().unwrap().len(), 3);
        assert_eq!(repo.find_by_engine_code("ENG1").unwrap().len(), 2);
        assert_eq!(repo.count_by_type(ActionType::AddEngine).unwrap(), 2);

        let recent = repo.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].action_id, third.action_id, "最新的日志排在最前");
    }

    #[test]
    fn test_find_by_id_not_found() {
        let repo = ActionLogRepository::new();
        let err = repo.find_by_id("missing").unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[test]
    fn test_poisoned_lock_is_lock_error() {
        let repo = ActionLogRepository::new();
        repo.poison_lock();

        let err = repo.insert(&ActionLog::now(ActionType::AddEngine)).unwrap_err();
        assert!(matches!(err, RepositoryError::LockError(_)));
    }
}
