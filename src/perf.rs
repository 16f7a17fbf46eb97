use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 是否以 info 级别输出耗时
///
/// - Debug 构建默认开启；Release 默认关闭
/// - `CAR_FACTORY_PERF=1` 强制开启，`CAR_FACTORY_PERF=0` 强制关闭
pub fn perf_enabled() -> bool {
    match std::env::var("CAR_FACTORY_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    }
}

/// 性能统计 Guard：记录 elapsed_ms + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = car_factory::perf::PerfGuard::new("assemble_car");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    depth: u32,
    verbose: bool,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let current = d.get();
            d.set(current.saturating_add(1));
            current
        });
        Self {
            op,
            start: Instant::now(),
            depth,
            verbose: perf_enabled(),
        }
    }

    pub fn op(&self) -> &'static str {
        self.op
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_us = self.start.elapsed().as_micros() as u64;
        let elapsed_ms = elapsed_us / 1000;

        if self.verbose {
            tracing::info!(target: "perf", op = self.op, elapsed_ms, elapsed_us, depth = self.depth, "done");
        } else {
            tracing::debug!(target: "perf", op = self.op, elapsed_ms, elapsed_us, depth = self.depth, "done");
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_depth() {
        let outer = PerfGuard::new("outer");
        {
            let inner = PerfGuard::new("inner");
            assert_eq!(inner.depth(), outer.depth() + 1);
        }
        let sibling = PerfGuard::new("sibling");
        assert_eq!(sibling.depth(), outer.depth() + 1, "内层结束后深度应回退");
        assert_eq!(sibling.op(), "sibling");
    }

    #[test]
    fn test_is_true() {
        assert!(is_true(" YES "));
        assert!(is_true("1"));
        assert!(!is_true("off"));
    }
}
