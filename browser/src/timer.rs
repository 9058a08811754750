//! 定时器封装模块
//!
//! 基于 `setTimeout` 的防抖与延迟清除。

use leptos::prelude::*;
use std::time::Duration;

/// 防抖定时器
///
/// 每次 `schedule` 都会取消尚未触发的回调；所属组件卸载时自动清除。
#[derive(Clone, Copy)]
pub struct Debouncer {
    pending: StoredValue<Option<TimeoutHandle>>,
    delay: Duration,
}

impl Debouncer {
    pub fn new(millis: u64) -> Self {
        let debouncer = Self {
            pending: StoredValue::new(None),
            delay: Duration::from_millis(millis),
        };
        on_cleanup(move || debouncer.cancel());
        debouncer
    }

    pub fn schedule<F>(&self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();

        let pending = self.pending;
        let fire = move || {
            pending.try_set_value(None);
            callback();
        };

        match set_timeout_with_handle(fire, self.delay) {
            Ok(handle) => {
                self.pending.try_set_value(Some(handle));
            }
            Err(e) => log::error!("设置定时器失败: {:?}", e),
        }
    }

    /// 取消尚未触发的回调
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.try_update_value(Option::take).flatten() {
            handle.clear();
        }
    }
}

/// 延迟执行一次回调
pub fn run_after<F>(millis: u64, callback: F)
where
    F: FnOnce() + 'static,
{
    if let Err(e) = set_timeout_with_handle(callback, Duration::from_millis(millis)) {
        log::error!("设置定时器失败: {:?}", e);
    }
}

/// 延迟清除一个布尔标记（保存成功提示等）
pub fn reset_after(flag: RwSignal<bool>, millis: u64) {
    run_after(millis, move || {
        flag.try_set(false);
    });
}
