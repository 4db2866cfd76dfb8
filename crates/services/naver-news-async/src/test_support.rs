//! Helpers for tests that change process environment.
//!
//! Env writes are `unsafe` on edition 2024. Every caller holds the
//! `#[serial(env)]` lock, so only one thread touches the environment at a time.

/// Holds one variable at a test value and restores the prior value on drop.
pub struct EnvGuard {
    key: &'static str,
    prev: Option<String>,
}

impl EnvGuard {
    /// Sets `key` to `val` for the guard's lifetime.
    #[must_use]
    pub fn set(key: &'static str, val: &str) -> Self {
        Self::replace(key, Some(val))
    }

    /// Unsets `key` for the guard's lifetime.
    #[must_use]
    pub fn remove(key: &'static str) -> Self {
        Self::replace(key, None)
    }

    fn replace(key: &'static str, value: Option<&str>) -> Self {
        let prev = std::env::var(key).ok();
        write_env(key, value);
        Self { key, prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        write_env(self.key, self.prev.as_deref());
    }
}

fn write_env(key: &str, value: Option<&str>) {
    // SAFETY: callers run under #[serial(env)]; no other thread reads or
    // writes the environment concurrently.
    unsafe {
        match value {
            Some(v) => std::env::set_var(key, v),
            None => std::env::remove_var(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEY: &str = "NAVER_NEWS_ASYNC_ENV_GUARD_CHECK";

    #[test]
    #[serial(env)]
    fn nested_guards_restore_in_order() {
        let _clear = EnvGuard::remove(KEY);
        {
            let _outer = EnvGuard::set(KEY, "outer");
            {
                let _inner = EnvGuard::remove(KEY);
                assert!(std::env::var(KEY).is_err());
            }
            assert_eq!(std::env::var(KEY).as_deref(), Ok("outer"));
        }
        assert!(std::env::var(KEY).is_err());
    }
}
