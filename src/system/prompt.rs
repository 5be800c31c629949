// src/system/prompt.rs

use std::env;

/// The shell variable holding the interactive prompt on this platform.
pub fn prompt_variable() -> &'static str {
    if cfg!(target_os = "windows") {
        "PROMPT"
    } else {
        "PS1"
    }
}

/// Sets the prompt variable of the current process to `env_name`.
///
/// This is process-wide state that lives until the process exits; child
/// processes spawned afterwards (for example by `bioenv call`) inherit it.
/// It is cosmetic, so a value the platform cannot store is logged and skipped
/// instead of being reported as an error.
#[allow(unsafe_code)]
pub fn set_prompt_hint(env_name: &str) {
    let key = prompt_variable();
    if env_name.is_empty() || env_name.contains('\0') {
        log::warn!(
            "Not setting {} to '{}': value cannot be stored in the environment.",
            key,
            env_name.escape_debug()
        );
        return;
    }

    // SAFETY: `bioenv` runs its commands on a single thread and nothing reads
    // the environment concurrently while `init` is executing.
    unsafe {
        env::set_var(key, env_name);
    }
    log::debug!("Set {}={}", key, env_name);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_set_prompt_hint_updates_process_environment() {
        set_prompt_hint("promptenv");
        assert_eq!(env::var(prompt_variable()).unwrap(), "promptenv");
    }

    #[test]
    #[serial]
    fn test_unstorable_value_is_skipped() {
        set_prompt_hint("before");
        set_prompt_hint("bad\0name");
        assert_eq!(env::var(prompt_variable()).unwrap(), "before");
    }
}
