lazy_static! {
    pub static ref DBG_LOG_LEVEL: usize = env_level("PEX_DBG_LOG_LEVEL");

    pub static ref DBG_PRINT_CODE_INFO: usize = env_level("PEX_PRINT_CODE_INFO");
}

/* Unset or malformed variables mean "quiet" rather than a crash at first log */
fn env_level(var: &str) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(0)
}

pub const DBG_CRITICAL: usize = 0;
pub const DBG_WARN: usize = 1;
pub const DBG_INFO: usize = 2;
pub const DBG_EXTRA: usize = 3;

pub const LOG_LVL_STR: &'static [&'static str] = &[
    /* 0 */ "CRITICAL",
    /* 1 */ "WARNING",
    /* 2 */ "INFO",
    /* 3 */ "EXTRA INFO"
];

pub fn level_enabled(lvl: usize) -> bool {
    *DBG_LOG_LEVEL >= lvl.min(LOG_LVL_STR.len() - 1)
}

#[cfg(debug_assertions)]
macro_rules! dbg_log {
    ($lvl:expr, $fmt:literal $(, $v:expr )*) => {
        let lvl = (crate::log::LOG_LVL_STR.len() - 1).min($lvl);
        if crate::log::level_enabled(lvl) {
            if *crate::log::DBG_PRINT_CODE_INFO != 0 {
                eprintln!(
                    concat!("[{}:{}] {}: ", $fmt),
                    file!(), line!(), crate::log::LOG_LVL_STR[lvl] $(, &$v )*
                );
            } else {
                eprintln!(
                    concat!("{}: ", $fmt),
                    crate::log::LOG_LVL_STR[lvl] $(, &$v )*
                );
            }
        }
    };
}

#[cfg(not(debug_assertions))]
macro_rules! dbg_log {
    ($lvl:expr, $fmt:literal $(, $v:expr )*) => {
        /* NOP */
    };
}
