//! 日志初始化
//!
//! 使用 `log` 门面 + `fern` 分发。
//! wasm32 下输出到浏览器 console，其它平台输出到 stderr。

use log::LevelFilter;

#[cfg(debug_assertions)]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Debug;
#[cfg(not(debug_assertions))]
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// 初始化全局日志，重复调用时静默忽略
pub fn init() {
    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] {}: {}", record.level(), record.target(), message))
        })
        .level(DEFAULT_LEVEL)
        .chain(console_output());

    if let Err(e) = dispatch.apply() {
        // 已经初始化过
        log::debug!("logger already set: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn console_output() -> fern::Output {
    use log::Level;

    fern::Output::call(|record| {
        let line = wasm_bindgen::JsValue::from_str(&record.args().to_string());
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn console_output() -> fern::Output {
    fern::Output::call(|record| eprintln!("{}", record.args()))
}
