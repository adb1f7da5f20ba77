#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(target_os = "windows")]
mod app;
mod logging;
#[cfg(target_os = "windows")]
mod utils;

#[cfg(target_os = "windows")]
fn run() -> anyhow::Result<()> {
    app::run()
}

#[cfg(not(target_os = "windows"))]
fn run() -> anyhow::Result<()> {
    anyhow::bail!("dino-tray only supports the Windows notification area")
}

fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init()?;

    std::panic::set_hook(Box::new(|info| {
        #[cfg(target_os = "windows")]
        utils::error_dialog(info);
        tracing::error!("{info}");
    }));

    if let Err(e) = run() {
        #[cfg(target_os = "windows")]
        utils::error_dialog(&e);
        tracing::error!("{e:#}");
        std::process::exit(1);
    }

    Ok(())
}
