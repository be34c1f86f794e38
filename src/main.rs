// Release builds run as a GUI application (no console window).
// Debug builds keep the console so that log output is visible.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(windows)]
fn main() {
    env_logger::init();

    if let Err(e) = run() {
        // Startup failed before or during the message loop.
        // Show a modal error dialog; a GUI process has no console.
        log::error!("fatal: {e}");
        gobang::platform::win32::show_error_dialog(&e.to_string());
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn run() -> gobang::Result<()> {
    use gobang::platform::ShowMode;
    use gobang::{app, config, Ui};

    let path = config::config_path();
    let settings = config::load_or_default(path.as_deref());

    let ui = Ui::win32()?;
    let shell = app::build(&ui, settings, path)?;
    shell.frame.show(ShowMode::Show);
    ui.run()
}

#[cfg(not(windows))]
fn main() {
    env_logger::init();
    log::error!("gobang needs the Win32 windowing subsystem");
    eprintln!("gobang: this program only runs on Windows");
    std::process::exit(1);
}
