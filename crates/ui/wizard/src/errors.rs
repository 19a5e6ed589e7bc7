use std::path::Path;
use std::sync::OnceLock;

use color_eyre::Result;
use tracing::error;

static INIT: OnceLock<()> = OnceLock::new();

/// Install the eyre report hook and a panic hook that logs the crash, gives
/// the terminal back and only then prints anything.
pub fn init() -> Result<()> {
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section(crash_note(&crate::config::get_data_dir()))
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        let report = panic_hook.panic_report(panic_info).to_string();
        error!("form session crashed: {}", plain_report(&report));

        if let Err(err) = crate::tui::restore() {
            error!("Unable to restore terminal: {:?}", err);
        }

        #[cfg(not(debug_assertions))]
        {
            use human_panic::{handle_dump, metadata, print_msg};
            let metadata = metadata!();
            let file_path = handle_dump(&metadata, panic_info);
            if let Err(err) = print_msg(file_path, &metadata) {
                eprintln!("human-panic: printing error message failed: {err}");
            }
            eprintln!("{report}");
        }

        #[cfg(debug_assertions)]
        {
            better_panic::Settings::auto()
                .most_recent_first(false)
                .lineno_suffix(true)
                .verbosity(better_panic::Verbosity::Full)
                .create_panic_handler()(panic_info);
        }

        std::process::exit(libc::EXIT_FAILURE);
    }));

    let _ = INIT.set(());
    Ok(())
}

/// Section appended to every panic report.
fn crash_note(log_dir: &Path) -> String {
    format!(
        "The wizard crashed while a form was open. Unsubmitted values were not written. \
         The log in {} may help to track it down.",
        log_dir.display()
    )
}

/// Panic report without terminal colors, for the log file.
fn plain_report(report: &str) -> String {
    strip_ansi_escapes::strip_str(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn crash_note_points_at_the_log_dir() {
        let note = crash_note(&PathBuf::from("/tmp/formwiz/data"));
        assert!(note.contains("Unsubmitted values were not written"));
        assert!(note.ends_with("The log in /tmp/formwiz/data may help to track it down."));
    }

    #[test]
    fn logged_report_has_no_colors() {
        assert_eq!(plain_report("\u{1b}[31mboom\u{1b}[0m at form.rs"), "boom at form.rs");
    }
}
