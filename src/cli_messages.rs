//! CLI command messaging system
//!
//! Consistent console output for one-shot commands such as `set-api-url`,
//! `clear-config` and `export`, and for warnings printed by headless runs.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warn,
    Error,
    Success,
}

impl MessageKind {
    fn tag(self) -> &'static str {
        match self {
            MessageKind::Info => "\x1b[1;33m[INFO]\x1b[0m",
            MessageKind::Warn => "\x1b[1;91m[WARN]\x1b[0m",
            MessageKind::Error => "\x1b[1;31m[ERROR]\x1b[0m",
            MessageKind::Success => "\x1b[1;32m[SUCCESS]\x1b[0m",
        }
    }
}

/// One console line: tag, title and optional tab-separated details.
pub fn format_message(kind: MessageKind, title: &str, details: &str) -> String {
    if details.is_empty() {
        format!("{} {}", kind.tag(), title)
    } else {
        format!("{} {}\t {}", kind.tag(), title, details)
    }
}

pub fn print_message(kind: MessageKind, title: &str, details: &str) {
    match kind {
        MessageKind::Error => eprintln!("{}", format_message(kind, title, details)),
        _ => println!("{}", format_message(kind, title, details)),
    }
}

#[macro_export]
macro_rules! print_cmd_info {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Info,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_warn {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Warn,
            $title,
            &format!($($details)*),
        )
    };
}

#[macro_export]
macro_rules! print_cmd_error {
    ($title:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::MessageKind::Error, $title, "")
    };
    ($title:expr, $details:expr) => {
        $crate::cli_messages::print_message($crate::cli_messages::MessageKind::Error, $title, $details)
    };
}

#[macro_export]
macro_rules! print_cmd_success {
    ($title:expr, $($details:tt)*) => {
        $crate::cli_messages::print_message(
            $crate::cli_messages::MessageKind::Success,
            $title,
            &format!($($details)*),
        )
    };
}
