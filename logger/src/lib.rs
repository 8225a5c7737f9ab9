//! Default logging setup for the role equivalence command line tools
#![deny(unsafe_code)]
#![warn(missing_docs)]

use std::{
    cell::RefCell,
    fmt,
    io::{Read, Seek},
    sync::atomic::AtomicUsize,
};

#[derive(Debug)]
struct RssStats {
    current: MemoryAmount,
    max: MemoryAmount,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct MemoryAmount(usize);

impl fmt::Debug for MemoryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for MemoryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 < 1000 {
            write!(f, "{:5}B", self.0)
        } else if self.0 < 1000 << 10 {
            write!(f, "{:5.1}K", self.0 as f64 / (1u64 << 10) as f64)
        } else if self.0 < 1000 << 20 {
            write!(f, "{:5.1}M", self.0 as f64 / (1u64 << 20) as f64)
        } else {
            write!(f, "{:5.1}G", self.0 as f64 / (1u64 << 30) as f64)
        }
    }
}

struct ProcStatus {
    file: std::fs::File,
    buf: String,
}

thread_local! {
    static PROC_STATUS: RefCell<Option<ProcStatus>> = const { RefCell::new(None) };
}

/// Returns the value of a `kB` field of `/proc/self/status` in bytes.
fn status_field(status: &str, field: &str) -> Option<usize> {
    let line = status.lines().find(|line| line.starts_with(field))?;
    let kilobytes = line[field.len()..]
        .trim_start_matches(':')
        .split_ascii_whitespace()
        .next()?
        .parse::<usize>()
        .ok()?;
    Some(kilobytes * 1024)
}

impl RssStats {
    /// Reads resident memory from procfs, returning `None` where it is not available.
    fn now() -> Option<Self> {
        PROC_STATUS.with_borrow_mut(|status| {
            if status.is_none() {
                *status = Some(ProcStatus {
                    file: std::fs::File::open("/proc/self/status").ok()?,
                    buf: String::new(),
                });
            }
            let status = status.as_mut()?;
            status.file.seek(std::io::SeekFrom::Start(0)).ok()?;
            status.buf.clear();
            status.file.read_to_string(&mut status.buf).ok()?;

            Some(Self {
                current: MemoryAmount(status_field(&status.buf, "VmRSS")?),
                max: MemoryAmount(status_field(&status.buf, "VmHWM")?),
            })
        })
    }
}

const TIMESTAMP_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const MEMORY_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Blue)));
const MEMORY_NEW_PEAK_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red)));
const MEMORY_PEAK_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::BrightBlack)));

const TARGET_STYLE: anstyle::Style =
    anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Magenta)));

/// Perform the default logging setup used by the `rolequiv` binary.
///
/// The filter is read from `ROLEQUIV_LOG` (default `info`) and the output style from
/// `ROLEQUIV_LOG_STYLE`. Each record is prefixed by the elapsed time and, where procfs is
/// available, by the current and peak resident memory.
pub fn setup() {
    let start_time = std::time::Instant::now();
    let peak = AtomicUsize::new(RssStats::now().map_or(0, |stats| stats.max.0));

    let last_target = std::sync::Mutex::new(String::new());

    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("ROLEQUIV_LOG", "info")
            .write_style("ROLEQUIV_LOG_STYLE"),
    )
    .format(move |buf, record| {
        use std::io::Write;

        let timestamp = start_time.elapsed();
        let level = record.level();
        let target = record.target();

        let memory = RssStats::now().map(|RssStats { current, max }| {
            let new_peak = peak.fetch_max(max.0, std::sync::atomic::Ordering::Relaxed) < max.0;
            format!(
                " {} {}",
                format_args!("{style}{current}{style:#}", style = MEMORY_STYLE),
                format_args!(
                    "{style}{max}{style:#}",
                    style = if new_peak {
                        MEMORY_NEW_PEAK_STYLE
                    } else {
                        MEMORY_PEAK_STYLE
                    }
                ),
            )
        });
        let memory = memory.as_deref().unwrap_or("");

        // A poisoned lock only means another thread panicked mid-record.
        let mut last_target = last_target
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if target != *last_target {
            last_target.clear();
            last_target.push_str(target);

            writeln!(
                buf,
                "{}{} {}",
                format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
                memory,
                format_args!("{style}{target}{style:#}", style = TARGET_STYLE)
            )?;
        }
        writeln!(
            buf,
            "{}{} {} {}",
            format_args!("{style}{timestamp:>9.2?}{style:#}", style = TIMESTAMP_STYLE),
            memory,
            format_args!(
                "{style}{level}{style:#}",
                style = buf.default_level_style(level),
            ),
            record.args(),
        )
    })
    .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_status_fields() {
        let status = "Name:\trolequiv\nVmHWM:\t    2048 kB\nVmRSS:\t    1024 kB\n";
        assert_eq!(status_field(status, "VmRSS"), Some(1024 * 1024));
        assert_eq!(status_field(status, "VmHWM"), Some(2048 * 1024));
        assert_eq!(status_field(status, "VmSwap"), None);
    }

    #[test]
    fn memory_amounts() {
        assert_eq!(MemoryAmount(512).to_string(), "  512B");
        assert_eq!(MemoryAmount(2048).to_string(), "  2.0K");
        assert_eq!(MemoryAmount(3 << 20).to_string(), "  3.0M");
    }
}
