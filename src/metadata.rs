//! Comment header describing a live run

use chrono::{DateTime, Local};
use std::io::{self, Write};
use std::process::Command;

/// Who ran what, when and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub invocation: String,
    pub timestamp: String,
    pub user: String,
    pub host: String,
}

impl RunMetadata {
    /// Collect metadata for the current process
    pub fn collect(args: &[String]) -> Self {
        Self::at(args, Local::now())
    }

    fn at(args: &[String], now: DateTime<Local>) -> Self {
        Self {
            invocation: args.join(" "),
            timestamp: now.format("%d%b%Y %H:%M:%S").to_string(),
            user: current_user(),
            host: host_info(),
        }
    }

    /// Write the `#` header lines
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "# Run as: {}", self.invocation)?;
        writeln!(out, "# at: {}", self.timestamp)?;
        writeln!(out, "# by: {}", self.user)?;
        writeln!(out, "# on: {}", self.host)
    }
}

fn current_user() -> String {
    ["USER", "LOGNAME", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string())
}

fn host_info() -> String {
    match Command::new("uname").arg("-a").output() {
        Ok(output) if output.status.success() => {
            let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if text.is_empty() {
                "unknown".to_string()
            } else {
                text
            }
        }
        Ok(output) => {
            tracing::debug!(status = %output.status, "uname -a failed");
            "unknown".to_string()
        }
        Err(e) => {
            tracing::debug!(error = %e, "uname not available");
            "unknown".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_header_lines() {
        let metadata = RunMetadata {
            invocation: "solvebench ./knapsack -t instances".to_string(),
            timestamp: "04Jun2009 23:50:05".to_string(),
            user: "alex".to_string(),
            host: "Linux box 2.6.18 x86_64".to_string(),
        };
        let mut out = Vec::new();
        metadata.write_to(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "# Run as: solvebench ./knapsack -t instances\n\
             # at: 04Jun2009 23:50:05\n\
             # by: alex\n\
             # on: Linux box 2.6.18 x86_64\n"
        );
    }

    #[test]
    fn test_timestamp_format() {
        let now = Local.with_ymd_and_hms(2009, 6, 4, 23, 50, 5).unwrap();
        let metadata = RunMetadata::at(&["solvebench".to_string()], now);
        assert_eq!(metadata.timestamp, "04Jun2009 23:50:05");
        assert_eq!(metadata.invocation, "solvebench");
    }

    #[test]
    fn test_collect_never_empty() {
        let metadata = RunMetadata::collect(&["solvebench".to_string(), "a".to_string()]);
        assert_eq!(metadata.invocation, "solvebench a");
        assert!(!metadata.user.is_empty());
        assert!(!metadata.host.is_empty());
    }
}
