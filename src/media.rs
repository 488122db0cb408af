//! Removable-media and host-power plumbing.
//!
//! Thin wrappers over the system `mount`/`umount`/`shutdown`/`wall`
//! binaries. A device that is already mounted counts as mounted; nothing
//! here is retried, callers degrade to a banner state instead.

use std::process::{Command, Stdio};

use tracing::{info, warn};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MountStatus {
    Mounted,
    Unmounted,
    Error,
}

/// Make sure `device` is mounted read-only on `mountpoint`. EBUSY from
/// mount means the fstab already did the job, which is fine.
pub fn check_mount(device: &str, mountpoint: &str) -> MountStatus {
    let out = Command::new("mount")
        .args(["-o", "ro", device, mountpoint])
        .stderr(Stdio::piped())
        .output();

    match out {
        Ok(out) if out.status.success() => MountStatus::Mounted,
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr).to_ascii_lowercase();
            if stderr.contains("busy") || stderr.contains("already mounted") {
                MountStatus::Mounted
            } else {
                warn!(device, mountpoint, %stderr, "mount failed");
                MountStatus::Error
            }
        }
        Err(e) => {
            warn!(device, error = %e, "cannot run mount");
            MountStatus::Error
        }
    }
}

pub fn unmount(mountpoint: &str) -> MountStatus {
    match Command::new("umount").arg(mountpoint).status() {
        Ok(status) if status.success() => MountStatus::Unmounted,
        Ok(_) | Err(_) => {
            warn!(mountpoint, "umount failed");
            MountStatus::Error
        }
    }
}

/// Warn logged-in users that the box is going down.
pub fn wall(message: &str) {
    let _ = Command::new("wall")
        .arg(message)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();
}

/// Ask the host to halt. Requires the process to run with the privileges
/// the jukebox service normally has.
pub fn halt() {
    info!("requesting system halt");
    let _ = Command::new("shutdown").args(["-h", "now"]).status();
}
