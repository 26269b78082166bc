/// Bootstrap an empty manifest.
pub mod init;
/// Read-only drift report.
pub mod status;
/// The core scan-hash-diff-write pass.
pub mod sync;
