//! Exit codes for the restcli application
//!
//! Every reported error ends the invocation with the same non-zero code so
//! that scripts only have to check for success.

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum AppExitCode {
    /// Command completed successfully
    Success = exitcode::OK,

    /// Any reported error: usage, configuration, authentication, network or API
    Failure = 1,
}

impl AppExitCode {
    /// Convert to numeric exit code
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl From<AppExitCode> for i32 {
    fn from(code: AppExitCode) -> Self {
        code.code()
    }
}
