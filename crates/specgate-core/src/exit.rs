/// Process exit status understood by CI orchestrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExitStatus {
    /// Every entry matched its expectation.
    Conformant = 0,
    /// At least one unexpected pass or unexpected fail.
    Violations = 1,
    /// Usage or environment error raised before evaluation.
    Usage = 2,
}

impl ExitStatus {
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conformant => "conformant",
            Self::Violations => "violations",
            Self::Usage => "usage",
        }
    }
}

impl From<ExitStatus> for std::process::ExitCode {
    fn from(value: ExitStatus) -> Self {
        std::process::ExitCode::from(value.code())
    }
}
