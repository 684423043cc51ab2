use clap::ValueEnum;
use zip::CompressionMethod;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub(crate) enum CompressionFlag {
    Deflated,
    Stored,
}

impl CompressionFlag {
    pub(crate) const fn as_method(self) -> CompressionMethod {
        match self {
            CompressionFlag::Deflated => CompressionMethod::Deflated,
            CompressionFlag::Stored => CompressionMethod::Stored,
        }
    }
}
